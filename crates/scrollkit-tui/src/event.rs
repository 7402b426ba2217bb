use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind, MouseButton, MouseEventKind};

/// Event handler for terminal events
pub struct EventHandler {
    tick_rate: Duration,
    animation_tick: Duration,
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64, animation_tick: Duration) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms),
            animation_tick,
        }
    }

    /// Poll for the next event at the idle tick rate
    pub fn next(&self) -> Result<Option<AppEvent>> {
        self.poll(self.tick_rate)
    }

    /// Poll at animation frame rate so eased scrolling stays smooth
    pub fn next_animation(&self) -> Result<Option<AppEvent>> {
        self.poll(self.animation_tick)
    }

    fn poll(&self, timeout: Duration) -> Result<Option<AppEvent>> {
        if !event::poll(timeout)? {
            return Ok(Some(AppEvent::Tick));
        }
        let event = match event::read()? {
            // Only handle key press events, ignore release events
            Event::Key(key) if key.kind == KeyEventKind::Press => Some(AppEvent::Key(key)),
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::ScrollDown => Some(AppEvent::WheelDown),
                MouseEventKind::ScrollUp => Some(AppEvent::WheelUp),
                MouseEventKind::Down(MouseButton::Left) => {
                    Some(AppEvent::Click(mouse.column, mouse.row))
                }
                _ => None,
            },
            Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
            _ => None,
        };
        Ok(event)
    }
}

/// Application events
#[derive(Debug)]
pub enum AppEvent {
    /// A key was pressed
    Key(KeyEvent),
    WheelDown,
    WheelUp,
    /// Left click at (column, row)
    Click(u16, u16),
    /// Terminal was resized
    Resize(u16, u16),
    /// Tick event for periodic updates
    Tick,
}

/// Deferred notifications produced by rate-limited handlers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerSignal {
    /// Accepted mouse wheel step, in rows (negative scrolls up)
    Wheel(i32),
    /// The terminal stopped resizing
    ResizeSettled,
    /// Scrolling stopped for the settle period
    ScrollSettled,
}
