use std::io::{self, Stdout};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};
use tokio::sync::mpsc;
use tracing::{debug, info};

use scrollkit_core::{AppConfig, Debounce, ScheduledDebounce, Throttle};
use scrollkit_tui::{
    event::{AppEvent, EventHandler, ViewerSignal},
    input::{apply_action, handle_key_event},
    widgets::{BackToTopWidget, DocumentWidget, NavbarWidget, StatusBarWidget},
    App, Document, Theme,
};

/// Rows below the document taken by the status bar
const STATUS_ROWS: u16 = 1;

pub async fn run(config: Arc<AppConfig>, file: &Path) -> Result<()> {
    let document = Document::load(file)
        .with_context(|| format!("Failed to open {}", file.display()))?;
    info!(
        path = %file.display(),
        blocks = document.blocks.len(),
        images = document.image_count(),
        "Opening document"
    );

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    let title = format!("scrollkit - {}", document.title);
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, SetTitle(title))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, config, document).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    config: Arc<AppConfig>,
    document: Document,
) -> Result<()> {
    let theme = Theme::default();
    let mut app = App::new(Arc::clone(&config), document);

    let size = terminal.size()?;
    app.resize(size.width, size.height.saturating_sub(STATUS_ROWS));

    let event_handler = EventHandler::new(config.ui.tick_rate_ms, app.animation_tick());

    // Rate-limited handlers report back through this channel
    let (signal_tx, mut signal_rx) = mpsc::unbounded_channel::<ViewerSignal>();

    let resize_tx = signal_tx.clone();
    let mut resize_debounce = Debounce::new(
        move || {
            let _ = resize_tx.send(ViewerSignal::ResizeSettled);
        },
        Duration::from_millis(config.rate.resize_debounce_ms),
        false,
    );

    let step = config.ui.scroll_lines as i32;
    let wheel_interval = Duration::from_millis(config.rate.wheel_throttle_ms);
    let down_tx = signal_tx.clone();
    let mut wheel_down = Throttle::new(
        move || {
            let _ = down_tx.send(ViewerSignal::Wheel(step));
        },
        wheel_interval,
    );
    let up_tx = signal_tx.clone();
    let mut wheel_up = Throttle::new(
        move || {
            let _ = up_tx.send(ViewerSignal::Wheel(-step));
        },
        wheel_interval,
    );

    let settle_tx = signal_tx;
    let mut scroll_settle = ScheduledDebounce::new(
        move || {
            let _ = settle_tx.send(ViewerSignal::ScrollSettled);
        },
        Duration::from_millis(config.rate.scroll_settle_ms),
        false,
    );

    let mut last_offset = app.offset();

    // Main loop
    loop {
        resize_debounce.poll();

        // Process deferred signals (non-blocking)
        while let Ok(signal) = signal_rx.try_recv() {
            match signal {
                ViewerSignal::Wheel(rows) => {
                    app.scroll_rows(rows as i64);
                }
                ViewerSignal::ResizeSettled => {
                    let size = terminal.size()?;
                    debug!(width = size.width, height = size.height, "Resize settled");
                    app.resize(size.width, size.height.saturating_sub(STATUS_ROWS));
                }
                ViewerSignal::ScrollSettled => app.on_scroll_settled(),
            }
        }

        app.tick_animation();

        if app.offset() != last_offset {
            last_offset = app.offset();
            scroll_settle.call();
        }

        // Draw UI
        terminal.draw(|frame| {
            let main_layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(1), Constraint::Length(STATUS_ROWS)])
                .split(frame.area());

            // Chrome is drawn over the document
            DocumentWidget::render(frame, main_layout[0], &app, &theme);
            NavbarWidget::render(frame, main_layout[0], &app, &theme);
            BackToTopWidget::render(frame, main_layout[0], &mut app, &theme);
            StatusBarWidget::render(frame, main_layout[1], &app, &theme);
        })?;

        // Poll at frame rate while an animation runs
        let event = if app.is_animating() {
            event_handler.next_animation()?
        } else {
            event_handler.next()?
        };
        if let Some(event) = event {
            match event {
                AppEvent::Key(key) => {
                    let action = handle_key_event(key, &app);
                    apply_action(&mut app, action);
                }
                AppEvent::WheelDown => {
                    wheel_down.call();
                }
                AppEvent::WheelUp => {
                    wheel_up.call();
                }
                AppEvent::Click(column, row) => {
                    app.click(column, row);
                }
                AppEvent::Resize(_, _) => {
                    resize_debounce.call();
                }
                AppEvent::Tick => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    info!(offset = app.offset(), "Viewer closed");
    Ok(())
}
