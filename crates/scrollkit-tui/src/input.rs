use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::App;

/// Input action that can be performed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    ScrollDown,
    ScrollUp,
    ScrollHalfPageDown,
    ScrollHalfPageUp,
    ScrollPageDown,
    ScrollPageUp,
    JumpToTop,
    JumpToBottom,
    PendingG, // First 'g' press, waiting for second 'g'
    BackToTop,
    NextSection,
    PrevSection,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, app: &App) -> Action {
    match (key.code, key.modifiers) {
        // Quit
        (KeyCode::Char('q'), KeyModifiers::NONE) => Action::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,
        (KeyCode::Esc, _) => Action::Quit,

        // Line scrolling
        (KeyCode::Char('j'), KeyModifiers::NONE) => Action::ScrollDown,
        (KeyCode::Char('k'), KeyModifiers::NONE) => Action::ScrollUp,
        (KeyCode::Down, KeyModifiers::NONE) => Action::ScrollDown,
        (KeyCode::Up, KeyModifiers::NONE) => Action::ScrollUp,

        // Page scrolling
        (KeyCode::Char('d'), KeyModifiers::CONTROL) => Action::ScrollHalfPageDown,
        (KeyCode::Char('u'), KeyModifiers::CONTROL) => Action::ScrollHalfPageUp,
        (KeyCode::Char('f'), KeyModifiers::CONTROL) => Action::ScrollPageDown,
        (KeyCode::Char('b'), KeyModifiers::CONTROL) => Action::ScrollPageUp,
        (KeyCode::PageDown, _) | (KeyCode::Char(' '), KeyModifiers::NONE) => Action::ScrollPageDown,
        (KeyCode::PageUp, _) => Action::ScrollPageUp,

        // Jump to top/bottom
        (KeyCode::Char('g'), KeyModifiers::NONE) => {
            // gg requires double press
            if app.pending_key == Some('g') {
                Action::JumpToTop
            } else {
                Action::PendingG
            }
        }
        (KeyCode::Char('G'), KeyModifiers::SHIFT) | (KeyCode::Char('G'), KeyModifiers::NONE) => {
            Action::JumpToBottom
        }
        (KeyCode::Home, _) => Action::JumpToTop,
        (KeyCode::End, _) => Action::JumpToBottom,

        // Animated navigation
        (KeyCode::Char('t'), KeyModifiers::NONE) => Action::BackToTop,
        (KeyCode::Tab, KeyModifiers::NONE) | (KeyCode::Char(']'), KeyModifiers::NONE) => {
            Action::NextSection
        }
        (KeyCode::BackTab, _) | (KeyCode::Char('['), KeyModifiers::NONE) => Action::PrevSection,

        _ => Action::None,
    }
}

/// Apply an action to the app; returns true if the scroll position moved or
/// an animation started
pub fn apply_action(app: &mut App, action: Action) -> bool {
    if action != Action::PendingG {
        app.clear_pending_key();
    }
    if action != Action::None {
        app.clear_status();
    }
    match action {
        Action::Quit => {
            app.should_quit = true;
            false
        }
        Action::ScrollDown => app.move_down(),
        Action::ScrollUp => app.move_up(),
        Action::ScrollHalfPageDown => app.scroll_half_page_down(),
        Action::ScrollHalfPageUp => app.scroll_half_page_up(),
        Action::ScrollPageDown => app.scroll_page_down(),
        Action::ScrollPageUp => app.scroll_page_up(),
        Action::JumpToTop => app.jump_to_top(),
        Action::JumpToBottom => app.jump_to_bottom(),
        Action::PendingG => {
            app.pending_key = Some('g');
            false
        }
        Action::BackToTop => app.back_to_top(),
        Action::NextSection => {
            let moved = app.next_section();
            if !moved {
                app.set_status("No section below");
            }
            moved
        }
        Action::PrevSection => {
            let moved = app.prev_section();
            if !moved {
                app.set_status("No section above");
            }
            moved
        }
        Action::None => false,
    }
}
