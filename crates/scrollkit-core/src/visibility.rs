//! Navbar / back-to-top visibility derived from the scroll offset
//!
//! The controller is a pure state transition: feed it the latest offset and
//! it answers which of the two floating elements should be visible. Rendering
//! the answer is left to whoever owns the screen (see [`crate::binding`]).

use serde::Serialize;

pub use crate::config::ScrollThresholds;

/// Scroll position as seen by the controller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScrollState {
    offset: u32,
    last_offset: u32,
}

impl ScrollState {
    /// Offset from the most recent scroll signal
    #[inline]
    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// Offset from the signal before that
    #[inline]
    pub fn last_offset(&self) -> u32 {
        self.last_offset
    }

    /// True when the latest signal moved further down the document
    #[inline]
    pub fn moving_down(&self) -> bool {
        self.offset > self.last_offset
    }
}

/// Visibility of the two scroll-dependent elements
///
/// Only the controller produces these; they are never set directly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct VisibilityFlags {
    navbar_hidden: bool,
    back_to_top_visible: bool,
}

impl VisibilityFlags {
    #[inline]
    pub fn navbar_hidden(&self) -> bool {
        self.navbar_hidden
    }

    #[inline]
    pub fn back_to_top_visible(&self) -> bool {
        self.back_to_top_visible
    }

    #[cfg(test)]
    pub(crate) fn new(navbar_hidden: bool, back_to_top_visible: bool) -> Self {
        Self {
            navbar_hidden,
            back_to_top_visible,
        }
    }
}

/// Which flags flipped between two consecutive evaluations
///
/// Each field holds the new value when that flag changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Transition {
    pub navbar_hidden: Option<bool>,
    pub back_to_top_visible: Option<bool>,
}

impl Transition {
    pub fn between(previous: VisibilityFlags, next: VisibilityFlags) -> Self {
        Self {
            navbar_hidden: (previous.navbar_hidden != next.navbar_hidden)
                .then_some(next.navbar_hidden),
            back_to_top_visible: (previous.back_to_top_visible != next.back_to_top_visible)
                .then_some(next.back_to_top_visible),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.navbar_hidden.is_none() && self.back_to_top_visible.is_none()
    }
}

/// Derives [`VisibilityFlags`] from a stream of scroll offsets
#[derive(Debug, Clone, Default)]
pub struct ScrollVisibilityController {
    thresholds: ScrollThresholds,
    state: ScrollState,
    flags: VisibilityFlags,
}

impl ScrollVisibilityController {
    pub fn new(thresholds: ScrollThresholds) -> Self {
        Self {
            thresholds,
            state: ScrollState::default(),
            flags: VisibilityFlags::default(),
        }
    }

    /// Record a new scroll offset and return the resulting visibility
    ///
    /// The navbar hides only while moving down past the hide threshold; an
    /// offset equal to the previous one counts as not moving down.
    pub fn on_scroll(&mut self, offset: u32) -> VisibilityFlags {
        let last_offset = self.state.offset;

        let flags = VisibilityFlags {
            navbar_hidden: offset > self.thresholds.hide_navbar && offset > last_offset,
            back_to_top_visible: offset > self.thresholds.show_back_to_top,
        };

        self.state = ScrollState {
            offset,
            last_offset,
        };
        self.flags = flags;
        flags
    }

    /// Flags from the most recent `on_scroll`
    #[inline]
    pub fn flags(&self) -> VisibilityFlags {
        self.flags
    }

    #[inline]
    pub fn state(&self) -> ScrollState {
        self.state
    }

    #[inline]
    pub fn thresholds(&self) -> ScrollThresholds {
        self.thresholds
    }

    /// Replace thresholds; takes effect on the next scroll signal
    pub fn set_thresholds(&mut self, thresholds: ScrollThresholds) {
        self.thresholds = thresholds;
    }

    /// Forget all scroll history, as on a page reload
    pub fn reset(&mut self) {
        self.state = ScrollState::default();
        self.flags = VisibilityFlags::default();
    }
}
