//! Glue between the controller and whatever draws the navbar and back-to-top control

use tracing::debug;

use crate::visibility::{ScrollVisibilityController, Transition, VisibilityFlags};

/// Receives visibility decisions and turns them into visuals
pub trait VisibilitySink {
    fn apply(&mut self, flags: VisibilityFlags);
}

impl<F> VisibilitySink for F
where
    F: FnMut(VisibilityFlags),
{
    fn apply(&mut self, flags: VisibilityFlags) {
        self(flags)
    }
}

/// Owns a controller and pushes every evaluation into a sink
pub struct VisibilityBinding<S> {
    controller: ScrollVisibilityController,
    sink: S,
}

impl<S: VisibilitySink> VisibilityBinding<S> {
    pub fn new(controller: ScrollVisibilityController, sink: S) -> Self {
        Self { controller, sink }
    }

    /// Feed one scroll signal through the controller and into the sink
    pub fn handle_scroll(&mut self, offset: u32) -> Transition {
        let previous = self.controller.flags();
        let flags = self.controller.on_scroll(offset);
        self.sink.apply(flags);

        let transition = Transition::between(previous, flags);
        if let Some(hidden) = transition.navbar_hidden {
            debug!(offset, hidden, "Navbar visibility changed");
        }
        if let Some(visible) = transition.back_to_top_visible {
            debug!(offset, visible, "Back-to-top visibility changed");
        }
        transition
    }

    /// Reset scroll history and push the cleared flags to the sink
    pub fn reset(&mut self) {
        self.controller.reset();
        self.sink.apply(self.controller.flags());
    }

    pub fn controller(&self) -> &ScrollVisibilityController {
        &self.controller
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingSink {
        applied: Vec<VisibilityFlags>,
    }

    impl VisibilitySink for RecordingSink {
        fn apply(&mut self, flags: VisibilityFlags) {
            self.applied.push(flags);
        }
    }

    #[test]
    fn test_every_signal_reaches_sink() {
        let mut binding =
            VisibilityBinding::new(ScrollVisibilityController::default(), RecordingSink::default());
        for offset in [0, 250, 400, 150] {
            binding.handle_scroll(offset);
        }
        assert_eq!(
            binding.sink().applied,
            vec![
                VisibilityFlags::new(false, false),
                VisibilityFlags::new(true, false),
                VisibilityFlags::new(true, true),
                VisibilityFlags::new(false, false),
            ]
        );
    }

    #[test]
    fn test_transitions_only_on_change() {
        let mut binding = VisibilityBinding::new(ScrollVisibilityController::default(), |_: VisibilityFlags| {});
        assert!(binding.handle_scroll(100).is_empty());
        let t = binding.handle_scroll(350);
        assert_eq!(t.navbar_hidden, Some(true));
        assert_eq!(t.back_to_top_visible, Some(true));
        let t = binding.handle_scroll(360);
        assert!(t.is_empty());
        let t = binding.handle_scroll(10);
        assert_eq!(t.navbar_hidden, Some(false));
        assert_eq!(t.back_to_top_visible, Some(false));
    }

    #[test]
    fn test_reset_pushes_cleared_flags() {
        let mut binding =
            VisibilityBinding::new(ScrollVisibilityController::default(), RecordingSink::default());
        binding.handle_scroll(900);
        binding.reset();
        assert_eq!(binding.sink().applied.last(), Some(&VisibilityFlags::default()));
    }
}
