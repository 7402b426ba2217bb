//! Scroll animation controller
//!
//! Combines easing curves and timing helpers. Call one of the `scroll_to*`
//! methods to start an animation, then `update()` each frame to read the
//! interpolated offset.

use std::time::{Duration, Instant};

use tracing::debug;

use super::easing::{EasingType, EasingTypeExt};
use super::timing::{frame_interval, is_complete, lerp_offset, progress};
use crate::clock::{Clock, SystemClock};
use crate::config::ScrollConfig;

#[derive(Debug, Clone)]
struct ActiveAnimation {
    start: Instant,
    from: u32,
    to: u32,
    duration: Duration,
    easing: EasingType,
}

/// Drives a scroll offset toward a target with easing
#[derive(Debug, Clone)]
pub struct ScrollAnimator<C = SystemClock> {
    animation: Option<ActiveAnimation>,
    config: ScrollConfig,
    current: u32,
    clock: C,
}

impl Default for ScrollAnimator<SystemClock> {
    fn default() -> Self {
        Self::new(ScrollConfig::default())
    }
}

impl ScrollAnimator<SystemClock> {
    pub fn new(config: ScrollConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> ScrollAnimator<C> {
    pub fn with_clock(config: ScrollConfig, clock: C) -> Self {
        Self {
            animation: None,
            config,
            current: 0,
            clock,
        }
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Tick interval to use while animating
    pub fn frame_interval(&self) -> Duration {
        frame_interval(self.config.animation_fps)
    }

    /// Final offset once the running animation completes
    pub fn target(&self) -> u32 {
        self.animation
            .as_ref()
            .map(|a| a.to)
            .unwrap_or(self.current)
    }

    #[inline]
    pub fn current(&self) -> u32 {
        self.current
    }

    /// Jump immediately, stopping any animation (user-driven scrolling)
    pub fn set_position(&mut self, offset: u32) {
        self.animation = None;
        self.current = offset;
    }

    /// Animate to the top of the document
    pub fn scroll_to_top(&mut self) -> bool {
        let duration = Duration::from_millis(self.config.back_to_top_duration_ms);
        self.animate(0, u32::MAX, duration)
    }

    /// Animate so the anchor lands `anchor_offset` below the viewport top
    ///
    /// A missing anchor is ignored and the position stays where it is.
    pub fn scroll_to_anchor(&mut self, anchor_top: Option<u32>, max_offset: u32) -> bool {
        let Some(top) = anchor_top else {
            debug!("Anchor target missing, ignoring jump");
            return false;
        };
        let target = top.saturating_sub(self.config.anchor_offset);
        let duration = Duration::from_millis(self.config.anchor_duration_ms);
        self.animate(target, max_offset, duration)
    }

    /// Animate to an arbitrary offset using the anchor duration
    pub fn scroll_to(&mut self, target: u32, max_offset: u32) -> bool {
        let duration = Duration::from_millis(self.config.anchor_duration_ms);
        self.animate(target, max_offset, duration)
    }

    /// Start an animation from the current position; returns false when
    /// already at the target
    fn animate(&mut self, target: u32, max_offset: u32, duration: Duration) -> bool {
        let target = target.min(max_offset);

        if self.current == target {
            self.animation = None;
            return false;
        }

        if !self.config.smooth_enabled || duration.is_zero() {
            self.current = target;
            self.animation = None;
            return true;
        }

        self.animation = Some(ActiveAnimation {
            start: self.clock.now(),
            from: self.current,
            to: target,
            duration,
            easing: self.config.easing,
        });
        true
    }

    /// Advance the animation and return the current offset
    pub fn update(&mut self, max_offset: u32) -> u32 {
        if let Some(anim) = &self.animation {
            let now = self.clock.now();
            if is_complete(anim.start, now, anim.duration) {
                self.current = anim.to.min(max_offset);
                self.animation = None;
            } else {
                let t = anim.easing.apply(progress(anim.start, now, anim.duration));
                self.current = lerp_offset(anim.from, anim.to, t).min(max_offset);
            }
        }
        self.current
    }

    /// Stop at the current interpolated position
    pub fn cancel(&mut self) {
        self.animation = None;
    }

    pub fn reset(&mut self) {
        self.animation = None;
        self.current = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    fn animator(clock: &ManualClock) -> ScrollAnimator<ManualClock> {
        ScrollAnimator::with_clock(ScrollConfig::default(), clock.clone())
    }

    #[test]
    fn test_back_to_top_reaches_zero_after_duration() {
        let clock = ManualClock::new();
        let mut anim = animator(&clock);
        anim.set_position(1600);

        assert!(anim.scroll_to_top());
        assert!(anim.is_animating());
        assert_eq!(anim.target(), 0);

        clock.advance_ms(400);
        // Halfway through an in-out curve is halfway there
        assert_eq!(anim.update(5000), 800);

        clock.advance_ms(400);
        assert_eq!(anim.update(5000), 0);
        assert!(!anim.is_animating());
    }

    #[test]
    fn test_anchor_lands_below_top_offset() {
        let clock = ManualClock::new();
        let mut anim = animator(&clock);

        assert!(anim.scroll_to_anchor(Some(900), 5000));
        assert_eq!(anim.target(), 800);
        clock.advance_ms(1000);
        assert_eq!(anim.update(5000), 800);
    }

    #[test]
    fn test_anchor_near_top_clamps_at_zero() {
        let clock = ManualClock::new();
        let mut anim = animator(&clock);
        anim.set_position(500);
        assert!(anim.scroll_to_anchor(Some(40), 5000));
        assert_eq!(anim.target(), 0);
    }

    #[test]
    fn test_missing_anchor_is_noop() {
        let clock = ManualClock::new();
        let mut anim = animator(&clock);
        anim.set_position(320);

        assert!(!anim.scroll_to_anchor(None, 5000));
        assert!(!anim.is_animating());
        assert_eq!(anim.update(5000), 320);
    }

    #[test]
    fn test_instant_jump_when_smooth_disabled() {
        let config = ScrollConfig {
            smooth_enabled: false,
            ..Default::default()
        };
        let mut anim = ScrollAnimator::with_clock(config, ManualClock::new());
        anim.set_position(700);
        assert!(anim.scroll_to_top());
        assert_eq!(anim.current(), 0);
        assert!(!anim.is_animating());
    }

    #[test]
    fn test_target_clamped_to_max_offset() {
        let clock = ManualClock::new();
        let mut anim = animator(&clock);
        anim.scroll_to(10_000, 1200);
        assert_eq!(anim.target(), 1200);
    }

    #[test]
    fn test_manual_scroll_interrupts_animation() {
        let clock = ManualClock::new();
        let mut anim = animator(&clock);
        anim.set_position(1000);
        anim.scroll_to_top();
        clock.advance_ms(100);
        anim.update(5000);

        anim.set_position(640);
        assert!(!anim.is_animating());
        clock.advance_ms(1000);
        assert_eq!(anim.update(5000), 640);
    }

    #[test]
    fn test_cancel_stops_at_interpolated_position() {
        let clock = ManualClock::new();
        let mut anim = animator(&clock);
        anim.set_position(1600);
        anim.scroll_to_top();
        clock.advance_ms(400);
        assert_eq!(anim.update(5000), 800);

        anim.cancel();
        assert!(!anim.is_animating());
        assert_eq!(anim.target(), 800);
        clock.advance_ms(1000);
        assert_eq!(anim.update(5000), 800);
    }

    #[test]
    fn test_already_at_target_does_not_animate() {
        let clock = ManualClock::new();
        let mut anim = animator(&clock);
        assert!(!anim.scroll_to_top());
        assert!(!anim.is_animating());
    }
}
