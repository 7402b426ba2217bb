//! Smooth programmatic scrolling
//!
//! - `easing` - easing curves mapping progress [0, 1] to [0, 1]
//! - `timing` - progress and interpolation helpers
//! - `animator` - [`ScrollAnimator`], which drives an offset toward a target

pub mod animator;
pub mod easing;
pub mod timing;

pub use animator::ScrollAnimator;
pub use easing::EasingTypeExt;
