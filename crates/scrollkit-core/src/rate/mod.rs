//! Rate limiting for event handlers
//!
//! - `debounce` - run once after a quiet period, driven by polling a [`Clock`](crate::Clock)
//! - `throttle` - run at most once per interval
//! - `scheduled` - debounce on the tokio timer, no polling required

pub mod debounce;
pub mod scheduled;
pub mod throttle;

pub use debounce::Debounce;
pub use scheduled::ScheduledDebounce;
pub use throttle::Throttle;
