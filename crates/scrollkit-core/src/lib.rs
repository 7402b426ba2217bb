pub mod animation;
pub mod binding;
pub mod clock;
pub mod config;
pub mod effects;
pub mod error;
pub mod lazy;
pub mod rate;
pub mod visibility;

pub use animation::ScrollAnimator;
pub use binding::{VisibilityBinding, VisibilitySink};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{AppConfig, EasingType, EffectsConfig, ScrollConfig};
pub use effects::ScrollEffects;
pub use error::{Error, Result};
pub use lazy::LazyReveal;
pub use rate::{Debounce, ScheduledDebounce, Throttle};
pub use visibility::{
    ScrollState, ScrollThresholds, ScrollVisibilityController, Transition, VisibilityFlags,
};
