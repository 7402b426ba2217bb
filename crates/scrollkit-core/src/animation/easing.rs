//! Easing curves for scroll animations

pub use crate::config::EasingType;

pub trait EasingTypeExt {
    /// Map progress `t` in [0, 1] to eased progress in [0, 1]
    fn apply(&self, t: f64) -> f64;
}

impl EasingTypeExt for EasingType {
    #[inline]
    fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            EasingType::None => {
                if t < 1.0 {
                    0.0
                } else {
                    1.0
                }
            }
            EasingType::Linear => t,
            EasingType::Cubic => cubic_ease_out(t),
            EasingType::Quintic => quintic_ease_out(t),
            EasingType::EaseOut => exponential_ease_out(t),
            EasingType::EaseInOutQuad => ease_in_out_quad(t),
        }
    }
}

/// 1 - (1-t)³
#[inline]
fn cubic_ease_out(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

/// 1 - (1-t)⁵
#[inline]
fn quintic_ease_out(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(5)
}

/// 1 - 2^(-10t)
#[inline]
fn exponential_ease_out(t: f64) -> f64 {
    if t >= 1.0 {
        1.0
    } else {
        1.0 - 2.0_f64.powf(-10.0 * t)
    }
}

/// Quadratic acceleration for the first half, deceleration for the second
#[inline]
fn ease_in_out_quad(t: f64) -> f64 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        let u = 2.0 * t - 2.0;
        1.0 - u * u / 2.0
    }
}
