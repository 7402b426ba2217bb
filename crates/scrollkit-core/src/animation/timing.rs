//! Progress and interpolation helpers for scroll animations

use std::time::{Duration, Instant};

/// Fraction of `duration` elapsed between `start` and `now`, clamped to [0, 1]
#[inline]
pub fn progress(start: Instant, now: Instant, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    let elapsed = now.saturating_duration_since(start);
    (elapsed.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0)
}

#[inline]
pub fn is_complete(start: Instant, now: Instant, duration: Duration) -> bool {
    now.saturating_duration_since(start) >= duration
}

#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Interpolate between two offsets, rounding to the nearest pixel
#[inline]
pub fn lerp_offset(from: u32, to: u32, t: f64) -> u32 {
    lerp(from as f64, to as f64, t).round().clamp(0.0, u32::MAX as f64) as u32
}

/// Frame interval for a target frame rate (0 falls back to ~60fps)
#[inline]
pub fn frame_interval(fps: u32) -> Duration {
    if fps == 0 {
        Duration::from_millis(16)
    } else {
        Duration::from_millis(1000 / fps as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_offset() {
        assert_eq!(lerp_offset(0, 800, 0.0), 0);
        assert_eq!(lerp_offset(0, 800, 0.5), 400);
        assert_eq!(lerp_offset(800, 0, 0.25), 600);
        assert_eq!(lerp_offset(800, 0, 1.0), 0);
    }

    #[test]
    fn test_progress() {
        let start = Instant::now();
        let d = Duration::from_millis(200);
        assert_eq!(progress(start, start, d), 0.0);
        assert!((progress(start, start + Duration::from_millis(50), d) - 0.25).abs() < 1e-9);
        assert_eq!(progress(start, start + Duration::from_secs(5), d), 1.0);
        assert_eq!(progress(start, start, Duration::ZERO), 1.0);
    }

    #[test]
    fn test_frame_interval() {
        assert_eq!(frame_interval(60), Duration::from_millis(16));
        assert_eq!(frame_interval(0), Duration::from_millis(16));
        assert_eq!(frame_interval(10), Duration::from_millis(100));
    }
}
