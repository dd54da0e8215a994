//! Time helpers for tick-driven animation.
//!
//! Every function takes the current instant explicitly so callers (and tests)
//! control the clock.

use std::time::{Duration, Instant};

/// Animation progress (0.0 to 1.0) at `now`
#[inline]
pub fn progress(start: Instant, now: Instant, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    let elapsed = now.saturating_duration_since(start);
    (elapsed.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0)
}

/// Check if an animation started at `start` has run its full duration
#[inline]
pub fn is_complete(start: Instant, now: Instant, duration: Duration) -> bool {
    now.saturating_duration_since(start) >= duration
}

/// Seconds elapsed between two ticks; zero when there is no previous tick
/// or the clock went backwards
#[inline]
pub fn elapsed_secs(previous: Option<Instant>, now: Instant) -> f64 {
    previous
        .map(|prev| now.saturating_duration_since(prev).as_secs_f64())
        .unwrap_or(0.0)
}

/// Linear interpolation between two values
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp() {
        assert!((lerp(0.0, 100.0, 0.0) - 0.0).abs() < 0.001);
        assert!((lerp(0.0, 100.0, 0.5) - 50.0).abs() < 0.001);
        assert!((lerp(200.0, 100.0, 1.0) - 100.0).abs() < 0.001);
    }

    #[test]
    fn test_progress_zero_duration() {
        let start = Instant::now();
        assert!((progress(start, start, Duration::ZERO) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_progress_midway_and_complete() {
        let start = Instant::now();
        let duration = Duration::from_millis(200);
        let mid = start + Duration::from_millis(100);
        assert!((progress(start, mid, duration) - 0.5).abs() < 0.001);
        assert!(!is_complete(start, mid, duration));
        assert!(is_complete(start, start + duration, duration));
    }

    #[test]
    fn test_elapsed_secs() {
        let start = Instant::now();
        assert_eq!(elapsed_secs(None, start), 0.0);
        let later = start + Duration::from_millis(250);
        assert!((elapsed_secs(Some(start), later) - 0.25).abs() < 1e-9);
        assert_eq!(elapsed_secs(Some(later), start), 0.0);
    }
}
