//! Geometry and timing helpers shared by the gesture classifier and replay.

use std::time::{Duration, Instant};

use crate::input::events::Point;

/// Euclidean distance between two points.
///
/// Used to decide whether a touch has strayed far enough from its origin to
/// abandon a pending hold.
pub fn distance(a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    (dx * dx + dy * dy).sqrt()
}

/// Milliseconds elapsed between `start` and `now`, saturating at zero.
pub fn elapsed_ms(start: Instant, now: Instant) -> u64 {
    now.saturating_duration_since(start).as_millis() as u64
}

/// Instant that lies `ms` milliseconds after `start`.
pub fn at_ms(start: Instant, ms: u64) -> Instant {
    start + Duration::from_millis(ms)
}
