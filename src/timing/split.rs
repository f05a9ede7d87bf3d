//! Split computation between two cars' sector tables.

use crate::timing::SectorTracker;

/// Elapsed-time gap between two cars at the last sector both completed.
///
/// The car with the larger (worse) position number supplies the reference
/// sector: the car ahead may already have started the next one, so its
/// `last_sector` can overshoot the boundary still relevant for comparison.
///
/// Returns signed seconds, `stamp(a) - stamp(b)` in that argument order;
/// callers map the sign to ahead/behind colouring. `None` when the trailing
/// car has no completed sector or either stamp is missing.
pub fn last_split(
    tracker_a: &SectorTracker,
    position_a: i32,
    tracker_b: &SectorTracker,
    position_b: i32,
) -> Option<f64> {
    let sector = if position_a > position_b {
        tracker_a.last_sector()
    } else {
        tracker_b.last_sector()
    }?;

    let s_a = tracker_a.stamp(sector)?;
    let s_b = tracker_b.stamp(sector)?;

    Some(s_a.as_secs_f64() - s_b.as_secs_f64())
}

/// Round a gap to one-decisecond precision.
pub fn round_to_decisecond(seconds: f64) -> f64 {
    (seconds * 10.0).round() / 10.0
}

/// Change in a split between two consecutive board refreshes.
///
/// Both operands are rounded to deciseconds first so timer noise does not
/// present as a near-zero delta.
pub fn split_delta(current: f64, previous: f64) -> f64 {
    round_to_decisecond(current) - round_to_decisecond(previous)
}
