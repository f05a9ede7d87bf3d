//! Sector crossing detection.
//!
//! The track is divided into ten fixed, evenly spaced spline-position
//! thresholds (0.0, 0.1, .., 0.9) used as split-time checkpoints. This is a
//! fixed configuration, not derived from track data.

use std::time::Duration;

use tracing::trace;

/// Number of fixed sector thresholds per lap.
pub const SECTOR_COUNT: usize = 10;

/// Spline-position threshold for a sector index.
pub fn sector_threshold(sector: usize) -> f64 {
    debug_assert!(sector < SECTOR_COUNT);
    sector as f64 / SECTOR_COUNT as f64
}

/// Tracks sector boundary crossings for one car.
///
/// Fed the car's normalized spline position once per tick, it timestamps each
/// threshold crossing on the session clock. Positions increase within a lap
/// and wrap from just below 1.0 to just above 0.0 at the start/finish line.
/// A car that never moves never crosses a sector and reports no stamps.
#[derive(Debug, Clone, Default)]
pub struct SectorTracker {
    stamps: [Option<Duration>; SECTOR_COUNT],
    last_sector: Option<usize>,
    next_sector: Option<usize>,
}

impl SectorTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume one tick of spline position.
    ///
    /// `now` is the monotonic session clock. At most one crossing is recorded
    /// per call; stamps are overwritten on the next lap's crossing of the
    /// same threshold.
    pub fn advance(&mut self, spline_pos: f64, now: Duration) {
        let Some(next) = self.next_sector else {
            // First observation: expect the next threshold past where we are.
            self.next_sector = Some(Self::sector_after(spline_pos));
            return;
        };

        // A car between the last threshold and the finish line sits
        // numerically near 1.0 but is logically just before sector 0; shift
        // it a lap back so the comparison works (0.96 reads as -0.04).
        let mut pos = spline_pos;
        if next == 0 && pos >= sector_threshold(SECTOR_COUNT - 1) {
            pos -= 1.0;
        }

        if pos >= sector_threshold(next) {
            trace!(sector = next, ?now, "sector crossing");
            self.stamps[next] = Some(now);
            self.last_sector = Some(next);
            self.next_sector = Some(Self::sector_after(pos));
        }
    }

    /// Smallest threshold strictly greater than `pos`, wrapping to 0.
    fn sector_after(pos: f64) -> usize {
        (0..SECTOR_COUNT).find(|&s| sector_threshold(s) > pos).unwrap_or(0)
    }

    /// Timestamp recorded at a sector, `None` until crossed.
    pub fn stamp(&self, sector: usize) -> Option<Duration> {
        self.stamps.get(sector).copied().flatten()
    }

    /// Last sector this car definitively completed.
    pub fn last_sector(&self) -> Option<usize> {
        self.last_sector
    }

    /// Clear all stamps; used on session reset.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
