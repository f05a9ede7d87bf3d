//! Split timing: sector crossing detection, split computation, and the
//! string formatting used on the board.

mod format;
mod sector;
mod split;

pub use format::{gap_to_str, lap_time_to_str};
pub use sector::{SECTOR_COUNT, SectorTracker, sector_threshold};
pub use split::{last_split, round_to_decisecond, split_delta};
