//! Heads-up pit board overlay for racing simulators.
//!
//! Pitboard renders the classic trackside pit board inside the sim: position,
//! laps or time remaining, the cars ahead and behind with live splits, and
//! your last lap. The board appears once per lap at the start/finish line and
//! fades out of the way after a configurable window.
//!
//! # Features
//!
//! - **Sector splits**: ten virtual timing lines per lap, so gaps update
//!   every tenth of a lap instead of once per lap
//! - **Race and leaderboard modes**: splits and deltas during races,
//!   best-lap gaps in practice, qualifying and hotlap sessions
//! - **Glyph-card rendering**: pre-rendered letter textures in the style of
//!   a physical pit board
//! - **Host-agnostic**: all simulator access goes through the [`Telemetry`]
//!   and [`Gui`] traits, so the core is testable off-sim
//!
//! # Quick Start
//!
//! The host glue constructs one [`Pitboard`] and forwards the sim callbacks:
//!
//! ```rust,no_run
//! use pitboard::{Pitboard, PitboardConfig, UiEvent};
//! # use pitboard::{Gui, Telemetry};
//! # fn demo(gui: &mut dyn Gui, telemetry: &dyn Telemetry) -> pitboard::Result<()> {
//! let config = PitboardConfig {
//!     tex_dir: "apps/python/pitboard/imgs".into(),
//!     prefs_path: "plugins/pitboard.json".into(),
//! };
//! let mut app = Pitboard::new(gui, telemetry, config)?;
//!
//! // Per tick, then per frame:
//! app.on_update(telemetry, gui);
//! app.on_render(gui);
//!
//! // Control notifications:
//! app.on_event(UiEvent::PrefsClicked, gui);
//! # Ok(())
//! # }
//! ```

mod app;
mod error;
pub mod host;
pub mod prefs;
mod ui;

pub mod board;
pub mod session;
pub mod timing;

#[cfg(test)]
mod test_utils;

// Core exports
pub use app::{Pitboard, PitboardConfig};
pub use error::{PitboardError, Result};

// Host boundary exports
pub use host::{
    ButtonAction, ButtonSpec, CheckboxSpec, ControlId, Gui, Quad, SessionState, SessionStatus,
    SessionType, SpinnerSpec, Telemetry, TextureId, Tint, UiEvent,
};

// Domain exports
pub use board::{Board, BoardText, GlyphLibrary};
pub use prefs::{OrientationX, OrientationY, Prefs, Setting};
pub use session::Session;
