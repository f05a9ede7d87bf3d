//! Host engine boundary.
//!
//! The simulator owns the process, the update/render loop, and all telemetry
//! and drawing primitives. This module abstracts that surface into two traits
//! so the rest of the crate never touches the host directly:
//!
//! - [`Telemetry`]: read-only car and session data, polled once per tick.
//! - [`Gui`]: widget creation, textured-quad drawing, console output.
//!
//! Raw host integers for session type and status are converted to closed
//! enums at this boundary; everything past it works with typed values. UI
//! change notifications arrive as [`UiEvent`] values handed to
//! [`Pitboard::on_event`](crate::Pitboard::on_event) by the host glue,
//! instead of per-control callback registration.

use std::path::Path;
use std::time::Duration;

use crate::Result;
use crate::prefs::Setting;

/// Opaque handle to a texture loaded by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u64);

/// Opaque handle to a widget control (spinner, checkbox, button, label).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ControlId(pub u64);

/// RGBA colour tint applied to a textured quad.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tint {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Tint {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Tint { r, g, b, a }
    }

    /// White at the given opacity, the tint used for board and card chrome.
    pub const fn white(opacity: f32) -> Self {
        Tint { r: 1.0, g: 1.0, b: 1.0, a: opacity }
    }
}

/// Screen-space rectangle, widget-relative coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Session type, converted from the host's raw integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionType {
    Practice,
    Qualify,
    Race,
    Hotlap,
}

impl SessionType {
    /// Convert from the raw host value; `None` for anything unmapped
    /// (including the host's -1 "no session yet").
    pub fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            0 => Some(SessionType::Practice),
            1 => Some(SessionType::Qualify),
            2 => Some(SessionType::Race),
            3 => Some(SessionType::Hotlap),
            _ => None,
        }
    }

    /// Practice, qualify and hotlap share the leaderboard-style board.
    pub fn is_quali_style(self) -> bool {
        !matches!(self, SessionType::Race)
    }
}

/// Session status, converted from the host's raw integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionStatus {
    Off,
    Replay,
    #[default]
    Live,
    Pause,
}

impl SessionStatus {
    pub fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            0 => Some(SessionStatus::Off),
            1 => Some(SessionStatus::Replay),
            2 => Some(SessionStatus::Live),
            3 => Some(SessionStatus::Pause),
            _ => None,
        }
    }
}

/// Per-tick session snapshot, assembled by the host glue from the graphics,
/// physics and static info blocks.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub session_type: Option<SessionType>,
    pub status: SessionStatus,
    /// Laps completed by the player.
    pub completed_laps: i32,
    /// Elapsed time in the current lap, milliseconds.
    pub lap_time_ms: i32,
    /// Player's last lap time in milliseconds, 0 until a lap is set.
    pub last_lap_ms: i32,
    /// Session time remaining in milliseconds, <= 0 when not applicable.
    pub time_left_ms: i32,
    /// Total lap count, race only.
    pub number_of_laps: i32,
    pub is_timed_race: bool,
    pub in_pit: bool,
    pub pit_limiter_on: bool,
    /// Fuel on board, litres.
    pub fuel: f64,
    /// Player's normalized spline position, [0, 1).
    pub normalized_car_position: f64,
    /// Total distance travelled this session, metres.
    pub distance_traveled: f64,
    /// Track length in metres.
    pub track_length: f64,
    /// Monotonic session clock; sector stamps and UI timers use this.
    pub clock: Duration,
}

/// Read-only telemetry surface, polled once per tick.
pub trait Telemetry {
    /// Number of car slots in the session.
    fn car_count(&self) -> usize;

    /// Driver name for a car index, `None` when no such car exists.
    fn driver_name(&self, car: usize) -> Option<String>;

    /// Normalized spline position in [0, 1).
    fn spline_position(&self, car: usize) -> f64;

    /// Laps completed by the car.
    fn lap_count(&self, car: usize) -> i32;

    /// Best lap in milliseconds, `None` until the car sets one.
    fn best_lap_ms(&self, car: usize) -> Option<i32>;

    /// 1-based leaderboard rank, used outside races.
    fn leaderboard_position(&self, car: usize) -> i32;

    /// Session-level snapshot for this tick.
    fn session_state(&self) -> SessionState;
}

/// Spinner control description.
#[derive(Debug, Clone)]
pub struct SpinnerSpec {
    pub caption: &'static str,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub min: i32,
    pub max: i32,
    pub step: i32,
    pub value: i32,
    /// Which setting this spinner edits; echoed back in
    /// [`UiEvent::SpinnerChanged`].
    pub setting: Setting,
}

/// Checkbox control description.
#[derive(Debug, Clone)]
pub struct CheckboxSpec {
    pub caption: &'static str,
    pub x: f32,
    pub y: f32,
    pub checked: bool,
    pub setting: Setting,
}

/// Button actions the board surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonAction {
    /// Toggle the preferences panel.
    Prefs,
    /// Cycle the board orientation.
    Orientation,
}

/// Button control description.
#[derive(Debug, Clone)]
pub struct ButtonSpec {
    pub caption: &'static str,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub action: ButtonAction,
}

/// Widget and rendering surface provided by the host.
///
/// Implementations report their own failures through
/// [`PitboardError`](crate::PitboardError); the
/// [`texture_error_with_source`](crate::PitboardError::texture_error_with_source)
/// and [`host_error`](crate::PitboardError::host_error) constructors exist
/// for exactly that.
pub trait Gui {
    /// Load a texture from disk, returning an opaque handle.
    fn load_texture(&mut self, path: &Path) -> Result<TextureId>;

    /// Draw a textured quad with the given tint.
    fn draw_quad(&mut self, quad: Quad, texture: TextureId, tint: Tint);

    /// Write a line to the host console.
    fn console(&mut self, message: &str);

    fn set_widget_size(&mut self, width: f32, height: f32);
    fn set_widget_title(&mut self, title: &str);
    fn set_background_opacity(&mut self, opacity: f32);
    /// Current widget position on screen; used to detect window moves.
    fn widget_position(&self) -> (f32, f32);

    fn add_spinner(&mut self, spec: SpinnerSpec) -> ControlId;
    fn add_checkbox(&mut self, spec: CheckboxSpec) -> ControlId;
    fn add_button(&mut self, spec: ButtonSpec) -> ControlId;
    fn add_label(&mut self, text: &str, x: f32, y: f32) -> ControlId;

    fn set_control_visible(&mut self, control: ControlId, visible: bool);
    fn set_control_text(&mut self, control: ControlId, text: &str);
}

/// UI notification delivered by the host glue.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UiEvent {
    /// Widget (re)activated.
    Activated,
    /// Preferences button clicked.
    PrefsClicked,
    /// Orientation button clicked.
    OrientationClicked,
    /// A preferences spinner changed value.
    SpinnerChanged(Setting, i32),
    /// A preferences checkbox changed state.
    CheckboxChanged(Setting, bool),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_type_raw_conversion_is_closed() {
        assert_eq!(SessionType::from_raw(0), Some(SessionType::Practice));
        assert_eq!(SessionType::from_raw(1), Some(SessionType::Qualify));
        assert_eq!(SessionType::from_raw(2), Some(SessionType::Race));
        assert_eq!(SessionType::from_raw(3), Some(SessionType::Hotlap));
        assert_eq!(SessionType::from_raw(-1), None);
        assert_eq!(SessionType::from_raw(4), None);
    }

    #[test]
    fn session_status_raw_conversion() {
        assert_eq!(SessionStatus::from_raw(1), Some(SessionStatus::Replay));
        assert_eq!(SessionStatus::from_raw(2), Some(SessionStatus::Live));
        assert_eq!(SessionStatus::from_raw(99), None);
    }

    #[test]
    fn quali_style_sessions() {
        assert!(SessionType::Practice.is_quali_style());
        assert!(SessionType::Qualify.is_quali_style());
        assert!(SessionType::Hotlap.is_quali_style());
        assert!(!SessionType::Race.is_quali_style());
    }
}
