//! Preference persistence.
//!
//! A flat JSON object holding a fixed allow-list of settings. Unknown keys
//! are logged and ignored; a missing or unreadable file means defaults; the
//! save is a full overwrite. I/O failures are logged to the host console and
//! never fatal.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::Result;
use crate::error::PitboardError;
use crate::host::Gui;

/// Horizontal board anchor, stored as `"L"` / `"R"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OrientationX {
    #[default]
    #[serde(rename = "L")]
    Left,
    #[serde(rename = "R")]
    Right,
}

/// Vertical board anchor, stored as `"U"` / `"D"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OrientationY {
    #[default]
    #[serde(rename = "U")]
    Up,
    #[serde(rename = "D")]
    Down,
}

/// Identifies a preference edited through the widget UI; echoed back in
/// spinner/checkbox events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Setting {
    DetailedDelta,
    DisplayTimeout,
    FullsizeScale,
    FullsizeTimeout,
    Opacity,
    ShortNames,
    SmallsizeScale,
    UseSurname,
}

/// User preferences, the full persisted allow-list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Prefs {
    /// Show the full split delta next to a split, not just its direction.
    pub detailed_delta: bool,
    /// Seconds into the lap the board stays up; -1 means always on.
    pub display_timeout: i32,
    pub fullsize_scale: f64,
    /// Seconds at full size before shrinking to the small scale.
    pub fullsize_timeout: i32,
    pub opacity: f64,
    pub orientation_x: OrientationX,
    pub orientation_y: OrientationY,
    pub short_names: bool,
    pub smallsize_scale: f64,
    pub use_surname: bool,
}

impl Default for Prefs {
    fn default() -> Self {
        Prefs {
            detailed_delta: true,
            display_timeout: 45,
            fullsize_scale: 1.0,
            fullsize_timeout: 15,
            opacity: 0.8,
            orientation_x: OrientationX::Left,
            orientation_y: OrientationY::Up,
            short_names: false,
            smallsize_scale: 0.5,
            use_surname: false,
        }
    }
}

impl Prefs {
    /// Load preferences, falling back to defaults on any failure.
    ///
    /// Unknown keys and unreadable values are reported to the host console
    /// and skipped; known keys still apply around them.
    pub fn load(path: &Path, gui: &mut dyn Gui) -> Self {
        let mut prefs = Prefs::default();

        let data = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return prefs,
            Err(err) => {
                warn!(path = %path.display(), %err, "cannot read preferences");
                gui.console(&format!("pitboard: error opening \"{}\": {err}", path.display()));
                return prefs;
            }
        };

        let map: serde_json::Map<String, serde_json::Value> = match serde_json::from_str(&data) {
            Ok(map) => map,
            Err(err) => {
                warn!(path = %path.display(), %err, "malformed preferences file");
                gui.console(&format!("pitboard: malformed \"{}\": {err}", path.display()));
                return prefs;
            }
        };

        for (key, value) in &map {
            if !prefs.apply_json(key, value) {
                warn!(key, "unknown preference key");
                gui.console(&format!(
                    "pitboard: unknown key \"{key}\" in \"{}\"",
                    path.display()
                ));
            }
        }

        prefs
    }

    /// Apply one JSON entry; returns false for keys outside the allow-list.
    fn apply_json(&mut self, key: &str, value: &serde_json::Value) -> bool {
        fn take<T: serde::de::DeserializeOwned>(value: &serde_json::Value) -> Option<T> {
            serde_json::from_value(value.clone()).ok()
        }

        let applied = match key {
            "detailed_delta" => take(value).map(|v| self.detailed_delta = v),
            "display_timeout" => take(value).map(|v| self.display_timeout = v),
            "fullsize_scale" => take(value).map(|v| self.fullsize_scale = v),
            "fullsize_timeout" => take(value).map(|v| self.fullsize_timeout = v),
            "opacity" => take(value).map(|v| self.opacity = v),
            "orientation_x" => take(value).map(|v| self.orientation_x = v),
            "orientation_y" => take(value).map(|v| self.orientation_y = v),
            "short_names" => take(value).map(|v| self.short_names = v),
            "smallsize_scale" => take(value).map(|v| self.smallsize_scale = v),
            "use_surname" => take(value).map(|v| self.use_surname = v),
            _ => return false,
        };

        if applied.is_none() {
            warn!(key, %value, "preference value has wrong type, keeping default");
        }
        true
    }

    /// Write the full preference object, overwriting any previous file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let data = serde_json::to_string(self)
            .map_err(|e| PitboardError::parse_error("preferences", e.to_string()))?;
        fs::write(path, data).map_err(|e| PitboardError::prefs_error(path, e))?;
        info!(path = %path.display(), "preferences saved");
        Ok(())
    }

    /// Advance the board anchor to the next corner:
    /// top-left -> top-right -> bottom-right -> bottom-left.
    pub fn cycle_orientation(&mut self) {
        use OrientationX::*;
        use OrientationY::*;
        (self.orientation_x, self.orientation_y) =
            match (self.orientation_x, self.orientation_y) {
                (Left, Up) => (Right, Up),
                (Right, Up) => (Right, Down),
                (Right, Down) => (Left, Down),
                (Left, Down) => (Left, Up),
            };
    }

    /// Human-readable corner name for the orientation label.
    pub fn orientation_label(&self) -> &'static str {
        match (self.orientation_x, self.orientation_y) {
            (OrientationX::Left, OrientationY::Up) => "top-left",
            (OrientationX::Right, OrientationY::Up) => "top-right",
            (OrientationX::Left, OrientationY::Down) => "bottom-left",
            (OrientationX::Right, OrientationY::Down) => "bottom-right",
        }
    }
}
