//! Plugin entry points.
//!
//! The host invokes three synchronous callbacks: a per-tick data update, a
//! per-frame render, and UI events. Each is guarded so that a failing tick is
//! logged and skipped; the next tick starts over from current state and the
//! host loop is never disturbed.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::PathBuf;
use std::time::Duration;

use tracing::error;

use crate::Result;
use crate::board::{Board, GlyphLibrary};
use crate::host::{Gui, Telemetry, UiEvent};
use crate::prefs::{Prefs, Setting};
use crate::session::Session;
use crate::ui::Ui;

/// Filesystem locations the plugin reads and writes.
#[derive(Debug, Clone)]
pub struct PitboardConfig {
    /// Directory holding the board, logo and card textures.
    pub tex_dir: PathBuf,
    /// Path of the JSON preferences file.
    pub prefs_path: PathBuf,
}

/// The pit board application, constructed once at plugin initialization and
/// threaded into every host callback.
pub struct Pitboard {
    config: PitboardConfig,
    session: Session,
    board: Board,
    library: GlyphLibrary,
    ui: Ui,
    last_clock: Duration,
}

impl Pitboard {
    /// Initialize the plugin: preferences, glyph library, board textures and
    /// the widget surface.
    pub fn new(
        gui: &mut dyn Gui,
        telemetry: &dyn Telemetry,
        config: PitboardConfig,
    ) -> Result<Self> {
        let prefs = Prefs::load(&config.prefs_path, gui);
        let library = GlyphLibrary::load(gui, &config.tex_dir)?;

        let driver = telemetry.driver_name(0);
        let board = Board::new(gui, &config.tex_dir, driver.as_deref())?;

        let clock = telemetry.session_state().clock;
        let ui = Ui::new(gui, &config.tex_dir, &prefs, clock)?;
        let session = Session::new(prefs);

        Ok(Pitboard { config, session, board, library, ui, last_clock: clock })
    }

    /// Per-tick update callback.
    pub fn on_update(&mut self, telemetry: &dyn Telemetry, gui: &mut dyn Gui) {
        let state = telemetry.session_state();
        self.last_clock = state.clock;
        let result = catch_unwind(AssertUnwindSafe(|| {
            self.session.update_data(telemetry);
            self.session.update_board(&mut self.board, &self.library, &state);
            self.ui.update(gui, state.clock);
        }));
        if let Err(panic) = result {
            report_panic(gui, "update", panic.as_ref());
        }
    }

    /// Per-frame render callback.
    pub fn on_render(&mut self, gui: &mut dyn Gui) {
        let opacity = self.session.prefs.opacity as f32;
        let scale = self.session.scale() as f32;
        let orientation = (self.session.prefs.orientation_x, self.session.prefs.orientation_y);
        let widget_size = self.ui.widget_size();

        let result = catch_unwind(AssertUnwindSafe(|| {
            self.board.render(gui, opacity, scale, orientation, widget_size);
            self.ui.render(gui, opacity);
        }));
        if let Err(panic) = result {
            report_panic(gui, "render", panic.as_ref());
        }
    }

    /// UI event callback (buttons, spinners, checkboxes, activation).
    pub fn on_event(&mut self, event: UiEvent, gui: &mut dyn Gui) {
        match event {
            UiEvent::Activated => self.ui.activated(self.last_clock),
            UiEvent::PrefsClicked => {
                let closed = self.ui.toggle_prefs(gui, &self.session.prefs);
                if closed {
                    if let Err(err) = self.session.prefs.save(&self.config.prefs_path) {
                        error!(%err, "failed to save preferences");
                        gui.console(&format!("pitboard: cannot save preferences: {err}"));
                    }
                }
            }
            UiEvent::OrientationClicked => {
                self.session.prefs.cycle_orientation();
                self.ui.set_orientation_label(gui, &self.session.prefs);
            }
            UiEvent::SpinnerChanged(setting, value) => self.apply_spinner(setting, value),
            UiEvent::CheckboxChanged(setting, checked) => self.apply_checkbox(setting, checked),
        }
    }

    fn apply_spinner(&mut self, setting: Setting, value: i32) {
        let prefs = &mut self.session.prefs;
        match setting {
            Setting::DisplayTimeout => prefs.display_timeout = value,
            Setting::FullsizeTimeout => prefs.fullsize_timeout = value,
            Setting::FullsizeScale => prefs.fullsize_scale = f64::from(value) / 100.0,
            Setting::SmallsizeScale => prefs.smallsize_scale = f64::from(value) / 100.0,
            Setting::Opacity => prefs.opacity = f64::from(value) / 100.0,
            Setting::DetailedDelta | Setting::ShortNames | Setting::UseSurname => {
                error!(?setting, "spinner event for a checkbox setting, ignoring");
            }
        }
    }

    fn apply_checkbox(&mut self, setting: Setting, checked: bool) {
        let prefs = &mut self.session.prefs;
        match setting {
            Setting::DetailedDelta => prefs.detailed_delta = checked,
            Setting::ShortNames => prefs.short_names = checked,
            Setting::UseSurname => prefs.use_surname = checked,
            _ => error!(?setting, "checkbox event for a spinner setting, ignoring"),
        }
    }

    /// Read access for the host glue and tests.
    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn board(&self) -> &Board {
        &self.board
    }
}

fn report_panic(gui: &mut dyn Gui, callback: &str, panic: &(dyn std::any::Any + Send)) {
    let message = panic
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| panic.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string());

    error!(callback, %message, "pitboard callback panicked");
    gui.console(&format!("pitboard error in {callback} (logged): {message}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{MockGui, MockTelemetry};

    fn app(gui: &mut MockGui, telemetry: &MockTelemetry, tag: &str) -> Pitboard {
        let config = PitboardConfig {
            tex_dir: PathBuf::from("/imgs"),
            prefs_path: std::env::temp_dir()
                .join(format!("pitboard-app-{tag}-{}.json", std::process::id())),
        };
        Pitboard::new(gui, telemetry, config).unwrap()
    }

    #[test]
    fn spinner_events_scale_percentages() {
        let mut gui = MockGui::new();
        let telemetry = MockTelemetry::race(3);
        let mut app = app(&mut gui, &telemetry, "spinner");

        app.on_event(UiEvent::SpinnerChanged(Setting::Opacity, 60), &mut gui);
        assert_eq!(app.session().prefs.opacity, 0.6);

        app.on_event(UiEvent::SpinnerChanged(Setting::DisplayTimeout, -1), &mut gui);
        assert_eq!(app.session().prefs.display_timeout, -1);
    }

    #[test]
    fn checkbox_events_set_flags() {
        let mut gui = MockGui::new();
        let telemetry = MockTelemetry::race(3);
        let mut app = app(&mut gui, &telemetry, "checkbox");

        app.on_event(UiEvent::CheckboxChanged(Setting::ShortNames, true), &mut gui);
        assert!(app.session().prefs.short_names);
    }

    #[test]
    fn prefs_close_saves_file() {
        let mut gui = MockGui::new();
        let telemetry = MockTelemetry::race(3);
        let mut app = app(&mut gui, &telemetry, "save");
        let path = app.config.prefs_path.clone();

        app.on_event(UiEvent::PrefsClicked, &mut gui); // open
        app.on_event(UiEvent::SpinnerChanged(Setting::DisplayTimeout, 20), &mut gui);
        app.on_event(UiEvent::PrefsClicked, &mut gui); // close -> save

        let raw = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert!(raw.contains(r#""display_timeout":20"#));
    }
}
