//! Widget glue: title handling, the preferences panel and its controls.

use std::path::Path;
use std::time::Duration;

use tracing::debug;

use crate::Result;
use crate::host::{
    ButtonAction, ButtonSpec, CheckboxSpec, ControlId, Gui, Quad, SpinnerSpec, TextureId, Tint,
};
use crate::prefs::Prefs;

/// Widget strip height; the board hangs below (or above) it.
pub const WIDGET_HEIGHT: f32 = 30.0;
/// Widget width at scale 1.0.
const WIDGET_BASE_WIDTH: f32 = 120.0;

/// Widget size with the preferences panel expanded.
const PANEL_WIDTH: f32 = 520.0;
const PANEL_HEIGHT: f32 = 340.0;

/// Seconds the title stays up after activation or a widget move.
const TITLE_TIMEOUT: Duration = Duration::from_secs(10);

/// Everything related to the app widget that is not the board itself.
pub struct Ui {
    widget_width: f32,
    prefs_texture: TextureId,
    controls: Vec<ControlId>,
    orientation_label: ControlId,
    prefs_visible: bool,
    display_title: bool,
    title_since: Duration,
    position: (f32, f32),
}

impl Ui {
    /// Create the widget surface: base size, prefs button and the hidden
    /// preferences controls.
    pub fn new(
        gui: &mut dyn Gui,
        tex_dir: &Path,
        prefs: &Prefs,
        clock: Duration,
    ) -> Result<Self> {
        let widget_width = WIDGET_BASE_WIDTH * prefs.fullsize_scale as f32;
        gui.set_widget_size(widget_width, WIDGET_HEIGHT);
        gui.set_background_opacity(0.2);

        let prefs_texture = gui.load_texture(&tex_dir.join("prefs.png"))?;
        gui.add_button(ButtonSpec {
            caption: "",
            x: 7.0,
            y: 7.0,
            width: 16.0,
            height: 16.0,
            action: ButtonAction::Prefs,
        });

        let (controls, orientation_label) = Self::create_prefs_controls(gui, prefs);
        let position = gui.widget_position();

        Ok(Ui {
            widget_width,
            prefs_texture,
            controls,
            orientation_label,
            prefs_visible: false,
            display_title: true,
            title_since: clock,
            position,
        })
    }

    fn create_prefs_controls(gui: &mut dyn Gui, prefs: &Prefs) -> (Vec<ControlId>, ControlId) {
        use crate::prefs::Setting::*;

        let spinners = [
            SpinnerSpec {
                caption: "Display duration, -1 for always on",
                x: 340.0,
                y: 55.0,
                width: 120.0,
                height: 25.0,
                min: -1,
                max: 60,
                step: 1,
                value: prefs.display_timeout,
                setting: DisplayTimeout,
            },
            SpinnerSpec {
                caption: "Full size duration",
                x: 340.0,
                y: 110.0,
                width: 120.0,
                height: 25.0,
                min: 0,
                max: 60,
                step: 1,
                value: prefs.fullsize_timeout,
                setting: FullsizeTimeout,
            },
            SpinnerSpec {
                caption: "Full size scale in %",
                x: 340.0,
                y: 165.0,
                width: 120.0,
                height: 25.0,
                min: 20,
                max: 200,
                step: 10,
                value: (prefs.fullsize_scale * 100.0) as i32,
                setting: FullsizeScale,
            },
            SpinnerSpec {
                caption: "Small size scale in %",
                x: 340.0,
                y: 220.0,
                width: 120.0,
                height: 25.0,
                min: 10,
                max: 200,
                step: 10,
                value: (prefs.smallsize_scale * 100.0) as i32,
                setting: SmallsizeScale,
            },
            SpinnerSpec {
                caption: "Opacity in %",
                x: 340.0,
                y: 275.0,
                width: 120.0,
                height: 25.0,
                min: 10,
                max: 100,
                step: 10,
                value: (prefs.opacity * 100.0) as i32,
                setting: Opacity,
            },
        ];

        let checkboxes = [
            CheckboxSpec {
                caption: "Use short name",
                x: 270.0,
                y: 320.0,
                checked: prefs.short_names,
                setting: ShortNames,
            },
            CheckboxSpec {
                caption: "Use surname",
                x: 270.0,
                y: 340.0,
                checked: prefs.use_surname,
                setting: UseSurname,
            },
            CheckboxSpec {
                caption: "Detailed delta",
                x: 270.0,
                y: 360.0,
                checked: prefs.detailed_delta,
                setting: DetailedDelta,
            },
        ];

        let mut controls = Vec::new();
        for spec in spinners {
            controls.push(gui.add_spinner(spec));
        }
        for spec in checkboxes {
            controls.push(gui.add_checkbox(spec));
        }

        let orientation_label = gui.add_label("Orientation:", 270.0, 380.0);
        controls.push(orientation_label);
        controls.push(gui.add_button(ButtonSpec {
            caption: "change",
            x: 440.0,
            y: 380.0,
            width: 60.0,
            height: 20.0,
            action: ButtonAction::Orientation,
        }));

        for &control in &controls {
            gui.set_control_visible(control, false);
        }

        (controls, orientation_label)
    }

    /// Widget size as currently rendered (board anchor reference).
    pub fn widget_size(&self) -> (f32, f32) {
        (self.widget_width, WIDGET_HEIGHT)
    }

    /// Called at start and whenever the app is (re)activated or moved.
    pub fn activated(&mut self, clock: Duration) {
        self.display_title = true;
        self.title_since = clock;
    }

    /// Toggle the preferences panel; returns true when the panel was just
    /// closed (the caller persists preferences on that edge).
    pub fn toggle_prefs(&mut self, gui: &mut dyn Gui, prefs: &Prefs) -> bool {
        self.prefs_visible = !self.prefs_visible;
        debug!(visible = self.prefs_visible, "prefs panel toggled");

        if self.prefs_visible {
            self.set_orientation_label(gui, prefs);
            gui.set_widget_size(PANEL_WIDTH, WIDGET_HEIGHT + PANEL_HEIGHT);
            for &control in &self.controls {
                gui.set_control_visible(control, true);
            }
            false
        } else {
            gui.set_widget_size(self.widget_width, WIDGET_HEIGHT);
            for &control in &self.controls {
                gui.set_control_visible(control, false);
            }
            true
        }
    }

    pub fn set_orientation_label(&self, gui: &mut dyn Gui, prefs: &Prefs) {
        gui.set_control_text(
            self.orientation_label,
            &format!("Orientation: {}", prefs.orientation_label()),
        );
    }

    /// Per-tick UI upkeep: move detection, title timeout, background.
    pub fn update(&mut self, gui: &mut dyn Gui, clock: Duration) {
        let position = gui.widget_position();
        if position != self.position {
            self.position = position;
            self.activated(clock);
        }

        if self.display_title || self.prefs_visible {
            gui.set_background_opacity(0.3);
            gui.set_widget_title("pitboard");

            if !self.prefs_visible
                && clock.saturating_sub(self.title_since) > TITLE_TIMEOUT
            {
                self.display_title = false;
            }
        } else {
            gui.set_background_opacity(0.0);
            gui.set_widget_title("");
        }
    }

    /// Draw the prefs gear while the title or panel is up.
    pub fn render(&self, gui: &mut dyn Gui, opacity: f32) {
        if self.display_title || self.prefs_visible {
            let quad = Quad { x: 7.0, y: 7.0, width: 16.0, height: 16.0 };
            gui.draw_quad(quad, self.prefs_texture, Tint::white(opacity));
        }
    }
}
