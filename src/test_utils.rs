//! In-memory host doubles for unit tests.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::Result;
use crate::host::{
    ButtonSpec, CheckboxSpec, ControlId, Gui, Quad, SessionState, SessionType, SpinnerSpec,
    Telemetry, TextureId, Tint,
};

/// Recording [`Gui`] implementation. Texture loads always succeed and hand
/// out sequential ids; draw calls, console lines and control state are kept
/// for assertions.
#[derive(Debug, Default)]
pub(crate) struct MockGui {
    textures: Vec<PathBuf>,
    draws: Vec<(Quad, TextureId, Tint)>,
    console: Vec<String>,
    widget_size: (f32, f32),
    widget_title: String,
    background_opacity: f32,
    position: (f32, f32),
    next_control: u64,
    visible: HashMap<ControlId, bool>,
    texts: HashMap<ControlId, String>,
}

impl MockGui {
    pub fn new() -> Self {
        MockGui::default()
    }

    pub fn console_lines(&self) -> &[String] {
        &self.console
    }

    pub fn control_visible(&self, control: ControlId) -> bool {
        self.visible.get(&control).copied().unwrap_or(true)
    }

    pub fn widget_size(&self) -> (f32, f32) {
        self.widget_size
    }

    pub fn widget_title(&self) -> &str {
        &self.widget_title
    }

    /// Move the widget; the next `widget_position` poll sees the new spot.
    pub fn set_position(&mut self, x: f32, y: f32) {
        self.position = (x, y);
    }

    #[allow(dead_code)]
    pub fn draw_calls(&self) -> &[(Quad, TextureId, Tint)] {
        &self.draws
    }

    #[allow(dead_code)]
    pub fn background_opacity(&self) -> f32 {
        self.background_opacity
    }

    #[allow(dead_code)]
    pub fn control_text(&self, control: ControlId) -> Option<&str> {
        self.texts.get(&control).map(String::as_str)
    }

    fn next_control_id(&mut self) -> ControlId {
        let id = ControlId(self.next_control);
        self.next_control += 1;
        id
    }
}

impl Gui for MockGui {
    fn load_texture(&mut self, path: &Path) -> Result<TextureId> {
        self.textures.push(path.to_path_buf());
        Ok(TextureId(self.textures.len() as u64 - 1))
    }

    fn draw_quad(&mut self, quad: Quad, texture: TextureId, tint: Tint) {
        self.draws.push((quad, texture, tint));
    }

    fn console(&mut self, message: &str) {
        self.console.push(message.to_string());
    }

    fn set_widget_size(&mut self, width: f32, height: f32) {
        self.widget_size = (width, height);
    }

    fn set_widget_title(&mut self, title: &str) {
        self.widget_title = title.to_string();
    }

    fn set_background_opacity(&mut self, opacity: f32) {
        self.background_opacity = opacity;
    }

    fn widget_position(&self) -> (f32, f32) {
        self.position
    }

    fn add_spinner(&mut self, _spec: SpinnerSpec) -> ControlId {
        self.next_control_id()
    }

    fn add_checkbox(&mut self, _spec: CheckboxSpec) -> ControlId {
        self.next_control_id()
    }

    fn add_button(&mut self, _spec: ButtonSpec) -> ControlId {
        self.next_control_id()
    }

    fn add_label(&mut self, text: &str, _x: f32, _y: f32) -> ControlId {
        let id = self.next_control_id();
        self.texts.insert(id, text.to_string());
        id
    }

    fn set_control_visible(&mut self, control: ControlId, visible: bool) {
        self.visible.insert(control, visible);
    }

    fn set_control_text(&mut self, control: ControlId, text: &str) {
        self.texts.insert(control, text.to_string());
    }
}

/// Scriptable car entry for [`MockTelemetry`].
#[derive(Debug, Clone)]
pub(crate) struct MockCar {
    pub name: String,
    pub spline: f64,
    pub lap: i32,
    pub best_lap_ms: Option<i32>,
    pub leaderboard_position: i32,
}

impl MockCar {
    pub fn named(name: &str) -> Self {
        MockCar {
            name: name.to_string(),
            spline: 0.0,
            lap: 0,
            best_lap_ms: None,
            leaderboard_position: -1,
        }
    }
}

/// Scriptable [`Telemetry`] implementation; tests mutate the public fields
/// between ticks.
#[derive(Debug, Clone, Default)]
pub(crate) struct MockTelemetry {
    pub cars: Vec<MockCar>,
    pub state: SessionState,
}

impl MockTelemetry {
    /// A live race with `car_count` cars named "DRIVER <n>".
    pub fn race(car_count: usize) -> Self {
        let cars = (0..car_count).map(|i| MockCar::named(&format!("DRIVER {i}"))).collect();
        let state = SessionState {
            session_type: Some(SessionType::Race),
            number_of_laps: 10,
            ..SessionState::default()
        };
        MockTelemetry { cars, state }
    }
}

impl Telemetry for MockTelemetry {
    fn car_count(&self) -> usize {
        self.cars.len()
    }

    fn driver_name(&self, car: usize) -> Option<String> {
        self.cars.get(car).map(|c| c.name.clone())
    }

    fn spline_position(&self, car: usize) -> f64 {
        self.cars.get(car).map_or(0.0, |c| c.spline)
    }

    fn lap_count(&self, car: usize) -> i32 {
        self.cars.get(car).map_or(0, |c| c.lap)
    }

    fn best_lap_ms(&self, car: usize) -> Option<i32> {
        self.cars.get(car).and_then(|c| c.best_lap_ms)
    }

    fn leaderboard_position(&self, car: usize) -> i32 {
        self.cars.get(car).map_or(-1, |c| c.leaderboard_position)
    }

    fn session_state(&self) -> SessionState {
        self.state.clone()
    }
}
