//! Session orchestration: the car collection, split snapshots, board text
//! assembly and the visibility state machine.

mod car;
mod fuel;

pub use car::{Car, RaceData};
pub use fuel::FuelModel;

use std::collections::HashMap;

use tracing::debug;

use crate::board::{Board, BoardText, GlyphLibrary};
use crate::host::{SessionState, SessionStatus, SessionType, Telemetry};
use crate::prefs::Prefs;
use crate::timing::{gap_to_str, lap_time_to_str, last_split, split_delta};

/// Seconds over which the board shrinks from full to small scale.
const ZOOM_TRANSITION: f64 = 0.25;

/// Whether the lap-elapsed time falls inside the display window.
/// A timeout of -1 disables the window ("always visible").
pub(crate) fn within_display_window(lap_time_s: f64, timeout_s: i32) -> bool {
    timeout_s == -1 || lap_time_s < timeout_s as f64
}

/// One racing session: the ordered car collection (car 0 is the player),
/// lap bookkeeping, split snapshots and display state.
#[derive(Debug)]
pub struct Session {
    pub prefs: Prefs,
    cars: Vec<Car>,
    current_lap: i32,
    /// Total lap count, race only.
    laps: i32,
    session_type: Option<SessionType>,
    session_status: SessionStatus,
    /// Splits captured at the last board refresh, by opponent car index.
    /// Cars whose split was not computable are absent.
    last_splits: HashMap<usize, f64>,
    /// Player best lap at the last quali board refresh.
    last_best_lap: Option<i32>,
    scale: f64,
    fuel: FuelModel,
}

impl Session {
    pub fn new(prefs: Prefs) -> Self {
        let scale = prefs.fullsize_scale;
        Session {
            prefs,
            cars: Vec::new(),
            current_lap: 0,
            laps: 0,
            session_type: None,
            session_status: SessionStatus::default(),
            last_splits: HashMap::new(),
            last_best_lap: None,
            scale,
            fuel: FuelModel::default(),
        }
    }

    /// Current board render scale (zoom timeline output).
    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn cars(&self) -> &[Car] {
        &self.cars
    }

    pub fn session_type(&self) -> Option<SessionType> {
        self.session_type
    }

    pub fn fuel(&self) -> &FuelModel {
        &self.fuel
    }

    /// The player's car, once observed.
    pub fn player(&self) -> Option<&Car> {
        self.cars.first()
    }

    /// Car holding the given 1-based position.
    pub fn car_by_position(&self, position: i32) -> Option<&Car> {
        self.cars.iter().find(|car| car.position == position)
    }

    /// Per-tick data update: session change detection, car polling, fuel.
    pub fn update_data(&mut self, telemetry: &dyn Telemetry) {
        let state = telemetry.session_state();
        self.check_session(&state);
        self.update_cars(telemetry, &state);
        self.fuel.update(&state, self.current_lap);

        if self.session_type == Some(SessionType::Race) {
            self.laps = state.number_of_laps;
        }
    }

    /// Detect a session restart or type change and reset if so.
    fn check_session(&mut self, state: &SessionState) {
        let changed = state.session_type != self.session_type && self.session_type.is_some();
        let lap_regressed = state.completed_laps < self.current_lap;

        if changed || lap_regressed {
            debug!(?changed, ?lap_regressed, "session restarted or changed, resetting");
            self.reset();
        }

        self.current_lap = state.completed_laps;
        self.session_type = state.session_type;
        self.session_status = state.status;
    }

    fn reset(&mut self) {
        self.cars.clear();
        self.current_lap = 0;
        self.laps = 0;
        self.session_type = None;
        self.last_splits.clear();
        self.last_best_lap = None;
        self.scale = self.prefs.fullsize_scale;
        self.fuel.reset();
    }

    /// Poll every car, creating entries lazily the first tick an index
    /// reports a valid driver name.
    fn update_cars(&mut self, telemetry: &dyn Telemetry, state: &SessionState) {
        for index in 0..telemetry.car_count() {
            if index >= self.cars.len() {
                let Some(name) = telemetry.driver_name(index) else {
                    // No such car; later indices won't exist either.
                    break;
                };
                self.cars.push(Car::new(index, name, self.session_type));
            }
            self.cars[index].update(telemetry, self.session_type, state.clock);
        }

        if self.session_type == Some(SessionType::Race) {
            self.assign_race_positions();
        }
    }

    /// Standings by (lap, spline) descending. The host's realtime
    /// leaderboard is not always reliable, so positions are recomputed.
    fn assign_race_positions(&mut self) {
        let mut order: Vec<usize> = (0..self.cars.len()).collect();
        order.sort_by(|&a, &b| {
            let ka = (self.cars[a].lap, self.cars[a].spline_pos);
            let kb = (self.cars[b].lap, self.cars[b].spline_pos);
            kb.partial_cmp(&ka).unwrap_or(std::cmp::Ordering::Equal)
        });
        for (rank, index) in order.into_iter().enumerate() {
            self.cars[index].position = rank as i32 + 1;
        }
    }

    /// Current splits between the player and every opponent. Cars without a
    /// computable split are absent from the map.
    pub fn splits(&self) -> HashMap<usize, f64> {
        let Some(player) = self.player() else {
            return HashMap::new();
        };
        let Some(player_race) = player.race.as_ref() else {
            return HashMap::new();
        };

        self.cars[1..]
            .iter()
            .filter_map(|car| {
                let race = car.race.as_ref()?;
                let split = last_split(
                    &player_race.tracker,
                    player.position,
                    &race.tracker,
                    car.position,
                )?;
                Some((car.index, split))
            })
            .collect()
    }

    /// Per-tick presentation update: assemble board text and drive the
    /// visibility state machine.
    pub fn update_board(
        &mut self,
        board: &mut Board,
        library: &GlyphLibrary,
        state: &SessionState,
    ) {
        match (self.session_status, self.session_type) {
            // The board is not shown in replay mode.
            (SessionStatus::Replay, _) => board.set_visible(false),
            (_, Some(SessionType::Race)) => self.update_board_race(board, library, state),
            (_, Some(_)) => self.update_board_quali(board, library, state),
            (_, None) => {}
        }
    }

    fn update_board_race(
        &mut self,
        board: &mut Board,
        library: &GlyphLibrary,
        state: &SessionState,
    ) {
        let splits = self.splits();
        let Some(lines) = self.race_lines(state, &splits) else {
            board.set_visible(false);
            return;
        };

        let lap_time = state.lap_time_ms as f64 / 1000.0;
        let show = lap_time > 0.2
            && self.current_lap > 0
            && within_display_window(lap_time, self.prefs.display_timeout);

        if show {
            self.set_scale(lap_time);
            if !board.visible() {
                debug!(lap = self.current_lap, "showing race board");
                board.set_lines(&lines, library);
                self.last_splits = splits;
            }
            board.set_visible(true);
        } else {
            board.set_visible(false);
            self.scale = self.prefs.fullsize_scale;
        }
    }

    fn update_board_quali(
        &mut self,
        board: &mut Board,
        library: &GlyphLibrary,
        state: &SessionState,
    ) {
        let Some(lines) = self.quali_lines(state) else {
            board.set_visible(false);
            return;
        };

        let lap_time = state.lap_time_ms as f64 / 1000.0;
        let show = lap_time > 0.2
            && self.current_lap > 0
            && within_display_window(lap_time, self.prefs.display_timeout)
            && !(state.pit_limiter_on && state.in_pit);

        if show {
            self.set_scale(lap_time);
            if !board.visible() {
                debug!(lap = self.current_lap, "showing quali board");
                board.set_lines(&lines, library);
                self.last_best_lap = self.player().and_then(|car| car.best_lap_ms);
            }
            board.set_visible(true);
        } else {
            board.set_visible(false);
            self.scale = self.prefs.fullsize_scale;
        }
    }

    /// Board content for a race:
    /// position and laps (or time) left, car ahead with split and delta,
    /// own last lap, car behind with split and delta.
    fn race_lines(
        &self,
        state: &SessionState,
        splits: &HashMap<usize, f64>,
    ) -> Option<Vec<BoardText>> {
        let player = self.player()?;
        let ahead = self.car_by_position(player.position - 1);
        let behind = self.car_by_position(player.position + 1);

        let mut lines = Vec::with_capacity(6);

        if state.is_timed_race {
            let left = state.time_left_ms.max(0);
            lines.push(BoardText::new(format!(
                "P{} - R{}",
                player.position,
                lap_time_to_str(left, false)
            )));
        } else {
            lines.push(BoardText::new(format!(
                "P{} - L{}",
                player.position,
                self.laps - self.current_lap
            )));
        }

        match ahead.and_then(|car| Some((car, *splits.get(&car.index)?))) {
            Some((car, split)) => {
                lines.push(BoardText::new(car.display_name(&self.prefs)));
                lines.push(self.split_line(car.index, split, 'r'));
            }
            None => lines.extend([BoardText::empty(), BoardText::empty()]),
        }

        if state.last_lap_ms != 0 {
            lines.push(BoardText::new(lap_time_to_str(state.last_lap_ms, true)));
        } else {
            lines.push(BoardText::empty());
        }

        match behind.and_then(|car| Some((car, *splits.get(&car.index)?))) {
            Some((car, split)) => {
                lines.push(self.split_line(car.index, split, 'g'));
                lines.push(BoardText::new(car.display_name(&self.prefs)));
            }
            None => lines.extend([BoardText::empty(), BoardText::empty()]),
        }

        Some(lines)
    }

    /// A split row: arrowed gap, optionally the delta since the previous
    /// refresh, first and last characters coloured by the delta's sign.
    fn split_line(&self, car_index: usize, split: f64, base_colour: char) -> BoardText {
        let mut line = gap_to_str(split, false, true);
        let mut colours = base_colour.to_string().repeat(line.chars().count());

        if let Some(&previous) = self.last_splits.get(&car_index) {
            let delta = split_delta(split, previous);
            let delta_str = gap_to_str(delta, false, false);
            if self.prefs.detailed_delta {
                line.push_str(&format!(" ({delta_str})"));
            } else {
                // Sign only.
                line.push_str(&format!(" ({})", &delta_str[..1]));
            }

            let sign = if delta > 0.0 { "r" } else { "g" };
            colours.replace_range(0..1, sign);
            colours.push_str(sign);
        }

        BoardText::coloured(line, colours)
    }

    /// Board content outside races: position, car ahead in the standings
    /// with the best-lap gap, own last lap with delta to best, time left.
    fn quali_lines(&self, state: &SessionState) -> Option<Vec<BoardText>> {
        let player = self.player()?;
        let ahead = self.car_by_position(player.position - 1);

        let mut lines = Vec::with_capacity(6);
        lines.push(BoardText::new(format!("P{}", player.position)));

        match ahead {
            Some(car) => {
                lines.push(BoardText::new(car.display_name(&self.prefs)));
                match (player.best_lap_ms, car.best_lap_ms) {
                    (Some(own), Some(theirs)) => {
                        let gap = (own - theirs) as f64 / 1000.0;
                        lines.push(BoardText::coloured(gap_to_str(gap, true, false), "r"));
                    }
                    _ => lines.push(BoardText::empty()),
                }
            }
            None => lines.extend([BoardText::empty(), BoardText::empty()]),
        }

        if state.last_lap_ms != 0 {
            if let Some(best) = player.best_lap_ms {
                lines.push(BoardText::new(lap_time_to_str(state.last_lap_ms, true)));

                // Against the previous best when this lap set a new one.
                let reference = match self.last_best_lap {
                    Some(last_best) if Some(last_best) != player.best_lap_ms => last_best,
                    _ => best,
                };
                let delta = state.last_lap_ms - reference;
                if delta != 0 {
                    let colour = if delta < 0 { "g" } else { "r" };
                    lines.push(BoardText::coloured(
                        gap_to_str(delta as f64 / 1000.0, true, false),
                        colour,
                    ));
                } else {
                    lines.push(BoardText::empty());
                }
            }
        }

        if state.time_left_ms > 0 {
            lines.push(BoardText::new(format!(
                "LEFT {}",
                lap_time_to_str(state.time_left_ms, false)
            )));
        }

        Some(lines)
    }

    /// Zoom timeline: full size until the timeout, then a short transition
    /// down to the small scale.
    fn set_scale(&mut self, lap_time: f64) {
        let full = self.prefs.fullsize_scale;
        let small = self.prefs.smallsize_scale;
        let timeout = self.prefs.fullsize_timeout as f64;

        self.scale = if lap_time <= timeout {
            full
        } else if lap_time <= timeout + ZOOM_TRANSITION {
            full - ((lap_time - timeout) / ZOOM_TRANSITION) * (full - small)
        } else {
            small
        };
    }
}
