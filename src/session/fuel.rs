//! Fuel consumption tracking.
//!
//! Watches the fuel level across laps to estimate average per-lap
//! consumption. Readings taken in the pit lane, before the hotlap start-line
//! quirk resolves, or across inconsistent spline/lap combinations are
//! discarded rather than folded into the average.

use tracing::debug;

use crate::host::SessionState;

#[derive(Debug, Clone)]
pub struct FuelModel {
    current_fuel: f64,
    initial_fuel: f64,
    /// Fractional lap count at the last refuel.
    refuel_lap: f64,
    travelled_laps: f64,
    consumption: Option<f64>,
}

impl Default for FuelModel {
    fn default() -> Self {
        FuelModel {
            current_fuel: -1.0,
            initial_fuel: -1.0,
            refuel_lap: -1.0,
            travelled_laps: 0.0,
            consumption: None,
        }
    }
}

impl FuelModel {
    /// Fold one tick of fuel telemetry into the model.
    pub fn update(&mut self, state: &SessionState, current_lap: i32) {
        // In hotlap mode the car starts before the pit straight yet reports
        // lap 0, so expected and actual distance disagree until the line.
        if current_lap == 0
            && state.distance_traveled < state.track_length * state.normalized_car_position
        {
            return;
        }

        if state.in_pit {
            return;
        }

        let fuel = state.fuel;
        if fuel > 0.0 && fuel > self.current_fuel {
            // Refuel (or first reading): restart the consumption window.
            self.initial_fuel = fuel;
            self.refuel_lap = current_lap as f64 + state.normalized_car_position;
            debug!(fuel, refuel_lap = self.refuel_lap, "refuel detected");
        }
        self.current_fuel = fuel;

        let travelled = current_lap as f64 + state.normalized_car_position - self.refuel_lap;

        // Crossing the line the spline can lag the lap counter; skip readings
        // that look like more than half a lap of movement since last tick.
        if travelled < self.travelled_laps || travelled - self.travelled_laps > 0.5 {
            return;
        }
        self.travelled_laps = travelled;

        if travelled > 1.0 {
            self.consumption = Some((self.initial_fuel - fuel) / travelled);
        }
    }

    /// Average fuel burned per lap since the last refuel, once at least one
    /// full lap has been covered.
    pub fn consumption_per_lap(&self) -> Option<f64> {
        self.consumption
    }

    /// Laps of running left on the current fuel load.
    pub fn laps_of_fuel_left(&self) -> Option<f64> {
        let per_lap = self.consumption?;
        (per_lap > 0.0 && self.current_fuel >= 0.0).then(|| self.current_fuel / per_lap)
    }

    pub fn reset(&mut self) {
        *self = FuelModel::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(fuel: f64, pos: f64, in_pit: bool) -> SessionState {
        SessionState {
            fuel,
            normalized_car_position: pos,
            in_pit,
            distance_traveled: 10_000.0,
            track_length: 4_000.0,
            ..SessionState::default()
        }
    }

    #[test]
    fn consumption_needs_more_than_one_lap() {
        let mut model = FuelModel::default();
        model.update(&state(50.0, 0.5, false), 1);
        assert_eq!(model.consumption_per_lap(), None);

        // Quarter-lap steps to stay under the half-lap consistency limit.
        for (lap, pos, fuel) in
            [(1, 0.75, 49.2), (2, 0.0, 48.5), (2, 0.25, 47.8), (2, 0.5, 47.0), (2, 0.75, 46.2)]
        {
            model.update(&state(fuel, pos, false), lap);
        }

        let per_lap = model.consumption_per_lap().unwrap();
        assert!((per_lap - (50.0 - 46.2) / 1.25).abs() < 1e-9);
    }

    #[test]
    fn refuel_restarts_the_window() {
        let mut model = FuelModel::default();
        model.update(&state(10.0, 0.2, false), 3);
        model.update(&state(30.0, 0.4, false), 3);
        // Window restarted at the refuel; well under a lap travelled since.
        model.update(&state(29.5, 0.6, false), 3);
        assert_eq!(model.consumption_per_lap(), None);
    }

    #[test]
    fn pit_readings_are_ignored() {
        let mut model = FuelModel::default();
        model.update(&state(50.0, 0.1, true), 2);
        assert_eq!(model.laps_of_fuel_left(), None);
    }

    #[test]
    fn inconsistent_line_crossing_is_skipped() {
        let mut model = FuelModel::default();
        model.update(&state(50.0, 0.9, false), 1);
        // Lap incremented but spline still at 0.9: looks like a full extra
        // lap of travel, discard.
        model.update(&state(49.9, 0.9, false), 2);
        model.update(&state(49.8, 0.0, false), 2);
        assert_eq!(model.consumption_per_lap(), None);
    }

    #[test]
    fn hotlap_start_quirk_skipped_on_lap_zero() {
        let mut model = FuelModel::default();
        let mut s = state(50.0, 0.9, false);
        s.distance_traveled = 100.0; // far less than track_length * 0.9
        model.update(&s, 0);
        assert_eq!(model.laps_of_fuel_left(), None);
    }
}
