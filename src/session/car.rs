//! Per-car state.

use std::time::Duration;

use crate::host::{SessionType, Telemetry};
use crate::prefs::Prefs;
use crate::timing::SectorTracker;

/// Race-only car state; present only when the session is a race.
#[derive(Debug, Clone, Default)]
pub struct RaceData {
    pub tracker: SectorTracker,
}

/// One car in the session. Car 0 is always the player.
#[derive(Debug, Clone)]
pub struct Car {
    pub index: usize,
    /// Driver name; can change mid-session in no-booking servers.
    pub name: String,
    /// 1-based race/leaderboard position, -1 while unknown.
    pub position: i32,
    pub spline_pos: f64,
    pub lap: i32,
    pub best_lap_ms: Option<i32>,
    /// Sector tracking, race sessions only.
    pub race: Option<RaceData>,
}

impl Car {
    pub fn new(index: usize, name: String, session_type: Option<SessionType>) -> Self {
        let race = matches!(session_type, Some(SessionType::Race)).then(RaceData::default);
        Car { index, name, position: -1, spline_pos: 0.0, lap: -1, best_lap_ms: None, race }
    }

    /// Poll this car's telemetry for one tick.
    ///
    /// In races the sector tracker consumes the spline position; position
    /// itself is assigned afterwards by the session's standings sort. Outside
    /// races the host leaderboard rank is authoritative.
    pub fn update(
        &mut self,
        telemetry: &dyn Telemetry,
        session_type: Option<SessionType>,
        clock: Duration,
    ) {
        self.spline_pos = telemetry.spline_position(self.index);
        self.lap = telemetry.lap_count(self.index);

        if let Some(name) = telemetry.driver_name(self.index) {
            self.name = name;
        }

        if matches!(session_type, Some(SessionType::Race)) {
            if let Some(race) = self.race.as_mut() {
                race.tracker.advance(self.spline_pos, clock);
            }
        } else {
            self.position = telemetry.leaderboard_position(self.index);
            if let Some(best) = telemetry.best_lap_ms(self.index) {
                self.best_lap_ms = Some(best);
            }
        }
    }

    /// Name as shown on the board, honouring the surname and short-name
    /// preferences.
    pub fn display_name(&self, prefs: &Prefs) -> String {
        let name = if prefs.use_surname {
            self.name.split_whitespace().nth(1).unwrap_or(&self.name)
        } else {
            &self.name
        };

        if prefs.short_names { name.chars().take(3).collect() } else { name.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn car_named(name: &str) -> Car {
        Car::new(1, name.to_string(), Some(SessionType::Race))
    }

    #[test]
    fn race_cars_carry_a_tracker() {
        assert!(car_named("A").race.is_some());
        assert!(Car::new(0, "A".into(), Some(SessionType::Qualify)).race.is_none());
        assert!(Car::new(0, "A".into(), None).race.is_none());
    }

    #[test]
    fn display_name_variants() {
        let car = car_named("Kimi Raikkonen");
        let mut prefs = Prefs::default();
        assert_eq!(car.display_name(&prefs), "Kimi Raikkonen");

        prefs.use_surname = true;
        assert_eq!(car.display_name(&prefs), "Raikkonen");

        prefs.short_names = true;
        assert_eq!(car.display_name(&prefs), "Rai");

        prefs.use_surname = false;
        assert_eq!(car.display_name(&prefs), "Kim");
    }

    #[test]
    fn surname_falls_back_on_single_word_names() {
        let car = car_named("Stig");
        let mut prefs = Prefs::default();
        prefs.use_surname = true;
        assert_eq!(car.display_name(&prefs), "Stig");
    }
}
