//! Tuning for both canvas renderers.

use std::collections::HashSet;

use crate::error::ConfigError;
use crate::topology::{LineSpec, Station, CENTRAL, LINES, MAX_CATEGORY, STATIONS};

#[derive(Debug, Clone, PartialEq)]
pub struct VizConfig {
    /// Surface area (px²) per ambient particle.
    pub particle_density_divisor: f64,
    /// Particles closer than this are joined by a line.
    pub connection_distance: f64,
    pub station_table: Vec<Station>,
    pub line_table: Vec<LineSpec>,
    /// Per-frame chance of a pulse leaving the `central` station.
    pub pulse_spawn_probability_central: f64,
    /// Per-frame chance of a pulse leaving a uniformly chosen station.
    pub pulse_spawn_probability_random: f64,
    /// Pulse radius growth per frame.
    pub pulse_radius_step: f64,
    pub central_pulse_max_radius: f64,
    pub random_pulse_max_radius: f64,
    /// Pointer distance within which the nearest station is highlighted.
    pub pointer_capture_radius: f64,
}

impl Default for VizConfig {
    fn default() -> Self {
        Self {
            particle_density_divisor: 15_000.0,
            connection_distance: 100.0,
            station_table: STATIONS.to_vec(),
            line_table: LINES.to_vec(),
            pulse_spawn_probability_central: 0.03,
            pulse_spawn_probability_random: 0.01,
            pulse_radius_step: 1.5,
            central_pulse_max_radius: 120.0,
            random_pulse_max_radius: 70.0,
            pointer_capture_radius: 40.0,
        }
    }
}

impl VizConfig {
    /// Check the tuning values and that every line resolves to known stations.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("particle_density_divisor", self.particle_density_divisor),
            ("connection_distance", self.connection_distance),
            ("pulse_radius_step", self.pulse_radius_step),
            ("central_pulse_max_radius", self.central_pulse_max_radius),
            ("random_pulse_max_radius", self.random_pulse_max_radius),
            ("pointer_capture_radius", self.pointer_capture_radius),
        ];
        for (name, value) in positive {
            // also rejects NaN
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive(name));
            }
        }

        let probabilities = [
            (
                "pulse_spawn_probability_central",
                self.pulse_spawn_probability_central,
            ),
            (
                "pulse_spawn_probability_random",
                self.pulse_spawn_probability_random,
            ),
        ];
        for (name, value) in probabilities {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::NotAProbability(name));
            }
        }

        let mut ids = HashSet::with_capacity(self.station_table.len());
        for station in &self.station_table {
            if !ids.insert(station.id) {
                return Err(ConfigError::DuplicateStation(station.id.to_string()));
            }
        }
        if !ids.contains(CENTRAL) {
            return Err(ConfigError::MissingCentral);
        }

        for (index, line) in self.line_table.iter().enumerate() {
            if !(1..=MAX_CATEGORY).contains(&line.category) {
                return Err(ConfigError::CategoryOutOfRange {
                    line: index,
                    category: line.category,
                });
            }
            for end in [line.from, line.to] {
                if !ids.contains(end) {
                    return Err(ConfigError::UnknownStation {
                        line: index,
                        station: end.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Index of a station in `station_table`.
    pub fn station_index(&self, id: &str) -> Option<usize> {
        self.station_table.iter().position(|s| s.id == id)
    }
}
