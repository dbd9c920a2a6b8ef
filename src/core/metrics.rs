use std::fmt;

use serde::Serialize;

use crate::core::trajectory::Trajectory;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Metric {
    TimeOfFlight,
    MaxHeight,
    Range,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::TimeOfFlight, Metric::MaxHeight, Metric::Range];

    pub fn name(self) -> &'static str {
        match self {
            Metric::TimeOfFlight => "TimeOfFlight",
            Metric::MaxHeight => "MaxHeight",
            Metric::Range => "Range",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Metric::TimeOfFlight => "Time of Flight",
            Metric::MaxHeight => "Maximum Height",
            Metric::Range => "Range",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Metric::TimeOfFlight => "s",
            Metric::MaxHeight | Metric::Range => "m",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Summary of one flight.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Metrics {
    #[serde(rename = "TimeOfFlight")]
    pub time_of_flight_s: f64,
    #[serde(rename = "MaxHeight")]
    pub max_height_m: f64,
    #[serde(rename = "Range")]
    pub range_m: f64,
}

impl Metrics {
    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::TimeOfFlight => self.time_of_flight_s,
            Metric::MaxHeight => self.max_height_m,
            Metric::Range => self.range_m,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Metric, f64)> + '_ {
        Metric::ALL.into_iter().map(|metric| (metric, self.get(metric)))
    }

    pub fn is_finite(&self) -> bool {
        self.iter().all(|(_, value)| value.is_finite())
    }

    /// Scans a sampled flight for its extrema.
    ///
    /// Samples carry no timestamps, so the flight time is estimated as
    /// `sample count * step`. An empty trajectory yields all zeros.
    pub fn from_samples(trajectory: &Trajectory) -> Self {
        if trajectory.is_empty() {
            return Self::default();
        }

        Self {
            time_of_flight_s: trajectory.len() as f64 * trajectory.step_s(),
            max_height_m: trajectory.max_y().map_or(0.0, f64::from),
            range_m: trajectory.max_x().map_or(0.0, f64::from),
        }
    }
}
