use serde::Serialize;

/// A point on a flight path, in meters from the launch point.
///
/// Coordinates are stored at single precision; all integration happens in `f64`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Sample {
    pub x: f32,
    pub y: f32,
}

impl Sample {
    pub const ORIGIN: Sample = Sample { x: 0.0, y: 0.0 };

    pub fn from_f64(x: f64, y: f64) -> Self {
        Self {
            x: x as f32,
            y: y as f32,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Time-ordered samples produced by one computation.
///
/// Samples are spaced `step_s` apart in simulated time, so sample `i` sits at
/// `i * step_s`. A trajectory is never mutated after it is produced; changing
/// any input means computing a new one.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Trajectory {
    samples: Vec<Sample>,
    step_s: f64,
}

impl Trajectory {
    pub(crate) fn new(samples: Vec<Sample>, step_s: f64) -> Self {
        Self { samples, step_s }
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Sample> {
        self.samples.get(index).copied()
    }

    pub fn last(&self) -> Option<Sample> {
        self.samples.last().copied()
    }

    /// Simulated time between consecutive samples.
    pub fn step_s(&self) -> f64 {
        self.step_s
    }

    /// Simulated time at which sample `index` was produced.
    pub fn time_at(&self, index: usize) -> Option<f64> {
        (index < self.samples.len()).then(|| index as f64 * self.step_s)
    }

    pub fn max_x(&self) -> Option<f32> {
        self.samples.iter().map(|p| p.x).reduce(f32::max)
    }

    pub fn max_y(&self) -> Option<f32> {
        self.samples.iter().map(|p| p.y).reduce(f32::max)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::{Sample, Trajectory};

    #[test]
    fn time_at_follows_uniform_step() {
        let trajectory = Trajectory::new(
            vec![Sample::ORIGIN, Sample::from_f64(1.0, 1.0), Sample::from_f64(2.0, 0.5)],
            0.25,
        );

        assert_eq!(trajectory.time_at(0), Some(0.0));
        assert_eq!(trajectory.time_at(2), Some(0.5));
        assert_eq!(trajectory.time_at(3), None);
    }

    #[test]
    fn extrema_scan_all_samples() {
        let trajectory = Trajectory::new(
            vec![
                Sample::ORIGIN,
                Sample::from_f64(3.0, 4.5),
                Sample::from_f64(6.0, 2.0),
            ],
            0.1,
        );

        assert_eq!(trajectory.max_x(), Some(6.0));
        assert_eq!(trajectory.max_y(), Some(4.5));
    }

    #[test]
    fn empty_trajectory_has_no_extrema() {
        let trajectory = Trajectory::new(Vec::new(), 0.1);

        assert!(trajectory.is_empty());
        assert_eq!(trajectory.max_x(), None);
        assert_eq!(trajectory.last(), None);
    }
}
