//! Closed-form drag-free flight from and back to launch height.

use tracing::debug;

use crate::core::inputs::LaunchInputs;
use crate::core::limits::Limits;
use crate::core::metrics::Metrics;
use crate::core::trajectory::{Sample, Trajectory};

pub fn flight_time(inputs: LaunchInputs) -> f64 {
    let (_, vy) = inputs.velocity_components();
    (2.0 * vy) / inputs.gravity_mps2
}

pub fn position_at_time(inputs: LaunchInputs, time_s: f64) -> (f64, f64) {
    let (vx, vy) = inputs.velocity_components();
    let x = vx * time_s;
    let y = (vy * time_s) - (0.5 * inputs.gravity_mps2 * time_s * time_s);
    (x, y)
}

pub fn trajectory(inputs: LaunchInputs, steps: usize) -> Trajectory {
    trajectory_with_limits(inputs, steps, Limits::default())
}

/// Samples the parabola at `steps + 1` evenly spaced instants over the flight
/// time, stopping before the first point below ground.
///
/// The step is clamped to `limits.min_analytic_step_s`, so a zero or negative
/// flight time (no upward velocity) leaves only the launch point and a huge
/// `steps` still yields about `T / min_step` samples.
pub fn trajectory_with_limits(inputs: LaunchInputs, steps: usize, limits: Limits) -> Trajectory {
    let total_time = flight_time(inputs);
    let dt = (total_time / steps as f64).max(limits.min_analytic_step_s);

    let mut samples = Vec::with_capacity(steps.saturating_add(1).min(limits.max_samples));
    for i in 0..=steps {
        let (x, y) = position_at_time(inputs, i as f64 * dt);
        if y < 0.0 {
            break;
        }
        samples.push(Sample::from_f64(x, y));
    }

    debug!(
        samples = samples.len(),
        dt, total_time, "sampled drag-free trajectory"
    );
    Trajectory::new(samples, dt)
}

/// Exact flight time, apex height and range. Not guarded against `g <= 0`.
pub fn metrics(inputs: LaunchInputs) -> Metrics {
    let theta = inputs.angle_deg.to_radians();
    let (_, vy) = inputs.velocity_components();
    let g = inputs.gravity_mps2;
    Metrics {
        time_of_flight_s: (2.0 * vy) / g,
        max_height_m: (vy * vy) / (2.0 * g),
        range_m: (inputs.speed_mps * inputs.speed_mps * (2.0 * theta).sin()) / g,
    }
}
