//! Flight under gravity plus quadratic drag, integrated with fixed-step RK4.
//!
//! With speed `s = sqrt(vx^2 + vy^2)` and `k = c / m`:
//!
//! ```text
//! ax = -k * s * vx
//! ay = -g - k * s * vy
//! ```
//!
//! Both drag terms vanish at `s = 0`.

use tracing::{debug, warn};

use crate::core::inputs::DragInputs;
use crate::core::limits::Limits;
use crate::core::trajectory::{Sample, Trajectory};

/// Position and velocity at one instant. Also used for its time derivative
/// `(vx, vy, ax, ay)`.
#[derive(Clone, Copy, Debug, PartialEq)]
struct MotionState {
    x: f64,
    y: f64,
    vx: f64,
    vy: f64,
}

impl MotionState {
    fn offset(self, rate: MotionState, h: f64) -> MotionState {
        MotionState {
            x: self.x + rate.x * h,
            y: self.y + rate.y * h,
            vx: self.vx + rate.vx * h,
            vy: self.vy + rate.vy * h,
        }
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.vx.is_finite() && self.vy.is_finite()
    }
}

#[derive(Clone, Copy, Debug)]
struct Forces {
    gravity_mps2: f64,
    drag_per_mass: f64,
}

impl Forces {
    fn derivative(&self, s: MotionState) -> MotionState {
        let speed = (s.vx * s.vx + s.vy * s.vy).sqrt();
        let (drag_x, drag_y) = if speed > 0.0 {
            (
                self.drag_per_mass * speed * s.vx,
                self.drag_per_mass * speed * s.vy,
            )
        } else {
            (0.0, 0.0)
        };

        MotionState {
            x: s.vx,
            y: s.vy,
            vx: -drag_x,
            vy: -self.gravity_mps2 - drag_y,
        }
    }

    fn rk4_step(&self, state: MotionState, dt: f64) -> MotionState {
        let k1 = self.derivative(state);
        let k2 = self.derivative(state.offset(k1, dt / 2.0));
        let k3 = self.derivative(state.offset(k2, dt / 2.0));
        let k4 = self.derivative(state.offset(k3, dt));

        let h = dt / 6.0;
        MotionState {
            x: state.x + h * (k1.x + 2.0 * k2.x + 2.0 * k3.x + k4.x),
            y: state.y + h * (k1.y + 2.0 * k2.y + 2.0 * k3.y + k4.y),
            vx: state.vx + h * (k1.vx + 2.0 * k2.vx + 2.0 * k3.vx + k4.vx),
            vy: state.vy + h * (k1.vy + 2.0 * k2.vy + 2.0 * k3.vy + k4.vy),
        }
    }
}

/// Why the integrator stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Termination {
    /// The next state fell below the ground tolerance.
    Landed,
    /// Elapsed time reached the horizon.
    TimeLimit,
    /// The sample ceiling was reached.
    SampleLimit,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Integration {
    pub trajectory: Trajectory,
    pub termination: Termination,
    /// Index of the first sample taken from a NaN or infinite state.
    pub diverged_at: Option<usize>,
}

pub fn trajectory(inputs: DragInputs) -> Trajectory {
    integrate(inputs, Limits::default()).trajectory
}

/// Integrates from the launch point until landing, the time horizon or the
/// sample ceiling, whichever comes first.
///
/// The launch point is always the first sample. A state that lands below the
/// ground tolerance is not recorded. Non-finite states are recorded and
/// integration carries on; `diverged_at` marks where they start. `step_s`
/// must be positive; it is not corrected here.
pub fn integrate(inputs: DragInputs, limits: Limits) -> Integration {
    let (vx, vy) = inputs.launch.velocity_components();
    let forces = Forces {
        gravity_mps2: inputs.launch.gravity_mps2,
        drag_per_mass: inputs.drag_coeff / inputs.mass_kg,
    };
    let dt = inputs.step_s;

    let mut state = MotionState {
        x: 0.0,
        y: 0.0,
        vx,
        vy,
    };
    let mut samples = vec![Sample::ORIGIN];
    let mut elapsed_s = 0.0;
    let mut diverged_at = None;

    let termination = loop {
        let within_horizon = elapsed_s < inputs.max_time_s;
        if !within_horizon {
            break Termination::TimeLimit;
        }
        if samples.len() >= limits.max_samples {
            break Termination::SampleLimit;
        }

        state = forces.rk4_step(state, dt);
        elapsed_s += dt;

        if state.y < -limits.ground_tolerance_m {
            break Termination::Landed;
        }
        if diverged_at.is_none() && !state.is_finite() {
            diverged_at = Some(samples.len());
        }
        samples.push(Sample::from_f64(state.x, state.y));
    };

    if let Some(index) = diverged_at {
        warn!(index, elapsed_s, "drag integration reached a non-finite state");
    }
    match termination {
        Termination::SampleLimit => warn!(
            max_samples = limits.max_samples,
            elapsed_s, "drag integration truncated at sample ceiling"
        ),
        Termination::Landed | Termination::TimeLimit => debug!(
            samples = samples.len(),
            elapsed_s,
            ?termination,
            "integrated drag trajectory"
        ),
    }

    Integration {
        trajectory: Trajectory::new(samples, dt),
        termination,
        diverged_at,
    }
}

#[cfg(test)]
mod tests {
    use super::{Forces, MotionState, Termination, integrate, trajectory};
    use crate::core::inputs::{DragInputs, LaunchInputs};
    use crate::core::limits::Limits;

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "actual={actual}, expected={expected}, tolerance={tolerance}"
        );
    }

    fn inputs(speed_mps: f64, angle_deg: f64, drag_coeff: f64) -> DragInputs {
        DragInputs {
            launch: LaunchInputs {
                speed_mps,
                angle_deg,
                gravity_mps2: 9.81,
            },
            mass_kg: 1.0,
            drag_coeff,
            max_time_s: 30.0,
            step_s: 0.005,
        }
    }

    #[test]
    fn derivative_has_no_drag_at_rest() {
        let forces = Forces {
            gravity_mps2: 9.81,
            drag_per_mass: 0.5,
        };
        let rate = forces.derivative(MotionState {
            x: 1.0,
            y: 2.0,
            vx: 0.0,
            vy: 0.0,
        });

        assert_eq!(rate.x, 0.0);
        assert_eq!(rate.vx, 0.0);
        assert_close(rate.vy, -9.81, 0.0);
    }

    #[test]
    fn derivative_opposes_velocity() {
        let forces = Forces {
            gravity_mps2: 0.0,
            drag_per_mass: 0.1,
        };
        let rate = forces.derivative(MotionState {
            x: 0.0,
            y: 0.0,
            vx: 3.0,
            vy: 4.0,
        });

        assert_close(rate.vx, -0.1 * 5.0 * 3.0, 1e-12);
        assert_close(rate.vy, -0.1 * 5.0 * 4.0, 1e-12);
    }

    #[test]
    fn rk4_is_exact_for_constant_gravity() {
        let forces = Forces {
            gravity_mps2: 9.81,
            drag_per_mass: 0.0,
        };
        let start = MotionState {
            x: 0.0,
            y: 0.0,
            vx: 10.0,
            vy: 10.0,
        };

        let next = forces.rk4_step(start, 0.1);

        assert_close(next.x, 1.0, 1e-12);
        assert_close(next.y, 1.0 - 0.5 * 9.81 * 0.01, 1e-12);
        assert_close(next.vy, 10.0 - 0.981, 1e-12);
    }

    #[test]
    fn without_drag_matches_closed_form_range() {
        let path = trajectory(inputs(20.0, 45.0, 0.0));
        let range = path.max_x().expect("samples") as f64;

        // Closed-form range is 40.77 m; the last sample sits within one step of landing.
        assert_close(range, 400.0 / 9.81, 20.0 * 0.005);
        assert!(path.iter().all(|p| p.y as f64 >= -1e-6));
    }

    #[test]
    fn lands_on_ground_crossing() {
        let run = integrate(inputs(30.0, 40.0, 0.02), Limits::default());

        assert_eq!(run.termination, Termination::Landed);
        assert!(run.trajectory.len() > 2);
    }

    #[test]
    fn stops_at_time_horizon() {
        let mut short = inputs(50.0, 80.0, 0.0);
        short.max_time_s = 1.0;

        let run = integrate(short, Limits::default());

        assert_eq!(run.termination, Termination::TimeLimit);
        assert!(run.trajectory.len() <= 202);
    }

    #[test]
    fn sample_ceiling_bounds_output() {
        let mut endless = inputs(5.0, 90.0, 0.0);
        endless.launch.gravity_mps2 = 0.0;
        endless.max_time_s = 1.0e9;

        let run = integrate(endless, Limits::default());

        assert_eq!(run.termination, Termination::SampleLimit);
        assert_eq!(run.trajectory.len(), 20_000);
    }

    #[test]
    fn custom_ceiling_is_respected() {
        let limits = Limits {
            max_samples: 10,
            ..Limits::default()
        };

        let run = integrate(inputs(40.0, 45.0, 0.0), limits);

        assert_eq!(run.trajectory.len(), 10);
    }

    #[test]
    fn zero_speed_keeps_only_origin() {
        let path = trajectory(inputs(0.0, 45.0, 0.1));

        assert_eq!(path.len(), 1);
    }

    #[test]
    fn zero_mass_keeps_non_finite_samples() {
        let mut massless = inputs(10.0, 45.0, 0.1);
        massless.mass_kg = 0.0;
        massless.max_time_s = 1.0;

        let run = integrate(massless, Limits::default());

        assert_eq!(run.diverged_at, Some(1));
        assert_eq!(run.termination, Termination::TimeLimit);
        assert!(run.trajectory.len() > 2);
        assert!(run.trajectory.get(0).expect("launch point").is_finite());
        assert!(!run.trajectory.get(1).expect("first step").is_finite());
    }

    #[test]
    fn finite_flight_has_no_divergence_mark() {
        let run = integrate(inputs(30.0, 40.0, 0.02), Limits::default());

        assert_eq!(run.diverged_at, None);
    }
}
