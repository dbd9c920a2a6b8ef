use serde::Serialize;
use tracing::warn;

use crate::core::analytic;
use crate::core::drag;
use crate::core::error::{TrajectoryError, finite, non_negative, positive};
use crate::core::inputs::{DragInputs, LaunchInputs, ScalarInputs};
use crate::core::limits::{DEFAULT_ANALYTIC_STEPS, Limits};
use crate::core::metrics::Metrics;
use crate::core::trajectory::Trajectory;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct AnalyticRequest {
    pub launch: LaunchInputs,
    pub steps: usize,
}

/// Which model to run, with exactly the inputs that model needs.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum TrajectoryRequest {
    Analytic(AnalyticRequest),
    Drag(DragInputs),
}

impl TrajectoryRequest {
    pub fn analytic(launch: LaunchInputs) -> Self {
        TrajectoryRequest::Analytic(AnalyticRequest {
            launch,
            steps: DEFAULT_ANALYTIC_STEPS,
        })
    }

    /// Builds the request for a drag on/off toggle. With drag off, the mass,
    /// drag coefficient, horizon and step are not used.
    pub fn from_scalars(
        inputs: ScalarInputs,
        drag_enabled: bool,
        max_time_s: f64,
        step_s: f64,
    ) -> Self {
        if drag_enabled {
            TrajectoryRequest::Drag(inputs.with_drag(max_time_s, step_s))
        } else {
            TrajectoryRequest::analytic(inputs.launch())
        }
    }

    pub fn launch(&self) -> LaunchInputs {
        match self {
            TrajectoryRequest::Analytic(request) => request.launch,
            TrajectoryRequest::Drag(inputs) => inputs.launch,
        }
    }

    pub fn is_drag(&self) -> bool {
        matches!(self, TrajectoryRequest::Drag(_))
    }

    pub fn validate(&self) -> Result<(), TrajectoryError> {
        let launch = self.launch();
        non_negative("initial speed", launch.speed_mps)?;
        finite("launch angle", launch.angle_deg)?;
        positive("gravity", launch.gravity_mps2)?;

        match self {
            TrajectoryRequest::Analytic(request) => {
                if request.steps == 0 {
                    return Err(TrajectoryError::invalid(
                        "steps",
                        "at least one step is required",
                    ));
                }
            }
            TrajectoryRequest::Drag(inputs) => {
                positive("mass", inputs.mass_kg)?;
                non_negative("drag coefficient", inputs.drag_coeff)?;
                positive("time step", inputs.step_s)?;
                positive("max time", inputs.max_time_s)?;
            }
        }
        Ok(())
    }
}

/// A trajectory and its summary metrics, computed together.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Solution {
    pub trajectory: Trajectory,
    pub metrics: Metrics,
}

/// Runs the requested model. Degenerate inputs give degenerate numbers rather
/// than errors; see [`solve_checked`].
pub fn solve(request: &TrajectoryRequest) -> Solution {
    solve_with_limits(request, Limits::default())
}

pub fn solve_with_limits(request: &TrajectoryRequest, limits: Limits) -> Solution {
    run(request, limits).0
}

/// Validates the request, solves it, and rejects non-finite output.
pub fn solve_checked(request: &TrajectoryRequest) -> Result<Solution, TrajectoryError> {
    solve_checked_with_limits(request, Limits::default())
}

pub fn solve_checked_with_limits(
    request: &TrajectoryRequest,
    limits: Limits,
) -> Result<Solution, TrajectoryError> {
    if let Err(err) = request.validate() {
        warn!(%err, "rejected trajectory request");
        return Err(err);
    }

    let (solution, diverged_at) = run(request, limits);
    if let Some(index) = diverged_at {
        return Err(TrajectoryError::Divergence { index });
    }
    if let Some(index) = solution.trajectory.iter().position(|p| !p.is_finite()) {
        return Err(TrajectoryError::Divergence { index });
    }
    if !solution.metrics.is_finite() {
        return Err(TrajectoryError::Divergence {
            index: solution.trajectory.len(),
        });
    }
    Ok(solution)
}

fn run(request: &TrajectoryRequest, limits: Limits) -> (Solution, Option<usize>) {
    match request {
        TrajectoryRequest::Analytic(request) => {
            let trajectory = analytic::trajectory_with_limits(request.launch, request.steps, limits);
            let metrics = analytic::metrics(request.launch);
            (
                Solution {
                    trajectory,
                    metrics,
                },
                None,
            )
        }
        TrajectoryRequest::Drag(inputs) => {
            let run = drag::integrate(*inputs, limits);
            let metrics = Metrics::from_samples(&run.trajectory);
            (
                Solution {
                    trajectory: run.trajectory,
                    metrics,
                },
                run.diverged_at,
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AnalyticRequest, TrajectoryRequest, solve, solve_checked};
    use crate::core::error::TrajectoryError;
    use crate::core::inputs::{DragInputs, LaunchInputs, ScalarInputs};

    fn scalars() -> ScalarInputs {
        ScalarInputs {
            speed_mps: 30.0,
            angle_deg: 30.0,
            gravity_mps2: 9.81,
            mass_kg: 1.0,
            drag_coeff: 0.05,
        }
    }

    #[test]
    fn toggle_selects_model() {
        assert!(!TrajectoryRequest::from_scalars(scalars(), false, 30.0, 0.005).is_drag());
        assert!(TrajectoryRequest::from_scalars(scalars(), true, 30.0, 0.005).is_drag());
    }

    #[test]
    fn analytic_solution_uses_closed_form_metrics() {
        let solution = solve(&TrajectoryRequest::from_scalars(scalars(), false, 30.0, 0.005));

        let expected = 900.0 * 60f64.to_radians().sin() / 9.81;
        assert!((solution.metrics.range_m - expected).abs() < 1e-9);
        assert!(!solution.trajectory.is_empty());
    }

    #[test]
    fn drag_solution_scans_samples() {
        let solution = solve(&TrajectoryRequest::from_scalars(scalars(), true, 30.0, 0.005));

        let max_x = solution.trajectory.max_x().expect("samples") as f64;
        assert_eq!(solution.metrics.range_m, max_x);
        assert_eq!(
            solution.metrics.time_of_flight_s,
            solution.trajectory.len() as f64 * 0.005
        );
    }

    #[test]
    fn checked_rejects_zero_mass_with_drag() {
        let mut inputs = scalars();
        inputs.mass_kg = 0.0;

        let err = solve_checked(&TrajectoryRequest::from_scalars(inputs, true, 30.0, 0.005))
            .expect_err("zero mass");

        assert!(matches!(
            err,
            TrajectoryError::Validation {
                parameter: "mass",
                ..
            }
        ));
    }

    #[test]
    fn checked_ignores_mass_without_drag() {
        let mut inputs = scalars();
        inputs.mass_kg = 0.0;

        assert!(solve_checked(&TrajectoryRequest::from_scalars(inputs, false, 30.0, 0.005)).is_ok());
    }

    #[test]
    fn checked_rejects_non_positive_step() {
        let err = solve_checked(&TrajectoryRequest::from_scalars(scalars(), true, 30.0, 0.0))
            .expect_err("zero step");

        assert!(err.to_string().contains("time step"));
    }

    #[test]
    fn checked_rejects_zero_gravity() {
        let mut inputs = scalars();
        inputs.gravity_mps2 = 0.0;

        assert!(solve_checked(&TrajectoryRequest::from_scalars(inputs, false, 30.0, 0.005)).is_err());
    }

    #[test]
    fn checked_reports_overflow_as_divergence() {
        let mut inputs = scalars();
        inputs.speed_mps = 1.0e200;
        inputs.drag_coeff = 0.0;

        let err = solve_checked(&TrajectoryRequest::from_scalars(inputs, true, 30.0, 0.005))
            .expect_err("samples overflow f32");

        assert!(matches!(err, TrajectoryError::Divergence { .. }));
    }

    #[test]
    fn unchecked_drag_keeps_non_finite_samples() {
        let request = TrajectoryRequest::Drag(DragInputs {
            launch: LaunchInputs {
                speed_mps: 10.0,
                angle_deg: 45.0,
                gravity_mps2: 9.81,
            },
            mass_kg: 0.0,
            drag_coeff: 0.1,
            max_time_s: 1.0,
            step_s: 0.005,
        });

        let solution = solve(&request);
        assert!(solution.trajectory.len() > 2);
        assert!(solution.trajectory.iter().skip(1).all(|p| !p.is_finite()));

        let err = solve_checked(&request).expect_err("massless drag");
        assert!(matches!(err, TrajectoryError::Validation { .. }));
    }

    #[test]
    fn checked_accepts_huge_step_count() {
        let request = TrajectoryRequest::Analytic(AnalyticRequest {
            launch: LaunchInputs {
                speed_mps: 10.0,
                angle_deg: 45.0,
                gravity_mps2: 9.81,
            },
            steps: 1 << 40,
        });

        let solution = solve_checked(&request).expect("valid inputs");

        assert_eq!(solution.trajectory.step_s(), 1e-4);
        assert!(solution.trajectory.len() < 20_000);
    }
}
