pub const EARTH_GRAVITY_MPS2: f64 = 9.81;

pub const DEFAULT_ANALYTIC_STEPS: usize = 200;
pub const DEFAULT_RK4_STEP_S: f64 = 0.005;
pub const DEFAULT_MAX_TIME_S: f64 = 30.0;

pub const MAX_SAMPLES: usize = 20_000;
pub const GROUND_TOLERANCE_M: f64 = 1e-6;
pub const MIN_ANALYTIC_STEP_S: f64 = 1e-4;

/// Hard caps that bound every computation.
///
/// `max_samples` bounds the drag integrator's output (and therefore its cost)
/// regardless of the horizon and step it is given. `ground_tolerance_m` is how
/// far below launch height a drag state may dip before the flight counts as
/// landed. `min_analytic_step_s` keeps the closed-form sampler from stepping by
/// zero or a negative time when the flight time degenerates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Limits {
    pub max_samples: usize,
    pub ground_tolerance_m: f64,
    pub min_analytic_step_s: f64,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_samples: MAX_SAMPLES,
            ground_tolerance_m: GROUND_TOLERANCE_M,
            min_analytic_step_s: MIN_ANALYTIC_STEP_S,
        }
    }
}
