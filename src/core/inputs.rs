use serde::Serialize;

use crate::core::limits::{DEFAULT_MAX_TIME_S, DEFAULT_RK4_STEP_S, EARTH_GRAVITY_MPS2};

pub const DEFAULT_MASS_KG: f64 = 1.0;
pub const DEFAULT_SPEED_MPS: f64 = 0.0;
pub const DEFAULT_ANGLE_DEG: f64 = 0.0;
pub const DEFAULT_DRAG_COEFF: f64 = 0.1;

/// Launch conditions shared by both models.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct LaunchInputs {
    pub speed_mps: f64,
    pub angle_deg: f64,
    pub gravity_mps2: f64,
}

impl LaunchInputs {
    pub fn velocity_components(&self) -> (f64, f64) {
        let theta = self.angle_deg.to_radians();
        let vx = self.speed_mps * theta.cos();
        let vy = self.speed_mps * theta.sin();
        (vx, vy)
    }
}

/// Everything the drag integrator needs. `drag_coeff` is the combined
/// coefficient `c` such that the drag force magnitude is `c * v^2`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct DragInputs {
    pub launch: LaunchInputs,
    pub mass_kg: f64,
    pub drag_coeff: f64,
    pub max_time_s: f64,
    pub step_s: f64,
}

/// The five physical parameters a user edits.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ScalarInputs {
    pub speed_mps: f64,
    pub angle_deg: f64,
    pub gravity_mps2: f64,
    pub mass_kg: f64,
    pub drag_coeff: f64,
}

impl Default for ScalarInputs {
    fn default() -> Self {
        Self {
            speed_mps: DEFAULT_SPEED_MPS,
            angle_deg: DEFAULT_ANGLE_DEG,
            gravity_mps2: EARTH_GRAVITY_MPS2,
            mass_kg: DEFAULT_MASS_KG,
            drag_coeff: DEFAULT_DRAG_COEFF,
        }
    }
}

impl ScalarInputs {
    pub fn launch(&self) -> LaunchInputs {
        LaunchInputs {
            speed_mps: self.speed_mps,
            angle_deg: self.angle_deg,
            gravity_mps2: self.gravity_mps2,
        }
    }

    pub fn with_drag(&self, max_time_s: f64, step_s: f64) -> DragInputs {
        DragInputs {
            launch: self.launch(),
            mass_kg: self.mass_kg,
            drag_coeff: self.drag_coeff,
            max_time_s,
            step_s,
        }
    }
}

/// Raw text as typed into the input form.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormFields {
    pub mass: String,
    pub gravity: String,
    pub speed: String,
    pub angle: String,
    pub drag_coeff: String,
    pub step: String,
}

/// Parsed form values. Anything blank or unparsable has already been replaced
/// by its default.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FormValues {
    pub inputs: ScalarInputs,
    pub step_s: f64,
    pub max_time_s: f64,
}

impl FormFields {
    pub fn parse(&self) -> FormValues {
        let defaults = ScalarInputs::default();
        FormValues {
            inputs: ScalarInputs {
                speed_mps: parse_or(&self.speed, defaults.speed_mps),
                angle_deg: parse_or(&self.angle, defaults.angle_deg),
                gravity_mps2: parse_or(&self.gravity, defaults.gravity_mps2),
                mass_kg: parse_or(&self.mass, defaults.mass_kg),
                drag_coeff: parse_or(&self.drag_coeff, defaults.drag_coeff),
            },
            step_s: parse_or(&self.step, DEFAULT_RK4_STEP_S),
            max_time_s: DEFAULT_MAX_TIME_S,
        }
    }
}

/// Parses a finite number, or returns `fallback`.
pub fn parse_or(text: &str, fallback: f64) -> f64 {
    match text.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => fallback,
    }
}
