//! Caller-side state for an interactive run: the edited inputs, the last
//! solution (recomputed only when the request changes) and the playback
//! clock that animates it.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::core::error::TrajectoryError;
use crate::core::inputs::{FormValues, ScalarInputs, parse_or};
use crate::core::limits::{DEFAULT_ANALYTIC_STEPS, DEFAULT_MAX_TIME_S, DEFAULT_RK4_STEP_S};
use crate::core::playback::PlaybackClock;
use crate::core::request::{AnalyticRequest, Solution, TrajectoryRequest, solve_checked};
use crate::core::trajectory::Sample;

pub struct Session {
    inputs: ScalarInputs,
    drag_enabled: bool,
    steps: usize,
    step_s: f64,
    max_time_s: f64,
    cached: Option<(TrajectoryRequest, Arc<Solution>)>,
    clock: PlaybackClock,
}

impl Session {
    pub fn new(inputs: ScalarInputs) -> Self {
        Self {
            inputs,
            drag_enabled: false,
            steps: DEFAULT_ANALYTIC_STEPS,
            step_s: DEFAULT_RK4_STEP_S,
            max_time_s: DEFAULT_MAX_TIME_S,
            cached: None,
            clock: PlaybackClock::new(0),
        }
    }

    pub fn from_form(values: FormValues) -> Self {
        let mut session = Self::new(values.inputs);
        session.step_s = values.step_s;
        session.max_time_s = values.max_time_s;
        session
    }

    pub fn inputs(&self) -> ScalarInputs {
        self.inputs
    }

    pub fn set_inputs(&mut self, inputs: ScalarInputs) {
        self.inputs = inputs;
    }

    pub fn drag_enabled(&self) -> bool {
        self.drag_enabled
    }

    pub fn set_drag_enabled(&mut self, enabled: bool) {
        self.drag_enabled = enabled;
    }

    pub fn step_s(&self) -> f64 {
        self.step_s
    }

    /// Sets the drag-free sample count and the drag integration step and
    /// horizon.
    pub fn set_resolution(&mut self, steps: usize, step_s: f64, max_time_s: f64) {
        self.steps = steps;
        self.step_s = step_s;
        self.max_time_s = max_time_s;
    }

    /// Applies typed text to the drag coefficient; unparsable text keeps the
    /// current value.
    pub fn edit_drag_coeff(&mut self, text: &str) {
        self.inputs.drag_coeff = parse_or(text, self.inputs.drag_coeff);
    }

    /// Applies typed text to the RK4 step; unparsable text keeps the current
    /// value.
    pub fn edit_step(&mut self, text: &str) {
        self.step_s = parse_or(text, self.step_s);
    }

    pub fn request(&self) -> TrajectoryRequest {
        if self.drag_enabled {
            TrajectoryRequest::Drag(self.inputs.with_drag(self.max_time_s, self.step_s))
        } else {
            TrajectoryRequest::Analytic(AnalyticRequest {
                launch: self.inputs.launch(),
                steps: self.steps,
            })
        }
    }

    /// Returns the solution for the current inputs, computing it only if the
    /// request differs from the cached one. A new solution rewinds playback.
    pub fn solution(&mut self) -> Result<Arc<Solution>, TrajectoryError> {
        let request = self.request();
        if let Some((cached_request, solution)) = &self.cached {
            if *cached_request == request {
                return Ok(Arc::clone(solution));
            }
        }

        let solution = match solve_checked(&request) {
            Ok(solution) => Arc::new(solution),
            Err(err) => {
                self.cached = None;
                self.clock.replace(0);
                return Err(err);
            }
        };
        debug!(
            samples = solution.trajectory.len(),
            drag = request.is_drag(),
            "recomputed trajectory"
        );
        self.clock.replace(solution.trajectory.len());
        self.cached = Some((request, Arc::clone(&solution)));
        Ok(solution)
    }

    pub fn clock(&self) -> &PlaybackClock {
        &self.clock
    }

    pub fn play(&mut self) {
        self.clock.play();
    }

    pub fn reset(&mut self) {
        self.clock.reset();
    }

    /// Advances playback and returns the sample to draw this frame.
    pub fn tick(&mut self, elapsed: Duration) -> Result<Option<Sample>, TrajectoryError> {
        let solution = self.solution()?;
        let index = self.clock.advance(elapsed);
        Ok(solution.trajectory.get(index))
    }
}
