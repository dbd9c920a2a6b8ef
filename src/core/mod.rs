pub mod analytic;
pub mod drag;
pub mod error;
pub mod inputs;
pub mod limits;
pub mod metrics;
pub mod playback;
pub mod request;
pub mod session;
pub mod trajectory;
pub mod window;

pub use error::TrajectoryError;
pub use inputs::{DragInputs, FormFields, LaunchInputs, ScalarInputs};
pub use limits::Limits;
pub use metrics::{Metric, Metrics};
pub use playback::PlaybackClock;
pub use request::{AnalyticRequest, Solution, TrajectoryRequest, solve, solve_checked};
pub use session::Session;
pub use trajectory::{Sample, Trajectory};
