use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use trajectory_rust::core::inputs::{
    DEFAULT_ANGLE_DEG, DEFAULT_MASS_KG, DEFAULT_SPEED_MPS, ScalarInputs,
};
use trajectory_rust::core::limits::{
    DEFAULT_ANALYTIC_STEPS, DEFAULT_MAX_TIME_S, DEFAULT_RK4_STEP_S, EARTH_GRAVITY_MPS2,
};
use trajectory_rust::core::{AnalyticRequest, TrajectoryRequest};

#[derive(Parser, Debug)]
#[command(name = "trajectory")]
#[command(about = "Projectile flight paths with optional quadratic drag")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute one trajectory and print its metrics
    Solve(SolveArgs),
    /// Compute the drag-free and drag paths side by side
    Compare(CompareArgs),
    /// Enter the launch parameters interactively
    Prompt,
    /// Play a trajectory back frame by frame
    Play(PlayArgs),
}

#[derive(Args, Debug, Clone)]
pub struct LaunchArgs {
    /// Initial speed (m/s)
    #[arg(short = 'v', long, default_value_t = DEFAULT_SPEED_MPS, allow_hyphen_values = true)]
    pub speed: f64,

    /// Launch angle above horizontal (degrees)
    #[arg(short = 'a', long, default_value_t = DEFAULT_ANGLE_DEG, allow_hyphen_values = true)]
    pub angle: f64,

    /// Gravitational acceleration (m/s^2)
    #[arg(short = 'g', long, default_value_t = EARTH_GRAVITY_MPS2, allow_hyphen_values = true)]
    pub gravity: f64,

    /// Projectile mass (kg), used with --drag
    #[arg(short = 'm', long, default_value_t = DEFAULT_MASS_KG, allow_hyphen_values = true)]
    pub mass: f64,

    /// Combined drag coefficient c (kg/m); enables the drag model
    #[arg(short = 'c', long, allow_hyphen_values = true)]
    pub drag: Option<f64>,

    /// RK4 step (s), used with --drag
    #[arg(long, default_value_t = DEFAULT_RK4_STEP_S, allow_hyphen_values = true)]
    pub dt: f64,

    /// Integration horizon (s), used with --drag
    #[arg(long, default_value_t = DEFAULT_MAX_TIME_S)]
    pub max_time: f64,

    /// Samples across the drag-free flight
    #[arg(long, default_value_t = DEFAULT_ANALYTIC_STEPS)]
    pub steps: usize,
}

impl LaunchArgs {
    pub fn scalars(&self) -> ScalarInputs {
        ScalarInputs {
            speed_mps: self.speed,
            angle_deg: self.angle,
            gravity_mps2: self.gravity,
            mass_kg: self.mass,
            drag_coeff: self.drag.unwrap_or(0.0),
        }
    }

    pub fn request(&self) -> TrajectoryRequest {
        match self.drag {
            Some(_) => self.drag_request(),
            None => self.analytic_request(),
        }
    }

    pub fn analytic_request(&self) -> TrajectoryRequest {
        TrajectoryRequest::Analytic(AnalyticRequest {
            launch: self.scalars().launch(),
            steps: self.steps,
        })
    }

    pub fn drag_request(&self) -> TrajectoryRequest {
        TrajectoryRequest::Drag(self.scalars().with_drag(self.max_time, self.dt))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}

#[derive(Args, Debug)]
pub struct SolveArgs {
    #[command(flatten)]
    pub launch: LaunchArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Include every sample in text output
    #[arg(long)]
    pub samples: bool,

    /// Write an SVG chart of the trajectory
    #[arg(long)]
    pub plot: Option<PathBuf>,

    /// Write an SVG chart to a timestamped file in the current directory
    #[arg(long, conflicts_with = "plot")]
    pub plot_auto: bool,
}

#[derive(Args, Debug)]
pub struct CompareArgs {
    #[command(flatten)]
    pub launch: LaunchArgs,

    /// Write an SVG chart with both trajectories
    #[arg(long)]
    pub plot: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct PlayArgs {
    #[command(flatten)]
    pub launch: LaunchArgs,

    /// Milliseconds per frame
    #[arg(long, default_value_t = 16)]
    pub frame_ms: u64,

    /// Advance frames without waiting for wall time
    #[arg(long)]
    pub no_wait: bool,
}
