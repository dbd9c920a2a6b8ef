use std::io::Write;

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use serde::Serialize;
use trajectory_rust::core::{Solution, TrajectoryRequest};

#[derive(Serialize)]
struct Report<'a> {
    generated: String,
    request: &'a TrajectoryRequest,
    #[serde(flatten)]
    solution: &'a Solution,
}

pub fn write_json(
    out: &mut impl Write,
    request: &TrajectoryRequest,
    solution: &Solution,
    generated: DateTime<Local>,
) -> Result<()> {
    let report = Report {
        generated: generated.to_rfc3339(),
        request,
        solution,
    };
    serde_json::to_writer_pretty(&mut *out, &report).context("Failed to encode JSON report")?;
    writeln!(out)?;
    Ok(())
}

pub fn write_csv(out: &mut impl Write, solution: &Solution) -> Result<()> {
    writeln!(out, "index,time_s,x_m,y_m")?;
    for (i, p) in solution.trajectory.iter().enumerate() {
        let t = i as f64 * solution.trajectory.step_s();
        writeln!(out, "{i},{t:.6},{:.6},{:.6}", p.x, p.y)?;
    }
    Ok(())
}

pub fn write_report(
    out: &mut impl Write,
    request: &TrajectoryRequest,
    solution: &Solution,
    generated: DateTime<Local>,
) -> Result<()> {
    writeln!(out, "Projectile Motion Report")?;
    writeln!(out, "Generated: {}", generated.format("%Y-%m-%dT%H:%M:%S"))?;
    writeln!(out)?;
    write_inputs(out, request)?;
    writeln!(out)?;
    writeln!(out, "---- Computed Results ----")?;
    write_metrics(out, solution)?;
    Ok(())
}

pub fn write_inputs(out: &mut impl Write, request: &TrajectoryRequest) -> Result<()> {
    let launch = request.launch();
    writeln!(out, "Initial Velocity: {} m/s", launch.speed_mps)?;
    writeln!(out, "Initial Angle: {} degrees", launch.angle_deg)?;
    writeln!(out, "Gravity: {} m/s^2", launch.gravity_mps2)?;
    match request {
        TrajectoryRequest::Analytic(analytic) => {
            writeln!(out, "Model: drag-free ({} steps)", analytic.steps)?;
        }
        TrajectoryRequest::Drag(drag) => {
            writeln!(out, "Mass: {} kg", drag.mass_kg)?;
            writeln!(out, "Drag coefficient: {} kg/m", drag.drag_coeff)?;
            writeln!(
                out,
                "Model: quadratic drag (RK4 dt {} s, horizon {} s)",
                drag.step_s, drag.max_time_s
            )?;
        }
    }
    Ok(())
}

pub fn write_metrics(out: &mut impl Write, solution: &Solution) -> Result<()> {
    for (metric, value) in solution.metrics.iter() {
        writeln!(out, "{}: {value:.3} {}", metric.label(), metric.unit())?;
    }
    writeln!(out, "Samples: {}", solution.trajectory.len())?;
    Ok(())
}

pub fn write_samples(out: &mut impl Write, solution: &Solution) -> Result<()> {
    writeln!(out, "{:>6} {:>10} {:>12} {:>12}", "i", "t (s)", "x (m)", "y (m)")?;
    for (i, p) in solution.trajectory.iter().enumerate() {
        let t = i as f64 * solution.trajectory.step_s();
        writeln!(out, "{i:>6} {t:>10.4} {:>12.4} {:>12.4}", p.x, p.y)?;
    }
    Ok(())
}
