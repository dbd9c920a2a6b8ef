use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow};
use chrono::{DateTime, Local};
use plotters::prelude::*;
use trajectory_rust::core::Trajectory;
use trajectory_rust::core::window::AxisWindow;

const CHART_SIZE: (u32, u32) = (1200, 640);

pub struct Series<'a> {
    pub label: &'a str,
    pub trajectory: &'a Trajectory,
    pub color: RGBColor,
}

pub fn timestamped_path(now: DateTime<Local>) -> PathBuf {
    PathBuf::from(format!("trajectory_{}.svg", now.format("%Y%m%d_%H%M%S")))
}

/// Draws the trajectories on shared fixed-ratio axes.
pub fn write_chart(path: &Path, title: &str, series: &[Series<'_>]) -> Result<()> {
    let window = AxisWindow::for_trajectories(series.iter().map(|s| s.trajectory));

    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(|e| anyhow!("Failed to draw chart: {e}"))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 28))
        .margin(16)
        .x_label_area_size(40)
        .y_label_area_size(56)
        .build_cartesian_2d(0.0..window.x_span, 0.0..window.y_span)
        .map_err(|e| anyhow!("Failed to build chart: {e}"))?;

    chart
        .configure_mesh()
        .x_desc("Distance (m)")
        .y_desc("Height (m)")
        .draw()
        .map_err(|e| anyhow!("Failed to draw axes: {e}"))?;

    for s in series {
        let color = s.color;
        chart
            .draw_series(LineSeries::new(
                s.trajectory.iter().map(|p| (f64::from(p.x), f64::from(p.y))),
                color.stroke_width(2),
            ))
            .map_err(|e| anyhow!("Failed to draw {}: {e}", s.label))?
            .label(s.label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    if series.len() > 1 {
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(|e| anyhow!("Failed to draw legend: {e}"))?;
    }

    root.present()
        .map_err(|e| anyhow!("Failed to write {}: {e}", path.display()))?;
    Ok(())
}
