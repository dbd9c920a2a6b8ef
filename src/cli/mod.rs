pub mod args;
pub mod output;
pub mod plot;
pub mod prompt;

use std::io::{self, BufRead, Write};
use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chrono::Local;
use plotters::style::RGBColor;
use tracing::info;
use trajectory_rust::core::inputs::DEFAULT_DRAG_COEFF;
use trajectory_rust::core::{Session, Solution, TrajectoryRequest, solve_checked};

use self::args::{Cli, Command, CompareArgs, OutputFormat, PlayArgs, SolveArgs};
use self::plot::Series;

const PLAIN_COLOR: RGBColor = RGBColor(76, 141, 245);
const DRAG_COLOR: RGBColor = RGBColor(220, 70, 60);

pub fn run(cli: Cli) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Some(Command::Solve(args)) => run_solve(&args, &mut out),
        Some(Command::Compare(args)) => run_compare(&args, &mut out),
        Some(Command::Play(args)) => run_play(&args, &mut out),
        Some(Command::Prompt) | None => {
            let stdin = io::stdin();
            run_prompt(&mut stdin.lock(), &mut out)
        }
    }
}

fn solve(request: &TrajectoryRequest) -> Result<Solution> {
    let solution = solve_checked(request).context("Cannot compute trajectory")?;
    info!(
        samples = solution.trajectory.len(),
        range_m = solution.metrics.range_m,
        "computed trajectory"
    );
    Ok(solution)
}

fn run_solve(args: &SolveArgs, out: &mut impl Write) -> Result<()> {
    let request = args.launch.request();
    let solution = solve(&request)?;
    let now = Local::now();

    match args.format {
        OutputFormat::Text => {
            output::write_report(out, &request, &solution, now)?;
            if args.samples {
                writeln!(out)?;
                output::write_samples(out, &solution)?;
            }
        }
        OutputFormat::Json => output::write_json(out, &request, &solution, now)?,
        OutputFormat::Csv => output::write_csv(out, &solution)?,
    }

    let plot_path = match (&args.plot, args.plot_auto) {
        (Some(path), _) => Some(path.clone()),
        (None, true) => Some(plot::timestamped_path(now)),
        (None, false) => None,
    };
    if let Some(path) = plot_path {
        let (label, color) = if request.is_drag() {
            ("With drag", DRAG_COLOR)
        } else {
            ("No drag", PLAIN_COLOR)
        };
        plot::write_chart(
            &path,
            "Projectile trajectory",
            &[Series {
                label,
                trajectory: &solution.trajectory,
                color,
            }],
        )?;
        report_chart(&path);
    }
    Ok(())
}

fn run_compare(args: &CompareArgs, out: &mut impl Write) -> Result<()> {
    let mut launch = args.launch.clone();
    let drag_coeff = launch.drag.unwrap_or(DEFAULT_DRAG_COEFF);
    launch.drag = Some(drag_coeff);

    let plain_request = launch.analytic_request();
    let drag_request = launch.drag_request();
    let plain = solve(&plain_request)?;
    let dragged = solve(&drag_request)?;

    output::write_inputs(out, &drag_request)?;
    writeln!(out)?;
    writeln!(out, "---- No drag ----")?;
    output::write_metrics(out, &plain)?;
    writeln!(out)?;
    writeln!(out, "---- With drag (c = {drag_coeff} kg/m) ----")?;
    output::write_metrics(out, &dragged)?;

    if plain.metrics.range_m > 0.0 {
        let loss = 100.0 * (1.0 - dragged.metrics.range_m / plain.metrics.range_m);
        writeln!(out)?;
        writeln!(out, "Drag shortens the range by {loss:.1}%")?;
    }

    if let Some(path) = &args.plot {
        plot::write_chart(
            path,
            "Drag comparison",
            &[
                Series {
                    label: "No drag",
                    trajectory: &plain.trajectory,
                    color: PLAIN_COLOR,
                },
                Series {
                    label: "With drag",
                    trajectory: &dragged.trajectory,
                    color: DRAG_COLOR,
                },
            ],
        )?;
        report_chart(path);
    }
    Ok(())
}

fn run_prompt(input: &mut impl BufRead, out: &mut impl Write) -> Result<()> {
    let answers = prompt::ask(input, out)?;
    let values = answers.fields.parse();
    let request = TrajectoryRequest::from_scalars(
        values.inputs,
        answers.drag_enabled,
        values.max_time_s,
        values.step_s,
    );
    let solution = solve(&request)?;

    writeln!(out)?;
    output::write_report(out, &request, &solution, Local::now())
}

fn run_play(args: &PlayArgs, out: &mut impl Write) -> Result<()> {
    let mut session = Session::new(args.launch.scalars());
    session.set_drag_enabled(args.launch.drag.is_some());
    session.set_resolution(args.launch.steps, args.launch.dt, args.launch.max_time);
    let cadence = Duration::from_millis(args.frame_ms.max(1));

    let mut last_index = None;
    let mut elapsed = Duration::ZERO;
    let mut previous = Instant::now();
    loop {
        let sample = session.tick(elapsed).context("Cannot compute trajectory")?;
        let index = session.clock().index();
        if last_index != Some(index) {
            if let Some(p) = sample {
                writeln!(out, "frame {index:>5}  x = {:>10.3} m  y = {:>10.3} m", p.x, p.y)?;
            }
            last_index = Some(index);
        }

        if session.clock().is_finished() {
            break;
        }
        if args.no_wait {
            elapsed = cadence;
        } else {
            thread::sleep(cadence);
            let now = Instant::now();
            elapsed = now - previous;
            previous = now;
        }
    }

    let solution = session.solution()?;
    writeln!(out)?;
    output::write_metrics(out, &solution)?;
    Ok(())
}

fn report_chart(path: &Path) {
    println!("Chart saved: {}", path.display());
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use clap::Parser;

    use super::args::{Cli, Command};
    use super::{run_compare, run_play, run_prompt};

    #[test]
    fn prompt_with_defaults_reports_zero_flight() {
        let mut input = Cursor::new("\n\n\n\n\n");
        let mut out = Vec::new();

        run_prompt(&mut input, &mut out).expect("defaults are valid");

        let text = String::from_utf8(out).expect("utf8");
        assert!(text.contains("Range: 0.000 m"));
        assert!(text.contains("Time of Flight: 0.000 s"));
    }

    #[test]
    fn compare_reports_shorter_drag_range() {
        let cli = Cli::parse_from(["trajectory", "compare", "-v", "40", "-a", "45", "-c", "0.05"]);
        let Some(Command::Compare(args)) = cli.command else {
            panic!("expected compare");
        };
        let mut out = Vec::new();

        run_compare(&args, &mut out).expect("valid inputs");

        let text = String::from_utf8(out).expect("utf8");
        assert!(text.contains("---- With drag (c = 0.05 kg/m) ----"));
        assert!(text.contains("Drag shortens the range by"));
    }

    #[test]
    fn play_without_wait_visits_every_frame() {
        let cli = Cli::parse_from([
            "trajectory", "play", "-v", "10", "-a", "45", "--steps", "20", "--no-wait",
        ]);
        let Some(Command::Play(args)) = cli.command else {
            panic!("expected play");
        };
        let mut out = Vec::new();

        run_play(&args, &mut out).expect("valid inputs");

        let text = String::from_utf8(out).expect("utf8");
        let frames = text.lines().filter(|l| l.starts_with("frame")).count();
        assert!((20..=21).contains(&frames), "frames={frames}");
        assert!(text.contains("Samples: "));
    }
}
