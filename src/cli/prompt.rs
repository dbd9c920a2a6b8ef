use std::io::{BufRead, Write};

use anyhow::{Context, Result, bail};
use trajectory_rust::core::FormFields;

/// Reads one line of raw text. Blank answers are kept blank so the form
/// parser can substitute the default.
fn read_field(input: &mut impl BufRead, out: &mut impl Write, prompt: &str) -> Result<String> {
    write!(out, "{prompt}")?;
    out.flush().context("Failed to flush stdout")?;

    let mut line = String::new();
    let bytes = input
        .read_line(&mut line)
        .context("Could not read input")?;
    if bytes == 0 {
        bail!("Input ended unexpectedly (EOF).");
    }
    Ok(line.trim().to_string())
}

pub struct Answers {
    pub fields: FormFields,
    pub drag_enabled: bool,
}

pub fn ask(input: &mut impl BufRead, out: &mut impl Write) -> Result<Answers> {
    let mut fields = FormFields {
        mass: read_field(input, out, "Mass (kg) [1]: ")?,
        gravity: read_field(input, out, "Gravity (m/s^2) [9.81]: ")?,
        speed: read_field(input, out, "Initial velocity (m/s) [0]: ")?,
        angle: read_field(input, out, "Initial angle (degrees) [0]: ")?,
        ..FormFields::default()
    };

    let drag = read_field(input, out, "With drag? [y/N]: ")?;
    let drag_enabled = matches!(drag.to_ascii_lowercase().as_str(), "y" | "yes");
    if drag_enabled {
        fields.drag_coeff = read_field(input, out, "Drag coeff c (kg/m) [0.1]: ")?;
        fields.step = read_field(input, out, "RK4 dt (s) [0.005]: ")?;
    }

    Ok(Answers {
        fields,
        drag_enabled,
    })
}
