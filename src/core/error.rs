use std::error::Error;
use std::fmt;

/// Rejection from the checked solving path.
#[derive(Clone, Debug, PartialEq)]
pub enum TrajectoryError {
    /// An input is outside the range the models are defined for.
    Validation {
        parameter: &'static str,
        reason: String,
    },
    /// A computed value became NaN or infinite. `index` is the sample at which
    /// it happened.
    Divergence { index: usize },
}

impl TrajectoryError {
    pub(crate) fn invalid(parameter: &'static str, reason: impl Into<String>) -> Self {
        TrajectoryError::Validation {
            parameter,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for TrajectoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrajectoryError::Validation { parameter, reason } => {
                write!(f, "Invalid {parameter}: {reason}")
            }
            TrajectoryError::Divergence { index } => {
                write!(f, "Integration diverged at sample {index}")
            }
        }
    }
}

impl Error for TrajectoryError {}

/// Requires a finite value.
pub(crate) fn finite(parameter: &'static str, value: f64) -> Result<f64, TrajectoryError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(TrajectoryError::invalid(
            parameter,
            format!("'{value}' is not a finite number"),
        ))
    }
}

pub(crate) fn positive(parameter: &'static str, value: f64) -> Result<f64, TrajectoryError> {
    if finite(parameter, value)? > 0.0 {
        Ok(value)
    } else {
        Err(TrajectoryError::invalid(
            parameter,
            format!("must be greater than zero, got {value}"),
        ))
    }
}

pub(crate) fn non_negative(parameter: &'static str, value: f64) -> Result<f64, TrajectoryError> {
    if finite(parameter, value)? >= 0.0 {
        Ok(value)
    } else {
        Err(TrajectoryError::invalid(
            parameter,
            format!("cannot be negative, got {value}"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::{TrajectoryError, non_negative, positive};

    #[test]
    fn describes_the_offending_parameter() {
        let err = positive("gravity", -9.81).expect_err("negative gravity");

        assert_eq!(
            err.to_string(),
            "Invalid gravity: must be greater than zero, got -9.81"
        );
    }

    #[test]
    fn rejects_non_finite_before_range_checks() {
        let err = non_negative("speed", f64::NAN).expect_err("NaN speed");

        assert!(matches!(
            err,
            TrajectoryError::Validation {
                parameter: "speed",
                ..
            }
        ));
        assert!(err.to_string().contains("not a finite number"));
    }

    #[test]
    fn zero_is_non_negative_but_not_positive() {
        assert!(non_negative("drag coefficient", 0.0).is_ok());
        assert!(positive("mass", 0.0).is_err());
    }
}
