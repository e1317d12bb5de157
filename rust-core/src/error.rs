//! Error taxonomy shared by the synthesizer, spectral processor and spur extractor

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WorkbenchError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Out of range: {0}")]
    OutOfRange(String),

    #[error("Invalid gate: {0}")]
    InvalidGate(String),

    #[error("Length mismatch: {context} ({left} vs {right} samples)")]
    LengthMismatch {
        context: String,
        left: usize,
        right: usize,
    },

    #[error("DR frequency {frequency_mhz} MHz is not in {band} band range ({low_mhz} - {high_mhz} MHz)")]
    BandMismatch {
        band: &'static str,
        frequency_mhz: f64,
        low_mhz: f64,
        high_mhz: f64,
    },

    #[error("Timing violation: {0}")]
    TimingViolation(String),

    #[error("I/O failure on {path}: {source}")]
    IoFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Job cancelled")]
    Cancelled,

    #[error("Worker thread panicked")]
    WorkerPanicked,
}

impl WorkbenchError {
    pub(crate) fn length_mismatch(context: impl Into<String>, left: usize, right: usize) -> Self {
        WorkbenchError::LengthMismatch {
            context: context.into(),
            left,
            right,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        WorkbenchError::IoFailure {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, WorkbenchError>;

/// Parse a host-supplied text field into a finite number
///
/// # Arguments
/// * `name` - Human-readable field name used in the error message
/// * `text` - Raw text as typed by the user
pub fn parse_param(name: &str, text: &str) -> Result<f64> {
    let trimmed = text.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(WorkbenchError::InvalidParameter(format!(
            "{} should be a number (got {:?})",
            name, trimmed
        ))),
    }
}
