//! Digitizer trace files
//!
//! Whitespace-delimited rows without a header. Scopes export time and value
//! columns; only the last column is read. Blank lines are skipped.

use std::fs;
use std::path::Path;

use crate::error::{Result, WorkbenchError};
use crate::signal::SampleBuffer;

/// Parse trace text into samples
pub fn parse_trace(text: &str) -> Result<Vec<f64>> {
    let mut samples = Vec::new();

    for (line_no, line) in text.lines().enumerate() {
        let Some(field) = line.split_whitespace().last() else {
            continue;
        };
        let value = field.parse::<f64>().map_err(|_| {
            WorkbenchError::InvalidParameter(format!(
                "line {}: {:?} is not a number",
                line_no + 1,
                field
            ))
        })?;
        samples.push(value);
    }

    Ok(samples)
}

/// Load a trace recorded at `sample_rate`
pub fn read_trace(path: impl AsRef<Path>, sample_rate: f64) -> Result<SampleBuffer> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| WorkbenchError::io(path, e))?;
    let samples = parse_trace(&text)?;

    log::debug!("Read {} samples from {}", samples.len(), path.display());

    SampleBuffer::new(samples, sample_rate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_last_column() {
        let text = "0.0 1.5\n2.5e-11\t-0.25\n\n   \n5e-11 3e-3\n";
        assert_eq!(parse_trace(text).unwrap(), vec![1.5, -0.25, 3e-3]);
    }

    #[test]
    fn test_parse_single_column() {
        assert_eq!(parse_trace("1\n2\n3").unwrap(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_parse_rejects_text() {
        let err = parse_trace("1.0\nvolts\n").unwrap_err();
        assert!(matches!(err, WorkbenchError::InvalidParameter(ref m) if m.contains("line 2")));
    }

    #[test]
    fn test_read_trace_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "0 0.5").unwrap();
        writeln!(file, "1 -0.5").unwrap();

        let trace = read_trace(file.path(), 40e9).unwrap();
        assert_eq!(trace.samples(), &[0.5, -0.5]);
        assert_eq!(trace.sample_rate(), 40e9);
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_trace(dir.path().join("missing.txt"), 40e9).unwrap_err();
        assert!(matches!(err, WorkbenchError::IoFailure { .. }));
    }
}
