//! Digital trigger marker channel
//!
//! Boundary convention (kept for compatibility with existing AWG files):
//!
//! ```text
//! n_on  = floor(on_time  × rate)
//! n_off = ceil(off_time × rate)
//!
//! [0, n_on - 1)      -> 0
//! [n_on - 1, n_off)  -> 1      (n_off - n_on + 1 samples)
//! [n_off, total)     -> 0
//! ```
//!
//! The marker therefore rises one sample before `n_on` and stays high through
//! sample `n_off - 1`.

use crate::error::{Result, WorkbenchError};
use crate::signal::buffer::{ceil_samples, floor_samples, validate_sample_rate, SampleBuffer};

/// Sample index range the marker is high for
pub fn marker_bounds(on_time: f64, off_time: f64, sample_rate: f64) -> Result<(usize, usize)> {
    if !(on_time.is_finite() && off_time.is_finite()) || on_time < 0.0 || off_time < 0.0 {
        return Err(WorkbenchError::TimingViolation(format!(
            "trigger times must be non-negative (on {} s, off {} s)",
            on_time, off_time
        )));
    }
    if on_time > off_time {
        return Err(WorkbenchError::TimingViolation(format!(
            "trigger start ({} s) is after trigger stop ({} s)",
            on_time, off_time
        )));
    }

    let n_on = floor_samples(on_time, sample_rate);
    let n_off = ceil_samples(off_time, sample_rate);

    if n_on == 0 {
        return Err(WorkbenchError::TimingViolation(format!(
            "trigger start {} s falls on the first sample; it must be at least one sample in",
            on_time
        )));
    }

    Ok((n_on - 1, n_off))
}

/// Synthesize the 0/1 marker channel
///
/// # Arguments
/// * `on_time` - Trigger rise time (s)
/// * `off_time` - Trigger fall time (s)
/// * `sample_rate` - AWG sample rate (Hz)
/// * `total_samples` - Length of the output buffer
pub fn synthesize_marker(
    on_time: f64,
    off_time: f64,
    sample_rate: f64,
    total_samples: usize,
) -> Result<SampleBuffer> {
    validate_sample_rate(sample_rate)?;

    let (first_high, end_high) = marker_bounds(on_time, off_time, sample_rate)?;

    if end_high > total_samples {
        return Err(WorkbenchError::TimingViolation(format!(
            "trigger stop sample {} is past the end of the {}-sample waveform",
            end_high, total_samples
        )));
    }

    let ones = vec![1.0; end_high - first_high];
    SampleBuffer::from_segments(first_high, &ones, total_samples, sample_rate, "marker")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_legacy_boundaries() {
        let rate = 10e9;
        let total = ceil_samples(11e-6, rate);
        let marker = synthesize_marker(0.4e-6, 1.7e-6, rate, total).unwrap();

        let n_on = floor_samples(0.4e-6, rate);
        let n_off = ceil_samples(1.7e-6, rate);

        assert_eq!(marker.len(), 110_000);
        assert!(marker.samples()[..n_on - 1].iter().all(|&x| x == 0.0));
        assert!(marker.samples()[n_on - 1..n_off].iter().all(|&x| x == 1.0));
        assert!(marker.samples()[n_off..].iter().all(|&x| x == 0.0));

        let high = marker.samples().iter().filter(|&&x| x == 1.0).count();
        assert_eq!(high, n_off - n_on + 1);
        assert_eq!(high, 13_001);
    }

    #[test]
    fn test_marker_is_binary() {
        let marker = synthesize_marker(1e-9, 5e-9, 10e9, 100).unwrap();
        assert!(marker.samples().iter().all(|&x| x == 0.0 || x == 1.0));
        assert_eq!(marker.samples()[9], 1.0);
        assert_eq!(marker.samples()[8], 0.0);
        assert_eq!(marker.samples()[49], 1.0);
        assert_eq!(marker.samples()[50], 0.0);
    }

    #[test]
    fn test_marker_timing_violations() {
        let rate = 10e9;

        assert!(matches!(
            synthesize_marker(2e-6, 1e-6, rate, 110_000),
            Err(WorkbenchError::TimingViolation(_))
        ));
        assert!(matches!(
            synthesize_marker(0.0, 1e-6, rate, 110_000),
            Err(WorkbenchError::TimingViolation(_))
        ));
        assert!(matches!(
            synthesize_marker(0.4e-6, 12e-6, rate, 110_000),
            Err(WorkbenchError::TimingViolation(_))
        ));
    }
}
