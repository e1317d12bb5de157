//! Owned sample buffers and time/sample-index conversions
//!
//! Every pipeline stage takes a buffer by reference or by value and hands a new
//! one back; nothing is shared between invocations.

use crate::error::{Result, WorkbenchError};

/// Fixed-length real-valued trace with its sample rate
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer {
    samples: Vec<f64>,

    /// Sample rate in samples/second
    sample_rate: f64,
}

impl SampleBuffer {
    /// Wrap existing samples
    ///
    /// # Arguments
    /// * `samples` - Amplitudes indexed by sample number
    /// * `sample_rate` - Sample rate in Hz (must be positive and finite)
    pub fn new(samples: Vec<f64>, sample_rate: f64) -> Result<Self> {
        validate_sample_rate(sample_rate)?;
        Ok(Self {
            samples,
            sample_rate,
        })
    }

    /// Zero-filled buffer of `len` samples
    pub fn zeros(len: usize, sample_rate: f64) -> Result<Self> {
        Self::new(vec![0.0; len], sample_rate)
    }

    /// Assemble `leading_zeros` zeros, the active segment, then zeros up to
    /// exactly `total_samples`
    ///
    /// Fails with `LengthMismatch` when the leading zeros and the active
    /// segment alone already exceed `total_samples`.
    pub fn from_segments(
        leading_zeros: usize,
        active: &[f64],
        total_samples: usize,
        sample_rate: f64,
        context: &str,
    ) -> Result<Self> {
        check_segment_fits(leading_zeros, active.len(), total_samples, context)?;

        let mut samples = Vec::with_capacity(total_samples);
        samples.resize(leading_zeros, 0.0);
        samples.extend_from_slice(active);
        samples.resize(total_samples, 0.0);

        Self::new(samples, sample_rate)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn samples_mut(&mut self) -> &mut [f64] {
        &mut self.samples
    }

    pub fn into_samples(self) -> Vec<f64> {
        self.samples
    }

    /// Sample interval in seconds
    pub fn sample_interval(&self) -> f64 {
        1.0 / self.sample_rate
    }

    /// Fail with `InvalidParameter` unless the buffer was recorded at `expected` Hz
    pub fn check_sample_rate(&self, expected: f64, context: &str) -> Result<()> {
        if (self.sample_rate - expected).abs() <= 1e-9 * expected.abs() {
            return Ok(());
        }
        Err(WorkbenchError::InvalidParameter(format!(
            "{} is sampled at {} Hz but the configuration expects {} Hz",
            context, self.sample_rate, expected
        )))
    }

    /// Total trace duration in seconds (len / rate)
    pub fn duration(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate
    }

    /// Time of sample `index` in seconds
    pub fn time_at(&self, index: usize) -> f64 {
        index as f64 / self.sample_rate
    }
}

/// Fail with `LengthMismatch` unless `leading_zeros + active_len <= total_samples`
///
/// A sum that overflows `usize` is reported as `usize::MAX`.
pub fn check_segment_fits(
    leading_zeros: usize,
    active_len: usize,
    total_samples: usize,
    context: &str,
) -> Result<()> {
    match leading_zeros.checked_add(active_len) {
        Some(occupied) if occupied <= total_samples => Ok(()),
        occupied => Err(WorkbenchError::length_mismatch(
            format!("{} does not fit in the waveform", context),
            occupied.unwrap_or(usize::MAX),
            total_samples,
        )),
    }
}

/// Reject rates that cannot convert time to samples
pub fn validate_sample_rate(sample_rate: f64) -> Result<()> {
    if sample_rate.is_finite() && sample_rate > 0.0 {
        Ok(())
    } else {
        Err(WorkbenchError::InvalidParameter(format!(
            "sample rate must be positive (got {} Hz)",
            sample_rate
        )))
    }
}

/// floor(time × rate); negative products saturate to 0
#[inline]
pub fn floor_samples(time: f64, sample_rate: f64) -> usize {
    (time * sample_rate).floor() as usize
}

/// ceil(time × rate); negative products saturate to 0
#[inline]
pub fn ceil_samples(time: f64, sample_rate: f64) -> usize {
    (time * sample_rate).ceil() as usize
}

/// round(time × rate); negative products saturate to 0
#[inline]
pub fn round_samples(time: f64, sample_rate: f64) -> usize {
    (time * sample_rate).round() as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_segments_exact_length() {
        let buf = SampleBuffer::from_segments(3, &[1.0, 2.0], 8, 10.0, "pulse").unwrap();

        assert_eq!(buf.len(), 8);
        assert_eq!(buf.samples(), &[0.0, 0.0, 0.0, 1.0, 2.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_from_segments_overflow() {
        let err = SampleBuffer::from_segments(7, &[1.0, 2.0], 8, 10.0, "pulse").unwrap_err();
        assert!(matches!(
            err,
            WorkbenchError::LengthMismatch { left: 9, right: 8, .. }
        ));
    }

    #[test]
    fn test_segment_fit_saturates() {
        assert!(check_segment_fits(3, 5, 8, "pulse").is_ok());
        assert!(matches!(
            check_segment_fits(usize::MAX, 2500, 110_000, "chirp"),
            Err(WorkbenchError::LengthMismatch { left: usize::MAX, right: 110_000, .. })
        ));
    }

    #[test]
    fn test_time_conversions() {
        let buf = SampleBuffer::zeros(400, 40e9).unwrap();

        assert!((buf.duration() - 10e-9).abs() < 1e-20);
        assert!((buf.time_at(40) - 1e-9).abs() < 1e-20);
        assert_eq!(floor_samples(0.6e-6, 10e9), 6000);
        assert_eq!(ceil_samples(11e-6, 10e9), 110_000);
        assert_eq!(round_samples(0.25e-6, 10e9), 2500);
        assert_eq!(floor_samples(-1e-6, 10e9), 0);
    }

    #[test]
    fn test_check_sample_rate() {
        let buf = SampleBuffer::zeros(10, 40e9).unwrap();
        assert!(buf.check_sample_rate(40e9, "signal").is_ok());
        assert!(matches!(
            buf.check_sample_rate(10e9, "signal"),
            Err(WorkbenchError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_invalid_sample_rate() {
        assert!(SampleBuffer::zeros(10, 0.0).is_err());
        assert!(SampleBuffer::zeros(10, f64::NAN).is_err());
    }
}
