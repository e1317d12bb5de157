//! Linear frequency-swept (chirped) excitation pulse
//!
//! The chirp phase is
//!
//! ```text
//! φ(t) = 2π·f0·t + π·B·t²/T
//! ```
//!
//! so the instantaneous frequency φ'(t)/2π sweeps linearly from `f0` at
//! `t = 0` to `f0 + B` at `t = T`.

use std::f64::consts::PI;

use crate::error::{Result, WorkbenchError};
use crate::signal::buffer::{
    check_segment_fits, floor_samples, round_samples, validate_sample_rate, SampleBuffer,
};

/// Chirp phase in radians at time `t` from the chirp start
#[inline]
pub fn chirp_phase(start_freq: f64, bandwidth: f64, duration: f64, t: f64) -> f64 {
    2.0 * PI * start_freq * t + PI * bandwidth * t * t / duration
}

/// Instantaneous frequency in Hz at time `t` from the chirp start
pub fn instantaneous_frequency(start_freq: f64, bandwidth: f64, duration: f64, t: f64) -> f64 {
    start_freq + bandwidth * t / duration
}

/// Active part of the chirp, `round(duration × rate)` samples
pub fn chirp_segment(start_freq: f64, bandwidth: f64, duration: f64, sample_rate: f64) -> Vec<f64> {
    let n = round_samples(duration, sample_rate);
    (0..n)
        .map(|i| {
            let t = i as f64 / sample_rate;
            chirp_phase(start_freq, bandwidth, duration, t).sin()
        })
        .collect()
}

/// Synthesize a chirp placed inside a zero buffer of `total_samples`
///
/// # Arguments
/// * `start_freq` - Frequency at the start of the sweep (Hz)
/// * `bandwidth` - Sweep width (Hz); stop frequency is `start_freq + bandwidth`
/// * `duration` - Chirp duration (s)
/// * `start_time` - Chirp start offset inside the waveform (s)
/// * `sample_rate` - AWG sample rate (Hz)
/// * `total_samples` - Length of the output buffer
///
/// # Returns
/// Buffer with `floor(start_time·rate)` leading zeros, the chirp, then zeros
pub fn synthesize_chirp(
    start_freq: f64,
    bandwidth: f64,
    duration: f64,
    start_time: f64,
    sample_rate: f64,
    total_samples: usize,
) -> Result<SampleBuffer> {
    validate_sample_rate(sample_rate)?;

    if !start_freq.is_finite() || !bandwidth.is_finite() {
        return Err(WorkbenchError::InvalidParameter(format!(
            "chirp frequencies must be finite (start {} Hz, bandwidth {} Hz)",
            start_freq, bandwidth
        )));
    }
    if !(duration.is_finite() && duration > 0.0) {
        return Err(WorkbenchError::InvalidParameter(format!(
            "chirp duration must be positive (got {} s)",
            duration
        )));
    }
    if !(start_time.is_finite() && start_time >= 0.0) {
        return Err(WorkbenchError::TimingViolation(format!(
            "chirp start time must not be negative (got {} s)",
            start_time
        )));
    }

    let leading = floor_samples(start_time, sample_rate);
    check_segment_fits(leading, round_samples(duration, sample_rate), total_samples, "chirp")?;
    let active = chirp_segment(start_freq, bandwidth, duration, sample_rate);

    log::debug!(
        "Chirp: {} leading zeros, {} active samples, {} total",
        leading,
        active.len(),
        total_samples
    );

    SampleBuffer::from_segments(leading, &active, total_samples, sample_rate, "chirp")
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const RATE: f64 = 10e9;

    #[test]
    fn test_chirp_segment_counts() {
        let chirp = synthesize_chirp(350e6, 4250e6, 0.25e-6, 0.6e-6, RATE, 110_000).unwrap();

        assert_eq!(chirp.len(), 110_000);

        let first_nonzero = chirp.samples().iter().position(|&x| x != 0.0).unwrap();
        // Sample 6000 is sin(0) = 0, so the first non-zero sample is the next one
        assert_eq!(first_nonzero, 6001);
        assert!(chirp.samples()[8500..].iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_chirp_samples_follow_phase() {
        let (f0, bw, dur) = (350e6, 4250e6, 0.25e-6);
        let chirp = synthesize_chirp(f0, bw, dur, 0.0, RATE, 3000).unwrap();

        for i in [0usize, 1, 17, 1234, 2499] {
            let expected = chirp_phase(f0, bw, dur, i as f64 / RATE).sin();
            assert_relative_eq!(chirp.samples()[i], expected, epsilon = 1e-12);
        }
        assert_eq!(chirp.samples()[2500], 0.0);
    }

    #[test]
    fn test_instantaneous_frequency_endpoints() {
        let (f0, bw, dur) = (350e6, 4250e6, 0.25e-6);
        let n = round_samples(dur, RATE);
        let bin_resolution = RATE / n as f64;

        // Numerical derivative of the synthesized phase
        let h = 1e-13;
        let freq_at = |t: f64| {
            (chirp_phase(f0, bw, dur, t + h) - chirp_phase(f0, bw, dur, t - h)) / (2.0 * h) / (2.0 * PI)
        };

        assert!((freq_at(0.0) - f0).abs() < bin_resolution);
        assert!((freq_at(dur) - (f0 + bw)).abs() < bin_resolution);
        assert_relative_eq!(instantaneous_frequency(f0, bw, dur, dur), f0 + bw);
    }

    #[test]
    fn test_length_invariant_under_rounding() {
        // Durations whose sample products sit near .5 boundaries
        for &(dur, start) in &[(0.24995e-6, 0.60004e-6), (0.10005e-6, 0.0), (1.33333e-6, 2.77777e-6)] {
            let total = 50_000;
            let chirp = synthesize_chirp(100e6, 4800e6, dur, start, RATE, total).unwrap();
            assert_eq!(chirp.len(), total);
        }
    }

    #[test]
    fn test_chirp_overflow_is_length_mismatch() {
        let err = synthesize_chirp(350e6, 4250e6, 0.25e-6, 10.9e-6, RATE, 110_000).unwrap_err();
        assert!(matches!(err, WorkbenchError::LengthMismatch { .. }));
    }

    #[test]
    fn test_far_start_time_is_length_mismatch() {
        let err = synthesize_chirp(350e6, 4250e6, 0.25e-6, 1e300, RATE, 110_000).unwrap_err();
        assert!(matches!(
            err,
            WorkbenchError::LengthMismatch { left: usize::MAX, right: 110_000, .. }
        ));
    }

    #[test]
    fn test_oversized_duration_rejected_before_allocation() {
        // 0.25 s instead of 0.25 µs would be 2.5e9 samples
        let err = synthesize_chirp(350e6, 4250e6, 0.25, 0.0, RATE, 110_000).unwrap_err();
        assert!(matches!(
            err,
            WorkbenchError::LengthMismatch { left: 2_500_000_000, right: 110_000, .. }
        ));
    }

    #[test]
    fn test_invalid_duration() {
        assert!(matches!(
            synthesize_chirp(350e6, 4250e6, 0.0, 0.0, RATE, 100),
            Err(WorkbenchError::InvalidParameter(_))
        ));
        assert!(matches!(
            synthesize_chirp(350e6, 4250e6, 1e-9, -1e-9, RATE, 100),
            Err(WorkbenchError::TimingViolation(_))
        ));
    }
}
