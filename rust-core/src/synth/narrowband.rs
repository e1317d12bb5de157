//! Narrowband double-resonance (DR) pulse
//!
//! A sinc envelope on a cosine carrier. With the normalized sinc
//! `sinc(x) = sin(πx)/(πx)` the envelope `sinc(B·t/π)` reduces to
//! `sin(B·t)/(B·t)`, whose spectrum is flat over a width set by `B`.

use std::f64::consts::PI;

use crate::error::{Result, WorkbenchError};
use crate::signal::buffer::{
    check_segment_fits, floor_samples, round_samples, validate_sample_rate, SampleBuffer,
};

/// Normalized sinc, `sin(πx)/(πx)` with `sinc(0) = 1`
#[inline]
pub fn sinc(x: f64) -> f64 {
    if x == 0.0 {
        1.0
    } else {
        let px = PI * x;
        px.sin() / px
    }
}

/// Unit-amplitude pulse value at time `t` relative to the pulse center
#[inline]
pub fn sinc_pulse(t: f64, carrier_freq: f64, bandwidth_fwhm: f64) -> f64 {
    sinc(bandwidth_fwhm * t / PI) * (2.0 * PI * carrier_freq * t).cos()
}

/// Active part of the DR pulse on `t ∈ [-duration/2, duration/2)`
pub fn narrowband_segment(
    carrier_freq: f64,
    amplitude: f64,
    duration: f64,
    sample_rate: f64,
    bandwidth_fwhm: f64,
) -> Vec<f64> {
    let n = round_samples(duration, sample_rate);
    let half = duration / 2.0;
    (0..n)
        .map(|i| {
            let t = i as f64 / sample_rate - half;
            amplitude * sinc_pulse(t, carrier_freq, bandwidth_fwhm)
        })
        .collect()
}

/// Synthesize a DR pulse centered at `center_time`
///
/// # Arguments
/// * `center_freq_baseband` - Carrier frequency at the AWG output (Hz)
/// * `amplitude` - Peak amplitude, within [0, 1]
/// * `duration` - Total pulse duration (s)
/// * `center_time` - Time of the pulse center inside the waveform (s)
/// * `sample_rate` - AWG sample rate (Hz)
/// * `bandwidth_fwhm` - Nominal FWHM bandwidth (Hz)
/// * `total_samples` - Length of the output buffer
pub fn synthesize_narrowband(
    center_freq_baseband: f64,
    amplitude: f64,
    duration: f64,
    center_time: f64,
    sample_rate: f64,
    bandwidth_fwhm: f64,
    total_samples: usize,
) -> Result<SampleBuffer> {
    validate_sample_rate(sample_rate)?;

    if !center_freq_baseband.is_finite() || !bandwidth_fwhm.is_finite() {
        return Err(WorkbenchError::InvalidParameter(format!(
            "DR frequencies must be finite (carrier {} Hz, bandwidth {} Hz)",
            center_freq_baseband, bandwidth_fwhm
        )));
    }
    if !(0.0..=1.0).contains(&amplitude) {
        return Err(WorkbenchError::OutOfRange(format!(
            "DR amplitude should be between 0 and 1 (got {})",
            amplitude
        )));
    }
    if !(duration.is_finite() && duration > 0.0) {
        return Err(WorkbenchError::InvalidParameter(format!(
            "DR duration must be positive (got {} s)",
            duration
        )));
    }

    let pulse_start = center_time - duration / 2.0;
    if !(pulse_start.is_finite() && pulse_start >= 0.0) {
        return Err(WorkbenchError::TimingViolation(format!(
            "DR pulse centered at {} s with duration {} s starts before the waveform",
            center_time, duration
        )));
    }

    let leading = floor_samples(pulse_start, sample_rate);
    check_segment_fits(leading, round_samples(duration, sample_rate), total_samples, "DR pulse")?;
    let active = narrowband_segment(center_freq_baseband, amplitude, duration, sample_rate, bandwidth_fwhm);

    log::debug!(
        "DR pulse: carrier {:.3} MHz, {} leading zeros, {} active samples",
        center_freq_baseband / 1e6,
        leading,
        active.len()
    );

    SampleBuffer::from_segments(leading, &active, total_samples, sample_rate, "DR pulse")
}
