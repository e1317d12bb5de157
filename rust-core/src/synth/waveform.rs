//! Complete AWG waveform: chirp + optional DR pulse + trigger marker

use crate::config::{Band, GHZ, MHZ, MICROSECOND};
use crate::error::{Result, WorkbenchError};
use crate::progress::{PercentTracker, ProgressObserver};
use crate::signal::buffer::{ceil_samples, validate_sample_rate, SampleBuffer};

use super::chirp::synthesize_chirp;
use super::marker::synthesize_marker;
use super::narrowband::synthesize_narrowband;

/// Chirp timing and sweep (Hz, s)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChirpParams {
    pub start_freq: f64,
    pub stop_freq: f64,
    pub start_time: f64,
    pub duration: f64,
}

impl ChirpParams {
    pub fn bandwidth(&self) -> f64 {
        self.stop_freq - self.start_freq
    }
}

/// DR pulse parameters (Hz, s)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrParams {
    /// Target frequency the molecules see, before mixing
    pub frequency: f64,

    /// Nominal FWHM bandwidth
    pub bandwidth: f64,

    /// Pulse start time
    pub start_time: f64,

    /// Total pulse duration
    pub duration: f64,

    /// Peak amplitude in [0, 1]
    pub amplitude: f64,
}

impl DrParams {
    /// Laboratory defaults for `band`: 5 MHz wide, 0.9 µs start, 0.5 µs long, full amplitude
    pub fn band_defaults(band: Band) -> Self {
        Self {
            frequency: band.default_dr_frequency(),
            bandwidth: 5.0 * MHZ,
            start_time: 0.9 * MICROSECOND,
            duration: 0.5 * MICROSECOND,
            amplitude: 1.0,
        }
    }

    /// Pulse center time
    pub fn center_time(&self) -> f64 {
        self.start_time + self.duration / 2.0
    }

    /// Replace a missing or out-of-band target with the band's default line
    pub fn with_band_default_frequency(mut self, band: Band) -> Self {
        let mixing = band.dr_mixing();
        if !self.frequency.is_finite() || !mixing.contains(self.frequency) {
            log::warn!(
                "DR frequency {} MHz is outside the {} band, substituting {} MHz",
                self.frequency / MHZ,
                band.name(),
                band.default_dr_frequency() / MHZ
            );
            self.frequency = band.default_dr_frequency();
        }
        self
    }
}

/// Trigger marker times (s)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerParams {
    pub on_time: f64,
    pub off_time: f64,
}

/// Parameter set for one synthesis run
#[derive(Debug, Clone, PartialEq)]
pub struct WaveformSpec {
    pub band: Band,

    /// AWG sample rate (Hz)
    pub sample_rate: f64,

    /// Total waveform duration including FID collection time (s)
    pub total_duration: f64,

    pub chirp: ChirpParams,

    /// `None` generates a chirp-only waveform
    pub dr: Option<DrParams>,

    pub marker: MarkerParams,
}

impl WaveformSpec {
    /// Standard chirp and trigger settings for `band` at 10 GS/s, with the band's default DR pulse
    pub fn band_defaults(band: Band) -> Self {
        let (start_freq, stop_freq) = band.default_chirp_range();
        Self {
            band,
            sample_rate: 10.0 * GHZ,
            total_duration: 11.0 * MICROSECOND,
            chirp: ChirpParams {
                start_freq,
                stop_freq,
                start_time: 0.6 * MICROSECOND,
                duration: 0.25 * MICROSECOND,
            },
            dr: Some(DrParams::band_defaults(band)),
            marker: MarkerParams {
                on_time: 0.4 * MICROSECOND,
                off_time: 1.7 * MICROSECOND,
            },
        }
    }

    /// Retarget the DR pulse at `frequency`, or drop it for `None`
    ///
    /// The target is kept as given; an out-of-band value fails in
    /// [`validate`](Self::validate). Use
    /// [`DrParams::with_band_default_frequency`] to substitute instead.
    pub fn with_dr_frequency(mut self, frequency: Option<f64>) -> Self {
        let base = self.dr.unwrap_or_else(|| DrParams::band_defaults(self.band));
        self.dr = frequency.map(|frequency| DrParams { frequency, ..base });
        self
    }

    /// Number of samples in the output, `ceil(total_duration × rate)`
    pub fn total_samples(&self) -> usize {
        ceil_samples(self.total_duration, self.sample_rate)
    }

    /// Check ranges and ordering before any synthesis
    pub fn validate(&self) -> Result<()> {
        validate_sample_rate(self.sample_rate)?;

        if !(self.total_duration.is_finite() && self.total_duration > 0.0) {
            return Err(WorkbenchError::InvalidParameter(format!(
                "total waveform time must be positive (got {} s)",
                self.total_duration
            )));
        }

        let total = self.total_duration;

        if self.marker.on_time > total || self.marker.off_time > total {
            return Err(WorkbenchError::TimingViolation(
                "trigger start and stop times should be less than the total waveform time".to_string(),
            ));
        }

        let chirp = &self.chirp;
        if chirp.start_freq < 0.0 || chirp.stop_freq < 0.0 {
            return Err(WorkbenchError::OutOfRange(format!(
                "chirp frequencies must not be negative ({} - {} MHz)",
                chirp.start_freq / MHZ,
                chirp.stop_freq / MHZ
            )));
        }
        check_interval("chirp", chirp.start_time, chirp.duration, total)?;

        if let Some(dr) = &self.dr {
            if !(0.0..=1.0).contains(&dr.amplitude) {
                return Err(WorkbenchError::OutOfRange(format!(
                    "DR amplitude should be between 0 and 1 (got {})",
                    dr.amplitude
                )));
            }
            self.band.dr_baseband_frequency(dr.frequency)?;
            check_interval("DR pulse", dr.start_time, dr.duration, total)?;
        }

        Ok(())
    }

    /// Validate and build every channel
    ///
    /// Reports a stage label before each segment and a percentage after it.
    pub fn synthesize(&self, progress: &mut impl ProgressObserver) -> Result<SynthesizedWaveform> {
        self.validate()?;

        let total_samples = self.total_samples();
        let steps = if self.dr.is_some() { 4 } else { 3 };
        let mut tracker = PercentTracker::new(steps);
        let mut completed = 0;

        log::info!(
            "Synthesizing {} band waveform: {} samples at {} GS/s",
            self.band.name(),
            total_samples,
            self.sample_rate / GHZ
        );

        progress.stage("Building trigger marker");
        let marker = synthesize_marker(
            self.marker.on_time,
            self.marker.off_time,
            self.sample_rate,
            total_samples,
        )?;
        completed += 1;
        tracker.report(completed, progress);

        progress.stage("Building chirp");
        let chirp = synthesize_chirp(
            self.chirp.start_freq,
            self.chirp.bandwidth(),
            self.chirp.duration,
            self.chirp.start_time,
            self.sample_rate,
            total_samples,
        )?;
        completed += 1;
        tracker.report(completed, progress);

        let dr = match &self.dr {
            Some(dr) => {
                progress.stage("Building DR pulse");
                let carrier = self.band.dr_baseband_frequency(dr.frequency)?;
                let pulse = synthesize_narrowband(
                    carrier,
                    dr.amplitude,
                    dr.duration,
                    dr.center_time(),
                    self.sample_rate,
                    dr.bandwidth,
                    total_samples,
                )?;
                completed += 1;
                tracker.report(completed, progress);
                Some(pulse)
            }
            None => None,
        };

        progress.stage("Combining pulses");
        let waveform = compose(chirp, dr.as_ref())?;
        completed += 1;
        tracker.report(completed, progress);

        Ok(SynthesizedWaveform { waveform, marker })
    }
}

fn check_interval(what: &str, start: f64, duration: f64, total: f64) -> Result<()> {
    if !(start.is_finite() && duration.is_finite()) || start < 0.0 || duration <= 0.0 {
        return Err(WorkbenchError::TimingViolation(format!(
            "{} needs a non-negative start and positive duration (start {} s, duration {} s)",
            what, start, duration
        )));
    }
    if start + duration > total {
        return Err(WorkbenchError::TimingViolation(format!(
            "{} ends at {} s, after the total waveform time {} s",
            what,
            start + duration,
            total
        )));
    }
    Ok(())
}

/// Output of a synthesis run
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesizedWaveform {
    /// Chirp plus DR pulse
    pub waveform: SampleBuffer,

    /// 0/1 trigger channel
    pub marker: SampleBuffer,
}

/// Sum the chirp and an optional DR pulse
pub fn compose(chirp: SampleBuffer, narrowband: Option<&SampleBuffer>) -> Result<SampleBuffer> {
    let Some(dr) = narrowband else {
        return Ok(chirp);
    };

    if dr.len() != chirp.len() {
        return Err(WorkbenchError::length_mismatch(
            "chirp and DR pulse must have the same length",
            chirp.len(),
            dr.len(),
        ));
    }

    let mut combined = chirp;
    for (c, &d) in combined.samples_mut().iter_mut().zip(dr.samples()) {
        *c += d;
    }
    Ok(combined)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::{NoProgress, ProgressUpdate};

    #[test]
    fn test_band_defaults_validate() {
        for band in Band::ALL {
            WaveformSpec::band_defaults(band).validate().unwrap();
        }
    }

    #[test]
    fn test_compose_identity_without_dr() {
        let chirp = SampleBuffer::new(vec![0.1, -0.2, 0.3], 10e9).unwrap();
        let out = compose(chirp.clone(), None).unwrap();
        assert_eq!(out, chirp);
    }

    #[test]
    fn test_compose_sums() {
        let chirp = SampleBuffer::new(vec![0.1, -0.2, 0.3], 10e9).unwrap();
        let dr = SampleBuffer::new(vec![1.0, 1.0, 1.0], 10e9).unwrap();
        let out = compose(chirp, Some(&dr)).unwrap();
        assert!((out.samples()[1] - 0.8).abs() < 1e-15);
    }

    #[test]
    fn test_compose_length_mismatch() {
        let chirp = SampleBuffer::new(vec![0.0; 4], 10e9).unwrap();
        let dr = SampleBuffer::new(vec![0.0; 3], 10e9).unwrap();
        assert!(matches!(
            compose(chirp, Some(&dr)),
            Err(WorkbenchError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn test_marker_after_total_is_rejected() {
        let mut spec = WaveformSpec::band_defaults(Band::High);
        spec.marker.off_time = 12.0 * MICROSECOND;
        assert!(matches!(
            spec.validate(),
            Err(WorkbenchError::TimingViolation(_))
        ));
    }

    #[test]
    fn test_dr_out_of_band() {
        let mut spec = WaveformSpec::band_defaults(Band::Medium);
        if let Some(dr) = spec.dr.as_mut() {
            dr.frequency = 25000.0 * MHZ;
        }
        assert!(matches!(
            spec.synthesize(&mut NoProgress),
            Err(WorkbenchError::BandMismatch { band: "mid", .. })
        ));
    }

    #[test]
    fn test_dr_retarget_keeps_out_of_band_frequency() {
        let spec = WaveformSpec::band_defaults(Band::Low).with_dr_frequency(Some(25000.0 * MHZ));
        assert_eq!(spec.dr.map(|dr| dr.frequency), Some(25000.0 * MHZ));
        assert!(matches!(
            spec.synthesize(&mut NoProgress),
            Err(WorkbenchError::BandMismatch { band: "low", .. })
        ));

        let chirp_only = WaveformSpec::band_defaults(Band::Low).with_dr_frequency(None);
        assert!(chirp_only.dr.is_none());
    }

    #[test]
    fn test_dr_amplitude_checked_first() {
        let mut spec = WaveformSpec::band_defaults(Band::High);
        if let Some(dr) = spec.dr.as_mut() {
            dr.amplitude = 2.0;
        }
        assert!(matches!(spec.validate(), Err(WorkbenchError::OutOfRange(_))));
    }

    #[test]
    fn test_band_default_substitution() {
        let dr = DrParams {
            frequency: 5000.0 * MHZ,
            ..DrParams::band_defaults(Band::Low)
        }
        .with_band_default_frequency(Band::High);
        assert_eq!(dr.frequency, Band::High.default_dr_frequency());

        let kept = DrParams::band_defaults(Band::High).with_band_default_frequency(Band::High);
        assert_eq!(kept.frequency, Band::High.default_dr_frequency());
    }

    #[test]
    fn test_synthesis_progress() {
        let spec = WaveformSpec::band_defaults(Band::Low);
        let mut updates = Vec::new();
        let out = spec.synthesize(&mut |u: ProgressUpdate| updates.push(u)).unwrap();

        assert_eq!(out.waveform.len(), spec.total_samples());
        assert_eq!(out.marker.len(), spec.total_samples());

        let percents: Vec<u8> = updates
            .iter()
            .filter_map(|u| match u {
                ProgressUpdate::Percent(p) => Some(*p),
                _ => None,
            })
            .collect();
        assert_eq!(percents, vec![25, 50, 75, 100]);
    }
}
