//! FID to spectrum pipeline
//!
//! gate → (optional) blank subtraction → window + zero-fill → FFT → frequency
//! axis → prune to the band of interest.

use super::fft::FftEngine;
use super::windowing::window_and_pad;
use crate::config::SpectrumConfig;
use crate::error::Result;
use crate::progress::{check_cancelled, CancelFlag, PercentTracker, ProgressObserver};
use crate::signal::{difference, gate_window, GateWindow, SampleBuffer};

/// Magnitude spectrum with a strictly increasing frequency axis (Hz)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Spectrum {
    pub frequencies: Vec<f64>,
    pub magnitudes: Vec<f64>,
}

impl Spectrum {
    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    /// (frequency, magnitude) pairs
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.frequencies
            .iter()
            .copied()
            .zip(self.magnitudes.iter().copied())
    }

    /// Strongest point, if any
    pub fn peak(&self) -> Option<(f64, f64)> {
        self.points()
            .fold(None, |best: Option<(f64, f64)>, point| match best {
                Some(b) if b.1 >= point.1 => Some(b),
                _ => Some(point),
            })
    }
}

/// Orthonormal magnitude spectrum of a zero-filled trace
///
/// The digitizer sees the molecular signal mixed down against `lo_frequency`,
/// so bin m sits at `lo - m·rate/N`. The bins are returned reversed so the
/// frequency axis increases.
pub fn spectrum(padded: &SampleBuffer, lo_frequency: f64) -> Result<Spectrum> {
    let n = padded.len();
    let mut engine = FftEngine::new(n);
    let magnitude = engine.compute_full_magnitude(padded.samples())?;

    let bin_width = padded.sample_rate() / n as f64;
    let frequencies = (0..n)
        .rev()
        .map(|m| lo_frequency - m as f64 * bin_width)
        .collect();
    let magnitudes = magnitude.into_iter().rev().collect();

    Ok(Spectrum {
        frequencies,
        magnitudes,
    })
}

/// Keep `[first f >= lower, first f >= upper)`
///
/// Runs to the end of the spectrum when no frequency reaches `upper`.
pub fn prune_to_band(spectrum: &Spectrum, lower: f64, upper: f64) -> Spectrum {
    let len = spectrum.len();
    let first = spectrum
        .frequencies
        .iter()
        .position(|&f| f >= lower)
        .unwrap_or(len);
    let last = spectrum
        .frequencies
        .iter()
        .position(|&f| f >= upper)
        .unwrap_or(len)
        .max(first);

    Spectrum {
        frequencies: spectrum.frequencies[first..last].to_vec(),
        magnitudes: spectrum.magnitudes[first..last].to_vec(),
    }
}

/// Runs the full FID → spectrum pipeline for one band
pub struct SpectralProcessor {
    config: SpectrumConfig,
    cancel: Option<CancelFlag>,
}

impl SpectralProcessor {
    pub fn new(config: SpectrumConfig) -> Self {
        Self {
            config,
            cancel: None,
        }
    }

    /// Check `cancel` between pipeline stages
    pub fn with_cancel_flag(mut self, cancel: CancelFlag) -> Self {
        self.cancel = Some(cancel);
        self
    }

    pub fn config(&self) -> &SpectrumConfig {
        &self.config
    }

    /// Transform a raw FID (and optional blank) into a band-limited spectrum
    ///
    /// # Arguments
    /// * `signal` - Full digitizer trace
    /// * `blank` - Trace recorded without sample, gated and subtracted when present
    /// * `progress` - Receives stage labels and percentages
    pub fn process(
        &self,
        signal: &SampleBuffer,
        blank: Option<&SampleBuffer>,
        progress: &mut impl ProgressObserver,
    ) -> Result<Spectrum> {
        signal.check_sample_rate(self.config.sample_rate, "signal")?;
        if let Some(blank) = blank {
            blank.check_sample_rate(self.config.sample_rate, "blank")?;
        }

        let mut tracker = PercentTracker::new(if blank.is_some() { 4 } else { 3 });
        let mut completed = 0;

        log::info!(
            "Processing {}-sample FID for {} band",
            signal.len(),
            self.config.band.name()
        );

        progress.stage("Cutting FID");
        let window = match self.config.gate {
            Some(window) => window,
            None => GateWindow::full(signal)?,
        };
        let mut fid = gate_window(signal, &window)?;
        completed += 1;
        tracker.report(completed, progress);
        check_cancelled(self.cancel.as_ref())?;

        if let Some(blank) = blank {
            progress.stage("Subtracting blank");
            let blank_fid = gate_window(blank, &window)?;
            fid = difference(&fid, &blank_fid)?;
            completed += 1;
            tracker.report(completed, progress);
            check_cancelled(self.cancel.as_ref())?;
        }

        progress.stage("Applying window function");
        let padded = window_and_pad(&fid, self.config.window_type)?;
        completed += 1;
        tracker.report(completed, progress);
        check_cancelled(self.cancel.as_ref())?;

        progress.stage("Taking FT of data");
        let band = self.config.band.spectrum_band();
        let full = spectrum(&padded, band.lo_frequency)?;
        let pruned = prune_to_band(&full, band.lower_bound, band.upper_bound);
        completed += 1;
        tracker.report(completed, progress);

        log::debug!(
            "Spectrum: {} of {} points kept in {} - {} Hz",
            pruned.len(),
            full.len(),
            band.lower_bound,
            band.upper_bound
        );

        Ok(pruned)
    }
}
