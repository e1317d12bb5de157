//! Sequential matched-filter spur removal
//!
//! For each candidate frequency f, in ascending order, the current trace is
//! projected onto sin and cos at f and that projection is subtracted:
//!
//! ```text
//! S = Σ x[i]·sin(2πfi/rate)
//! C = Σ x[i]·cos(2πfi/rate)
//! x[i] -= 2·(S·sin(2πfi/rate) + C·cos(2πfi/rate)) / N
//! ```
//!
//! The factor 2/N is exact only when the trace spans a whole number of periods
//! of f. That is not checked.

use std::f64::consts::PI;

use super::list::SpurList;
use crate::config::SpurConfig;
use crate::error::Result;
use crate::progress::{check_cancelled, CancelFlag, PercentTracker, ProgressObserver};
use crate::signal::{gate_window, GateWindow, SampleBuffer};

/// Sine and cosine projections of a trace at one frequency
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpurComponents {
    pub sine: f64,
    pub cosine: f64,
}

impl SpurComponents {
    /// Amplitude of the spur this projection implies, `2·sqrt(S² + C²)/N`
    pub fn amplitude(&self, len: usize) -> f64 {
        if len == 0 {
            return 0.0;
        }
        2.0 * self.sine.hypot(self.cosine) / len as f64
    }
}

/// Per-sample (sin, cos) of `2πfi/rate`
fn fill_basis(basis: &mut Vec<(f64, f64)>, len: usize, frequency: f64, sample_rate: f64) {
    let omega = 2.0 * PI * frequency / sample_rate;
    basis.clear();
    basis.extend((0..len).map(|i| (omega * i as f64).sin_cos()));
}

fn project(samples: &[f64], basis: &[(f64, f64)]) -> SpurComponents {
    let (sine, cosine) = samples
        .iter()
        .zip(basis)
        .fold((0.0, 0.0), |(s, c), (&x, &(sin, cos))| (s + x * sin, c + x * cos));
    SpurComponents { sine, cosine }
}

fn subtract(samples: &mut [f64], basis: &[(f64, f64)], components: SpurComponents) {
    let scale = 2.0 / samples.len() as f64;
    for (x, &(sin, cos)) in samples.iter_mut().zip(basis) {
        *x -= scale * (components.sine * sin + components.cosine * cos);
    }
}

/// Project `trace` onto sin/cos at `frequency`
pub fn components(trace: &SampleBuffer, frequency: f64) -> SpurComponents {
    let mut basis = Vec::with_capacity(trace.len());
    fill_basis(&mut basis, trace.len(), frequency, trace.sample_rate());
    project(trace.samples(), &basis)
}

/// Remove one spur in place
///
/// # Returns
/// The components that were subtracted
pub fn remove_spur(trace: &mut SampleBuffer, frequency: f64) -> SpurComponents {
    let mut basis = Vec::with_capacity(trace.len());
    fill_basis(&mut basis, trace.len(), frequency, trace.sample_rate());
    let found = project(trace.samples(), &basis);
    if !trace.is_empty() {
        subtract(trace.samples_mut(), &basis, found);
    }
    found
}

/// Gates a trace and strips a list of spurs from it
pub struct SpurExtractor {
    config: SpurConfig,
    cancel: Option<CancelFlag>,
}

impl SpurExtractor {
    pub fn new(config: SpurConfig) -> Self {
        Self {
            config,
            cancel: None,
        }
    }

    /// Check `cancel` between spur steps
    pub fn with_cancel_flag(mut self, cancel: CancelFlag) -> Self {
        self.cancel = Some(cancel);
        self
    }

    pub fn config(&self) -> &SpurConfig {
        &self.config
    }

    /// Candidate list from the configured spacing and maximum frequency
    pub fn spur_list(&self) -> Result<SpurList> {
        SpurList::from_spacing(self.config.spur_spacing, self.config.max_spur_frequency)
    }

    /// Gate `trace` and remove every configured spur
    pub fn extract(
        &self,
        trace: &SampleBuffer,
        progress: &mut impl ProgressObserver,
    ) -> Result<SampleBuffer> {
        trace.check_sample_rate(self.config.sample_rate, "FID")?;
        let spurs = self.spur_list()?;

        progress.stage("Cutting FID");
        let window = match self.config.gate {
            Some(window) => window,
            None => GateWindow::full(trace)?,
        };
        let gated = gate_window(trace, &window)?;
        check_cancelled(self.cancel.as_ref())?;

        self.remove_spurs(gated, &spurs, progress)
    }

    /// Remove `spurs` from an already gated trace, lowest frequency first
    ///
    /// Each projection is taken from the trace as left by the previous step.
    /// Progress is `floor(100·done/total)`, reported only when it increases.
    pub fn remove_spurs(
        &self,
        mut trace: SampleBuffer,
        spurs: &SpurList,
        progress: &mut impl ProgressObserver,
    ) -> Result<SampleBuffer> {
        log::info!(
            "Removing {} spurs from {} samples",
            spurs.len(),
            trace.len()
        );
        progress.stage("Removing spurs");

        let mut tracker = PercentTracker::new(spurs.len());
        let mut basis = Vec::with_capacity(trace.len());

        for (done, &frequency) in spurs.frequencies().iter().enumerate() {
            check_cancelled(self.cancel.as_ref())?;

            fill_basis(&mut basis, trace.len(), frequency, trace.sample_rate());
            let found = project(trace.samples(), &basis);
            if !trace.is_empty() {
                subtract(trace.samples_mut(), &basis, found);
            }

            log::trace!(
                "spur {} Hz: amplitude {:e}",
                frequency,
                found.amplitude(trace.len())
            );
            tracker.report(done + 1, progress);
        }

        log::debug!("Spur removal finished at {}%", tracker.last());
        Ok(trace)
    }
}
