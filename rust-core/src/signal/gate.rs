//! Time gating of recorded FIDs
//!
//! Selects the part of a trace between two instants and, when a blank
//! acquisition is available, subtracts it sample by sample.

use super::buffer::{floor_samples, SampleBuffer};
use crate::error::{Result, WorkbenchError};
use std::ops::Range;

/// Gate boundaries in seconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GateWindow {
    start: f64,
    stop: f64,
}

impl GateWindow {
    /// 0 - 8 µs, the usual FID collection gate
    pub const DEFAULT: GateWindow = GateWindow {
        start: 0.0,
        stop: 8.0e-6,
    };

    /// Create a gate, requiring `start < stop`
    pub fn new(start: f64, stop: f64) -> Result<Self> {
        if !start.is_finite() || !stop.is_finite() {
            return Err(WorkbenchError::InvalidGate(format!(
                "gate bounds must be finite (start {}, stop {})",
                start, stop
            )));
        }
        if start >= stop {
            return Err(WorkbenchError::InvalidGate(format!(
                "gate start ({} s) should be smaller than gate stop ({} s)",
                start, stop
            )));
        }
        Ok(Self { start, stop })
    }

    /// Gate from the first to the last sample time, `0 .. (len-1)/rate`
    ///
    /// Keeps `len - 1` samples: the final sample sits on the stop instant and
    /// the stop is exclusive.
    pub fn full(trace: &SampleBuffer) -> Result<Self> {
        if trace.len() < 2 {
            return Err(WorkbenchError::InvalidGate(format!(
                "a whole-trace gate needs at least 2 samples (got {})",
                trace.len()
            )));
        }
        Self::new(0.0, trace.time_at(trace.len() - 1))
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn stop(&self) -> f64 {
        self.stop
    }

    /// Clip the gate to `[0, duration]`
    ///
    /// Returns the clipped gate; clipping is policy, so it is logged and not an error.
    pub fn clamp_to(&self, duration: f64) -> Self {
        let mut clamped = *self;
        if clamped.start < 0.0 {
            log::warn!("gate start {} s is negative, clamping to 0", clamped.start);
            clamped.start = 0.0;
        }
        if clamped.stop > duration {
            log::warn!(
                "gate stop {} s exceeds trace duration {} s, clamping to trace end",
                clamped.stop,
                duration
            );
            clamped.stop = duration;
        }
        clamped
    }

    /// Sample index range `[floor(start·rate), floor(stop·rate))`, limited to `len`
    pub fn sample_range(&self, sample_rate: f64, len: usize) -> Range<usize> {
        let first = gate_index(self.start, sample_rate).min(len);
        let last = if self.stop >= len as f64 / sample_rate {
            len
        } else {
            gate_index(self.stop, sample_rate).min(len)
        };
        first..last.max(first)
    }
}

/// Products within this many samples of an integer count as that integer
const INDEX_SNAP: f64 = 1e-6;

/// `floor(time·rate)`, except that a product landing just below a whole
/// sample (e.g. 999/40e9 × 40e9) maps to that sample
fn gate_index(time: f64, sample_rate: f64) -> usize {
    let position = time * sample_rate;
    let nearest = position.round();
    if (position - nearest).abs() < INDEX_SNAP {
        nearest as usize
    } else {
        floor_samples(time, sample_rate)
    }
}

/// Extract the gated sub-trace
///
/// # Arguments
/// * `trace` - Full trace
/// * `gate_start` - Gate start in seconds (negative values clamp to 0)
/// * `gate_stop` - Gate stop in seconds (values past the end clamp to the trace end)
///
/// # Returns
/// New buffer holding `trace[floor(start·rate) .. floor(stop·rate)]`
pub fn gate(trace: &SampleBuffer, gate_start: f64, gate_stop: f64) -> Result<SampleBuffer> {
    gate_window(trace, &GateWindow::new(gate_start, gate_stop)?)
}

/// [`gate`] for an already-built window
pub fn gate_window(trace: &SampleBuffer, window: &GateWindow) -> Result<SampleBuffer> {
    let clamped = window.clamp_to(trace.duration());
    let range = clamped.sample_range(trace.sample_rate(), trace.len());

    if range.is_empty() {
        return Err(WorkbenchError::InvalidGate(format!(
            "gate {} - {} s selects no samples of a {} s trace",
            window.start,
            window.stop,
            trace.duration()
        )));
    }

    log::debug!(
        "Gating trace: samples {}..{} of {}",
        range.start,
        range.end,
        trace.len()
    );

    SampleBuffer::new(trace.samples()[range].to_vec(), trace.sample_rate())
}

/// Subtract a blank trace from a signal trace
///
/// Both traces must already be gated identically; differing lengths are an
/// error rather than a silent truncation.
pub fn difference(signal: &SampleBuffer, blank: &SampleBuffer) -> Result<SampleBuffer> {
    if signal.len() != blank.len() {
        return Err(WorkbenchError::length_mismatch(
            "subtraction of blank from data needs the same number of rows",
            signal.len(),
            blank.len(),
        ));
    }

    let samples = signal
        .samples()
        .iter()
        .zip(blank.samples().iter())
        .map(|(&s, &b)| s - b)
        .collect();

    SampleBuffer::new(samples, signal.sample_rate())
}
