//! Apodization and zero-filling of gated FIDs before the FFT

use super::windows::{generate_window, WindowType};
use crate::error::{Result, WorkbenchError};
use crate::signal::SampleBuffer;

/// Extra powers of two of zero-fill beyond the next power of two
pub const ZERO_FILL_OCTAVES: u32 = 4;

/// Apply window to signal
///
/// # Arguments
/// * `signal` - Input signal
/// * `window_type` - Type of window to apply
///
/// # Returns
/// Windowed signal
pub fn apply_window(signal: &[f64], window_type: WindowType) -> Vec<f64> {
    let window = generate_window(window_type, signal.len());

    signal
        .iter()
        .zip(window.iter())
        .map(|(&s, &w)| s * w)
        .collect()
}

/// Zero-filled length for an `n`-sample trace: `2^(ceil(log2 n) + 4)`
///
/// Deliberately generous; the interpolated axis makes narrow lines easier to read.
pub fn padded_length(n: usize) -> usize {
    n.max(1).next_power_of_two() << ZERO_FILL_OCTAVES
}

/// Window the trace and zero-pad it to [`padded_length`]
pub fn window_and_pad(trace: &SampleBuffer, window_type: WindowType) -> Result<SampleBuffer> {
    if trace.is_empty() {
        return Err(WorkbenchError::InvalidGate(
            "cannot transform an empty trace".to_string(),
        ));
    }

    let mut padded = apply_window(trace.samples(), window_type);
    let target = padded_length(trace.len());
    padded.resize(target, 0.0);

    log::debug!(
        "Windowed {} samples ({:?}), zero-filled to {}",
        trace.len(),
        window_type,
        target
    );

    SampleBuffer::new(padded, trace.sample_rate())
}
