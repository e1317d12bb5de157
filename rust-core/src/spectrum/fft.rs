//! FFT engine using realfft for real-valued signals
//!
//! FIDs are real, so the full N-point magnitude spectrum is recovered from the
//! N/2 + 1 bins of a real-to-complex transform by conjugate symmetry.

use num_complex::Complex;
use realfft::{RealFftPlanner, RealToComplex};
use std::sync::Arc;

use crate::error::{Result, WorkbenchError};

/// FFT engine for real-valued signals
pub struct FftEngine {
    /// FFT size (number of samples)
    fft_size: usize,

    /// Real FFT processor
    r2c: Arc<dyn RealToComplex<f64>>,

    /// Reusable input buffer
    input_buffer: Vec<f64>,

    /// Reusable output buffer (complex spectrum)
    output_buffer: Vec<Complex<f64>>,
}

impl FftEngine {
    /// Create new FFT engine
    ///
    /// # Arguments
    /// * `fft_size` - FFT size (number of samples)
    pub fn new(fft_size: usize) -> Self {
        let mut planner = RealFftPlanner::<f64>::new();
        let r2c = planner.plan_fft_forward(fft_size);

        let input_buffer = r2c.make_input_vec();
        let output_buffer = r2c.make_output_vec();

        Self {
            fft_size,
            r2c,
            input_buffer,
            output_buffer,
        }
    }

    /// Orthonormal magnitude spectrum over all `fft_size` bins
    ///
    /// # Arguments
    /// * `signal` - Input signal, exactly `fft_size` samples
    ///
    /// # Returns
    /// `|X[m]| / sqrt(N)` for m = 0..N, the same values a complex FFT with
    /// orthonormal scaling gives for a real input
    pub fn compute_full_magnitude(&mut self, signal: &[f64]) -> Result<Vec<f64>> {
        if signal.len() != self.fft_size {
            return Err(WorkbenchError::length_mismatch(
                "FFT input must match the planned size",
                signal.len(),
                self.fft_size,
            ));
        }

        self.input_buffer.copy_from_slice(signal);
        self.r2c
            .process(&mut self.input_buffer, &mut self.output_buffer)
            .map_err(|e| WorkbenchError::InvalidParameter(format!("FFT processing failed: {}", e)))?;

        let scale = 1.0 / (self.fft_size as f64).sqrt();
        let half = self.output_buffer.len();

        let mut magnitude = Vec::with_capacity(self.fft_size);
        magnitude.extend(self.output_buffer.iter().map(|c| c.norm() * scale));
        // X[N - m] = conj(X[m]) for real input
        for m in half..self.fft_size {
            let mirrored = magnitude[self.fft_size - m];
            magnitude.push(mirrored);
        }

        Ok(magnitude)
    }

    /// Get FFT size
    pub fn fft_size(&self) -> usize {
        self.fft_size
    }
}
