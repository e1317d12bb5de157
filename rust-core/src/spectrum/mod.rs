//! Spectral processing: windowing, zero-filled FFT and band pruning

pub mod windows;
pub mod windowing;
pub mod fft;
pub mod analysis;

pub use windows::{WindowType, DEFAULT_KAISER_BETA};
pub use windowing::{apply_window, padded_length, window_and_pad};
pub use fft::FftEngine;
pub use analysis::{prune_to_band, spectrum, SpectralProcessor, Spectrum};
