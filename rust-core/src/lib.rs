//! FTMW Workbench - Spectrometer Signal Core
//!
//! AWG waveform synthesis, FID-to-spectrum processing and spur removal for a
//! chirped-pulse Fourier-transform microwave spectrometer, with optional
//! Python bindings for the GUI shell.

// Suppress PyO3 non-local impl warnings (harmless macro-generated code)
#![cfg_attr(feature = "python", allow(non_local_definitions))]

pub mod error;
pub mod config;
pub mod progress;
pub mod signal;
pub mod synth;
pub mod spectrum;
pub mod spurs;
pub mod io;
pub mod worker;

#[cfg(feature = "python")]
pub mod python_bindings;

pub use error::{parse_param, Result, WorkbenchError};
pub use config::{Band, SpectrumConfig, SpurConfig};
pub use progress::{NoProgress, ProgressObserver, ProgressUpdate};
pub use signal::{GateWindow, SampleBuffer};
pub use synth::{SynthesizedWaveform, WaveformSpec};
pub use spectrum::{SpectralProcessor, Spectrum, WindowType};
pub use spurs::{SpurExtractor, SpurList};
pub use worker::{Job, JobRunner, WorkerEvent};
