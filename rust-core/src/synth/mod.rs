//! AWG waveform synthesis: chirp, DR pulse and trigger marker

pub mod chirp;
pub mod narrowband;
pub mod marker;
pub mod waveform;

pub use chirp::synthesize_chirp;
pub use narrowband::synthesize_narrowband;
pub use marker::synthesize_marker;
pub use waveform::{compose, ChirpParams, DrParams, MarkerParams, SynthesizedWaveform, WaveformSpec};
