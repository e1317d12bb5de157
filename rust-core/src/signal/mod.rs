//! Sample buffers and time gating

pub mod buffer;
pub mod gate;

pub use buffer::{SampleBuffer, check_segment_fits, floor_samples, ceil_samples, round_samples};
pub use gate::{GateWindow, gate, gate_window, difference};
