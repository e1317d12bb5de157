//! Trace input and result output files

pub mod reader;
pub mod writer;

pub use reader::{parse_trace, read_trace};
pub use writer::{format_scientific, format_shortest, write_spectrum, write_trace, write_waveform};
