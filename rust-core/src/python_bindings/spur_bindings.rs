//! Python bindings for spur extraction

use numpy::{PyArray1, PyReadonlyArray1};
use pyo3::prelude::*;

use super::config_bindings::gate_from_args;
use crate::config::SpurConfig;
use crate::progress::NoProgress;
use crate::signal::SampleBuffer;
use crate::spurs::SpurExtractor;

/// Remove harmonics of `spur_spacing` up to `max_spur_frequency` from a gated FID
///
/// Returns:
///     Cleaned, gated trace as numpy array
#[pyfunction]
#[pyo3(signature = (
    trace,
    sample_rate=40e9,
    gate_start=Some(0.0),
    gate_stop=Some(8e-6),
    spur_spacing=50e6,
    max_spur_frequency=10e9
))]
pub fn extract_spurs<'py>(
    py: Python<'py>,
    trace: PyReadonlyArray1<f64>,
    sample_rate: f64,
    gate_start: Option<f64>,
    gate_stop: Option<f64>,
    spur_spacing: f64,
    max_spur_frequency: f64,
) -> PyResult<&'py PyArray1<f64>> {
    let trace = SampleBuffer::new(trace.as_slice()?.to_vec(), sample_rate)?;
    let extractor = SpurExtractor::new(SpurConfig {
        sample_rate,
        gate: gate_from_args(gate_start, gate_stop)?,
        spur_spacing,
        max_spur_frequency,
    });

    let cleaned = py.allow_threads(|| extractor.extract(&trace, &mut NoProgress))?;

    Ok(PyArray1::from_vec(py, cleaned.into_samples()))
}
