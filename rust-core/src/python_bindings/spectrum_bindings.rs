//! Python bindings for spectral processing

use numpy::{PyArray1, PyReadonlyArray1};
use pyo3::prelude::*;

use super::config_bindings::{gate_from_args, PyBand, PyWindowType};
use crate::config::SpectrumConfig;
use crate::progress::NoProgress;
use crate::signal::SampleBuffer;
use crate::spectrum::SpectralProcessor;

/// Gate, window and transform an FID into a band-limited spectrum
///
/// Args:
///     signal: FID samples as numpy array
///     blank: Optional blank trace, subtracted after gating
///     gate_start, gate_stop: Gate in seconds; omit both for the full FID
///
/// Returns:
///     (frequencies_hz, magnitudes) as numpy arrays
#[pyfunction]
#[pyo3(signature = (
    signal,
    blank=None,
    band=PyBand::High,
    sample_rate=40e9,
    gate_start=Some(0.0),
    gate_stop=Some(8e-6),
    window=PyWindowType::Kaiser,
    kaiser_beta=None
))]
#[allow(clippy::too_many_arguments)]
pub fn compute_spectrum<'py>(
    py: Python<'py>,
    signal: PyReadonlyArray1<f64>,
    blank: Option<PyReadonlyArray1<f64>>,
    band: PyBand,
    sample_rate: f64,
    gate_start: Option<f64>,
    gate_stop: Option<f64>,
    window: PyWindowType,
    kaiser_beta: Option<f64>,
) -> PyResult<(&'py PyArray1<f64>, &'py PyArray1<f64>)> {
    let signal = SampleBuffer::new(signal.as_slice()?.to_vec(), sample_rate)?;
    let blank = match blank {
        Some(blank) => Some(SampleBuffer::new(blank.as_slice()?.to_vec(), sample_rate)?),
        None => None,
    };

    let config = SpectrumConfig {
        band: band.into(),
        sample_rate,
        gate: gate_from_args(gate_start, gate_stop)?,
        window_type: window.with_beta(kaiser_beta),
    };
    let processor = SpectralProcessor::new(config);

    let spectrum = py.allow_threads(|| processor.process(&signal, blank.as_ref(), &mut NoProgress))?;

    Ok((
        PyArray1::from_vec(py, spectrum.frequencies),
        PyArray1::from_vec(py, spectrum.magnitudes),
    ))
}
