//! Python bindings for waveform synthesis

use numpy::PyArray1;
use pyo3::prelude::*;

use super::config_bindings::PyBand;
use crate::config::Band;
use crate::progress::NoProgress;
use crate::synth::{ChirpParams, DrParams, MarkerParams, WaveformSpec};

/// Synthesize an AWG waveform
///
/// Times in seconds, frequencies in Hz. Pass `dr_frequency=None` for a
/// chirp-only waveform. An out-of-band DR frequency raises `ValueError`;
/// call `Band.dr_frequency_or_default` first to substitute the band default.
///
/// Returns:
///     (waveform, marker) as numpy arrays
#[pyfunction]
#[pyo3(signature = (
    band=PyBand::High,
    chirp_start=None,
    chirp_stop=None,
    chirp_delay=0.6e-6,
    chirp_duration=0.25e-6,
    marker_on=0.4e-6,
    marker_off=1.7e-6,
    total_duration=11e-6,
    sample_rate=10e9,
    dr_frequency=None,
    dr_bandwidth=5e6,
    dr_start=0.9e-6,
    dr_duration=0.5e-6,
    dr_amplitude=1.0
))]
#[allow(clippy::too_many_arguments)]
pub fn synthesize_waveform<'py>(
    py: Python<'py>,
    band: PyBand,
    chirp_start: Option<f64>,
    chirp_stop: Option<f64>,
    chirp_delay: f64,
    chirp_duration: f64,
    marker_on: f64,
    marker_off: f64,
    total_duration: f64,
    sample_rate: f64,
    dr_frequency: Option<f64>,
    dr_bandwidth: f64,
    dr_start: f64,
    dr_duration: f64,
    dr_amplitude: f64,
) -> PyResult<(&'py PyArray1<f64>, &'py PyArray1<f64>)> {
    let band = Band::from(band);
    let (default_start, default_stop) = band.default_chirp_range();

    let dr = dr_frequency.map(|frequency| DrParams {
        frequency,
        bandwidth: dr_bandwidth,
        start_time: dr_start,
        duration: dr_duration,
        amplitude: dr_amplitude,
    });

    let spec = WaveformSpec {
        band,
        sample_rate,
        total_duration,
        chirp: ChirpParams {
            start_freq: chirp_start.unwrap_or(default_start),
            stop_freq: chirp_stop.unwrap_or(default_stop),
            start_time: chirp_delay,
            duration: chirp_duration,
        },
        dr,
        marker: MarkerParams {
            on_time: marker_on,
            off_time: marker_off,
        },
    };

    let result = py.allow_threads(|| spec.synthesize(&mut NoProgress))?;

    Ok((
        PyArray1::from_vec(py, result.waveform.into_samples()),
        PyArray1::from_vec(py, result.marker.into_samples()),
    ))
}
