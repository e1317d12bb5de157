//! Band and window enums exposed to Python

use pyo3::prelude::*;

use crate::config::Band;
use crate::signal::GateWindow;
use crate::spectrum::{WindowType, DEFAULT_KAISER_BETA};
use crate::synth::DrParams;

/// Instrument band exposed to Python
#[pyclass(name = "Band")]
#[derive(Clone, Copy)]
pub enum PyBand {
    Low,
    Medium,
    High,
}

impl From<PyBand> for Band {
    fn from(py_band: PyBand) -> Self {
        match py_band {
            PyBand::Low => Band::Low,
            PyBand::Medium => Band::Medium,
            PyBand::High => Band::High,
        }
    }
}

#[pymethods]
impl PyBand {
    /// Band from its combo-box label, e.g. "High (18.0-26.5 GHz)"
    #[staticmethod]
    fn from_label(label: &str) -> PyResult<Self> {
        Ok(match Band::from_label(label)? {
            Band::Low => PyBand::Low,
            Band::Medium => PyBand::Medium,
            Band::High => PyBand::High,
        })
    }

    fn label(&self) -> &'static str {
        Band::from(*self).label()
    }

    /// Default DR target frequency in Hz
    fn default_dr_frequency(&self) -> f64 {
        Band::from(*self).default_dr_frequency()
    }

    /// `frequency` if it lies in the band's DR range, else the band default
    fn dr_frequency_or_default(&self, frequency: f64) -> f64 {
        let band = Band::from(*self);
        DrParams {
            frequency,
            ..DrParams::band_defaults(band)
        }
        .with_band_default_frequency(band)
        .frequency
    }
}

/// Window type enum exposed to Python
///
/// Kaiser takes its β from the `kaiser_beta` argument of the calling function.
#[pyclass(name = "WindowType")]
#[derive(Clone, Copy)]
pub enum PyWindowType {
    Kaiser,
    Hann,
    Hamming,
    Blackman,
    Rectangular,
}

impl PyWindowType {
    pub fn with_beta(self, kaiser_beta: Option<f64>) -> WindowType {
        match self {
            PyWindowType::Kaiser => WindowType::Kaiser {
                beta: kaiser_beta.unwrap_or(DEFAULT_KAISER_BETA),
            },
            PyWindowType::Hann => WindowType::Hann,
            PyWindowType::Hamming => WindowType::Hamming,
            PyWindowType::Blackman => WindowType::Blackman,
            PyWindowType::Rectangular => WindowType::Rectangular,
        }
    }
}

/// Optional (start, stop) pair in seconds
pub fn gate_from_args(start: Option<f64>, stop: Option<f64>) -> PyResult<Option<GateWindow>> {
    match (start, stop) {
        (Some(start), Some(stop)) => Ok(Some(GateWindow::new(start, stop)?)),
        (None, None) => Ok(None),
        _ => Err(pyo3::exceptions::PyValueError::new_err(
            "gate_start and gate_stop must be given together",
        )),
    }
}

/// Parse a text field typed into the GUI
#[pyfunction]
pub fn parse_param(name: &str, text: &str) -> PyResult<f64> {
    Ok(crate::error::parse_param(name, text)?)
}
