//! PyO3 bindings for the GUI shell

use pyo3::exceptions::{PyOSError, PyRuntimeError, PyValueError};
use pyo3::prelude::*;

use crate::error::WorkbenchError;

mod config_bindings;
mod synth_bindings;
mod spectrum_bindings;
mod spur_bindings;
mod job_bindings;

impl From<WorkbenchError> for PyErr {
    fn from(err: WorkbenchError) -> PyErr {
        match err {
            WorkbenchError::IoFailure { .. } => PyOSError::new_err(err.to_string()),
            WorkbenchError::Cancelled | WorkbenchError::WorkerPanicked => {
                PyRuntimeError::new_err(err.to_string())
            }
            _ => PyValueError::new_err(err.to_string()),
        }
    }
}

/// Python module definition
#[pymodule]
fn ftmw_workbench(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<config_bindings::PyBand>()?;
    m.add_class::<config_bindings::PyWindowType>()?;
    m.add_class::<job_bindings::PyJobRunner>()?;

    m.add_function(wrap_pyfunction!(synth_bindings::synthesize_waveform, m)?)?;
    m.add_function(wrap_pyfunction!(spectrum_bindings::compute_spectrum, m)?)?;
    m.add_function(wrap_pyfunction!(spur_bindings::extract_spurs, m)?)?;
    m.add_function(wrap_pyfunction!(config_bindings::parse_param, m)?)?;

    Ok(())
}
