//! Python bindings for background jobs
//!
//! The GUI starts a job, polls `poll()` from a timer, and reads the summary
//! from `join()` once `is_finished()` turns true.

use pyo3::prelude::*;
use std::path::PathBuf;

use super::config_bindings::{gate_from_args, PyBand, PyWindowType};
use crate::config::{SpectrumConfig, SpurConfig};
use crate::synth::WaveformSpec;
use crate::worker::{Job, JobRunner, WorkerEvent};

/// Background job exposed to Python
#[pyclass(name = "JobRunner", unsendable)]
pub struct PyJobRunner {
    runner: JobRunner,
}

#[pymethods]
impl PyJobRunner {
    /// Synthesize the band's default waveform into `output`
    ///
    /// `dr_frequency=None` drops the DR pulse. An out-of-band frequency makes
    /// the job fail with a band mismatch.
    #[staticmethod]
    #[pyo3(signature = (output, band=PyBand::High, dr_frequency=None))]
    fn synthesis(output: PathBuf, band: PyBand, dr_frequency: Option<f64>) -> Self {
        let spec = WaveformSpec::band_defaults(band.into()).with_dr_frequency(dr_frequency);

        Self {
            runner: JobRunner::spawn(Job::Synthesis { spec, output }),
        }
    }

    /// Write the spectrum of the FID in `signal` (minus `blank`) to `output`
    #[staticmethod]
    #[pyo3(signature = (
        signal,
        output,
        blank=None,
        band=PyBand::High,
        sample_rate=40e9,
        gate_start=Some(0.0),
        gate_stop=Some(8e-6),
        window=PyWindowType::Kaiser,
        kaiser_beta=None
    ))]
    #[allow(clippy::too_many_arguments)]
    fn spectrum(
        signal: PathBuf,
        output: PathBuf,
        blank: Option<PathBuf>,
        band: PyBand,
        sample_rate: f64,
        gate_start: Option<f64>,
        gate_stop: Option<f64>,
        window: PyWindowType,
        kaiser_beta: Option<f64>,
    ) -> PyResult<Self> {
        let config = SpectrumConfig {
            band: band.into(),
            sample_rate,
            gate: gate_from_args(gate_start, gate_stop)?,
            window_type: window.with_beta(kaiser_beta),
        };

        Ok(Self {
            runner: JobRunner::spawn(Job::Spectrum {
                config,
                signal,
                blank,
                output,
            }),
        })
    }

    /// Write the spur-free gated FID from `input` to `output`
    #[staticmethod]
    #[pyo3(signature = (
        input,
        output,
        sample_rate=40e9,
        gate_start=Some(0.0),
        gate_stop=Some(8e-6),
        spur_spacing=50e6,
        max_spur_frequency=10e9
    ))]
    fn spur_extraction(
        input: PathBuf,
        output: PathBuf,
        sample_rate: f64,
        gate_start: Option<f64>,
        gate_stop: Option<f64>,
        spur_spacing: f64,
        max_spur_frequency: f64,
    ) -> PyResult<Self> {
        let config = SpurConfig {
            sample_rate,
            gate: gate_from_args(gate_start, gate_stop)?,
            spur_spacing,
            max_spur_frequency,
        };

        Ok(Self {
            runner: JobRunner::spawn(Job::SpurExtraction {
                config,
                input,
                output,
            }),
        })
    }

    /// Pending events as `(kind, value)` tuples
    ///
    /// kind is one of "stage", "progress", "finished", "failed".
    fn poll(&mut self, py: Python) -> Vec<(&'static str, PyObject)> {
        self.runner
            .poll_events()
            .into_iter()
            .map(|event| match event {
                WorkerEvent::Stage(label) => ("stage", label.into_py(py)),
                WorkerEvent::Progress(p) => ("progress", p.into_py(py)),
                WorkerEvent::Finished(summary) => ("finished", summary.rows.into_py(py)),
                WorkerEvent::Failed(message) => ("failed", message.into_py(py)),
            })
            .collect()
    }

    fn cancel(&self) {
        self.runner.cancel();
    }

    fn is_finished(&self) -> bool {
        self.runner.is_finished()
    }

    /// Wait for the job and return the number of rows written
    fn join(&mut self, py: Python) -> PyResult<Option<usize>> {
        let runner = &mut self.runner;
        match py.allow_threads(|| runner.join()) {
            Some(result) => Ok(Some(result?.rows)),
            None => Ok(None),
        }
    }
}
