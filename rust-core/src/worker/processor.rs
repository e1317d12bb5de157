//! Background job runner
//!
//! One job per runner, computed on its own thread so the host UI stays
//! responsive. The host polls events and may raise the cancel flag; output is
//! written only after the whole computation has succeeded.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use super::events::{event_queue, EventReceiver, JobSummary, WorkerEvent, EVENT_QUEUE_CAPACITY};
use crate::config::{SpectrumConfig, SpurConfig};
use crate::error::{Result, WorkbenchError};
use crate::io::{read_trace, write_spectrum, write_trace, write_waveform};
use crate::progress::{check_cancelled, CancelFlag, ProgressObserver};
use crate::spectrum::SpectralProcessor;
use crate::spurs::SpurExtractor;
use crate::synth::WaveformSpec;

/// A unit of work for the runner
#[derive(Debug, Clone)]
pub enum Job {
    /// Synthesize an AWG waveform and write it
    Synthesis { spec: WaveformSpec, output: PathBuf },

    /// Turn an FID (minus an optional blank) into a spectrum file
    Spectrum {
        config: SpectrumConfig,
        signal: PathBuf,
        blank: Option<PathBuf>,
        output: PathBuf,
    },

    /// Strip spurs from an FID and write the cleaned trace
    SpurExtraction {
        config: SpurConfig,
        input: PathBuf,
        output: PathBuf,
    },
}

impl Job {
    pub fn name(&self) -> &'static str {
        match self {
            Job::Synthesis { .. } => "synthesis",
            Job::Spectrum { .. } => "spectrum",
            Job::SpurExtraction { .. } => "spur extraction",
        }
    }

    /// Run to completion on the calling thread
    pub fn run(
        &self,
        progress: &mut impl ProgressObserver,
        cancel: &CancelFlag,
    ) -> Result<JobSummary> {
        check_cancelled(Some(cancel))?;

        match self {
            Job::Synthesis { spec, output } => {
                let waveform = spec.synthesize(progress)?;
                check_cancelled(Some(cancel))?;

                progress.stage("Writing waveform");
                write_waveform(output, &waveform)?;
                Ok(JobSummary {
                    output: output.clone(),
                    rows: waveform.waveform.len(),
                })
            }

            Job::Spectrum {
                config,
                signal,
                blank,
                output,
            } => {
                progress.stage("Reading data");
                let signal = read_trace(signal, config.sample_rate)?;
                let blank = match blank {
                    Some(path) => Some(read_trace(path, config.sample_rate)?),
                    None => None,
                };
                check_cancelled(Some(cancel))?;

                let spectrum = SpectralProcessor::new(config.clone())
                    .with_cancel_flag(Arc::clone(cancel))
                    .process(&signal, blank.as_ref(), progress)?;
                check_cancelled(Some(cancel))?;

                progress.stage("Writing spectrum");
                write_spectrum(output, &spectrum)?;
                Ok(JobSummary {
                    output: output.clone(),
                    rows: spectrum.len(),
                })
            }

            Job::SpurExtraction {
                config,
                input,
                output,
            } => {
                progress.stage("Reading data");
                let trace = read_trace(input, config.sample_rate)?;
                check_cancelled(Some(cancel))?;

                let cleaned = SpurExtractor::new(config.clone())
                    .with_cancel_flag(Arc::clone(cancel))
                    .extract(&trace, progress)?;
                check_cancelled(Some(cancel))?;

                progress.stage("Writing cleaned FID");
                write_trace(output, &cleaned)?;
                Ok(JobSummary {
                    output: output.clone(),
                    rows: cleaned.len(),
                })
            }
        }
    }
}

/// Owns the thread running a [`Job`] and the host side of its event queue
pub struct JobRunner {
    events: EventReceiver,
    cancel: CancelFlag,
    handle: Option<JoinHandle<Result<JobSummary>>>,
}

impl JobRunner {
    /// Start `job` on a new thread
    pub fn spawn(job: Job) -> Self {
        let (mut sender, events) = event_queue(EVENT_QUEUE_CAPACITY);
        let cancel: CancelFlag = Arc::new(AtomicBool::new(false));
        let thread_cancel = Arc::clone(&cancel);

        let handle = std::thread::spawn(move || {
            log::info!("Starting {} job", job.name());
            let result = job.run(&mut sender, &thread_cancel);

            match &result {
                Ok(summary) => {
                    log::info!(
                        "{} job finished: {} rows to {}",
                        job.name(),
                        summary.rows,
                        summary.output.display()
                    );
                    sender.send(WorkerEvent::Finished(summary.clone()));
                }
                Err(e) => {
                    log::info!("{} job failed: {}", job.name(), e);
                    sender.send(WorkerEvent::Failed(e.to_string()));
                }
            }
            result
        });

        Self {
            events,
            cancel,
            handle: Some(handle),
        }
    }

    /// Events queued since the last poll
    pub fn poll_events(&mut self) -> Vec<WorkerEvent> {
        self.events.drain()
    }

    /// Ask the job to stop at its next check point
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.load(Ordering::SeqCst)
    }

    /// `true` once the job thread has returned (or was already joined)
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, |h| h.is_finished())
    }

    /// Block until the job ends
    ///
    /// # Returns
    /// `None` if the runner was already joined
    pub fn join(&mut self) -> Option<Result<JobSummary>> {
        let handle = self.handle.take()?;
        Some(handle.join().unwrap_or(Err(WorkbenchError::WorkerPanicked)))
    }
}

impl Drop for JobRunner {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.cancel();
            let _ = handle.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Band;
    use crate::progress::NoProgress;

    #[test]
    fn test_synthesis_job_events() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("waveform.txt");
        let mut spec = WaveformSpec::band_defaults(Band::High);
        spec.dr = None;

        let mut runner = JobRunner::spawn(Job::Synthesis {
            spec,
            output: output.clone(),
        });
        let summary = runner.join().unwrap().unwrap();
        assert!(runner.is_finished());
        assert!(runner.join().is_none());

        assert_eq!(summary.rows, 110_000);
        assert!(output.exists());

        let events = runner.poll_events();
        assert_eq!(events.last(), Some(&WorkerEvent::Finished(summary)));
        assert!(events.contains(&WorkerEvent::Progress(100)));
    }

    #[test]
    fn test_out_of_band_dr_fails_job() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("waveform.txt");
        let spec = WaveformSpec::band_defaults(Band::Low).with_dr_frequency(Some(25_000e6));

        let mut runner = JobRunner::spawn(Job::Synthesis {
            spec,
            output: output.clone(),
        });

        let result = runner.join().unwrap();
        assert!(matches!(result, Err(WorkbenchError::BandMismatch { .. })));
        assert!(!output.exists());
    }

    #[test]
    fn test_failed_job_reports_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut runner = JobRunner::spawn(Job::SpurExtraction {
            config: SpurConfig::default(),
            input: dir.path().join("missing.txt"),
            output: dir.path().join("cleaned.txt"),
        });

        let result = runner.join().unwrap();
        assert!(matches!(result, Err(WorkbenchError::IoFailure { .. })));
        assert!(matches!(
            runner.poll_events().last(),
            Some(WorkerEvent::Failed(_))
        ));
        assert!(!dir.path().join("cleaned.txt").exists());
    }

    #[test]
    fn test_cancelled_before_start() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("waveform.txt");
        let job = Job::Synthesis {
            spec: WaveformSpec::band_defaults(Band::Low),
            output: output.clone(),
        };

        let cancel: CancelFlag = Arc::new(AtomicBool::new(true));
        let result = job.run(&mut NoProgress, &cancel);

        assert!(matches!(result, Err(WorkbenchError::Cancelled)));
        assert!(!output.exists());
    }
}
