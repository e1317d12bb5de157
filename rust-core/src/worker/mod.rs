//! Off-thread execution of synthesis, spectrum and spur jobs

pub mod events;
pub mod processor;

pub use events::{event_queue, EventReceiver, EventSender, JobSummary, WorkerEvent};
pub use processor::{Job, JobRunner};
