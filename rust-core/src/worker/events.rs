//! Lock-free event queue between a job thread and the host
//!
//! Single producer (the job), single consumer (whoever polls the runner).

use ringbuf::{HeapConsumer, HeapProducer, HeapRb};
use std::path::PathBuf;

use crate::progress::{ProgressObserver, ProgressUpdate};

/// Room for every stage label, all 100 percentages and the terminal event
pub const EVENT_QUEUE_CAPACITY: usize = 256;

/// What a finished job produced
#[derive(Debug, Clone, PartialEq)]
pub struct JobSummary {
    /// File written at the end of the job
    pub output: PathBuf,

    /// Number of rows written
    pub rows: usize,
}

/// Notification from a running job
#[derive(Debug, Clone, PartialEq)]
pub enum WorkerEvent {
    Stage(String),
    Progress(u8),
    Finished(JobSummary),
    Failed(String),
}

impl From<ProgressUpdate> for WorkerEvent {
    fn from(update: ProgressUpdate) -> Self {
        match update {
            ProgressUpdate::Stage(label) => WorkerEvent::Stage(label),
            ProgressUpdate::Percent(p) => WorkerEvent::Progress(p),
        }
    }
}

/// Create a connected sender/receiver pair
pub fn event_queue(capacity: usize) -> (EventSender, EventReceiver) {
    let rb = HeapRb::<WorkerEvent>::new(capacity);
    let (producer, consumer) = rb.split();
    (EventSender { producer }, EventReceiver { consumer })
}

/// Producer end, owned by the job thread
pub struct EventSender {
    producer: HeapProducer<WorkerEvent>,
}

impl EventSender {
    /// Queue an event
    ///
    /// # Returns
    /// `false` if the queue was full and the event was dropped
    pub fn send(&mut self, event: WorkerEvent) -> bool {
        match self.producer.push(event) {
            Ok(()) => true,
            Err(dropped) => {
                log::warn!("worker event queue full, dropping {:?}", dropped);
                false
            }
        }
    }
}

impl ProgressObserver for EventSender {
    fn notify(&mut self, update: ProgressUpdate) {
        self.send(update.into());
    }
}

/// Consumer end, polled by the host
pub struct EventReceiver {
    consumer: HeapConsumer<WorkerEvent>,
}

impl EventReceiver {
    pub fn try_recv(&mut self) -> Option<WorkerEvent> {
        self.consumer.pop()
    }

    /// Everything queued so far
    pub fn drain(&mut self) -> Vec<WorkerEvent> {
        self.consumer.pop_iter().collect()
    }

    pub fn len(&self) -> usize {
        self.consumer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.consumer.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_updates_become_events() {
        let (mut sender, mut receiver) = event_queue(8);

        sender.stage("Taking FT of data");
        sender.percent(42);

        assert_eq!(
            receiver.drain(),
            vec![
                WorkerEvent::Stage("Taking FT of data".to_string()),
                WorkerEvent::Progress(42)
            ]
        );
        assert!(receiver.is_empty());
    }

    #[test]
    fn test_queue_overflow_drops() {
        let (mut sender, mut receiver) = event_queue(2);

        assert!(sender.send(WorkerEvent::Progress(1)));
        assert!(sender.send(WorkerEvent::Progress(2)));
        assert!(!sender.send(WorkerEvent::Progress(3)));

        assert_eq!(receiver.len(), 2);
        assert_eq!(receiver.try_recv(), Some(WorkerEvent::Progress(1)));
    }

    #[test]
    fn test_underflow() {
        let (_sender, mut receiver) = event_queue(4);
        assert_eq!(receiver.try_recv(), None);
    }
}
