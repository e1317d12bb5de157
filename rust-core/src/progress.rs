//! Progress reporting from long-running computations
//!
//! The numeric code never talks to a GUI or a channel directly. It reports
//! through a [`ProgressObserver`], which can be a closure, [`NoProgress`], or
//! the worker's event queue.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::{Result, WorkbenchError};

/// A single progress notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressUpdate {
    /// Free-text stage label (e.g. "Taking FT of data")
    Stage(String),

    /// Completion percentage, monotonic within a run
    Percent(u8),
}

/// Receiver of progress notifications
pub trait ProgressObserver {
    fn notify(&mut self, update: ProgressUpdate);

    fn stage(&mut self, label: &str) {
        self.notify(ProgressUpdate::Stage(label.to_string()));
    }

    fn percent(&mut self, value: u8) {
        self.notify(ProgressUpdate::Percent(value));
    }
}

impl<F: FnMut(ProgressUpdate)> ProgressObserver for F {
    fn notify(&mut self, update: ProgressUpdate) {
        self(update)
    }
}

/// Observer that discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn notify(&mut self, _update: ProgressUpdate) {}
}

/// Converts step counts into deduplicated integer percentages
#[derive(Debug, Clone)]
pub struct PercentTracker {
    total: usize,
    last: u8,
}

impl PercentTracker {
    pub fn new(total: usize) -> Self {
        Self { total, last: 0 }
    }

    /// Record `completed` steps
    ///
    /// # Returns
    /// `Some(floor(100 × completed / total))` only when that value exceeds the
    /// last one reported
    pub fn advance(&mut self, completed: usize) -> Option<u8> {
        if self.total == 0 {
            return None;
        }
        let percent = ((100 * completed.min(self.total)) / self.total) as u8;
        if percent > self.last {
            self.last = percent;
            Some(percent)
        } else {
            None
        }
    }

    pub fn last(&self) -> u8 {
        self.last
    }

    /// [`advance`](Self::advance) and forward any new percentage to `observer`
    pub fn report(&mut self, completed: usize, observer: &mut impl ProgressObserver) {
        if let Some(percent) = self.advance(completed) {
            observer.percent(percent);
        }
    }
}

/// Shared flag a host sets to stop a running job at the next check point
pub type CancelFlag = Arc<AtomicBool>;

/// `Err(Cancelled)` once the flag has been raised
pub(crate) fn check_cancelled(flag: Option<&CancelFlag>) -> Result<()> {
    match flag {
        Some(flag) if flag.load(Ordering::Relaxed) => Err(WorkbenchError::Cancelled),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_tracker_deduplicates() {
        let mut tracker = PercentTracker::new(200);
        let emitted: Vec<u8> = (1..=200).filter_map(|i| tracker.advance(i)).collect();

        assert_eq!(emitted.len(), 100);
        assert_eq!(emitted[0], 1);
        assert_eq!(*emitted.last().unwrap(), 100);
        assert!(emitted.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_percent_tracker_coarse_steps() {
        let mut tracker = PercentTracker::new(3);

        assert_eq!(tracker.advance(1), Some(33));
        assert_eq!(tracker.advance(2), Some(66));
        assert_eq!(tracker.advance(3), Some(100));
        assert_eq!(tracker.advance(3), None);
    }

    #[test]
    fn test_closure_observer() {
        let mut seen = Vec::new();
        {
            let mut observer = |u: ProgressUpdate| seen.push(u);
            observer.stage("Cutting FID");
            observer.percent(50);
        }
        assert_eq!(
            seen,
            vec![
                ProgressUpdate::Stage("Cutting FID".to_string()),
                ProgressUpdate::Percent(50)
            ]
        );
    }

    #[test]
    fn test_check_cancelled() {
        let flag: CancelFlag = Arc::new(AtomicBool::new(false));
        assert!(check_cancelled(None).is_ok());
        assert!(check_cancelled(Some(&flag)).is_ok());

        flag.store(true, Ordering::Relaxed);
        assert!(matches!(
            check_cancelled(Some(&flag)),
            Err(WorkbenchError::Cancelled)
        ));
    }
}
