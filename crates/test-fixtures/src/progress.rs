use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use clash_core::traits::IProgressSink;

/// Progress sink that records every call; optionally requests
/// cancellation once a number of updates has been seen.
#[derive(Debug, Default)]
pub struct RecordingProgress {
    updates: Mutex<Vec<f64>>,
    titles: Mutex<Vec<(String, String)>>,
    ended: AtomicUsize,
    cancel_after: Option<usize>,
    cancelled: AtomicBool,
}

impl RecordingProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancelling_after(updates: usize) -> Self {
        Self {
            cancel_after: Some(updates),
            ..Self::default()
        }
    }

    /// Request cancellation right away.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn updates(&self) -> Vec<f64> {
        self.updates.lock().unwrap().clone()
    }

    pub fn begun(&self) -> Vec<(String, String)> {
        self.titles.lock().unwrap().clone()
    }

    pub fn ended(&self) -> usize {
        self.ended.load(Ordering::SeqCst)
    }
}

impl IProgressSink for RecordingProgress {
    fn begin(&self, title: &str, message: &str) {
        self.titles
            .lock()
            .unwrap()
            .push((title.to_string(), message.to_string()));
    }

    fn update(&self, fraction: f64) {
        self.updates.lock().unwrap().push(fraction);
    }

    fn cancel_requested(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
            || self
                .cancel_after
                .is_some_and(|n| self.updates.lock().unwrap().len() >= n)
    }

    fn end(&self) {
        self.ended.fetch_add(1, Ordering::SeqCst);
    }
}
