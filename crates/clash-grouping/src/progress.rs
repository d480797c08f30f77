//! Progress reporting and cooperative cancellation.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use clash_core::traits::IProgressSink;

/// Shared cancellation flag, checked only while the applier populates.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

pub type ProgressCallback = Box<dyn Fn(f64) + Send + Sync>;

/// Fans progress out to an optional host sink and an optional callback,
/// and merges the token with the sink's own cancel request.
#[derive(Default)]
pub struct ProgressReporter {
    token: CancellationToken,
    sink: Option<Arc<dyn IProgressSink>>,
    callback: Option<ProgressCallback>,
}

impl ProgressReporter {
    pub fn new(token: CancellationToken) -> Self {
        Self {
            token,
            sink: None,
            callback: None,
        }
    }

    /// Reporter with a private token and no outputs.
    pub fn silent() -> Self {
        Self::default()
    }

    pub fn with_sink(mut self, sink: Arc<dyn IProgressSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn with_callback(mut self, callback: impl Fn(f64) + Send + Sync + 'static) -> Self {
        self.callback = Some(Box::new(callback));
        self
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled() || self.sink.as_ref().is_some_and(|s| s.cancel_requested())
    }

    pub fn begin(&self, title: &str, message: &str) {
        if let Some(sink) = &self.sink {
            sink.begin(title, message);
        }
    }

    /// Report `completed / total`; an empty workload counts as done.
    pub fn report(&self, completed: usize, total: usize) {
        let fraction = fraction(completed, total);
        if let Some(sink) = &self.sink {
            sink.update(fraction);
        }
        if let Some(callback) = &self.callback {
            callback(fraction);
        }
    }

    pub fn end(&self) {
        if let Some(sink) = &self.sink {
            sink.end();
        }
    }
}

impl fmt::Debug for ProgressReporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressReporter")
            .field("token", &self.token)
            .field("sink", &self.sink.is_some())
            .field("callback", &self.callback.is_some())
            .finish()
    }
}

fn fraction(completed: usize, total: usize) -> f64 {
    if total == 0 {
        1.0
    } else {
        (completed as f64 / total as f64).clamp(0.0, 1.0)
    }
}
