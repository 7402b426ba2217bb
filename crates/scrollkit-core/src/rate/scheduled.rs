use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

/// Debounce backed by the tokio timer
///
/// Same semantics as [`Debounce`](super::Debounce), but the trailing run is a
/// spawned task so nobody has to poll. Each call aborts the previously
/// scheduled task. Must be called from within a tokio runtime.
pub struct ScheduledDebounce<F> {
    operation: Arc<F>,
    wait: Duration,
    invoke_immediately: bool,
    pending: Option<JoinHandle<()>>,
}

impl<F> ScheduledDebounce<F>
where
    F: Fn() + Send + Sync + 'static,
{
    pub fn new(operation: F, wait: Duration, invoke_immediately: bool) -> Self {
        Self {
            operation: Arc::new(operation),
            wait,
            invoke_immediately,
            pending: None,
        }
    }

    /// Register a call; returns true if the operation ran synchronously
    pub fn call(&mut self) -> bool {
        let call_now = self.invoke_immediately && !self.is_pending();

        if let Some(handle) = self.pending.take() {
            handle.abort();
        }

        let operation = Arc::clone(&self.operation);
        let wait = self.wait;
        let trailing = !self.invoke_immediately;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(wait).await;
            if trailing {
                operation();
            }
        }));

        if call_now {
            (self.operation)();
        }
        call_now
    }

    /// A window is open and its timer has not fired yet
    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl<F> Drop for ScheduledDebounce<F> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}
