//! FIFO queue of deferred continuations

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::trace;

/// A deferred zero-argument action
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Queue of continuations awaiting delivery
///
/// Clones share the same queue. Nothing runs until a caller drains.
#[derive(Clone, Default)]
pub struct CompletionChannel {
    queue: Arc<Mutex<VecDeque<Task>>>,
}

impl CompletionChannel {
    /// Create an empty channel
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<Task>> {
        // Tasks run outside the lock, so a poisoned queue is still consistent
        self.queue.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Append a continuation to the queue
    pub fn schedule<F>(&self, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.lock().push_back(Box::new(task));
    }

    /// Run every continuation queued at the time of the call, in order
    ///
    /// Continuations scheduled while this drain runs are kept for the next
    /// call. Returns the number of continuations run.
    pub fn drain_once(&self) -> usize {
        let batch = std::mem::take(&mut *self.lock());
        let count = batch.len();
        if count > 0 {
            trace!("Draining {} continuations", count);
        }

        for task in batch {
            task();
        }

        count
    }

    /// Drain until the queue is empty or `max_rounds` drains have run
    ///
    /// Returns the total number of continuations run.
    pub fn run_until_idle(&self, max_rounds: usize) -> usize {
        let mut total = 0;
        for _ in 0..max_rounds {
            if self.is_idle() {
                break;
            }
            total += self.drain_once();
        }
        total
    }

    /// Get count of queued continuations
    pub fn pending_count(&self) -> usize {
        self.lock().len()
    }

    /// Check whether nothing is queued
    pub fn is_idle(&self) -> bool {
        self.lock().is_empty()
    }
}

impl std::fmt::Debug for CompletionChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionChannel")
            .field("pending", &self.pending_count())
            .finish()
    }
}
