//! The producer-side handle.

use crate::element::Element;
use crate::queue::Shared;
use crate::ring::SendOutcome;
use std::sync::Arc;

/// Producing endpoint of a queue.
///
/// All operations are non-blocking and infallible: the intended caller is a
/// privileged context (completion callback, signal handler bridged onto a
/// thread) that can neither wait nor unwind. Backpressure is therefore
/// silent drop-newest, observable only through the sticky
/// [`overflowed`](Producer::overflowed) flag, and sends after the consumer
/// has gone are no-op disposals.
///
/// # Note
///
/// `Producer` does NOT implement `Clone`. This is intentional: exactly one
/// producer context generates elements at a time.
pub struct Producer {
    shared: Arc<Shared>,
}

impl Producer {
    pub(crate) fn new(shared: Arc<Shared>) -> Self {
        Self { shared }
    }

    /// Enqueues an element; never blocks.
    ///
    /// If the queue is full the element is disposed and the overflow flag
    /// set (the queued elements are untouched). If the consumer has closed
    /// its side, the element is disposed silently. On success the consumer
    /// is woken through the readiness notifier.
    pub fn send(&self, element: Box<dyn Element>) {
        let outcome = self.shared.lock().send(element);
        // Signal outside the critical section; waking a task must not
        // extend the producer's time under the lock.
        if outcome == SendOutcome::Stored {
            self.shared.readiness.signal();
        }
    }

    /// Declares end of stream.
    ///
    /// Elements already queued remain receivable; once they drain, the
    /// consumer's run attempts report end-of-stream instead of blocking.
    /// Idempotent.
    pub fn close_write(&self) {
        self.shared.lock().close_write();
        self.shared.readiness.signal();
    }

    /// Returns the sticky overflow diagnostic: `true` between a send
    /// dropped on a full queue and the next successful dequeue.
    pub fn overflowed(&self) -> bool {
        self.shared.lock().overflowed()
    }

    /// Queue capacity fixed at construction.
    pub fn capacity(&self) -> usize {
        self.shared.lock().capacity()
    }

    /// Number of elements currently queued.
    pub fn len(&self) -> usize {
        self.shared.lock().len()
    }

    /// Returns `true` if nothing is currently queued.
    pub fn is_empty(&self) -> bool {
        self.shared.lock().is_empty()
    }
}

impl Drop for Producer {
    fn drop(&mut self) {
        // A vanished producer is end-of-stream, never a hang.
        self.close_write();
    }
}
