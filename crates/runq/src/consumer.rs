//! The consumer-side handle: the blocking wait adapter over the ring core.

use crate::element::Element;
use crate::error::{RunError, RunOutcome};
use crate::queue::Shared;
use crate::wait::{block_until, Step, WaitTimedOut};
use std::sync::Arc;
use std::time::Duration;

/// What one locked attempt found, before any element runs.
enum Attempt {
    Element(Box<dyn Element>),
    EndOfStream,
}

/// Consuming endpoint of a queue.
///
/// [`run_one`](Consumer::run_one) dequeues one element, executes it outside
/// the critical section, and disposes it regardless of how execution went.
/// While the queue is empty and the producer side is open, it waits
/// cooperatively on the readiness notifier, bounded by the per-handle
/// timeout (default: wait forever).
///
/// Dropping the consumer closes the read side: queued elements are drained
/// and disposed, and later sends are disposed without being stored.
///
/// # Note
///
/// `Consumer` does NOT implement `Clone`; the queue has a single consuming
/// handle.
pub struct Consumer {
    shared: Arc<Shared>,
    timeout: Option<Duration>,
}

impl Consumer {
    pub(crate) fn new(shared: Arc<Shared>) -> Self {
        Self {
            shared,
            timeout: None,
        }
    }

    /// Sets the wait bound for [`run_one`](Consumer::run_one). `None`
    /// (the default) waits forever; `Some(Duration::ZERO)` makes a single
    /// nonblocking attempt per call.
    pub fn set_timeout(&mut self, timeout: Option<Duration>) {
        self.timeout = timeout;
    }

    /// The current wait bound.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// One locked, nonblocking attempt. Flag snapshot and dequeue happen
    /// under the same critical section so closure and data race
    /// consistently.
    fn attempt(&self) -> Step<Result<Attempt, RunError>> {
        let mut ring = self.shared.lock();
        if ring.reader_closed() {
            return Step::Complete(Err(RunError::Closed));
        }
        match ring.receive() {
            Some(element) => Step::Complete(Ok(Attempt::Element(element))),
            None if ring.writer_closed() => Step::Complete(Ok(Attempt::EndOfStream)),
            None => Step::Pending,
        }
    }

    /// Dequeues, executes, and disposes one element, waiting if the queue
    /// is empty and the writer is still open.
    ///
    /// - An element was run: `Ok(Consumed)`; if its `execute` failed, the
    ///   element is disposed first and the failure surfaces as
    ///   `Err(Execution(..))`.
    /// - Writer closed and queue drained: `Ok(EndOfStream)`, immediately
    ///   and without blocking.
    /// - This handle was closed (even mid-wait): `Err(Closed)`.
    /// - The per-handle timeout expired: `Err(TimedOut)`; transient, the
    ///   caller may retry.
    pub async fn run_one(&self) -> Result<RunOutcome, RunError> {
        let waited = block_until(&self.shared.readiness, self.timeout, || self.attempt()).await;
        match waited {
            Ok(found) => Self::finish(found?),
            Err(WaitTimedOut) => Err(RunError::TimedOut),
        }
    }

    /// Nonblocking form of [`run_one`](Consumer::run_one): a single
    /// attempt, with `Err(WouldBlock)` when the queue is empty but the
    /// writer is still open.
    pub fn try_run_one(&self) -> Result<RunOutcome, RunError> {
        match self.attempt() {
            Step::Complete(found) => Self::finish(found?),
            Step::Pending => Err(RunError::WouldBlock),
        }
    }

    fn finish(found: Attempt) -> Result<RunOutcome, RunError> {
        match found {
            Attempt::EndOfStream => Ok(RunOutcome::EndOfStream),
            Attempt::Element(element) => match run_and_dispose(element) {
                Ok(()) => Ok(RunOutcome::Consumed),
                Err(source) => Err(RunError::Execution(source)),
            },
        }
    }

    /// Waits until [`run_one`](Consumer::run_one) would make immediate
    /// progress. Returns `true` if an element may be available, `false` if
    /// the stream ended or this handle is closed. Poll integration for
    /// callers multiplexing over several event sources.
    pub async fn ready(&self) -> bool {
        let waited = block_until(&self.shared.readiness, None, || {
            let ring = self.shared.lock();
            if !ring.is_empty() && !ring.reader_closed() {
                Step::Complete(true)
            } else if ring.reader_closed() || ring.writer_closed() {
                Step::Complete(false)
            } else {
                Step::Pending
            }
        })
        .await;
        waited.unwrap_or(false)
    }

    /// Closes the read side: drains and disposes everything queued, marks
    /// the reader closed, and wakes any blocked run attempt so it observes
    /// `Err(Closed)` instead of hanging. Later sends dispose their element
    /// without storing it. Idempotent.
    pub fn close_read(&self) {
        self.shared.lock().close_read();
        self.shared.readiness.signal();
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

impl Drop for Consumer {
    fn drop(&mut self) {
        self.close_read();
    }
}

/// Executes the element outside the critical section, then disposes it on
/// every path, including an unwinding `execute`. Disposal completes before
/// any failure propagates.
fn run_and_dispose(element: Box<dyn Element>) -> Result<(), crate::element::ExecutionError> {
    struct Disposer(Option<Box<dyn Element>>);

    impl Drop for Disposer {
        fn drop(&mut self) {
            if let Some(element) = self.0.take() {
                element.dispose();
            }
        }
    }

    let mut guard = Disposer(Some(element));
    let result = match guard.0.as_mut() {
        Some(element) => element.execute(),
        None => Ok(()),
    };
    drop(guard);
    result
}
