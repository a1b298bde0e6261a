//! Shared queue state and the constructor tying both endpoints together.

use crate::consumer::Consumer;
use crate::producer::Producer;
use crate::readiness::Readiness;
use crate::ring::Ring;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// State shared by both endpoint handles.
///
/// The `Mutex` is the single critical section serializing producer and
/// consumer mutation of the ring; it is the Rust rendering of the global
/// lock that in the original system also masks the producer's interrupt
/// source. Holders keep it only for the nonblocking core operations and
/// never across a suspension point or an element's `execute`.
pub(crate) struct Shared {
    ring: Mutex<Ring>,
    pub(crate) readiness: Readiness,
}

impl Shared {
    /// Enters the critical section.
    ///
    /// A poisoned lock only means an element's `dispose` panicked while
    /// draining; the ring state machine is consistent after every
    /// operation, so the queue stays usable.
    pub(crate) fn lock(&self) -> MutexGuard<'_, Ring> {
        self.ring.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Creates a bounded queue and returns its two endpoints.
///
/// `capacity` is fixed for the queue's life; the slot storage is allocated
/// here and never resized. The [`Producer`] never blocks and is intended
/// for contexts that cannot (completion callbacks, signal handlers bridged
/// onto a thread); the [`Consumer`] runs elements from task context,
/// blocking cooperatively while the queue is empty.
///
/// Dropping either endpoint closes its side: a dropped producer turns into
/// end-of-stream, a dropped consumer turns later sends into silent
/// disposals. The ring storage is freed once both endpoints are gone, after
/// disposing anything still queued.
///
/// # Panics
///
/// Panics if `capacity` is zero.
///
/// # Example
///
/// ```
/// use runq::{queue, ExecutionError, RunOutcome};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let (producer, consumer) = queue(8);
///
/// producer.send(Box::new(|| -> Result<(), ExecutionError> {
///     println!("deferred work");
///     Ok(())
/// }));
/// producer.close_write();
///
/// assert!(matches!(consumer.run_one().await, Ok(RunOutcome::Consumed)));
/// assert!(matches!(consumer.run_one().await, Ok(RunOutcome::EndOfStream)));
/// # }
/// ```
pub fn queue(capacity: usize) -> (Producer, Consumer) {
    let shared = Arc::new(Shared {
        ring: Mutex::new(Ring::new(capacity)),
        readiness: Readiness::new(),
    });
    (
        Producer::new(Arc::clone(&shared)),
        Consumer::new(shared),
    )
}
