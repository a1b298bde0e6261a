//! Error types and outcomes for consumer-side operations.

use crate::element::ExecutionError;
use thiserror::Error;

/// Successful result of a run attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// One element was dequeued, executed, and disposed.
    Consumed,
    /// The writer closed and the queue is drained. Not an error: zero
    /// elements were consumed and none ever will be.
    EndOfStream,
}

/// Errors surfaced by [`Consumer::run_one`] and [`Consumer::try_run_one`].
///
/// The ring core itself never raises; everything here is mapped by the
/// consumer-side adapter. Overflow is deliberately absent: a full queue
/// drops the newest element silently and only sets a sticky diagnostic
/// flag, because the producer context cannot handle an error.
///
/// [`Consumer::run_one`]: crate::Consumer::run_one
/// [`Consumer::try_run_one`]: crate::Consumer::try_run_one
#[derive(Debug, Error)]
pub enum RunError {
    /// The consumer handle itself was already closed. Distinct from
    /// [`RunOutcome::EndOfStream`]: this is a use-after-close on the
    /// reading side, even if elements remain physically stored.
    #[error("queue handle is closed")]
    Closed,

    /// No element is ready and the writer is still open. Returned only by
    /// the nonblocking attempt; retry later or use the blocking form.
    #[error("no element ready")]
    WouldBlock,

    /// The blocking wait expired before an element arrived. Transient;
    /// the caller may retry.
    #[error("timed out waiting for an element")]
    TimedOut,

    /// The element's own `execute` failed. The element was disposed before
    /// this error propagated.
    #[error("element execution failed: {0}")]
    Execution(#[source] ExecutionError),
}

impl RunError {
    /// Returns `true` if the caller may simply retry (`WouldBlock`,
    /// `TimedOut`).
    #[inline]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::WouldBlock | Self::TimedOut)
    }

    /// Returns `true` if this handle is permanently unusable.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Closed)
    }
}
