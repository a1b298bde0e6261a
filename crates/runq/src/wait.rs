//! Generic cooperative blocking built from a nonblocking attempt.
//!
//! The consumer's blocking operations are all the same shape: repeat a
//! nonblocking step until it produces a definitive outcome, sleeping on the
//! readiness notifier between attempts, bounded by an optional deadline.
//! Modeling the step as an explicit ready/retry outcome keeps cancellation
//! and timeouts testable with paused time and no real concurrency.

use crate::readiness::Readiness;
use std::time::Duration;
use tokio::time::{timeout_at, Instant};

/// Outcome of one nonblocking attempt inside [`block_until`].
pub(crate) enum Step<T> {
    /// The attempt produced a definitive outcome; stop looping.
    Complete(T),
    /// Nothing to do yet; wait for the next readiness signal.
    Pending,
}

/// The wait deadline expired before the step completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct WaitTimedOut;

/// Repeats `step` until it completes, waiting on `readiness` between
/// attempts. `timeout` of `None` waits forever. The deadline is computed
/// once up front, so intervening wakeups never extend the wait.
///
/// The step must not block and must not suspend; it runs once per wakeup
/// plus once immediately.
pub(crate) async fn block_until<T, F>(
    readiness: &Readiness,
    timeout: Option<Duration>,
    mut step: F,
) -> Result<T, WaitTimedOut>
where
    F: FnMut() -> Step<T>,
{
    let deadline = timeout.map(|t| Instant::now() + t);

    loop {
        let notified = readiness.notified();
        tokio::pin!(notified);
        // Register interest before the attempt so a signal arriving between
        // the step and the await is not lost.
        notified.as_mut().enable();

        if let Step::Complete(value) = step() {
            return Ok(value);
        }

        match deadline {
            Some(deadline) => {
                if timeout_at(deadline, notified).await.is_err() {
                    return Err(WaitTimedOut);
                }
            }
            None => notified.await,
        }
    }
}
