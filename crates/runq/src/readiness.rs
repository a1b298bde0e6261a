//! Readiness notification between the producer context and blocked
//! consumers.
//!
//! Wraps [`tokio::sync::Notify`]. `signal` is non-blocking and safe to call
//! from the producer context; it wakes every waiter currently registered
//! through [`Readiness::notified`]. Lost-wakeup freedom is the waiter's
//! responsibility: register interest *before* checking state (see
//! `wait::block_until`).

use tokio::sync::futures::Notified;
use tokio::sync::Notify;

pub(crate) struct Readiness {
    notify: Notify,
}

impl Readiness {
    pub(crate) fn new() -> Self {
        Self {
            notify: Notify::new(),
        }
    }

    /// Wakes all registered waiters. Signaled when an element is stored and
    /// on either side closing, so blocked consumers always re-observe state
    /// instead of hanging.
    pub(crate) fn signal(&self) {
        self.notify.notify_waiters();
    }

    /// Returns the registration future for one wakeup.
    pub(crate) fn notified(&self) -> Notified<'_> {
        self.notify.notified()
    }
}
