//! The opaque unit of work carried by the queue.
//!
//! The queue never inspects element contents. The only contract is the
//! two-method surface below: run the element's effect, then release its
//! resources exactly once.

/// Failure raised by an element's own [`execute`](Element::execute).
///
/// Elements are opaque to the queue, so their failures are carried as a
/// boxed error and surfaced unchanged through
/// [`RunError::Execution`](crate::RunError::Execution).
pub type ExecutionError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// An owned, opaque work item.
///
/// Elements are transferred by value: producer → queue → consuming
/// operation. Whatever removes an element from the queue (normal dequeue,
/// overflow drop, reader-close drain, teardown) calls [`dispose`] exactly
/// once. Because `dispose` consumes the box, a second call is
/// unrepresentable.
///
/// [`dispose`]: Element::dispose
pub trait Element: Send {
    /// Runs the element's effect. May fail; the element is still disposed
    /// before the failure reaches the caller.
    fn execute(&mut self) -> Result<(), ExecutionError>;

    /// Releases the element's resources.
    ///
    /// The default implementation simply drops the element, which is
    /// sufficient for types whose cleanup lives in `Drop`.
    fn dispose(self: Box<Self>) {}
}

/// Closures are elements: `execute` invokes the closure, disposal drops it.
impl<F> Element for F
where
    F: FnMut() -> Result<(), ExecutionError> + Send,
{
    fn execute(&mut self) -> Result<(), ExecutionError> {
        self()
    }
}
