//! Bounded SPSC run queue for privileged-producer / task-consumer bridging.
//!
//! `runq` carries opaque, owned work items from a context that must never
//! block (a hardware completion callback, a signal handler bridged onto a
//! thread) to a cooperatively scheduled task that executes them, with:
//!
//! - **Non-blocking enqueue**: [`Producer::send`] never waits, never
//!   allocates past construction, and never reports an error; a full queue
//!   drops the newest element (disposing it) and sets a sticky overflow
//!   flag for diagnostics.
//! - **Blocking, pollable dequeue**: [`Consumer::run_one`] executes one
//!   element, waiting on a readiness notifier with a per-handle timeout
//!   (default: forever). [`Consumer::ready`] exposes the same readiness for
//!   callers multiplexing event sources.
//! - **Closed-state propagation**: either side may close; a closed writer
//!   turns into a clean end-of-stream after the queue drains, a closed
//!   reader turns later sends into silent disposals and wakes any blocked
//!   run attempt. Dropping a handle closes its side.
//! - **FIFO delivery** and exactly-once disposal of every element on every
//!   removal path.
//!
//! # Example
//!
//! ```
//! use runq::{queue, Element, ExecutionError, RunOutcome};
//!
//! struct Ping(u32);
//!
//! impl Element for Ping {
//!     fn execute(&mut self) -> Result<(), ExecutionError> {
//!         println!("ping {}", self.0);
//!         Ok(())
//!     }
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let (producer, consumer) = queue(16);
//!
//! // Producer side: fire-and-forget from the non-blocking context.
//! producer.send(Box::new(Ping(1)));
//! producer.close_write();
//!
//! // Consumer side: run until end of stream.
//! while let Ok(RunOutcome::Consumed) = consumer.run_one().await {}
//! # }
//! ```

mod consumer;
mod element;
mod error;
mod invariants;
mod producer;
mod queue;
mod readiness;
mod ring;
mod wait;

pub use consumer::Consumer;
pub use element::{Element, ExecutionError};
pub use error::{RunError, RunOutcome};
pub use producer::Producer;
pub use queue::queue;
