//! Property-based tests for the queue's ordering, bounding, and disposal
//! guarantees.
//!
//! Everything here drives the public API through the nonblocking
//! `try_run_one`, so no async runtime is involved and the properties are
//! fully deterministic.

use proptest::prelude::*;
use runq::{queue, Element, ExecutionError, RunError, RunOutcome};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

struct Probe {
    id: u64,
    log: Arc<Mutex<Vec<u64>>>,
    disposed: Arc<AtomicUsize>,
}

impl Element for Probe {
    fn execute(&mut self) -> Result<(), ExecutionError> {
        self.log.lock().unwrap().push(self.id);
        Ok(())
    }

    fn dispose(self: Box<Self>) {
        self.disposed.fetch_add(1, Ordering::SeqCst);
    }
}

fn probe(id: u64, log: &Arc<Mutex<Vec<u64>>>, disposed: &Arc<AtomicUsize>) -> Box<dyn Element> {
    Box::new(Probe {
        id,
        log: Arc::clone(log),
        disposed: Arc::clone(disposed),
    })
}

proptest! {
    /// Any batch not exceeding capacity is delivered in exact submission
    /// order.
    #[test]
    fn prop_fifo_within_capacity(
        capacity in 1usize..32,
        count in 0usize..32,
    ) {
        let count = count.min(capacity);
        let log = Arc::new(Mutex::new(Vec::new()));
        let disposed = Arc::new(AtomicUsize::new(0));
        let (producer, consumer) = queue(capacity);

        for id in 0..count as u64 {
            producer.send(probe(id, &log, &disposed));
        }
        prop_assert!(!producer.overflowed());

        for _ in 0..count {
            prop_assert!(matches!(consumer.try_run_one(), Ok(RunOutcome::Consumed)));
        }
        prop_assert!(matches!(consumer.try_run_one(), Err(RunError::WouldBlock)));

        let expected: Vec<u64> = (0..count as u64).collect();
        prop_assert_eq!(log.lock().unwrap().clone(), expected);
        prop_assert_eq!(disposed.load(Ordering::SeqCst), count);
    }

    /// Overflow drops the newest element: sending capacity + extra items
    /// delivers exactly the first `capacity`, in order.
    #[test]
    fn prop_overflow_drops_newest(
        capacity in 1usize..16,
        extra in 1usize..16,
    ) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let disposed = Arc::new(AtomicUsize::new(0));
        let (producer, consumer) = queue(capacity);

        let total = capacity + extra;
        for id in 0..total as u64 {
            producer.send(probe(id, &log, &disposed));
        }
        prop_assert!(producer.overflowed());
        prop_assert_eq!(producer.len(), capacity);
        // The dropped elements were disposed on the spot.
        prop_assert_eq!(disposed.load(Ordering::SeqCst), extra);

        while matches!(consumer.try_run_one(), Ok(RunOutcome::Consumed)) {}
        prop_assert!(!producer.overflowed());

        let expected: Vec<u64> = (0..capacity as u64).collect();
        prop_assert_eq!(log.lock().unwrap().clone(), expected);
        prop_assert_eq!(disposed.load(Ordering::SeqCst), total);
    }

    /// Against a model queue: occupancy never exceeds capacity, delivery
    /// matches the model, and every element sent is disposed exactly once
    /// by the time both handles are gone.
    #[test]
    fn prop_model_random_interleaving(
        capacity in 1usize..8,
        ops in prop::collection::vec(prop::bool::ANY, 1..100),
    ) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let disposed = Arc::new(AtomicUsize::new(0));
        let (producer, consumer) = queue(capacity);

        let mut model: VecDeque<u64> = VecDeque::new();
        let mut expected_log: Vec<u64> = Vec::new();
        let mut next_id = 0u64;

        for send_op in ops {
            if send_op {
                producer.send(probe(next_id, &log, &disposed));
                if model.len() < capacity {
                    model.push_back(next_id);
                }
                next_id += 1;
            } else {
                match consumer.try_run_one() {
                    Ok(RunOutcome::Consumed) => {
                        let id = model.pop_front();
                        prop_assert!(id.is_some());
                        if let Some(id) = id {
                            expected_log.push(id);
                        }
                    }
                    Err(RunError::WouldBlock) => prop_assert!(model.is_empty()),
                    other => prop_assert!(false, "unexpected outcome: {:?}", other),
                }
            }
            prop_assert!(consumer.len() <= capacity);
            prop_assert_eq!(consumer.len(), model.len());
        }

        prop_assert_eq!(log.lock().unwrap().clone(), expected_log);

        drop(producer);
        drop(consumer);
        // Executed or not, every element had dispose called exactly once.
        prop_assert_eq!(disposed.load(Ordering::SeqCst), next_id as usize);
    }
}
