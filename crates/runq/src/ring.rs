use crate::element::Element;
use crate::invariants::{
    debug_assert_monotonic, debug_assert_occupancy_bounded, debug_assert_slot_occupied,
    debug_assert_slot_vacant,
};

// =============================================================================
// SYNCHRONIZATION STRATEGY
// =============================================================================
//
// The ring is a plain state machine: no atomics, no internal locking. Every
// method takes `&mut self`, and the only way to obtain one is through the
// `Mutex` in `queue.rs`, which is the single critical section serializing
// the producer and consumer contexts. This renders the classic
// "caller holds the global lock" precondition structurally instead of with
// a runtime check.
//
// ## Sequence counters
//
// `read_index` and `write_index` are unbounded u64 counters rather than a
// count plus wrapped head/tail pair:
// - occupancy is the plain subtraction `write_index - read_index`, with no
//   ambiguity between "empty" and "full" and no sentinel slot;
// - a slot index is computed as `counter % capacity` only when touching
//   storage;
// - at one element per microsecond, u64 wrap takes ~584,000 years, so the
//   counters are monotonic in practice (debug-asserted).
//
// ## Element disposal
//
// Every path that removes an element from the ring disposes it exactly
// once: overflow drop, reader-closed drop, reader-close drain, and final
// teardown in `Drop`. A successful `receive` instead transfers ownership
// out, and the consuming operation disposes after execution.
//
// =============================================================================

/// What `send` did with the element. The core never raises; the caller
/// uses this to decide whether to signal readiness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SendOutcome {
    /// Stored; a readiness signal is due.
    Stored,
    /// Reader already closed; the element was disposed without storing.
    DroppedClosed,
    /// Ring full; the element was disposed and the overflow flag set.
    DroppedOverflow,
}

/// Fixed-capacity SPSC ring of owned elements - the core building block.
///
/// Overflow policy is drop-newest: a send against a full ring disposes the
/// incoming element and sets a sticky diagnostic flag, never displacing a
/// queued element. The flag clears on the next successful receive.
pub(crate) struct Ring {
    /// Element ownership slots, indexed modulo capacity.
    ///
    /// `Box<[_]>` rather than `Vec<_>`: the allocation is sized once at
    /// construction and never grows.
    slots: Box<[Option<Box<dyn Element>>]>,
    /// Next slot to read from (consumer side).
    read_index: u64,
    /// Next slot to write to (producer side).
    write_index: u64,
    /// Consumer declared it will accept no more data.
    reader_closed: bool,
    /// Producer declared end of stream.
    writer_closed: bool,
    /// Sticky: a send hit a full ring. Cleared by the next successful receive.
    writer_overflow: bool,
}

impl Ring {
    /// Creates an empty ring with room for `capacity` elements.
    pub(crate) fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "ring capacity must be positive");
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        Self {
            slots: slots.into_boxed_slice(),
            read_index: 0,
            write_index: 0,
            reader_closed: false,
            writer_closed: false,
            writer_overflow: false,
        }
    }

    // ---------------------------------------------------------------------
    // STATUS
    // ---------------------------------------------------------------------

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of elements currently stored.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.write_index.wrapping_sub(self.read_index) as usize
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.read_index == self.write_index
    }

    #[inline]
    pub(crate) fn is_full(&self) -> bool {
        self.len() >= self.capacity()
    }

    #[inline]
    pub(crate) fn reader_closed(&self) -> bool {
        self.reader_closed
    }

    #[inline]
    pub(crate) fn writer_closed(&self) -> bool {
        self.writer_closed
    }

    /// Sticky overflow diagnostic. True between a dropped send and the next
    /// successful receive.
    #[inline]
    pub(crate) fn overflowed(&self) -> bool {
        self.writer_overflow
    }

    #[inline]
    fn slot_index(&self, counter: u64) -> usize {
        (counter % self.capacity() as u64) as usize
    }

    // ---------------------------------------------------------------------
    // PRODUCER SIDE
    // ---------------------------------------------------------------------

    /// Enqueues an element. Never blocks, never allocates, never raises.
    ///
    /// Backpressure and reader-closure are silent by design: the producer
    /// context cannot block or unwind, so a dropped element is disposed
    /// here and only the sticky flag records the overflow.
    pub(crate) fn send(&mut self, element: Box<dyn Element>) -> SendOutcome {
        if self.reader_closed {
            element.dispose();
            return SendOutcome::DroppedClosed;
        }

        if self.is_full() {
            self.writer_overflow = true;
            element.dispose();
            return SendOutcome::DroppedOverflow;
        }

        let idx = self.slot_index(self.write_index);
        debug_assert_slot_vacant!(self.slots[idx].is_none(), idx);
        self.slots[idx] = Some(element);

        let new_write = self.write_index.wrapping_add(1);
        debug_assert_monotonic!("write_index", self.write_index, new_write);
        self.write_index = new_write;
        debug_assert_occupancy_bounded!(self.len(), self.capacity());

        SendOutcome::Stored
    }

    /// Marks the writer side closed. The caller signals readiness so a
    /// blocked consumer wakes and observes end-of-stream.
    pub(crate) fn close_write(&mut self) {
        self.writer_closed = true;
    }

    // ---------------------------------------------------------------------
    // CONSUMER SIDE
    // ---------------------------------------------------------------------

    /// Dequeues the oldest element, or `None` if the ring is empty.
    ///
    /// `None` means "nothing right now", not closure; the caller
    /// distinguishes end-of-stream by also checking [`writer_closed`].
    ///
    /// [`writer_closed`]: Ring::writer_closed
    pub(crate) fn receive(&mut self) -> Option<Box<dyn Element>> {
        if self.is_empty() {
            return None;
        }

        let idx = self.slot_index(self.read_index);
        debug_assert_slot_occupied!(self.slots[idx].is_some(), idx);
        let element = self.slots[idx].take();

        let new_read = self.read_index.wrapping_add(1);
        debug_assert_monotonic!("read_index", self.read_index, new_read);
        self.read_index = new_read;
        self.writer_overflow = false;

        element
    }

    /// Drains and disposes everything queued, then marks the reader
    /// closed. Subsequent sends become no-op disposals. Idempotent.
    pub(crate) fn close_read(&mut self) {
        while let Some(element) = self.receive() {
            element.dispose();
        }
        self.reader_closed = true;
    }
}

impl Drop for Ring {
    fn drop(&mut self) {
        // Teardown is a removal path too: dispose whatever is still queued.
        while let Some(element) = self.receive() {
            element.dispose();
        }
    }
}
