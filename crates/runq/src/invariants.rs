//! Debug assertion macros for ring buffer invariants.
//!
//! Active only in debug builds, so there is zero overhead in release
//! builds. Used by `Ring` on every mutation.

/// Assert that occupancy never exceeds capacity.
///
/// **Invariant**: `0 ≤ (write_index - read_index) ≤ capacity`
macro_rules! debug_assert_occupancy_bounded {
    ($occupancy:expr, $capacity:expr) => {
        debug_assert!(
            $occupancy <= $capacity,
            "occupancy {} exceeds capacity {}",
            $occupancy,
            $capacity
        )
    };
}

/// Assert that an index counter only increases.
///
/// **Invariant**: `read_index` and `write_index` are monotonically
/// non-decreasing for the queue's life.
macro_rules! debug_assert_monotonic {
    ($name:literal, $old:expr, $new:expr) => {
        debug_assert!(
            $new >= $old,
            "{} decreased from {} to {}",
            $name,
            $old,
            $new
        )
    };
}

/// Assert that the slot a send is about to fill is vacant.
///
/// **Invariant**: `slots[i]` is occupied iff `i` lies in the window
/// `[read_index, write_index)` taken modulo capacity.
macro_rules! debug_assert_slot_vacant {
    ($vacant:expr, $idx:expr) => {
        debug_assert!($vacant, "storing into occupied slot {}", $idx)
    };
}

/// Assert that the slot a receive is about to take is occupied.
macro_rules! debug_assert_slot_occupied {
    ($occupied:expr, $idx:expr) => {
        debug_assert!($occupied, "taking from vacant slot {}", $idx)
    };
}

pub(crate) use debug_assert_monotonic;
pub(crate) use debug_assert_occupancy_bounded;
pub(crate) use debug_assert_slot_occupied;
pub(crate) use debug_assert_slot_vacant;
