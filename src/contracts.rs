// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Runtime contracts for the linear containers.
//!
//! Debug-mode assertions that re-check structural invariants after each
//! mutation. These contracts:
//!
//! 1. Are **zero-cost in release builds** (use `debug_assert!`)
//! 2. Provide **early failure detection** during development
//! 3. Never replace the checked error paths: precondition failures are
//!    reported as `LinearError`, these only catch bugs inside the crate
//!
//! # INVARIANTS (DO NOT REMOVE THESE CHECKS)
//!
//! | Contract Function        | Invariant                                    |
//! |--------------------------|----------------------------------------------|
//! | `check_allocated`        | A fresh sequence has exactly `length` slots  |
//! | `check_length_preserved` | In-place updates never resize the buffer     |
//! | `check_swap_exact`       | After a swap the slot holds the new content  |

// ============================================================================
// COMPILE-TIME ASSERTIONS (evaluated at build time)
// ============================================================================

// INVARIANT: an empty slot costs no extra space for pointer-like payloads.
// `Maybe<Box<_>>` must use the null niche exactly like `Option<Box<_>>`.
const _: () = {
    use crate::maybe::Maybe;
    use std::mem::size_of;

    assert!(size_of::<Maybe<Box<u64>>>() == size_of::<Box<u64>>());
    assert!(size_of::<Maybe<Box<u64>>>() == size_of::<Option<Box<u64>>>());
};

// ============================================================================
// ALLOCATION CONTRACTS
// ============================================================================

/// Check that an allocation produced exactly `length` slots.
///
/// # Panics (debug builds only)
/// Panics if the buffer length differs from the requested length.
#[inline]
pub fn check_allocated(what: &str, requested: usize, actual: usize) {
    debug_assert_eq!(
        requested, actual,
        "Contract violation: {} allocated {} slots, requested {}",
        what, actual, requested
    );
}

// ============================================================================
// MUTATION CONTRACTS
// ============================================================================

/// Check that an in-place update left the slot count unchanged.
#[inline]
pub fn check_length_preserved(op: &str, before: usize, after: usize) {
    debug_assert_eq!(
        before, after,
        "Contract violation: {} changed length from {} to {}",
        op, before, after
    );
}

/// Check that a swap stored the incoming content in the slot.
///
/// `stored_full` is the slot's state after the swap, `new_full` the state of
/// the content that was swapped in.
#[inline]
pub fn check_swap_exact(index: usize, new_full: bool, stored_full: bool) {
    debug_assert_eq!(
        new_full, stored_full,
        "Contract violation: swap_raw at {} stored a {} slot, expected {}",
        index,
        if stored_full { "full" } else { "empty" },
        if new_full { "full" } else { "empty" }
    );
}
