// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error taxonomy for the linear runtime.
//!
//! Every error here is a caller bug. The verification layer upstream is
//! expected to make them unreachable, so the runtime's only job is to report
//! them immediately and leave state untouched.
//!
//! | Variant             | Raised by                                        |
//! |---------------------|--------------------------------------------------|
//! | `IndexOutOfRange`   | `get`, `set`, `swap_raw`, `share_raw`, ...       |
//! | `Allocation`        | `alloc`, `alloc_raw` (limit or allocator refusal)|
//! | `ContractViolation` | `peek`/`unwrap` on empty, use after consume, ... |

use std::fmt;

use thiserror::Error;

/// Errors reported by every fallible operation in the crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinearError {
    /// Index not in `[0, length)`.
    #[error("index {index} out of range for length {length}")]
    IndexOutOfRange { index: u64, length: usize },

    /// Backing store could not be allocated.
    #[error("cannot allocate {requested} slots: {reason}")]
    Allocation { requested: u64, reason: String },

    /// An operation was invoked on a value in the wrong state.
    #[error("contract violation: {0}")]
    ContractViolation(#[from] Violation),
}

impl LinearError {
    pub(crate) fn out_of_range(index: usize, length: usize) -> Self {
        LinearError::IndexOutOfRange {
            index: index as u64,
            length,
        }
    }

    /// True for `ContractViolation` errors.
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, LinearError::ContractViolation(_))
    }
}

/// The specific contract a caller broke.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("peek on an empty maybe")]
    PeekEmpty,

    #[error("unwrap on an empty maybe")]
    UnwrapEmpty,

    /// `give` into a slot that already holds a value.
    #[error("slot {index} is already occupied")]
    SlotOccupied { index: usize },

    /// `take`/`peek` on a slot that holds nothing.
    #[error("slot {index} is empty")]
    SlotEmpty { index: usize },

    /// Checked free of an lseq that still owns linear values.
    #[error("free of an lseq with {occupied} occupied slot(s)")]
    FreeWithOccupiedSlots { occupied: usize },

    /// A binding was used after an operation consumed it.
    #[error("'{name}' was consumed by {consumed_by} and cannot be used again")]
    UseAfterConsume {
        name: String,
        consumed_by: &'static str,
    },

    #[error("no binding named '{name}'")]
    UnknownBinding { name: String },

    /// A binding exists but holds the wrong kind of value.
    #[error("'{name}' is a {found}, expected a {expected}")]
    KindMismatch {
        name: String,
        expected: &'static str,
        found: &'static str,
    },

    /// A new binding would shadow a live linear value.
    #[error("'{name}' still holds a live {kind}")]
    Shadowed { name: String, kind: &'static str },
}

/// A refused consuming operation.
///
/// Consuming operations take their arguments by value. When a precondition
/// fails, nothing is mutated and ownership of every argument comes back in
/// `returned`, so no linear value is lost on the error path.
pub struct Rejected<P> {
    pub error: LinearError,
    pub returned: P,
}

impl<P> Rejected<P> {
    pub(crate) fn new(error: LinearError, returned: P) -> Self {
        Self { error, returned }
    }

    /// Reclaim the arguments, discarding the error.
    pub fn into_inner(self) -> P {
        self.returned
    }

    /// Split into the error and the returned arguments.
    pub fn into_parts(self) -> (LinearError, P) {
        (self.error, self.returned)
    }

    pub fn error(&self) -> &LinearError {
        &self.error
    }

    /// Transform the returned arguments, keeping the error.
    pub fn map<Q>(self, f: impl FnOnce(P) -> Q) -> Rejected<Q> {
        Rejected {
            error: self.error,
            returned: f(self.returned),
        }
    }
}

impl<P> From<Rejected<P>> for LinearError {
    fn from(rejected: Rejected<P>) -> Self {
        rejected.error
    }
}

// Manual impls: `P` (sequences of arbitrary `T`) need not be `Debug`.
impl<P> fmt::Debug for Rejected<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rejected")
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

impl<P> fmt::Display for Rejected<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rejected: {}", self.error)
    }
}

impl<P> std::error::Error for Rejected<P> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}
