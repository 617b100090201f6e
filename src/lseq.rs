// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Partially initialized linear sequences.
//!
//! An `LSeq<T>` is a fixed-length array of [`Maybe<T>`] slots. Each slot is
//! independently full or empty; this layer tracks no aggregate invariant
//! across slots. Linear content moves in and out one slot at a time through
//! [`swap_raw`](LSeq::swap_raw), which always hands back whatever occupied the
//! slot, so a value is never duplicated or silently dropped.
//!
//! Two layers:
//!
//! - **raw** (`alloc_raw`, `length_raw`, `swap_raw`, `share_raw`,
//!   `free_raw`): the primitives generated code calls directly.
//! - **checked** (`give`, `take`, `peek`, `has`, `free`): built on the raw
//!   swap, these also enforce the expected slot state and report a
//!   `ContractViolation` otherwise.
//!
//! # Per-slot state machine
//!
//! ```text
//!   Empty ──give / swap in Full──▶ Full
//!   Full  ──take / swap in Empty─▶ Empty
//! ```
//!
//! Slots start `Empty`. There is no terminal state.

use std::fmt;

use crate::config::{reserve, Limits};
use crate::contracts::{check_allocated, check_length_preserved, check_swap_exact};
use crate::error::{LinearError, Rejected, Violation};
use crate::maybe::Maybe;

/// Fixed-length array of once-consumable slots.
#[must_use = "an lseq must be consumed with free() or free_raw()"]
pub struct LSeq<T> {
    slots: Vec<Maybe<T>>,
}

impl<T> LSeq<T> {
    /// Allocate `length` slots, all empty.
    pub fn alloc_raw(length: usize) -> Result<Self, LinearError> {
        Self::alloc_raw_with(length as u64, &Limits::default())
    }

    /// [`alloc_raw`](Self::alloc_raw) honoring configured limits.
    pub fn alloc_raw_with(length: u64, limits: &Limits) -> Result<Self, LinearError> {
        let length = limits.admit(length)?;
        let mut slots = reserve(length)?;
        slots.extend((0..length).map(|_| Maybe::Empty));
        check_allocated("lseq_alloc_raw", length, slots.len());
        tracing::trace!(length, "lseq_alloc_raw");
        Ok(Self { slots })
    }

    pub fn length_raw(&self) -> usize {
        self.slots.len()
    }

    /// Replace slot `index` with `new` and return the previous content.
    ///
    /// This is the sole mutation primitive. On an out-of-range index nothing
    /// changes and both arguments come back in the error.
    pub fn swap_raw(
        mut self,
        index: usize,
        new: Maybe<T>,
    ) -> Result<(Self, Maybe<T>), Rejected<(Self, Maybe<T>)>> {
        match self.swap(index, new) {
            Ok(old) => Ok((self, old)),
            Err(rejected) => Err(rejected.map(|new| (self, new))),
        }
    }

    /// In-place form of [`swap_raw`](Self::swap_raw) for callers holding
    /// `&mut LSeq` (exclusive access is the same ownership guarantee).
    pub fn swap(&mut self, index: usize, new: Maybe<T>) -> Result<Maybe<T>, Rejected<Maybe<T>>> {
        let before = self.slots.len();
        // INVARIANT: REJECT_BEFORE_WRITE
        if index >= before {
            let error = LinearError::out_of_range(index, before);
            tracing::debug!(%error, "lseq_swap_raw rejected");
            return Err(Rejected::new(error, new));
        }
        let new_full = new.is_full();
        // INVARIANT: SWAP_EXACT
        // The displaced content is returned, never dropped here.
        let old = self.slots[index].replace(new);
        check_swap_exact(index, new_full, self.slots[index].is_full());
        check_length_preserved("lseq_swap_raw", before, self.slots.len());
        Ok(old)
    }

    /// View slot `index` without altering it.
    pub fn share_raw(&self, index: usize) -> Result<Maybe<&T>, LinearError> {
        self.slot(index).map(Maybe::as_ref)
    }

    /// Release storage without inspecting slot contents.
    ///
    /// Values still held in full slots are dropped. That is never an error
    /// here, but it is logged at `warn` so misuse surfaces in test runs. Use
    /// [`free`](Self::free) to reject it instead.
    pub fn free_raw(self) {
        let occupied = self.full_count();
        if occupied > 0 {
            tracing::warn!(
                occupied,
                length = self.slots.len(),
                "lseq_free_raw discarding occupied slots"
            );
        }
        tracing::trace!(length = self.slots.len(), "lseq_free_raw");
    }

    // ========================================================================
    // CHECKED LAYER
    // ========================================================================

    /// Whether slot `index` is full.
    pub fn has(&self, index: usize) -> Result<bool, LinearError> {
        self.slot(index).map(Maybe::is_full)
    }

    /// Fullness of every slot, in order.
    pub fn occupancy(&self) -> Vec<bool> {
        self.slots.iter().map(Maybe::is_full).collect()
    }

    pub fn full_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_full()).count()
    }

    /// Borrow the value in slot `index`, which must be full.
    pub fn peek(&self, index: usize) -> Result<&T, LinearError> {
        match self.slot(index)? {
            Maybe::Full(value) => Ok(value),
            Maybe::Empty => Err(Violation::SlotEmpty { index }.into()),
        }
    }

    /// Move the value out of slot `index`, which must be full.
    pub fn take(mut self, index: usize) -> Result<(Self, T), Rejected<Self>> {
        // Swapping Empty into an empty slot is a no-op, so the error paths
        // leave the sequence as it was.
        match self.swap(index, Maybe::Empty) {
            Ok(Maybe::Full(value)) => Ok((self, value)),
            Ok(Maybe::Empty) => Err(Rejected::new(Violation::SlotEmpty { index }.into(), self)),
            Err(rejected) => Err(Rejected::new(rejected.error, self)),
        }
    }

    /// Move `value` into slot `index`, which must be empty.
    pub fn give(mut self, index: usize, value: T) -> Result<Self, Rejected<(Self, T)>> {
        let error = match self.slot(index) {
            Ok(Maybe::Empty) => None,
            Ok(Maybe::Full(_)) => Some(Violation::SlotOccupied { index }.into()),
            Err(error) => Some(error),
        };
        if let Some(error) = error {
            return Err(Rejected::new(error, (self, value)));
        }
        self.slots[index] = Maybe::Full(value);
        Ok(self)
    }

    /// Release storage, refusing while any slot still holds a value.
    pub fn free(self) -> Result<(), Rejected<Self>> {
        match self.full_count() {
            0 => {
                self.free_raw();
                Ok(())
            }
            occupied => Err(Rejected::new(
                Violation::FreeWithOccupiedSlots { occupied }.into(),
                self,
            )),
        }
    }

    fn slot(&self, index: usize) -> Result<&Maybe<T>, LinearError> {
        self.slots
            .get(index)
            .ok_or_else(|| LinearError::out_of_range(index, self.slots.len()))
    }
}

impl<T: Clone> LSeq<T> {
    /// Owned snapshot of slot `index`.
    pub fn share_raw_cloned(&self, index: usize) -> Result<Maybe<T>, LinearError> {
        self.share_raw(index).map(Maybe::cloned)
    }
}

impl<T: fmt::Debug> fmt::Debug for LSeq<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LSeq").field(&self.slots).finish()
    }
}
