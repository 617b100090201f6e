// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//!
//! [`Tracked`] is a move-only value that reports its own drop to a
//! [`Ledger`]. Because it cannot be cloned, a test can prove that a sequence
//! of swaps neither duplicated a value (it would need `Clone`) nor lost one
//! (the ledger would count an unexpected drop).

#![doc(hidden)]

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

#[derive(Debug, Default)]
struct Counts {
    created: Cell<usize>,
    dropped: Cell<usize>,
}

/// Counts creations and drops of [`Tracked`] values.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    counts: Rc<Counts>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tracked value carrying `id`.
    pub fn track(&self, id: u32) -> Tracked {
        self.counts.created.set(self.counts.created.get() + 1);
        Tracked {
            id,
            counts: Rc::clone(&self.counts),
        }
    }

    pub fn created(&self) -> usize {
        self.counts.created.get()
    }

    pub fn dropped(&self) -> usize {
        self.counts.dropped.get()
    }

    /// Values created and not yet dropped.
    pub fn live(&self) -> usize {
        self.created() - self.dropped()
    }
}

/// A non-clonable value whose drop is recorded.
pub struct Tracked {
    id: u32,
    counts: Rc<Counts>,
}

impl Tracked {
    pub fn id(&self) -> u32 {
        self.id
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.counts.dropped.set(self.counts.dropped.get() + 1);
    }
}

impl PartialEq for Tracked {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl fmt::Debug for Tracked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tracked({})", self.id)
    }
}
