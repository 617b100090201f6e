// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Move-only dynamic arrays.
//!
//! A `LinearSeq<T>` owns one contiguous buffer of exactly `length`
//! initialized elements. It is neither `Clone` nor `Copy`: the operations the
//! source language treats as consuming (`set`, `free`, `unleash`) take `self`
//! by value, so reusing a consumed binding is a compile error rather than a
//! use-after-free. Reads borrow.
//!
//! The buffer is mutated in place. `set` hands back the same storage as a new
//! binding, which is the functional-update shape the verification language
//! expects without any copying.
//!
//! # Example
//!
//! ```
//! use linear_extern::{LinearSeq, StdDefault};
//!
//! let s: LinearSeq<i32> = LinearSeq::alloc(3, &StdDefault)?;
//! let s = s.set(1, 7).map_err(|r| r.error)?;
//! assert_eq!(s.get(1)?, &7);
//! assert_eq!(s.unleash().as_slice(), &[0, 7, 0]);
//! # Ok::<(), linear_extern::LinearError>(())
//! ```

use std::fmt;

use crate::config::{reserve, Limits};
use crate::contracts::{check_allocated, check_length_preserved};
use crate::default::DefaultProvider;
use crate::error::{LinearError, Rejected};
use crate::sequence::ImmutableSequence;

/// A uniquely owned, fixed-length, fully initialized array.
#[must_use = "a linear sequence must be consumed with free() or unleash()"]
pub struct LinearSeq<T> {
    buf: Vec<T>,
}

impl<T> LinearSeq<T> {
    /// Allocate `length` slots, each filled from `provider`.
    pub fn alloc(length: usize, provider: &impl DefaultProvider<T>) -> Result<Self, LinearError> {
        Self::alloc_with(length as u64, provider, &Limits::default())
    }

    /// [`alloc`](Self::alloc) honoring configured limits.
    pub fn alloc_with(
        length: u64,
        provider: &impl DefaultProvider<T>,
        limits: &Limits,
    ) -> Result<Self, LinearError> {
        let length = limits.admit(length)?;
        let mut buf = reserve(length)?;
        buf.extend((0..length).map(|_| provider.default_value()));
        check_allocated("seq_alloc", length, buf.len());
        tracing::trace!(length, "seq_alloc");
        Ok(Self { buf })
    }

    /// Number of slots.
    pub fn length(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Borrow element `index`.
    pub fn get(&self, index: usize) -> Result<&T, LinearError> {
        self.buf
            .get(index)
            .ok_or_else(|| LinearError::out_of_range(index, self.buf.len()))
    }

    /// Write `value` into slot `index`, returning the same sequence.
    ///
    /// On an out-of-range index nothing is written and both the sequence and
    /// the value come back in the error.
    pub fn set(self, index: usize, value: T) -> Result<Self, Rejected<(Self, T)>> {
        self.replace(index, value).map(|(seq, _old)| seq)
    }

    /// Like [`set`](Self::set), but hands back the element that was replaced.
    pub fn replace(mut self, index: usize, value: T) -> Result<(Self, T), Rejected<(Self, T)>> {
        let before = self.buf.len();
        // INVARIANT: REJECT_BEFORE_WRITE
        if index >= before {
            let error = LinearError::out_of_range(index, before);
            tracing::debug!(%error, "seq_set rejected");
            return Err(Rejected::new(error, (self, value)));
        }
        let old = std::mem::replace(&mut self.buf[index], value);
        check_length_preserved("seq_set", before, self.buf.len());
        Ok((self, old))
    }

    /// Release the backing buffer.
    pub fn free(self) {
        tracing::trace!(length = self.buf.len(), "seq_free");
    }

    /// Convert into an immutable sequence with the same elements.
    ///
    /// The elements move into the shared allocation rather than being copied,
    /// so the result is exactly the sequence at the moment of the call.
    pub fn unleash(self) -> ImmutableSequence<T> {
        tracing::trace!(length = self.buf.len(), "seq_unleash");
        ImmutableSequence::from(self.buf)
    }

    pub fn as_slice(&self) -> &[T] {
        &self.buf
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.buf.iter()
    }
}

impl<T: Clone> LinearSeq<T> {
    /// Allocate `length` slots, each a clone of `value`.
    pub fn alloc_init(length: usize, value: T) -> Result<Self, LinearError> {
        let mut buf = reserve(length)?;
        buf.resize(length, value);
        check_allocated("seq_alloc_init", length, buf.len());
        Ok(Self { buf })
    }

    /// Owned copy of element `index`.
    pub fn get_cloned(&self, index: usize) -> Result<T, LinearError> {
        self.get(index).cloned()
    }
}

impl<T: fmt::Debug> fmt::Debug for LinearSeq<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LinearSeq").field(&self.buf).finish()
    }
}

impl<'a, T> IntoIterator for &'a LinearSeq<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
