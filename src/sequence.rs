// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Immutable, freely shareable sequences.
//!
//! This is what a linear sequence becomes after `unleash`. Clones share one
//! backing allocation, and no operation can mutate it.

use std::ops::Deref;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An ordered, immutable sequence of `T`.
#[derive(Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImmutableSequence<T> {
    elements: Arc<[T]>,
}

impl<T> ImmutableSequence<T> {
    /// Build from an ordered finite collection.
    pub fn from_elements(elements: impl IntoIterator<Item = T>) -> Self {
        elements.into_iter().collect()
    }

    pub fn empty() -> Self {
        Self::from(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Element at `index`, or `None` past the end.
    pub fn select(&self, index: usize) -> Option<&T> {
        self.elements.get(index)
    }

    pub fn as_slice(&self) -> &[T] {
        &self.elements
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.elements.iter()
    }

    /// True when both handles share one backing allocation.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.elements, &other.elements)
    }
}

impl<T: Clone> ImmutableSequence<T> {
    /// The first `n` elements (all of them if `n >= len`).
    pub fn take(&self, n: usize) -> Self {
        self.subsequence(0, n)
    }

    /// Everything after the first `n` elements.
    pub fn drop(&self, n: usize) -> Self {
        self.subsequence(n, self.len())
    }

    /// Elements in `[lo, hi)`, with both bounds clamped to the length.
    pub fn subsequence(&self, lo: usize, hi: usize) -> Self {
        let hi = hi.min(self.len());
        let lo = lo.min(hi);
        if lo == 0 && hi == self.len() {
            return self.clone();
        }
        Self::from(self.elements[lo..hi].to_vec())
    }

    pub fn concatenate(&self, other: &Self) -> Self {
        if other.is_empty() {
            return self.clone();
        }
        if self.is_empty() {
            return other.clone();
        }
        self.iter().chain(other.iter()).cloned().collect()
    }
}

impl<T: PartialEq> ImmutableSequence<T> {
    pub fn is_prefix_of(&self, other: &Self) -> bool {
        other.as_slice().starts_with(self.as_slice())
    }

    pub fn is_proper_prefix_of(&self, other: &Self) -> bool {
        self.len() < other.len() && self.is_prefix_of(other)
    }

    pub fn contains(&self, value: &T) -> bool {
        self.elements.contains(value)
    }
}

// Manual impl: cloning shares the allocation, so `T: Clone` is not required.
impl<T> Clone for ImmutableSequence<T> {
    fn clone(&self) -> Self {
        Self {
            elements: Arc::clone(&self.elements),
        }
    }
}

impl<T> Default for ImmutableSequence<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> From<Vec<T>> for ImmutableSequence<T> {
    fn from(elements: Vec<T>) -> Self {
        Self {
            elements: Arc::from(elements),
        }
    }
}

impl<T> FromIterator<T> for ImmutableSequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            elements: iter.into_iter().collect(),
        }
    }
}

impl<T> Deref for ImmutableSequence<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.elements
    }
}

impl<'a, T> IntoIterator for &'a ImmutableSequence<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Serialize> Serialize for ImmutableSequence<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.as_slice().serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for ImmutableSequence<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<T>::deserialize(deserializer).map(Self::from)
    }
}
