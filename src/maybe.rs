// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Single-slot holder for a linear value.
//!
//! A `Maybe<T>` is either `Full(v)`, a linear value that must be consumed
//! exactly once, or `Empty`. Absence is a real variant, not a default value
//! smuggled in as a sentinel, so there is nothing to misread in the empty
//! state.
//!
//! # State machine
//!
//! ```text
//!            give / swap in
//!   Empty ─────────────────▶ Full(v)
//!     ▲                         │
//!     └─────────────────────────┘
//!      unwrap / discard / swap out
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{LinearError, Violation};

/// A slot that is either full (consume once) or empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[must_use = "a full maybe holds a linear value; consume it or call discard()"]
pub enum Maybe<T> {
    Full(T),
    Empty,
}

impl<T> Maybe<T> {
    /// A full slot holding `value`.
    pub fn give(value: T) -> Self {
        Maybe::Full(value)
    }

    pub fn empty() -> Self {
        Maybe::Empty
    }

    pub fn is_full(&self) -> bool {
        matches!(self, Maybe::Full(_))
    }

    pub fn is_empty(&self) -> bool {
        !self.is_full()
    }

    /// Borrow the held value without consuming the slot.
    ///
    /// # Panics
    /// Panics with a contract violation when the slot is empty.
    #[track_caller]
    pub fn peek(&self) -> &T {
        match self {
            Maybe::Full(value) => value,
            Maybe::Empty => panic!("{}", LinearError::from(Violation::PeekEmpty)),
        }
    }

    /// Checked [`peek`](Self::peek).
    pub fn try_peek(&self) -> Result<&T, LinearError> {
        match self {
            Maybe::Full(value) => Ok(value),
            Maybe::Empty => Err(Violation::PeekEmpty.into()),
        }
    }

    /// Consume the slot and return its value.
    ///
    /// # Panics
    /// Panics with a contract violation when the slot is empty.
    #[track_caller]
    pub fn unwrap(self) -> T {
        match self {
            Maybe::Full(value) => value,
            Maybe::Empty => panic!("{}", LinearError::from(Violation::UnwrapEmpty)),
        }
    }

    /// Checked [`unwrap`](Self::unwrap).
    pub fn try_unwrap(self) -> Result<T, LinearError> {
        match self {
            Maybe::Full(value) => Ok(value),
            Maybe::Empty => Err(Violation::UnwrapEmpty.into()),
        }
    }

    /// Consume the slot, dropping whatever it holds.
    pub fn discard(self) {
        drop(self);
    }

    pub fn as_ref(&self) -> Maybe<&T> {
        match self {
            Maybe::Full(value) => Maybe::Full(value),
            Maybe::Empty => Maybe::Empty,
        }
    }

    /// Move the content out, leaving `Empty` behind.
    pub fn take(&mut self) -> Maybe<T> {
        std::mem::replace(self, Maybe::Empty)
    }

    /// Store `new` and return the previous content.
    pub fn replace(&mut self, new: Maybe<T>) -> Maybe<T> {
        std::mem::replace(self, new)
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Maybe::Full(value) => Some(value),
            Maybe::Empty => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Maybe<U> {
        match self {
            Maybe::Full(value) => Maybe::Full(f(value)),
            Maybe::Empty => Maybe::Empty,
        }
    }
}

impl<T: Clone> Maybe<&T> {
    /// Turn a borrowed view into an owned snapshot.
    pub fn cloned(self) -> Maybe<T> {
        self.map(Clone::clone)
    }
}

impl<T> Default for Maybe<T> {
    fn default() -> Self {
        Maybe::Empty
    }
}

impl<T> From<Option<T>> for Maybe<T> {
    fn from(option: Option<T>) -> Self {
        match option {
            Some(value) => Maybe::Full(value),
            None => Maybe::Empty,
        }
    }
}

impl<T> From<Maybe<T>> for Option<T> {
    fn from(maybe: Maybe<T>) -> Self {
        maybe.into_option()
    }
}
