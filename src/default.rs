// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Default-value providers.
//!
//! Allocation fills fresh slots with "the default value of T". Instead of a
//! global lookup, the provider is passed into every defaulting allocation, so
//! the requirement that T has a default shows up at the call site.

/// Supplies the canonical default value for `T`. Must be total.
pub trait DefaultProvider<T> {
    fn default_value(&self) -> T;
}

/// Uses `T::default()`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StdDefault;

impl<T: Default> DefaultProvider<T> for StdDefault {
    fn default_value(&self) -> T {
        T::default()
    }
}

/// Hands out clones of a fixed value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstDefault<T>(pub T);

impl<T: Clone> DefaultProvider<T> for ConstDefault<T> {
    fn default_value(&self) -> T {
        self.0.clone()
    }
}

/// Calls a closure for every fresh slot.
#[derive(Clone, Copy)]
pub struct FnDefault<F>(pub F);

impl<T, F: Fn() -> T> DefaultProvider<T> for FnDefault<F> {
    fn default_value(&self) -> T {
        (self.0)()
    }
}
