// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The call surface generated code binds to.
//!
//! Each function carries the name the source language's extern declarations
//! use and delegates to the typed API. Lengths and indices are `u64`; an
//! index that does not fit in `usize` is simply out of range. Reads that the
//! generated code expects as values (`seq_get`, `peek`, `lseq_share_raw`)
//! return owned clones.
//!
//! | Extern              | Consumes | Failure           |
//! |---------------------|----------|-------------------|
//! | `seq_alloc`         | -        | Allocation        |
//! | `seq_get`           | no       | IndexOutOfRange   |
//! | `seq_set`           | yes      | IndexOutOfRange   |
//! | `seq_length`        | no       | -                 |
//! | `seq_free`          | yes      | -                 |
//! | `seq_unleash`       | yes      | -                 |
//! | `give` / `empty`    | -        | -                 |
//! | `peek`              | no       | ContractViolation |
//! | `unwrap`            | yes      | ContractViolation |
//! | `discard`           | yes      | -                 |
//! | `lseq_alloc_raw`    | -        | Allocation        |
//! | `lseq_length_raw`   | no       | -                 |
//! | `lseq_swap_raw_fun` | yes      | IndexOutOfRange   |
//! | `lseq_share_raw`    | no       | IndexOutOfRange   |
//! | `lseq_free_raw`     | yes      | -                 |

use crate::config::Limits;
use crate::default::DefaultProvider;
use crate::error::{LinearError, Rejected};
use crate::lseq::LSeq;
use crate::maybe::Maybe;
use crate::seq::LinearSeq;
use crate::sequence::ImmutableSequence;

/// Narrow a caller index; anything past `usize` cannot be in range.
fn index(i: u64, length: usize) -> Result<usize, LinearError> {
    usize::try_from(i).map_err(|_| LinearError::IndexOutOfRange { index: i, length })
}

// ============================================================================
// LINEAR SEQUENCES
// ============================================================================

pub fn seq_alloc<A>(
    length: u64,
    provider: &impl DefaultProvider<A>,
) -> Result<LinearSeq<A>, LinearError> {
    LinearSeq::alloc_with(length, provider, &Limits::default())
}

pub fn seq_get<A: Clone>(s: &LinearSeq<A>, i: u64) -> Result<A, LinearError> {
    s.get_cloned(index(i, s.length())?)
}

pub fn seq_set<A>(s: LinearSeq<A>, i: u64, a: A) -> Result<LinearSeq<A>, Rejected<(LinearSeq<A>, A)>> {
    match index(i, s.length()) {
        Ok(i) => s.set(i, a),
        Err(error) => Err(Rejected::new(error, (s, a))),
    }
}

pub fn seq_length<A>(s: &LinearSeq<A>) -> u64 {
    s.length() as u64
}

pub fn seq_free<A>(s: LinearSeq<A>) {
    s.free();
}

pub fn seq_unleash<A>(s: LinearSeq<A>) -> ImmutableSequence<A> {
    s.unleash()
}

// ============================================================================
// MAYBE
// ============================================================================

pub fn give<A>(a: A) -> Maybe<A> {
    Maybe::give(a)
}

pub fn empty<A>() -> Maybe<A> {
    Maybe::empty()
}

pub fn peek<A: Clone>(m: &Maybe<A>) -> Result<A, LinearError> {
    m.try_peek().cloned()
}

pub fn unwrap<A>(m: Maybe<A>) -> Result<A, LinearError> {
    m.try_unwrap()
}

pub fn discard<A>(m: Maybe<A>) {
    m.discard();
}

// ============================================================================
// LSEQS
// ============================================================================

pub fn lseq_alloc_raw<A>(length: u64) -> Result<LSeq<A>, LinearError> {
    LSeq::alloc_raw_with(length, &Limits::default())
}

pub fn lseq_length_raw<A>(s: &LSeq<A>) -> u64 {
    s.length_raw() as u64
}

/// Swap `a1` into slot `i`, returning the sequence and the old content.
pub fn lseq_swap_raw_fun<A>(
    s1: LSeq<A>,
    i: u64,
    a1: Maybe<A>,
) -> Result<(LSeq<A>, Maybe<A>), Rejected<(LSeq<A>, Maybe<A>)>> {
    match index(i, s1.length_raw()) {
        Ok(i) => s1.swap_raw(i, a1),
        Err(error) => Err(Rejected::new(error, (s1, a1))),
    }
}

pub fn lseq_share_raw<A: Clone>(s: &LSeq<A>, i: u64) -> Result<Maybe<A>, LinearError> {
    s.share_raw_cloned(index(i, s.length_raw())?)
}

pub fn lseq_free_raw<A>(s: LSeq<A>) {
    s.free_raw();
}
