// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for lseq slot operations.
//!
//! Replays arbitrary swap/give/take/share calls against a `Vec<Option<u8>>`
//! model. Any divergence, or any panic on an out-of-range index, is a bug.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use linear_extern::{LSeq, Maybe};

#[derive(Debug, Arbitrary)]
enum Op {
    Swap { index: u8, value: Option<u8> },
    Give { index: u8, value: u8 },
    Take { index: u8 },
    Share { index: u8 },
}

#[derive(Debug, Arbitrary)]
struct Input {
    length: u8,
    ops: Vec<Op>,
}

fuzz_target!(|input: Input| {
    let len = usize::from(input.length % 32);
    let mut model: Vec<Option<u8>> = vec![None; len];
    let mut s: LSeq<u8> = LSeq::alloc_raw(len).expect("small alloc");

    for op in input.ops {
        s = match op {
            Op::Swap { index, value } => {
                let i = usize::from(index);
                match s.swap_raw(i, Maybe::from(value)) {
                    Ok((next, old)) => {
                        assert_eq!(old.into_option(), std::mem::replace(&mut model[i], value));
                        next
                    }
                    Err(rejected) => {
                        assert!(i >= len);
                        let (next, returned) = rejected.into_inner();
                        assert_eq!(returned.into_option(), value);
                        next
                    }
                }
            }
            Op::Give { index, value } => {
                let i = usize::from(index);
                match s.give(i, value) {
                    Ok(next) => {
                        assert_eq!(model[i].replace(value), None);
                        next
                    }
                    Err(rejected) => {
                        assert!(i >= len || model[i].is_some());
                        rejected.into_inner().0
                    }
                }
            }
            Op::Take { index } => {
                let i = usize::from(index);
                match s.take(i) {
                    Ok((next, value)) => {
                        assert_eq!(model[i].take(), Some(value));
                        next
                    }
                    Err(rejected) => {
                        assert!(i >= len || model[i].is_none());
                        rejected.into_inner()
                    }
                }
            }
            Op::Share { index } => {
                let i = usize::from(index);
                match s.share_raw(i) {
                    Ok(shared) => assert_eq!(shared.cloned().into_option(), model[i]),
                    Err(_) => assert!(i >= len),
                }
                s
            }
        };
        assert_eq!(s.length_raw(), len);
    }

    assert_eq!(s.full_count(), model.iter().flatten().count());
    s.free_raw();
});
