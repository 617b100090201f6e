// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for linear sequences through the u64 extern surface.
//!
//! Indices span the whole u64 range, so this also covers indices that do
//! not fit in `usize`.

#![no_main]

use libfuzzer_sys::fuzz_target;
use linear_extern::externs::{seq_alloc, seq_get, seq_length, seq_set, seq_unleash};
use linear_extern::StdDefault;

fuzz_target!(|input: (u8, Vec<(u64, u16)>)| {
    let (length, writes) = input;
    let len = u64::from(length);
    let mut model = vec![0u16; usize::from(length)];
    let mut s = seq_alloc(len, &StdDefault).expect("small alloc");

    for (i, v) in writes {
        s = match seq_set(s, i, v) {
            Ok(next) => {
                model[i as usize] = v;
                next
            }
            Err(rejected) => {
                assert!(i >= len);
                rejected.into_inner().0
            }
        };
        assert_eq!(seq_length(&s), len);
        assert_eq!(seq_get(&s, i).ok(), (i < len).then(|| model[i as usize]));
    }

    assert_eq!(seq_unleash(s).as_slice(), model.as_slice());
});
