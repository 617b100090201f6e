// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Kani model checking proofs for the linear-extern mutation primitives.
//!
//! This standalone crate mirrors the two operations that mutate storage,
//! the lseq slot swap and the linear sequence set, and proves them for every
//! length, index and content up to the unwind bound.
//!
//! Run with: `cargo kani`
//!
//! ## Verified Properties
//!
//! 1. **Exact swap**: the old slot content comes back, the slot now holds
//!    the new content, every other slot is untouched
//! 2. **Atomic rejection**: an out-of-range index changes nothing and hands
//!    the argument back
//! 3. **Length preservation**: neither primitive changes the length
//! 4. **Pointwise set**: `set` changes exactly one element

/// Largest sequence the proofs explore.
pub const MAX_LEN: usize = 4;

// ============================================================================
// PRIMITIVES (mirrors src/lseq.rs and src/seq.rs)
// ============================================================================

/// Slot swap. `Err` carries the rejected value back.
pub fn swap<T>(slots: &mut [Option<T>], index: usize, new: Option<T>) -> Result<Option<T>, Option<T>> {
    if index >= slots.len() {
        return Err(new);
    }
    Ok(std::mem::replace(&mut slots[index], new))
}

/// In-place set returning the replaced element. `Err` carries the value back.
pub fn replace<T>(buf: &mut [T], index: usize, value: T) -> Result<T, T> {
    if index >= buf.len() {
        return Err(value);
    }
    Ok(std::mem::replace(&mut buf[index], value))
}

// ============================================================================
// KANI MODEL CHECKING PROOFS
// ============================================================================

#[cfg(kani)]
mod kani_proofs {
    use super::*;

    fn any_slots() -> ([Option<u8>; MAX_LEN], usize) {
        let len: usize = kani::any_where(|&n| n <= MAX_LEN);
        let mut slots = [None; MAX_LEN];
        for slot in slots.iter_mut() {
            *slot = kani::any();
        }
        (slots, len)
    }

    /// Swap returns exactly the previous content and writes exactly the new.
    #[kani::proof]
    #[kani::unwind(5)]
    fn verify_swap_exact() {
        let (mut slots, len) = any_slots();
        let before = slots;
        let index: usize = kani::any();
        let new: Option<u8> = kani::any();

        match swap(&mut slots[..len], index, new) {
            Ok(old) => {
                kani::assert(index < len, "swap only succeeds in range");
                kani::assert(old == before[index], "old content must come back");
                kani::assert(slots[index] == new, "slot must hold the new content");
                for j in 0..MAX_LEN {
                    if j != index {
                        kani::assert(slots[j] == before[j], "other slots untouched");
                    }
                }
            }
            Err(returned) => {
                kani::assert(index >= len, "swap only fails out of range");
                kani::assert(returned == new, "rejected value must come back");
                kani::assert(slots == before, "rejected swap must not mutate");
            }
        }
    }

    /// Swapping the old content back restores the original slots.
    #[kani::proof]
    #[kani::unwind(5)]
    fn verify_swap_involution() {
        let (mut slots, len) = any_slots();
        let before = slots;
        let index: usize = kani::any_where(|&i| i < len);
        let new: Option<u8> = kani::any();

        let old = swap(&mut slots[..len], index, new);
        kani::assert(old.is_ok(), "in-range swap succeeds");
        if let Ok(old) = old {
            let back = swap(&mut slots[..len], index, old);
            kani::assert(back == Ok(new), "second swap returns what the first wrote");
        }
        kani::assert(slots == before, "double swap restores the slots");
    }

    /// Set changes exactly one element and never the length.
    #[kani::proof]
    #[kani::unwind(5)]
    fn verify_set_pointwise() {
        let len: usize = kani::any_where(|&n| n <= MAX_LEN);
        let mut buf: [u8; MAX_LEN] = kani::any();
        let before = buf;
        let index: usize = kani::any();
        let value: u8 = kani::any();

        let view = &mut buf[..len];
        let result = replace(view, index, value);
        kani::assert(view.len() == len, "length preserved");
        match result {
            Ok(old) => {
                kani::assert(old == before[index], "replaced element comes back");
                for j in 0..len {
                    let expected = if j == index { value } else { before[j] };
                    kani::assert(buf[j] == expected, "pointwise update");
                }
            }
            Err(returned) => {
                kani::assert(index >= len, "set only fails out of range");
                kani::assert(returned == value, "rejected value must come back");
                kani::assert(buf == before, "rejected set must not mutate");
            }
        }
    }
}
