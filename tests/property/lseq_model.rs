//! Random swap/take/give sequences on an lseq, checked slot by slot against
//! `Vec<Option<T>>`.
//!
//! Verifies that:
//! 1. `swap_raw` returns exactly the previous slot content
//! 2. Only the addressed slot changes; length never changes
//! 3. Out-of-range and wrong-state operations change nothing
//! 4. No tracked value is created or dropped behind the caller's back

use super::common::{lseq_of, model_of};
use linear_extern::testing::Ledger;
use linear_extern::{LSeq, Maybe};
use proptest::prelude::*;

// ============================================================================
// STRATEGIES
// ============================================================================

#[derive(Debug, Clone)]
enum Op {
    Swap(usize, Option<u16>),
    Give(usize, u16),
    Take(usize),
}

fn op_strategy(len: usize) -> impl Strategy<Value = Op> {
    // Indices run one past the end so rejections are exercised too.
    let index = 0..=len;
    prop_oneof![
        (index.clone(), any::<Option<u16>>()).prop_map(|(i, v)| Op::Swap(i, v)),
        (index.clone(), any::<u16>()).prop_map(|(i, v)| Op::Give(i, v)),
        index.prop_map(Op::Take),
    ]
}

fn script_strategy() -> impl Strategy<Value = (usize, Vec<Op>)> {
    (0usize..8).prop_flat_map(|len| (Just(len), prop::collection::vec(op_strategy(len), 0..40)))
}

// ============================================================================
// MODEL PROPERTIES
// ============================================================================

proptest! {
    #[test]
    fn prop_lseq_matches_option_model((len, ops) in script_strategy()) {
        let mut model: Vec<Option<u16>> = vec![None; len];
        let mut s: LSeq<u16> = LSeq::alloc_raw(len).unwrap();

        for op in ops {
            match op {
                Op::Swap(i, v) => match s.swap_raw(i, Maybe::from(v)) {
                    Ok((next, old)) => {
                        prop_assert!(i < len);
                        let expected = std::mem::replace(&mut model[i], v);
                        prop_assert_eq!(old.into_option(), expected);
                        s = next;
                    }
                    Err(rejected) => {
                        prop_assert!(i >= len);
                        let (next, returned) = rejected.into_inner();
                        prop_assert_eq!(returned.into_option(), v);
                        s = next;
                    }
                },
                Op::Give(i, v) => match s.give(i, v) {
                    Ok(next) => {
                        prop_assert!(i < len && model[i].is_none());
                        model[i] = Some(v);
                        s = next;
                    }
                    Err(rejected) => {
                        prop_assert!(i >= len || model[i].is_some());
                        let (next, returned) = rejected.into_inner();
                        prop_assert_eq!(returned, v);
                        s = next;
                    }
                },
                Op::Take(i) => match s.take(i) {
                    Ok((next, value)) => {
                        prop_assert_eq!(model.get_mut(i).and_then(Option::take), Some(value));
                        s = next;
                    }
                    Err(rejected) => {
                        prop_assert!(i >= len || model[i].is_none());
                        s = rejected.into_inner();
                    }
                },
            }
            prop_assert_eq!(s.length_raw(), len);
            let snapshot = model_of(&s);
            prop_assert_eq!(&snapshot, &model);
        }

        prop_assert_eq!(s.full_count(), model.iter().flatten().count());
        s.free_raw();
    }

    #[test]
    fn prop_swap_touches_only_its_slot(
        model in prop::collection::vec(any::<Option<u8>>(), 1..16),
        pick in any::<prop::sample::Index>(),
        v in any::<Option<u8>>(),
    ) {
        let i = pick.index(model.len());
        let s = lseq_of(model.clone());
        let (s, old) = s.swap_raw(i, Maybe::from(v)).unwrap();
        prop_assert_eq!(old.into_option(), model[i]);

        let after = model_of(&s);
        for (j, slot) in after.iter().enumerate() {
            let expected = if j == i { v } else { model[j] };
            prop_assert_eq!(*slot, expected);
        }
        s.free_raw();
    }

    #[test]
    fn prop_swap_conserves_tracked_values(
        len in 1usize..8,
        indices in prop::collection::vec(any::<prop::sample::Index>(), 0..32),
    ) {
        let ledger = Ledger::new();
        let mut s = LSeq::alloc_raw(len).unwrap();
        let mut outside = Vec::new();

        for (n, pick) in indices.into_iter().enumerate() {
            let (next, old) = s.swap_raw(pick.index(len), Maybe::give(ledger.track(n as u32))).unwrap();
            s = next;
            if let Maybe::Full(value) = old {
                outside.push(value);
            }
            // Everything created is either in a slot or in our hands.
            prop_assert_eq!(ledger.dropped(), 0);
            prop_assert_eq!(s.full_count() + outside.len(), ledger.created());
        }

        drop(outside);
        s.free_raw();
        prop_assert_eq!(ledger.live(), 0);
    }
}
