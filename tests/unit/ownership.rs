//! Ownership accounting with non-clonable tracked values.
//!
//! `Tracked` has no `Clone`, so the only way a test could see a value twice
//! is a bug in the crate. The ledger catches the opposite bug: a value
//! dropped somewhere it should have been handed back.

use linear_extern::testing::Ledger;
use linear_extern::{LSeq, LinearSeq, Maybe};

#[test]
fn swap_never_drops_or_duplicates() {
    let ledger = Ledger::new();
    let s = LSeq::alloc_raw(3).unwrap();

    let (s, old) = s.swap_raw(0, Maybe::give(ledger.track(1))).unwrap();
    assert!(old.is_empty());
    let (s, old) = s.swap_raw(0, Maybe::give(ledger.track(2))).unwrap();
    assert_eq!(old.as_ref().map(|t| t.id()), Maybe::Full(1));
    assert_eq!(ledger.dropped(), 0);

    // The displaced value is still ours; dropping it is the first drop.
    drop(old);
    assert_eq!(ledger.dropped(), 1);
    assert_eq!(ledger.live(), 1);

    let (s, taken) = s.take(0).unwrap();
    assert_eq!(taken.id(), 2);
    assert_eq!(ledger.live(), 1);
    drop(taken);
    assert!(s.free().is_ok());
    assert_eq!(ledger.live(), 0);
}

#[test]
fn rejected_swap_returns_the_value() {
    let ledger = Ledger::new();
    let s: LSeq<_> = LSeq::alloc_raw(1).unwrap();
    let rejected = s.swap_raw(5, Maybe::give(ledger.track(7))).unwrap_err();
    assert_eq!(ledger.dropped(), 0);

    let (s, returned) = rejected.into_inner();
    assert_eq!(returned.unwrap().id(), 7);
    assert_eq!(ledger.dropped(), 1);
    s.free_raw();
}

#[test]
fn rejected_give_returns_the_value() {
    let ledger = Ledger::new();
    let s = LSeq::alloc_raw(1).unwrap().give(0, ledger.track(1)).unwrap();
    let (s, value) = s.give(0, ledger.track(2)).unwrap_err().into_inner();
    assert_eq!(value.id(), 2);
    assert_eq!(s.peek(0).unwrap().id(), 1);
    assert_eq!(ledger.dropped(), 0);
    drop(value);
    s.free_raw();
    assert_eq!(ledger.live(), 0);
}

#[test]
fn free_raw_releases_everything_it_holds() {
    let ledger = Ledger::new();
    let mut s = LSeq::alloc_raw(4).unwrap();
    for i in [0, 2, 3] {
        s = s.give(i, ledger.track(i as u32)).unwrap();
    }
    assert_eq!(ledger.live(), 3);
    s.free_raw();
    assert_eq!(ledger.live(), 0);
}

#[test]
fn checked_free_keeps_contents_on_refusal() {
    let ledger = Ledger::new();
    let s = LSeq::alloc_raw(2).unwrap().give(1, ledger.track(9)).unwrap();
    let s = s.free().unwrap_err().into_inner();
    assert_eq!(ledger.dropped(), 0);
    let (s, value) = s.take(1).unwrap();
    assert_eq!(value.id(), 9);
    assert!(s.free().is_ok());
}

#[test]
fn set_replace_hands_back_the_old_element() {
    let ledger = Ledger::new();
    let s = LinearSeq::alloc(2, &linear_extern::FnDefault(|| ledger.track(0))).unwrap();
    assert_eq!(ledger.created(), 2);

    let (s, old) = s.replace(1, ledger.track(5)).unwrap();
    assert_eq!(old.id(), 0);
    assert_eq!(ledger.dropped(), 0);
    drop(old);

    let frozen = s.unleash();
    assert_eq!(frozen.iter().map(|t| t.id()).collect::<Vec<_>>(), vec![0, 5]);
    assert_eq!(ledger.live(), 2);
    drop(frozen);
    assert_eq!(ledger.live(), 0);
}

#[test]
fn maybe_take_leaves_empty_behind() {
    let ledger = Ledger::new();
    let mut slot = Maybe::give(ledger.track(3));
    let taken = slot.take();
    assert!(slot.is_empty());
    assert_eq!(taken.unwrap().id(), 3);
    assert_eq!(ledger.live(), 0);
}
