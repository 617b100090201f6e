//! The u64-indexed extern surface.

use linear_extern::externs::*;
use linear_extern::{ConstDefault, LinearError, Maybe};

#[test]
fn seq_externs_follow_the_reference_scenario() {
    let s = seq_alloc(3, &ConstDefault(0i64)).unwrap();
    assert_eq!(seq_length(&s), 3);
    let s = seq_set(s, 1, 7).unwrap();
    assert_eq!(seq_get(&s, 0), Ok(0));
    assert_eq!(seq_get(&s, 1), Ok(7));
    let frozen = seq_unleash(s);
    assert_eq!(frozen.as_slice(), &[0, 7, 0]);
}

#[test]
fn seq_set_past_usize_returns_ownership() {
    let s = seq_alloc(1, &ConstDefault(String::from("x"))).unwrap();
    let rejected = seq_set(s, u64::MAX, String::from("y")).unwrap_err();
    assert_eq!(
        rejected.error,
        LinearError::IndexOutOfRange {
            index: u64::MAX,
            length: 1
        }
    );
    let (s, value) = rejected.into_inner();
    assert_eq!(value, "y");
    assert_eq!(seq_get(&s, 0).as_deref(), Ok("x"));
    seq_free(s);
}

#[test]
fn lseq_externs_follow_the_reference_scenario() {
    let s = lseq_alloc_raw::<i64>(2).unwrap();
    assert_eq!(lseq_length_raw(&s), 2);
    assert_eq!(lseq_share_raw(&s, 0), Ok(empty()));

    let (s, old) = lseq_swap_raw_fun(s, 0, give(5)).unwrap();
    discard(old);
    let (s, old) = lseq_swap_raw_fun(s, 0, give(9)).unwrap();
    assert_eq!(peek(&old), Ok(5));
    assert_eq!(unwrap(old), Ok(5));
    assert_eq!(lseq_share_raw(&s, 0), Ok(Maybe::Full(9)));
    assert_eq!(lseq_share_raw(&s, 1), Ok(Maybe::Empty));
    lseq_free_raw(s);
}

#[test]
fn lseq_swap_out_of_range_returns_both_arguments() {
    let s = lseq_alloc_raw::<u8>(1).unwrap();
    let (s, new) = lseq_swap_raw_fun(s, 1, give(3)).unwrap_err().into_inner();
    assert_eq!(new, give(3));
    assert_eq!(lseq_share_raw(&s, 0), Ok(empty()));
    lseq_free_raw(s);
}

#[test]
fn share_does_not_consume() {
    let s = lseq_alloc_raw::<u8>(1).unwrap();
    let (s, _) = lseq_swap_raw_fun(s, 0, give(4)).unwrap();
    for _ in 0..3 {
        assert_eq!(lseq_share_raw(&s, 0), Ok(give(4)));
    }
    lseq_free_raw(s);
}
