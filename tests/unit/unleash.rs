//! Immutable sequences produced by `unleash`.

use super::common::seq_of;
use linear_extern::ImmutableSequence;

#[test]
fn unleash_captures_the_final_contents() {
    let s = seq_of(&[1, 2, 3]);
    let s = s.set(0, 10).unwrap();
    let frozen = s.unleash();
    assert_eq!(frozen, ImmutableSequence::from(vec![10, 2, 3]));
    assert_eq!(frozen.select(2), Some(&3));
    assert_eq!(frozen.select(3), None);
}

#[test]
fn clones_share_storage() {
    let frozen = seq_of(&["a".to_string(), "b".to_string()]).unleash();
    let copy = frozen.clone();
    assert!(frozen.ptr_eq(&copy));
    assert_eq!(copy.len(), 2);
}

#[test]
fn slicing_operations() {
    let frozen = seq_of(&[1, 2, 3, 4]).unleash();
    assert_eq!(frozen.take(2).as_slice(), &[1, 2]);
    assert_eq!(frozen.drop(3).as_slice(), &[4]);
    assert_eq!(frozen.subsequence(1, 3).as_slice(), &[2, 3]);
    assert_eq!(frozen.subsequence(3, 9).as_slice(), &[4]);
    assert!(frozen.take(2).is_proper_prefix_of(&frozen));
    assert!(frozen.is_prefix_of(&frozen));
    assert!(!frozen.is_proper_prefix_of(&frozen));
    assert!(frozen.contains(&4));

    let joined = frozen.take(1).concatenate(&frozen.drop(3));
    assert_eq!(joined.as_slice(), &[1, 4]);
}

#[test]
fn serializes_as_a_plain_list() {
    let frozen = seq_of(&[0, 7, 0]).unleash();
    assert_eq!(serde_json::to_string(&frozen).unwrap(), "[0,7,0]");
    let back: ImmutableSequence<i32> = serde_json::from_str("[0,7,0]").unwrap();
    assert_eq!(back, frozen);
}
