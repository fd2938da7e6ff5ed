//! Assertion functions for sequence outputs.
//!
//! The slice-based helpers compare already materialized results; the `seq`
//! helpers run the sequence themselves and panic with the error if
//! enumeration fails.

use crate::collection::{Elem, Seq};
use crate::error::LinqError;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// Assert that two collections are equal in order and content.
///
/// # Panics
///
/// Panics if the collections differ in length or content.
///
/// # Example
///
/// ```
/// use ironlinq::testing::assert_collections_equal;
///
/// assert_collections_equal(&[1, 2, 3], &[1, 2, 3]);
/// ```
pub fn assert_collections_equal<T: Debug + PartialEq>(actual: &[T], expected: &[T]) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "Collection length mismatch:\n  Expected length: {}\n  Actual length: {}\n  Expected: {expected:?}\n  Actual: {actual:?}",
        expected.len(),
        actual.len()
    );

    for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        assert_eq!(
            a, e,
            "Collection mismatch at index {i}:\n  Expected: {e:?}\n  Actual: {a:?}\n  Full expected: {expected:?}\n  Full actual: {actual:?}"
        );
    }
}

/// Assert that two collections hold the same elements with the same
/// multiplicities, ignoring order.
///
/// # Panics
///
/// Panics if any element occurs a different number of times.
///
/// # Example
///
/// ```
/// use ironlinq::testing::assert_collections_unordered_equal;
///
/// assert_collections_unordered_equal(&[3, 1, 1, 2], &[1, 2, 1, 3]);
/// ```
pub fn assert_collections_unordered_equal<T: Debug + Eq + Hash>(actual: &[T], expected: &[T]) {
    fn tally<T: Eq + Hash>(items: &[T]) -> HashMap<&T, usize> {
        let mut counts = HashMap::new();
        for item in items {
            *counts.entry(item).or_insert(0) += 1;
        }
        counts
    }

    assert_eq!(
        actual.len(),
        expected.len(),
        "Collection length mismatch:\n  Expected length: {}\n  Actual length: {}\n  Expected: {expected:?}\n  Actual: {actual:?}",
        expected.len(),
        actual.len()
    );

    let actual_counts = tally(actual);
    let expected_counts = tally(expected);
    if actual_counts != expected_counts {
        let missing: Vec<_> = expected_counts
            .iter()
            .filter(|(k, n)| actual_counts.get(*k) != Some(*n))
            .map(|(k, _)| *k)
            .collect();
        panic!(
            "Collection content mismatch:\n  Elements with differing counts: {missing:?}\n  Expected: {expected:?}\n  Actual: {actual:?}"
        );
    }
}

/// Assert that two collections of key-value pairs are equal after sorting by
/// key. The sort is stable, so values under equal keys keep their order.
///
/// # Panics
///
/// Panics if the collections differ after sorting by key.
///
/// # Example
///
/// ```
/// use ironlinq::testing::assert_kv_collections_equal;
///
/// assert_kv_collections_equal(vec![("b", 2), ("a", 1)], vec![("a", 1), ("b", 2)]);
/// ```
pub fn assert_kv_collections_equal<K, V>(mut actual: Vec<(K, V)>, mut expected: Vec<(K, V)>)
where
    K: Debug + Ord,
    V: Debug + PartialEq,
{
    actual.sort_by(|a, b| a.0.cmp(&b.0));
    expected.sort_by(|a, b| a.0.cmp(&b.0));

    assert_eq!(
        actual.len(),
        expected.len(),
        "Collection length mismatch:\n  Expected length: {}\n  Actual length: {}\n  Expected: {expected:?}\n  Actual: {actual:?}",
        expected.len(),
        actual.len()
    );

    for (i, ((ak, av), (ek, ev))) in actual.iter().zip(expected.iter()).enumerate() {
        assert!(
            ak == ek && av == ev,
            "Collection mismatch at index {i} after sorting:\n  Expected: ({ek:?}, {ev:?})\n  Actual: ({ak:?}, {av:?})"
        );
    }
}

/// Assert that every element satisfies `predicate`.
///
/// # Panics
///
/// Panics on the first element that does not.
pub fn assert_all<T: Debug>(collection: &[T], predicate: impl Fn(&T) -> bool) {
    for (i, item) in collection.iter().enumerate() {
        assert!(
            predicate(item),
            "Predicate failed for element at index {i}:\n  Element: {item:?}\n  Collection: {collection:?}"
        );
    }
}

/// Assert that at least one element satisfies `predicate`.
///
/// # Panics
///
/// Panics if none does.
pub fn assert_any<T: Debug>(collection: &[T], predicate: impl Fn(&T) -> bool) {
    assert!(
        collection.iter().any(predicate),
        "No element satisfied the predicate:\n  Collection: {collection:?}"
    );
}

/// Assert that no element satisfies `predicate`.
///
/// # Panics
///
/// Panics on the first element that does.
pub fn assert_none<T: Debug>(collection: &[T], predicate: impl Fn(&T) -> bool) {
    if let Some((i, item)) = collection.iter().enumerate().find(|(_, x)| predicate(x)) {
        panic!(
            "Predicate unexpectedly matched element at index {i}:\n  Element: {item:?}\n  Collection: {collection:?}"
        );
    }
}

/// Enumerate `seq` once and compare against `expected` in order.
///
/// # Panics
///
/// Panics if enumeration fails or the output differs.
///
/// # Example
///
/// ```
/// use ironlinq::*;
/// use ironlinq::testing::assert_seq_eq;
///
/// assert_seq_eq(&range(1, 3), &[1, 2, 3]);
/// ```
pub fn assert_seq_eq<T: Elem + Debug + PartialEq>(seq: &Seq<T>, expected: &[T]) {
    match seq.to_vec() {
        Ok(actual) => assert_collections_equal(&actual, expected),
        Err(e) => panic!("Enumerating {seq:?} failed: {e}\n  Expected: {expected:?}"),
    }
}

/// Enumerate `seq` once and compare against `expected`, ignoring order.
///
/// # Panics
///
/// Panics if enumeration fails or the multisets differ.
pub fn assert_seq_unordered_eq<T: Elem + Debug + Eq + Hash>(seq: &Seq<T>, expected: &[T]) {
    match seq.to_vec() {
        Ok(actual) => assert_collections_unordered_equal(&actual, expected),
        Err(e) => panic!("Enumerating {seq:?} failed: {e}\n  Expected: {expected:?}"),
    }
}

/// Enumerate `seq` twice and check that both runs agree.
///
/// # Panics
///
/// Panics if either run fails or the outputs differ.
pub fn assert_reenumerable<T: Elem + Debug + PartialEq>(seq: &Seq<T>) {
    let first = seq.to_vec();
    let second = seq.to_vec();
    match (first, second) {
        (Ok(a), Ok(b)) => assert_eq!(a, b, "Re-enumerating {seq:?} produced different output"),
        (Err(e), _) | (_, Err(e)) => panic!("Enumerating {seq:?} failed: {e}"),
    }
}

/// Assert that enumerating `seq` fails with an error matching `check`.
///
/// # Panics
///
/// Panics if enumeration succeeds or the error does not match.
///
/// # Example
///
/// ```
/// use ironlinq::*;
/// use ironlinq::testing::assert_seq_fails;
///
/// let one_shot = from_iter_once(vec![1, 2]);
/// let _ = one_shot.to_vec();
/// assert_seq_fails(&one_shot, |e| matches!(e, LinqError::AlreadyEnumerated));
/// ```
pub fn assert_seq_fails<T: Elem + Debug>(seq: &Seq<T>, check: impl Fn(&LinqError) -> bool) {
    match seq.to_vec() {
        Ok(v) => panic!("Expected {seq:?} to fail, got {v:?}"),
        Err(e) => assert!(check(&e), "Unexpected error from {seq:?}: {e}"),
    }
}
