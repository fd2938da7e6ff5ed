//! Three-way comparers used by ordering, merging and the pairing heap.
//!
//! A [`Comparer`] is a shared closure returning [`Ordering`]. The helpers here
//! build the common ones: natural order, ordering by a derived key, reversed
//! order, lexicographic chains and a total order over floats.

use ordered_float::OrderedFloat;
use std::cmp::Ordering;
use std::sync::Arc;

pub type Comparer<T> = Arc<dyn Fn(&T, &T) -> Ordering + Send + Sync>;

/// Natural ordering of `T`.
pub fn natural<T: Ord + 'static>() -> Comparer<T> {
    Arc::new(|a: &T, b: &T| a.cmp(b))
}

/// Wrap a closure as a [`Comparer`].
pub fn from_fn<T: 'static, F>(f: F) -> Comparer<T>
where
    F: Fn(&T, &T) -> Ordering + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Compare elements by a key derived from each of them.
pub fn by_key<T: 'static, K, F>(key: F) -> Comparer<T>
where
    K: Ord,
    F: Fn(&T) -> K + Send + Sync + 'static,
{
    Arc::new(move |a: &T, b: &T| key(a).cmp(&key(b)))
}

/// Invert another comparer.
pub fn reverse<T: 'static>(inner: Comparer<T>) -> Comparer<T> {
    Arc::new(move |a: &T, b: &T| inner(b, a))
}

/// Try each comparer in turn; the first that does not return `Equal` decides.
///
/// ```
/// use ironlinq::comparer::{by_key, lexicographic};
/// use std::cmp::Ordering;
///
/// let cmp = lexicographic(vec![
///     by_key(|p: &(u32, char)| p.0),
///     by_key(|p: &(u32, char)| p.1),
/// ]);
/// assert_eq!(cmp(&(1, 'b'), &(1, 'a')), Ordering::Greater);
/// assert_eq!(cmp(&(0, 'z'), &(1, 'a')), Ordering::Less);
/// ```
pub fn lexicographic<T: 'static>(chain: Vec<Comparer<T>>) -> Comparer<T> {
    Arc::new(move |a: &T, b: &T| {
        chain
            .iter()
            .map(|c| c(a, b))
            .find(|o| o.is_ne())
            .unwrap_or(Ordering::Equal)
    })
}

/// Total order over `f64` (NaN sorts after every number).
pub fn float_total() -> Comparer<f64> {
    Arc::new(|a: &f64, b: &f64| OrderedFloat(*a).cmp(&OrderedFloat(*b)))
}

/// Total order over an `f64` key derived from each element.
pub fn by_float_key<T: 'static, F>(key: F) -> Comparer<T>
where
    F: Fn(&T) -> f64 + Send + Sync + 'static,
{
    Arc::new(move |a: &T, b: &T| OrderedFloat(key(a)).cmp(&OrderedFloat(key(b))))
}
