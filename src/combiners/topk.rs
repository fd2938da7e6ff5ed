//! Top-K combiner for selecting the largest values

use super::CombineFn;
use crate::error::Result;
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::marker::PhantomData;

/* ===================== TopK<T> ===================== */

/// The largest **K** values (requires `Ord`).
///
/// The accumulator is a min-heap of at most `k` elements, so memory stays
/// bounded by `k` however long the input is.
///
/// - Accumulator: `BinaryHeap<Reverse<T>>`
/// - Output: `Vec<T>` sorted descending.
///
/// `k == 0` always produces an empty vector.
#[derive(Clone, Debug)]
pub struct TopK<T> {
    /// Number of largest elements to keep.
    pub k: usize,
    _m: PhantomData<fn() -> T>,
}
impl<T> TopK<T> {
    /// Create a new `TopK` with the given `k`.
    #[must_use]
    pub const fn new(k: usize) -> Self {
        Self { k, _m: PhantomData }
    }
}

impl<T> CombineFn<T, BinaryHeap<Reverse<T>>, Vec<T>> for TopK<T>
where
    T: 'static + Send + Sync + Ord,
{
    fn create(&self) -> BinaryHeap<Reverse<T>> {
        BinaryHeap::with_capacity(self.k + 1)
    }

    fn add_input(&self, acc: &mut BinaryHeap<Reverse<T>>, v: T) {
        acc.push(Reverse(v));
        if acc.len() > self.k {
            acc.pop();
        }
    }

    fn finish(&self, acc: BinaryHeap<Reverse<T>>) -> Result<Vec<T>> {
        // Ascending by Reverse means descending by T.
        Ok(acc.into_sorted_vec().into_iter().map(|Reverse(v)| v).collect())
    }
}
