//! Key-based ordering helpers for [`Seq`].
//!
//! - [`Seq::order_by_key`] / [`Seq::order_by_key_desc`]: sort by a derived key.
//! - [`Seq::then_by_key`]: sort by several keys, most significant first.
//! - [`Seq::to_sorted_vec`]: drain and sort in one terminal call.
//! - [`Seq::order_by_pair_key`]: sort `(K, V)` pairs by `K` only.
//!
//! Each key is computed once per element: the element is paired with its key,
//! the pairs are ordered by key, and the key is dropped again. Like
//! [`Seq::order_by`], opening a cursor drains the whole source.

use crate::collection::{Elem, Seq};
use crate::comparer::{self, Comparer};
use crate::error::Result;
use crate::runner::drain;
use std::cmp::Ordering;
use std::sync::Arc;

impl<T: Elem> Seq<T> {
    /// Ascending by `key(element)`.
    ///
    /// # Example
    /// ```
    /// use ironlinq::*;
    ///
    /// let words = from_vec(vec!["pear", "fig", "banana"]);
    /// let by_len = words.order_by_key(|w: &&str| w.len()).to_vec()?;
    /// assert_eq!(by_len, vec!["fig", "pear", "banana"]);
    /// # anyhow::Result::<()>::Ok(())
    /// ```
    pub fn order_by_key<K, F>(self, key: F) -> Seq<T>
    where
        K: Elem + Ord,
        F: 'static + Send + Sync + Fn(&T) -> K,
    {
        self.order_by_key_with(key, comparer::natural())
    }

    /// Descending by `key(element)`.
    pub fn order_by_key_desc<K, F>(self, key: F) -> Seq<T>
    where
        K: Elem + Ord,
        F: 'static + Send + Sync + Fn(&T) -> K,
    {
        self.order_by_key_with(key, comparer::reverse(comparer::natural()))
    }

    /// Order by `key(element)` under an explicit key comparer.
    pub fn order_by_key_with<K, F>(self, key: F, cmp: Comparer<K>) -> Seq<T>
    where
        K: Elem,
        F: 'static + Send + Sync + Fn(&T) -> K,
    {
        let by_first: Comparer<(K, T)> = Arc::new(move |a: &(K, T), b: &(K, T)| cmp(&a.0, &b.0));
        self.map(move |t| (key(t), t.clone()))
            .order_by(by_first)
            .map(|pair: &(K, T)| pair.1.clone())
    }

    /// Order by several keys, most significant first.
    pub fn then_by_key(self, keys: Vec<Comparer<T>>) -> Seq<T> {
        self.order_by(comparer::lexicographic(keys))
    }

    /// Drain the sequence and return its elements sorted by `cmp`.
    pub fn to_sorted_vec_by<F>(&self, cmp: F) -> Result<Vec<T>>
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let mut v = drain(self)?;
        v.sort_by(cmp);
        Ok(v)
    }
}

impl<T: Elem + Ord> Seq<T> {
    /// Drain the sequence and return its elements in ascending order.
    ///
    /// # Example
    /// ```
    /// use ironlinq::*;
    ///
    /// let sorted = from_vec(vec![3, 1, 2]).to_sorted_vec()?;
    /// assert_eq!(sorted, vec![1, 2, 3]);
    /// # anyhow::Result::<()>::Ok(())
    /// ```
    pub fn to_sorted_vec(&self) -> Result<Vec<T>> {
        self.to_sorted_vec_by(Ord::cmp)
    }
}

impl<K: Elem + Ord, V: Elem> Seq<(K, V)> {
    /// Sort `(K, V)` pairs by key only. Values are never compared.
    pub fn order_by_pair_key(self) -> Seq<(K, V)> {
        self.order_by(comparer::by_key(|kv: &(K, V)| kv.0.clone()))
    }
}
