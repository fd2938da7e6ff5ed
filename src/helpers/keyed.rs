//! Helpers for sequences of key–value pairs.
//!
//! - [`key_by`](Seq::key_by): `T -> (K, T)`
//! - [`map_values`](Seq::map_values): transform `V`, keep `K`
//! - [`filter_values`](Seq::filter_values): keep pairs whose value matches
//! - [`keys`](Seq::keys) / [`values`](Seq::values): project one side
//!
//! ## Example
//! ```
//! use ironlinq::*;
//!
//! let kv = from_vec(vec![("a", 1u32), ("b", 5), ("c", 8)]);
//! let out = kv.map_values(|v| v * 2).filter_values(|v| *v > 5).to_vec()?;
//! assert_eq!(out, vec![("b", 10u32), ("c", 16)]);
//! # anyhow::Result::<()>::Ok(())
//! ```

use crate::collection::{Elem, Seq};

impl<T: Elem> Seq<T> {
    /// Derive a key and produce `(K, T)`.
    pub fn key_by<K, F>(self, key_fn: F) -> Seq<(K, T)>
    where
        K: Elem,
        F: 'static + Send + Sync + Fn(&T) -> K,
    {
        self.map(move |t| (key_fn(t), t.clone()))
    }
}

impl<K: Elem, V: Elem> Seq<(K, V)> {
    pub fn map_values<O, F>(self, f: F) -> Seq<(K, O)>
    where
        O: Elem,
        F: 'static + Send + Sync + Fn(&V) -> O,
    {
        self.map(move |kv: &(K, V)| (kv.0.clone(), f(&kv.1)))
    }

    pub fn filter_values<F>(self, pred: F) -> Seq<(K, V)>
    where
        F: 'static + Send + Sync + Fn(&V) -> bool,
    {
        self.filter(move |kv: &(K, V)| pred(&kv.1))
    }

    pub fn keys(self) -> Seq<K> {
        self.map(|kv: &(K, V)| kv.0.clone())
    }

    pub fn values(self) -> Seq<V> {
        self.map(|kv: &(K, V)| kv.1.clone())
    }
}
