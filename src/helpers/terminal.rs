//! Terminal consumers.
//!
//! Each terminal opens exactly one cursor and drives it, either to exhaustion
//! or until the answer is known (`any`, `all`, `first`, ...). Terminals that
//! need at least one element return [`LinqError::Empty`] instead of inventing
//! a default; `single` reports a second match as [`LinqError::MoreThanOne`].

use crate::collection::{Elem, Seq};
use crate::combiners::{AverageF64, Max, Min, Sum};
use crate::error::{LinqError, Result};
use crate::runner::{drain, pull};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt::{self, Display, Write};
use std::hash::Hash;
use std::ops::Add;

impl<T: Elem> Seq<T> {
    /* ---- materializers ---- */

    /// Drain into a `Vec`, in sequence order.
    #[doc(alias = "to_vector")]
    pub fn to_vec(&self) -> Result<Vec<T>> {
        drain(self)
    }

    /// Key every element with `key`. The first element seen for a key wins.
    pub fn to_map<K, F>(&self, key: F) -> Result<BTreeMap<K, T>>
    where
        K: Ord,
        F: Fn(&T) -> K,
    {
        self.to_map_with(key, T::clone)
    }

    /// Key every element with `key` and store `value(element)`. The first
    /// element seen for a key wins.
    pub fn to_map_with<K, V, FK, FV>(&self, key: FK, value: FV) -> Result<BTreeMap<K, V>>
    where
        K: Ord,
        FK: Fn(&T) -> K,
        FV: Fn(&T) -> V,
    {
        let mut out = BTreeMap::new();
        self.for_each(|t| {
            out.entry(key(&t)).or_insert_with(|| value(&t));
        })?;
        Ok(out)
    }

    /* ---- visitors ---- */

    pub fn for_each<F>(&self, mut f: F) -> Result<()>
    where
        F: FnMut(T),
    {
        let mut c = self.cursor()?;
        while let Some(v) = pull(&mut c)? {
            f(v);
        }
        Ok(())
    }

    pub fn for_each_indexed<F>(&self, mut f: F) -> Result<()>
    where
        F: FnMut(T, usize),
    {
        let mut i = 0;
        self.for_each(|v| {
            f(v, i);
            i += 1;
        })
    }

    /* ---- counting and quantifiers ---- */

    pub fn count(&self) -> Result<usize> {
        let mut c = self.cursor()?;
        let mut n = 0;
        while c.advance()? {
            n += 1;
        }
        Ok(n)
    }

    pub fn count_where<P>(&self, pred: P) -> Result<usize>
    where
        P: Fn(&T) -> bool,
    {
        let mut n = 0;
        self.for_each(|v| {
            if pred(&v) {
                n += 1;
            }
        })?;
        Ok(n)
    }

    /// Whether the sequence has at least one element. Pulls at most once.
    pub fn any(&self) -> Result<bool> {
        self.cursor()?.advance()
    }

    /// Whether some element matches. Stops at the first match.
    pub fn any_where<P>(&self, pred: P) -> Result<bool>
    where
        P: Fn(&T) -> bool,
    {
        let mut c = self.cursor()?;
        while let Some(v) = pull(&mut c)? {
            if pred(&v) {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Whether every element matches. Stops at the first mismatch; `true`
    /// for an empty sequence.
    pub fn all<P>(&self, pred: P) -> Result<bool>
    where
        P: Fn(&T) -> bool,
    {
        Ok(!self.any_where(|v| !pred(v))?)
    }

    /* ---- element access ---- */

    pub fn first(&self) -> Result<T> {
        let mut c = self.cursor()?;
        pull(&mut c)?.ok_or(LinqError::Empty { op: "first" })
    }

    pub fn first_where<P>(&self, pred: P) -> Result<T>
    where
        P: Fn(&T) -> bool,
    {
        let mut c = self.cursor()?;
        while let Some(v) = pull(&mut c)? {
            if pred(&v) {
                return Ok(v);
            }
        }
        Err(LinqError::Empty { op: "first_where" })
    }

    pub fn last(&self) -> Result<T> {
        self.last_matching(|_| true, "last")
    }

    pub fn last_where<P>(&self, pred: P) -> Result<T>
    where
        P: Fn(&T) -> bool,
    {
        self.last_matching(pred, "last_where")
    }

    fn last_matching<P>(&self, pred: P, op: &'static str) -> Result<T>
    where
        P: Fn(&T) -> bool,
    {
        let mut last = None;
        self.for_each(|v| {
            if pred(&v) {
                last = Some(v);
            }
        })?;
        last.ok_or(LinqError::Empty { op })
    }

    /// The only element. Fails on an empty sequence and, distinctly, on a
    /// second element.
    pub fn single(&self) -> Result<T> {
        self.single_matching(|_| true, "single")
    }

    pub fn single_where<P>(&self, pred: P) -> Result<T>
    where
        P: Fn(&T) -> bool,
    {
        self.single_matching(pred, "single_where")
    }

    fn single_matching<P>(&self, pred: P, op: &'static str) -> Result<T>
    where
        P: Fn(&T) -> bool,
    {
        let mut c = self.cursor()?;
        let mut found = None;
        while let Some(v) = pull(&mut c)? {
            if pred(&v) {
                if found.is_some() {
                    return Err(LinqError::MoreThanOne { op });
                }
                found = Some(v);
            }
        }
        found.ok_or(LinqError::Empty { op })
    }

    /* ---- folds ---- */

    /// Fold without a seed: the first element starts the accumulator.
    /// Fails on an empty sequence.
    #[doc(alias = "reduce")]
    pub fn aggregate<F>(&self, f: F) -> Result<T>
    where
        F: Fn(T, T) -> T,
    {
        let mut c = self.cursor()?;
        let mut acc = pull(&mut c)?.ok_or(LinqError::Empty { op: "aggregate" })?;
        while let Some(v) = pull(&mut c)? {
            acc = f(acc, v);
        }
        Ok(acc)
    }

    /// Fold starting from `seed`.
    pub fn fold<A, F>(&self, seed: A, f: F) -> Result<A>
    where
        F: Fn(A, T) -> A,
    {
        let mut c = self.cursor()?;
        let mut acc = seed;
        while let Some(v) = pull(&mut c)? {
            acc = f(acc, v);
        }
        Ok(acc)
    }

    /// Mean of `f(element)`. Fails on an empty sequence.
    #[allow(clippy::cast_precision_loss)]
    pub fn average_by<F>(&self, f: F) -> Result<f64>
    where
        F: Fn(&T) -> f64,
    {
        let (sum, n) = self.fold((0.0, 0u64), |(s, n), v| (s + f(&v), n + 1))?;
        if n == 0 {
            return Err(LinqError::Empty { op: "average" });
        }
        Ok(sum / n as f64)
    }

    /* ---- extremes ---- */

    /// Smallest element under `cmp`; the first of equal minima wins.
    pub fn min_by<F>(&self, cmp: F) -> Result<T>
    where
        F: Fn(&T, &T) -> Ordering,
    {
        self.extreme(cmp, Ordering::Less, "min_by")
    }

    /// Largest element under `cmp`; the first of equal maxima wins.
    pub fn max_by<F>(&self, cmp: F) -> Result<T>
    where
        F: Fn(&T, &T) -> Ordering,
    {
        self.extreme(cmp, Ordering::Greater, "max_by")
    }

    pub fn min_by_key<K, F>(&self, key: F) -> Result<T>
    where
        K: Ord,
        F: Fn(&T) -> K,
    {
        self.min_by(|a, b| key(a).cmp(&key(b)))
    }

    pub fn max_by_key<K, F>(&self, key: F) -> Result<T>
    where
        K: Ord,
        F: Fn(&T) -> K,
    {
        self.max_by(|a, b| key(a).cmp(&key(b)))
    }

    /// Smallest and largest element in one pass.
    pub fn minmax_by<F>(&self, cmp: F) -> Result<(T, T)>
    where
        F: Fn(&T, &T) -> Ordering,
    {
        let mut c = self.cursor()?;
        let first = pull(&mut c)?.ok_or(LinqError::Empty { op: "minmax" })?;
        let (mut lo, mut hi) = (first.clone(), first);
        while let Some(v) = pull(&mut c)? {
            if cmp(&v, &lo) == Ordering::Less {
                lo = v;
            } else if cmp(&v, &hi) == Ordering::Greater {
                hi = v;
            }
        }
        Ok((lo, hi))
    }

    /// Position of the element with the smallest key; the first wins ties.
    pub fn index_of_min_by_key<K, F>(&self, key: F) -> Result<usize>
    where
        K: Ord,
        F: Fn(&T) -> K,
    {
        self.extreme_index(key, Ordering::Less, "index_of_min")
    }

    /// Position of the element with the largest key; the first wins ties.
    pub fn index_of_max_by_key<K, F>(&self, key: F) -> Result<usize>
    where
        K: Ord,
        F: Fn(&T) -> K,
    {
        self.extreme_index(key, Ordering::Greater, "index_of_max")
    }

    fn extreme<F>(&self, cmp: F, want: Ordering, op: &'static str) -> Result<T>
    where
        F: Fn(&T, &T) -> Ordering,
    {
        let mut c = self.cursor()?;
        let mut best = pull(&mut c)?.ok_or(LinqError::Empty { op })?;
        while let Some(v) = pull(&mut c)? {
            if cmp(&v, &best) == want {
                best = v;
            }
        }
        Ok(best)
    }

    fn extreme_index<K, F>(&self, key: F, want: Ordering, op: &'static str) -> Result<usize>
    where
        K: Ord,
        F: Fn(&T) -> K,
    {
        let mut c = self.cursor()?;
        let first = pull(&mut c)?.ok_or(LinqError::Empty { op })?;
        let (mut best_index, mut best_key) = (0, key(&first));
        let mut i = 0;
        while let Some(v) = pull(&mut c)? {
            i += 1;
            let k = key(&v);
            if k.cmp(&best_key) == want {
                best_index = i;
                best_key = k;
            }
        }
        Ok(best_index)
    }

    /* ---- strings ---- */

    /// Render every element with `write`, separated by `sep`.
    #[doc(alias = "to_string")]
    pub fn join_with<W>(&self, sep: &str, mut write: W) -> Result<String>
    where
        W: FnMut(&T, &mut String) -> fmt::Result,
    {
        let mut out = String::new();
        let mut first = true;
        let mut failed = false;
        self.for_each(|v| {
            if failed {
                return;
            }
            if !std::mem::take(&mut first) {
                out.push_str(sep);
            }
            failed = write(&v, &mut out).is_err();
        })?;
        if failed {
            return Err(LinqError::Callback(anyhow::anyhow!("element writer failed")));
        }
        Ok(out)
    }
}

impl<T: Elem + Display> Seq<T> {
    /// `Display` every element, separated by `sep`.
    pub fn join(&self, sep: &str) -> Result<String> {
        self.join_with(sep, |v, out| write!(out, "{v}"))
    }
}

impl<T: Elem + Ord> Seq<T> {
    /// Collect into an ordered set (duplicates collapse).
    pub fn to_set(&self) -> Result<BTreeSet<T>> {
        let mut out = BTreeSet::new();
        self.for_each(|v| {
            out.insert(v);
        })?;
        Ok(out)
    }

    pub fn min(&self) -> Result<T> {
        self.combine(Min::new())
    }

    pub fn max(&self) -> Result<T> {
        self.combine(Max::new())
    }

    pub fn minmax(&self) -> Result<(T, T)> {
        self.minmax_by(T::cmp)
    }

    pub fn index_of_min(&self) -> Result<usize> {
        self.index_of_min_by_key(T::clone)
    }

    pub fn index_of_max(&self) -> Result<usize> {
        self.index_of_max_by_key(T::clone)
    }
}

impl<T: Elem + Eq + Hash> Seq<T> {
    pub fn to_hash_set(&self) -> Result<HashSet<T>> {
        let mut out = HashSet::new();
        self.for_each(|v| {
            out.insert(v);
        })?;
        Ok(out)
    }
}

impl<T: Elem + Add<Output = T> + Default> Seq<T> {
    /// Sum of all elements; `T::default()` for an empty sequence.
    pub fn sum(&self) -> Result<T> {
        self.combine(Sum::new())
    }
}

impl<T: Elem + Into<f64>> Seq<T> {
    /// Mean as `f64`. Fails on an empty sequence.
    ///
    /// Only types with a lossless `Into<f64>` qualify. For `i64`, `u64` or
    /// `usize` elements use [`average_by`](Seq::average_by):
    ///
    /// ```
    /// use ironlinq::*;
    ///
    /// let sizes = from_vec(vec![10u64, 20, 60]);
    /// assert_eq!(sizes.average_by(|n| *n as f64)?, 30.0);
    /// # anyhow::Result::<()>::Ok(())
    /// ```
    pub fn average(&self) -> Result<f64> {
        self.combine(AverageF64)
    }
}

impl<K: Elem + Ord, V: Elem> Seq<(K, V)> {
    /// Collect pairs into a map; the first value seen for a key wins.
    pub fn to_map_pairs(&self) -> Result<BTreeMap<K, V>> {
        self.to_map_with(|kv| kv.0.clone(), |kv| kv.1.clone())
    }
}
