//! Reductions driven by a [`CombineFn`].
//!
//! - [`Seq::combine`] folds a whole sequence into one value (terminal).
//! - [`Seq::combine_values`] folds the values of each key of a `(K, V)`
//!   sequence (lazy; drains its source when a cursor is opened).

use crate::collection::{Elem, Seq};
use crate::combiners::CombineFn;
use crate::error::Result;
use crate::helpers::values::map_fallible;
use crate::runner::pull;
use std::hash::Hash;
use std::sync::Arc;

impl<T: Elem> Seq<T> {
    /// Fold every element with `comb`.
    pub fn combine<C, A, O>(&self, comb: C) -> Result<O>
    where
        C: CombineFn<T, A, O>,
    {
        let mut c = self.cursor()?;
        let mut acc = comb.create();
        while let Some(v) = pull(&mut c)? {
            comb.add_input(&mut acc, v);
        }
        comb.finish(acc)
    }
}

impl<K: Elem + Eq + Hash, V: Elem> Seq<(K, V)> {
    /// Generic combine-by-key. Keys come out in first-seen order.
    ///
    /// ```
    /// use ironlinq::*;
    /// use ironlinq::combiners::Sum;
    ///
    /// let totals = from_vec(vec![("a", 1u64), ("b", 10), ("a", 2)])
    ///     .combine_values(Sum::<u64>::new())
    ///     .to_vec()?;
    /// assert_eq!(totals, vec![("a", 3), ("b", 10)]);
    /// # anyhow::Result::<()>::Ok(())
    /// ```
    pub fn combine_values<C, A, O>(self, comb: C) -> Seq<(K, O)>
    where
        C: CombineFn<V, A, O>,
        O: Elem,
    {
        let comb = Arc::new(comb);
        map_fallible(self.group_by_key(), move |(k, vs): &(K, Vec<V>)| {
            let mut acc = comb.create();
            for v in vs {
                comb.add_input(&mut acc, v.clone());
            }
            Ok((k.clone(), comb.finish(acc)?))
        })
    }
}
