//! Draining operators: grouping and de-duplication.
//!
//! All of these drain their whole source when a cursor is opened and then
//! yield from a buffer. Output follows first-seen order: groups appear in the
//! order their key was first met, distinct elements in the order of their
//! first occurrence, and elements inside a group keep their source order.

use crate::collection::{Elem, Seq};
use crate::cursor::{BoxCursor, IterCursor};
use crate::error::Result;
use crate::node::{Describe, DynOp};
use crate::runner::drain;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use std::sync::Arc;

type Reshape<I, O> = Arc<dyn Fn(Vec<I>) -> Vec<O> + Send + Sync>;

/// Drain the source, reshape the buffer, yield the result.
struct DrainOp<I, O> {
    name: &'static str,
    source: Seq<I>,
    reshape: Reshape<I, O>,
}

impl<I: Elem, O> Describe for DrainOp<I, O> {
    fn label(&self) -> String {
        self.name.into()
    }

    fn inputs(&self) -> Vec<&dyn Describe> {
        vec![&self.source as &dyn Describe]
    }

    fn is_barrier(&self) -> bool {
        true
    }

    fn cost_hint(&self) -> u8 {
        30
    }
}

impl<I: Elem, O: Elem> DynOp<O> for DrainOp<I, O> {
    fn open(&self) -> Result<BoxCursor<O>> {
        let input = drain(&self.source)?;
        let drained = input.len();
        let out = (self.reshape)(input);
        tracing::debug!(op = self.name, drained, yielded = out.len(), "barrier drained source");
        Ok(Box::new(IterCursor::new(out)))
    }
}

fn drain_op<I: Elem, O: Elem>(
    name: &'static str,
    source: Seq<I>,
    reshape: impl Fn(Vec<I>) -> Vec<O> + Send + Sync + 'static,
) -> Seq<O> {
    Seq::from_op(DrainOp { name, source, reshape: Arc::new(reshape) })
}

/// Bucket `(K, V)` pairs by key, keeping keys in first-seen order.
fn bucket<K: Eq + Hash + Clone, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Vec<(K, Vec<V>)> {
    let mut slots: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, Vec<V>)> = Vec::new();
    for (k, v) in pairs {
        match slots.get(&k) {
            Some(&i) => groups[i].1.push(v),
            None => {
                slots.insert(k.clone(), groups.len());
                groups.push((k, vec![v]));
            }
        }
    }
    groups
}

impl<T: Elem> Seq<T> {
    /// Group elements by `key`, yielding `(key, elements)` pairs where each
    /// group is itself a re-enumerable sequence.
    ///
    /// # Example
    /// ```
    /// use ironlinq::*;
    ///
    /// let groups = from_vec(vec![1, 2, 3, 4, 5])
    ///     .group_by(|x: &i32| x % 2)
    ///     .map(|(k, g): &(i32, Seq<i32>)| (*k, g.to_vec().unwrap()))
    ///     .to_vec()?;
    /// assert_eq!(groups, vec![(1, vec![1, 3, 5]), (0, vec![2, 4])]);
    /// # anyhow::Result::<()>::Ok(())
    /// ```
    pub fn group_by<K, F>(self, key: F) -> Seq<(K, Seq<T>)>
    where
        K: Elem + Eq + Hash,
        F: 'static + Send + Sync + Fn(&T) -> K,
    {
        drain_op("GroupBy", self, move |items: Vec<T>| {
            bucket(items.into_iter().map(|t| (key(&t), t)))
                .into_iter()
                .map(|(k, vs)| (k, crate::from_vec(vs)))
                .collect()
        })
    }

    /// Drop elements whose key was already seen.
    pub fn distinct_by<K, F>(self, key: F) -> Seq<T>
    where
        K: Eq + Hash,
        F: 'static + Send + Sync + Fn(&T) -> K,
    {
        drain_op("Distinct", self, move |items: Vec<T>| {
            let mut seen = HashSet::new();
            items.into_iter().filter(|t| seen.insert(key(t))).collect()
        })
    }
}

impl<T: Elem + Eq + Hash> Seq<T> {
    /// Each distinct element once, in order of first occurrence.
    pub fn distinct(self) -> Seq<T> {
        self.distinct_by(T::clone)
    }
}

impl<K: Elem + Eq + Hash, V: Elem> Seq<(K, V)> {
    /// Group values by key: `(K, V) -> (K, Vec<V>)`.
    pub fn group_by_key(self) -> Seq<(K, Vec<V>)> {
        drain_op("GroupByKey", self, |pairs: Vec<(K, V)>| bucket(pairs))
    }
}
