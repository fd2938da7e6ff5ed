//! Reusable reductions for [`Seq::combine`](crate::Seq::combine) and
//! [`Seq::combine_values`](crate::Seq::combine_values).
//!
//! - [`Count`] -- number of elements.
//! - [`Sum<T>`] -- sum of values.
//! - [`Min<T>`] / [`Max<T>`] -- extreme value; errors on empty input.
//! - [`AverageF64`] -- mean as `f64`; errors on empty input.
//! - [`TopK<T>`] -- the `k` largest values, descending.
//!
//! You can also implement custom combiners via the [`CombineFn`] trait.
//!
//! # Example
//! ```
//! use ironlinq::*;
//! use ironlinq::combiners::{AverageF64, Sum, TopK};
//!
//! let s = from_vec(vec![4u32, 1, 7]);
//! assert_eq!(s.combine(Sum::<u32>::new())?, 12);
//! assert_eq!(s.combine(AverageF64)?, 4.0);
//! assert_eq!(s.combine(TopK::new(2))?, vec![7, 4]);
//! # anyhow::Result::<()>::Ok(())
//! ```

use crate::error::Result;

mod basic;
mod statistical;
mod topk;

pub use basic::{Max, Min, Sum};
pub use statistical::AverageF64;
pub use topk::TopK;

/// A fold split into its accumulator lifecycle.
///
/// - `create` makes an empty accumulator `A`
/// - `add_input` folds one value in
/// - `finish` turns the accumulator into the output `O`, failing if the
///   reduction has no answer (e.g. the minimum of nothing)
pub trait CombineFn<V, A, O>: Send + Sync + 'static {
    fn create(&self) -> A;
    fn add_input(&self, acc: &mut A, v: V);
    fn finish(&self, acc: A) -> Result<O>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Count;

impl<V> CombineFn<V, u64, u64> for Count {
    fn create(&self) -> u64 {
        0
    }

    fn add_input(&self, acc: &mut u64, _v: V) {
        *acc += 1;
    }

    fn finish(&self, acc: u64) -> Result<u64> {
        Ok(acc)
    }
}
