//! Reusable operator bundles.
//!
//! A [`CompositeTransform`] packages a chain of combinators under one name
//! so it can be applied to any sequence with
//! [`apply_composite`](Seq::apply_composite). Plain closures
//! `Fn(Seq<I>) -> Seq<O>` implement the trait too.

use crate::collection::{Elem, Seq};

/// A named chain of combinators from `Seq<I>` to `Seq<O>`.
///
/// `expand` only builds a description; nothing is pulled until a terminal
/// runs on the result.
///
/// # Example: ranking distinct words
/// ```
/// use ironlinq::*;
/// use ironlinq::extensions::CompositeTransform;
///
/// struct DistinctSorted;
///
/// impl CompositeTransform<String, String> for DistinctSorted {
///     fn expand(&self, input: Seq<String>) -> Seq<String> {
///         input
///             .map(|w: &String| w.trim().to_lowercase())
///             .filter(|w: &String| !w.is_empty())
///             .distinct()
///             .order()
///     }
/// }
///
/// let words = from_vec(vec![" Pear".to_string(), "apple".into(), "".into(), "pear".into()]);
/// let out = words.apply_composite(&DistinctSorted).to_vec()?;
/// assert_eq!(out, vec!["apple", "pear"]);
/// # anyhow::Result::<()>::Ok(())
/// ```
///
/// # Example: a closure
/// ```
/// use ironlinq::*;
///
/// let evens_squared = |s: Seq<u32>| s.filter(|x| x % 2 == 0).map(|x: &u32| x * x);
/// assert_eq!(range(1u32, 6).apply_composite(&evens_squared).to_vec()?, vec![4, 16, 36]);
/// # anyhow::Result::<()>::Ok(())
/// ```
pub trait CompositeTransform<I: Elem, O: Elem>: Send + Sync {
    fn expand(&self, input: Seq<I>) -> Seq<O>;
}

impl<I, O, F> CompositeTransform<I, O> for F
where
    I: Elem,
    O: Elem,
    F: Fn(Seq<I>) -> Seq<O> + Send + Sync,
{
    fn expand(&self, input: Seq<I>) -> Seq<O> {
        self(input)
    }
}

impl<T: Elem> Seq<T> {
    /// Apply `transform` to this sequence.
    pub fn apply_composite<O: Elem, CT>(self, transform: &CT) -> Seq<O>
    where
        CT: CompositeTransform<T, O>,
    {
        transform.expand(self)
    }
}

#[cfg(test)]
mod tests {
    use super::CompositeTransform;
    use crate::*;

    struct TopN(usize);

    impl CompositeTransform<i32, i32> for TopN {
        fn expand(&self, input: Seq<i32>) -> Seq<i32> {
            input.order_desc().take(self.0)
        }
    }

    #[test]
    fn composites_chain() -> anyhow::Result<()> {
        let q = from_vec(vec![5, 1, 9, 3, 7])
            .apply_composite(&TopN(3))
            .apply_composite(&|s: Seq<i32>| s.map(|x: &i32| x * 10));
        assert_eq!(q.to_vec()?, vec![90, 70, 50]);
        assert_eq!(q.to_vec()?, vec![90, 70, 50]);
        Ok(())
    }
}
