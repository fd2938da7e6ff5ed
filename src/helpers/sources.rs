//! Leaf constructors: every sequence graph starts with one of these.

use crate::collection::{Elem, Seq};
use crate::cursor::{BoxCursor, IterCursor};
use crate::error::Result;
use crate::node::Node;
use std::ops::Add;
use std::sync::{Arc, Mutex};

/// A sequence with no elements.
pub fn empty<T: Elem>() -> Seq<T> {
    Seq::from_node(Node::Empty)
}

/// A sequence holding exactly `value`.
#[doc(alias = "return_")]
pub fn once<T: Elem>(value: T) -> Seq<T> {
    Seq::from_node(Node::Once(value))
}

/// `value`, forever.
pub fn repeat<T: Elem>(value: T) -> Seq<T> {
    Seq::from_node(Node::Repeat(value))
}

/// Own `data` and enumerate it in order. Re-enumeration shares the buffer.
pub fn from_vec<T: Elem>(data: Vec<T>) -> Seq<T> {
    Seq::from_node(Node::Buffer(Arc::new(data)))
}

pub fn from_slice<T: Elem>(data: &[T]) -> Seq<T> {
    from_vec(data.to_vec())
}

/// Adapt a re-iterable container or range. Each cursor iterates a fresh
/// clone of `range`.
///
/// ```
/// use ironlinq::from_range;
///
/// let evens = from_range(0..10).filter(|x: &i32| x % 2 == 0);
/// assert_eq!(evens.to_vec().unwrap(), vec![0, 2, 4, 6, 8]);
/// ```
pub fn from_range<T, R>(range: R) -> Seq<T>
where
    T: Elem,
    R: IntoIterator<Item = T> + Clone + Send + Sync + 'static,
    R::IntoIter: 'static,
{
    Seq::from_node(Node::Range(Arc::new(move || {
        Box::new(range.clone().into_iter()) as Box<dyn Iterator<Item = T>>
    })))
}

/// Wrap an iterator that can only be walked once. A second cursor request
/// fails with [`LinqError::AlreadyEnumerated`](crate::LinqError::AlreadyEnumerated).
pub fn from_iter_once<T, I>(iter: I) -> Seq<T>
where
    T: Elem,
    I: IntoIterator<Item = T>,
    I::IntoIter: Send + 'static,
{
    let iter = iter.into_iter();
    factory_cursor(move || Ok(Box::new(IterCursor::new(iter)) as BoxCursor<T>))
}

/// Defer building a sequence until the first cursor request, for one-shot
/// resources such as an open file. `make` runs at most once; enumerating
/// the result a second time is an error.
pub fn factory<T, F>(make: F) -> Seq<T>
where
    T: Elem,
    F: FnOnce() -> Seq<T> + Send + 'static,
{
    factory_cursor(move || make().cursor())
}

/// Like [`factory`], but `make` hands back the cursor directly.
pub fn factory_cursor<T, F>(make: F) -> Seq<T>
where
    T: Elem,
    F: FnOnce() -> Result<BoxCursor<T>> + Send + 'static,
{
    let make: Box<dyn FnOnce() -> Result<BoxCursor<T>> + Send> = Box::new(make);
    Seq::from_node(Node::Factory(Mutex::new(Some(make))))
}

/// `start`, `next(start)`, `next(next(start))`, ... for as long as
/// `condition` holds.
///
/// ```
/// use ironlinq::sequence;
///
/// let powers = sequence(1u32, |x| *x < 100, |x| x * 3);
/// assert_eq!(powers.to_vec().unwrap(), vec![1, 3, 9, 27, 81]);
/// ```
pub fn sequence<T, C, N>(start: T, condition: C, next: N) -> Seq<T>
where
    T: Elem,
    C: Fn(&T) -> bool + Send + Sync + 'static,
    N: Fn(&T) -> T + Send + Sync + 'static,
{
    Seq::from_node(Node::Sequence { start, condition: Arc::new(condition), next: Arc::new(next) })
}

/// Infinite [`sequence`].
pub fn unfold<T, N>(start: T, next: N) -> Seq<T>
where
    T: Elem,
    N: Fn(&T) -> T + Send + Sync + 'static,
{
    sequence(start, |_| true, next)
}

/// `start, start + 1, start + 2, ...` without end.
pub fn iota<T>(start: T) -> Seq<T>
where
    T: Elem + Add<Output = T> + From<u8>,
{
    unfold(start, |x| x.clone() + T::from(1))
}

/// `count` consecutive values beginning at `start`.
pub fn range<T>(start: T, count: usize) -> Seq<T>
where
    T: Elem + Add<Output = T> + From<u8>,
{
    iota(start).take(count)
}

/// Call `f` on every pull. The generator is shared by every cursor of the
/// returned sequence, so its side effects are observed across
/// enumerations.
pub fn generate<T, F>(f: F) -> Seq<T>
where
    T: Elem,
    F: FnMut() -> T + Send + 'static,
{
    Seq::from_node(Node::Generate(Arc::new(Mutex::new(f))))
}

/// Concatenate every sequence in `parts`, in order.
pub fn concat_all<T: Elem>(parts: Vec<Seq<T>>) -> Seq<T> {
    from_vec(parts).flatten()
}
