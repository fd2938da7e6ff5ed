//! Element-wise transforms that may change the element type.
//!
//! ## Provided methods
//! - [`map`](Seq::map) / [`try_map`](Seq::try_map) -- apply `&T -> O` to every element
//! - [`map_indexed`](Seq::map_indexed) -- same, with the element's position
//! - [`filter_indexed`](Seq::filter_indexed) -- keep elements by value and position
//! - [`index`](Seq::index) -- pair each element with its position
//! - [`cast`](Seq::cast) / [`try_cast`](Seq::try_cast) -- `From` / `TryFrom` conversions
//! - [`to_inclusive`](Seq::to_inclusive) / [`to_exclusive`](Seq::to_exclusive) -- stop at a bound
//!
//! The selector runs once per `advance()` and its result is cached, so
//! reading `current()` repeatedly never re-runs it. A failing selector
//! surfaces from the `advance()` that ran it.
//!
//! ## Example
//! ```
//! use ironlinq::*;
//!
//! let labels = from_vec(vec!["a", "b", "c"])
//!     .map_indexed(|s: &&str, i| format!("{i}:{s}"))
//!     .to_vec()?;
//! assert_eq!(labels, vec!["0:a", "1:b", "2:c"]);
//! # anyhow::Result::<()>::Ok(())
//! ```

use crate::collection::{Elem, Seq};
use crate::cursor::{BoxCursor, Cached, Cursor};
use crate::error::{LinqError, Result};
use crate::node::{Describe, DynOp};
use crate::runner::pull;
use std::marker::PhantomData;
use std::sync::Arc;

/* ===================== map ===================== */

struct MapOp<I, O, F> {
    source: Seq<I>,
    f: Arc<F>,
    _o: PhantomData<fn() -> O>,
}

impl<I: Elem, O, F> Describe for MapOp<I, O, F> {
    fn label(&self) -> String {
        "Map".into()
    }

    fn inputs(&self) -> Vec<&dyn Describe> {
        vec![&self.source as &dyn Describe]
    }

    fn cost_hint(&self) -> u8 {
        3
    }
}

impl<I, O, F> DynOp<O> for MapOp<I, O, F>
where
    I: Elem,
    O: Elem,
    F: 'static + Send + Sync + Fn(&I) -> Result<O>,
{
    fn open(&self) -> Result<BoxCursor<O>> {
        Ok(Box::new(MapCursor {
            source: self.source.cursor()?,
            f: Arc::clone(&self.f),
            slot: Cached::new(),
        }))
    }
}

struct MapCursor<I, O, F> {
    source: BoxCursor<I>,
    f: Arc<F>,
    slot: Cached<O>,
}

impl<I, O, F> Cursor<O> for MapCursor<I, O, F>
where
    O: Clone,
    F: Fn(&I) -> Result<O>,
{
    fn advance(&mut self) -> Result<bool> {
        if self.slot.is_after() {
            return Ok(false);
        }
        match pull(&mut self.source)? {
            Some(v) => Ok(self.slot.set((self.f)(&v)?)),
            None => Ok(self.slot.finish()),
        }
    }

    fn current(&self) -> Result<O> {
        self.slot.get()
    }
}

pub(crate) fn map_fallible<I, O, F>(source: Seq<I>, f: F) -> Seq<O>
where
    I: Elem,
    O: Elem,
    F: 'static + Send + Sync + Fn(&I) -> Result<O>,
{
    Seq::from_op(MapOp { source, f: Arc::new(f), _o: PhantomData })
}

/* ===================== indexed ===================== */

struct MapIndexedOp<I, O, F> {
    source: Seq<I>,
    f: Arc<F>,
    _o: PhantomData<fn() -> O>,
}

impl<I: Elem, O, F> Describe for MapIndexedOp<I, O, F> {
    fn label(&self) -> String {
        "MapIndexed".into()
    }

    fn inputs(&self) -> Vec<&dyn Describe> {
        vec![&self.source as &dyn Describe]
    }
}

impl<I, O, F> DynOp<O> for MapIndexedOp<I, O, F>
where
    I: Elem,
    O: Elem,
    F: 'static + Send + Sync + Fn(&I, usize) -> O,
{
    fn open(&self) -> Result<BoxCursor<O>> {
        Ok(Box::new(MapIndexedCursor {
            source: self.source.cursor()?,
            f: Arc::clone(&self.f),
            seen: 0,
            slot: Cached::new(),
        }))
    }
}

struct MapIndexedCursor<I, O, F> {
    source: BoxCursor<I>,
    f: Arc<F>,
    seen: usize,
    slot: Cached<O>,
}

impl<I, O, F> Cursor<O> for MapIndexedCursor<I, O, F>
where
    O: Clone,
    F: Fn(&I, usize) -> O,
{
    fn advance(&mut self) -> Result<bool> {
        if self.slot.is_after() {
            return Ok(false);
        }
        match pull(&mut self.source)? {
            Some(v) => {
                let i = self.seen;
                self.seen += 1;
                Ok(self.slot.set((self.f)(&v, i)))
            }
            None => Ok(self.slot.finish()),
        }
    }

    fn current(&self) -> Result<O> {
        self.slot.get()
    }
}

struct FilterIndexedOp<T, P> {
    source: Seq<T>,
    pred: Arc<P>,
}

impl<T: Elem, P> Describe for FilterIndexedOp<T, P> {
    fn label(&self) -> String {
        "FilterIndexed".into()
    }

    fn inputs(&self) -> Vec<&dyn Describe> {
        vec![&self.source as &dyn Describe]
    }
}

impl<T, P> DynOp<T> for FilterIndexedOp<T, P>
where
    T: Elem,
    P: 'static + Send + Sync + Fn(&T, usize) -> Result<bool>,
{
    fn open(&self) -> Result<BoxCursor<T>> {
        Ok(Box::new(FilterIndexedCursor {
            source: self.source.cursor()?,
            pred: Arc::clone(&self.pred),
            seen: 0,
            slot: Cached::new(),
        }))
    }
}

struct FilterIndexedCursor<T, P> {
    source: BoxCursor<T>,
    pred: Arc<P>,
    seen: usize,
    slot: Cached<T>,
}

impl<T, P> Cursor<T> for FilterIndexedCursor<T, P>
where
    T: Clone,
    P: Fn(&T, usize) -> Result<bool>,
{
    fn advance(&mut self) -> Result<bool> {
        if self.slot.is_after() {
            return Ok(false);
        }
        while let Some(v) = pull(&mut self.source)? {
            let i = self.seen;
            self.seen += 1;
            if (self.pred)(&v, i)? {
                return Ok(self.slot.set(v));
            }
        }
        Ok(self.slot.finish())
    }

    fn current(&self) -> Result<T> {
        self.slot.get()
    }
}

impl<T: Elem> Seq<T> {
    /// Transform each element. Pulls exactly one source element per advance.
    #[doc(alias = "select")]
    pub fn map<O, F>(self, f: F) -> Seq<O>
    where
        O: Elem,
        F: 'static + Send + Sync + Fn(&T) -> O,
    {
        map_fallible(self, move |t| Ok(f(t)))
    }

    /// Transform each element with a fallible selector. An `Err` surfaces as
    /// [`LinqError::Callback`] from the `advance()` that ran it.
    pub fn try_map<O, F>(self, f: F) -> Seq<O>
    where
        O: Elem,
        F: 'static + Send + Sync + Fn(&T) -> anyhow::Result<O>,
    {
        map_fallible(self, move |t| f(t).map_err(LinqError::Callback))
    }

    /// Transform each element together with its zero-based position.
    #[doc(alias = "select_indexed")]
    pub fn map_indexed<O, F>(self, f: F) -> Seq<O>
    where
        O: Elem,
        F: 'static + Send + Sync + Fn(&T, usize) -> O,
    {
        Seq::from_op(MapIndexedOp { source: self, f: Arc::new(f), _o: PhantomData })
    }

    /// Keep elements whose value and zero-based source position satisfy `pred`.
    #[doc(alias = "where_indexed")]
    pub fn filter_indexed<P>(self, pred: P) -> Seq<T>
    where
        P: 'static + Send + Sync + Fn(&T, usize) -> bool,
    {
        let pred = move |t: &T, i: usize| -> Result<bool> { Ok(pred(t, i)) };
        Seq::from_op(FilterIndexedOp { source: self, pred: Arc::new(pred) })
    }

    /// [`filter`](Seq::filter) with a fallible predicate.
    pub fn try_filter<P>(self, pred: P) -> Seq<T>
    where
        P: 'static + Send + Sync + Fn(&T) -> anyhow::Result<bool>,
    {
        let pred = move |t: &T, _: usize| -> Result<bool> { pred(t).map_err(LinqError::Callback) };
        Seq::from_op(FilterIndexedOp { source: self, pred: Arc::new(pred) })
    }

    /// Pair every element with its position: `(0, a), (1, b), ...`
    pub fn index(self) -> Seq<(usize, T)> {
        self.map_indexed(|t, i| (i, t.clone()))
    }

    /// Convert every element with `From`.
    pub fn cast<U>(self) -> Seq<U>
    where
        U: Elem + From<T>,
    {
        self.map(|t| U::from(t.clone()))
    }

    /// Convert every element with `TryFrom`; the first failed conversion is
    /// returned as a callback error.
    pub fn try_cast<U>(self) -> Seq<U>
    where
        U: Elem + TryFrom<T>,
        <U as TryFrom<T>>::Error: std::error::Error + Send + Sync + 'static,
    {
        self.try_map(|t| Ok(U::try_from(t.clone())?))
    }
}

impl<T: Elem + PartialOrd> Seq<T> {
    /// Elements up to and including the first one that reaches `end`.
    ///
    /// Stops as soon as an element compares `>= end`, yielding it only if it
    /// equals `end`.
    pub fn to_inclusive(self, end: T) -> Seq<T> {
        self.take_while(move |t| *t <= end)
    }

    /// Elements strictly below `end`, stopping at the first one that is not.
    pub fn to_exclusive(self, end: T) -> Seq<T> {
        self.take_while(move |t| *t < end)
    }
}
