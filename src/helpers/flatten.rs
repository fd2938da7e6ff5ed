//! Operators that combine several inner or sibling sequences into one:
//! `flat_map` (select-many), `flatten` and `zip`.

use crate::collection::{Elem, Seq};
use crate::cursor::{BoxCursor, Cached, Cursor, Position};
use crate::error::{LinqError, Result};
use crate::node::{Describe, DynOp};
use std::marker::PhantomData;
use std::sync::Arc;

/* ===================== flat_map ===================== */

struct FlatMapOp<I, O, F> {
    source: Seq<I>,
    f: Arc<F>,
    _o: PhantomData<fn() -> O>,
}

impl<I: Elem, O, F> Describe for FlatMapOp<I, O, F> {
    fn label(&self) -> String {
        "FlatMap".into()
    }

    fn inputs(&self) -> Vec<&dyn Describe> {
        vec![&self.source as &dyn Describe]
    }

    fn cost_hint(&self) -> u8 {
        12
    }
}

impl<I, O, F> DynOp<O> for FlatMapOp<I, O, F>
where
    I: Elem,
    O: Elem,
    F: 'static + Send + Sync + Fn(&I) -> Result<Seq<O>>,
{
    fn open(&self) -> Result<BoxCursor<O>> {
        Ok(Box::new(FlatMapCursor {
            outer: self.source.cursor()?,
            inner: None,
            f: Arc::clone(&self.f),
            pos: Position::Before,
        }))
    }
}

struct FlatMapCursor<I, O, F> {
    outer: BoxCursor<I>,
    inner: Option<BoxCursor<O>>,
    f: Arc<F>,
    pos: Position,
}

impl<I, O, F> Cursor<O> for FlatMapCursor<I, O, F>
where
    O: Elem,
    F: Fn(&I) -> Result<Seq<O>>,
{
    fn advance(&mut self) -> Result<bool> {
        if self.pos.is_after() {
            return Ok(false);
        }
        // Loop rather than recurse so runs of empty inner sequences cost no stack.
        loop {
            if let Some(inner) = &mut self.inner {
                if inner.advance()? {
                    return Ok(self.pos.settle(true));
                }
                self.inner = None;
            }
            if !self.outer.advance()? {
                return Ok(self.pos.settle(false));
            }
            let item = self.outer.current()?;
            self.inner = Some((self.f)(&item)?.cursor()?);
        }
    }

    fn current(&self) -> Result<O> {
        self.pos.ensure_on()?;
        self.inner.as_ref().ok_or(LinqError::NotStarted)?.current()
    }
}

/* ===================== zip ===================== */

struct ZipOp<A, B, O, F> {
    first: Seq<A>,
    second: Seq<B>,
    f: Arc<F>,
    _o: PhantomData<fn() -> O>,
}

impl<A: Elem, B: Elem, O, F> Describe for ZipOp<A, B, O, F> {
    fn label(&self) -> String {
        "Zip".into()
    }

    fn inputs(&self) -> Vec<&dyn Describe> {
        vec![&self.first as &dyn Describe, &self.second as &dyn Describe]
    }
}

impl<A, B, O, F> DynOp<O> for ZipOp<A, B, O, F>
where
    A: Elem,
    B: Elem,
    O: Elem,
    F: 'static + Send + Sync + Fn(&A, &B) -> O,
{
    fn open(&self) -> Result<BoxCursor<O>> {
        Ok(Box::new(ZipCursor {
            a: self.first.cursor()?,
            b: self.second.cursor()?,
            f: Arc::clone(&self.f),
            slot: Cached::new(),
        }))
    }
}

struct ZipCursor<A, B, O, F> {
    a: BoxCursor<A>,
    b: BoxCursor<B>,
    f: Arc<F>,
    slot: Cached<O>,
}

impl<A, B, O, F> Cursor<O> for ZipCursor<A, B, O, F>
where
    O: Clone,
    F: Fn(&A, &B) -> O,
{
    fn advance(&mut self) -> Result<bool> {
        if self.slot.is_after() {
            return Ok(false);
        }
        // `b` is left untouched once `a` runs out.
        if !(self.a.advance()? && self.b.advance()?) {
            return Ok(self.slot.finish());
        }
        let value = (self.f)(&self.a.current()?, &self.b.current()?);
        Ok(self.slot.set(value))
    }

    fn current(&self) -> Result<O> {
        self.slot.get()
    }
}

impl<T: Elem> Seq<T> {
    /// Map every element to a sequence and concatenate the results.
    ///
    /// ```
    /// use ironlinq::*;
    ///
    /// let out = from_vec(vec![1, 2]).flat_map(|x: &i32| range(0, *x as usize)).to_vec()?;
    /// assert_eq!(out, vec![0, 0, 1]);
    /// # anyhow::Result::<()>::Ok(())
    /// ```
    #[doc(alias = "select_many")]
    #[doc(alias = "bind")]
    pub fn flat_map<O, F>(self, f: F) -> Seq<O>
    where
        O: Elem,
        F: 'static + Send + Sync + Fn(&T) -> Seq<O>,
    {
        let f = move |t: &T| -> Result<Seq<O>> { Ok(f(t)) };
        Seq::from_op(FlatMapOp { source: self, f: Arc::new(f), _o: PhantomData })
    }

    /// [`flat_map`](Seq::flat_map) with a fallible selector.
    pub fn try_flat_map<O, F>(self, f: F) -> Seq<O>
    where
        O: Elem,
        F: 'static + Send + Sync + Fn(&T) -> anyhow::Result<Seq<O>>,
    {
        let f = move |t: &T| -> Result<Seq<O>> { f(t).map_err(LinqError::Callback) };
        Seq::from_op(FlatMapOp { source: self, f: Arc::new(f), _o: PhantomData })
    }

    /// Walk `self` and `other` in lockstep, combining elements pairwise.
    /// Stops at the end of the shorter input.
    pub fn zip<U, O, F>(self, other: Seq<U>, f: F) -> Seq<O>
    where
        U: Elem,
        O: Elem,
        F: 'static + Send + Sync + Fn(&T, &U) -> O,
    {
        Seq::from_op(ZipOp { first: self, second: other, f: Arc::new(f), _o: PhantomData })
    }

    pub fn zip_pairs<U: Elem>(self, other: Seq<U>) -> Seq<(T, U)> {
        self.zip(other, |a, b| (a.clone(), b.clone()))
    }
}

impl<T: Elem> Seq<Seq<T>> {
    /// Concatenate a sequence of sequences.
    #[doc(alias = "concat_all")]
    pub fn flatten(self) -> Seq<T> {
        self.flat_map(Seq::clone)
    }
}
