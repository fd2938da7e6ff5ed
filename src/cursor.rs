//! The pull protocol every sequence is interpreted into.
//!
//! A [`Cursor`] starts positioned before its first element. Each successful
//! [`advance`](Cursor::advance) moves exactly one position forward; once it
//! returns `false` the cursor is exhausted and stays exhausted. Reading
//! [`current`](Cursor::current) outside a successful advance is an error,
//! never stale data.

use crate::collection::{Elem, Seq};
use crate::error::{LinqError, Result};

/// Single-use, stateful traversal over a sequence.
pub trait Cursor<T> {
    /// Move to the next element. Returns `Ok(true)` iff an element is now current.
    fn advance(&mut self) -> Result<bool>;

    /// The element the last successful [`advance`](Cursor::advance) moved onto.
    fn current(&self) -> Result<T>;
}

pub type BoxCursor<T> = Box<dyn Cursor<T>>;

/// Where a cursor stands relative to its elements.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum Position {
    #[default]
    Before,
    On,
    After,
}

impl Position {
    /// Record the outcome of an advance and hand it back.
    pub(crate) fn settle(&mut self, moved: bool) -> bool {
        *self = if moved { Position::On } else { Position::After };
        moved
    }

    pub(crate) fn is_after(self) -> bool {
        self == Position::After
    }

    pub(crate) fn ensure_on(self) -> Result<()> {
        match self {
            Position::On => Ok(()),
            Position::Before => Err(LinqError::NotStarted),
            Position::After => Err(LinqError::Exhausted),
        }
    }
}

/// Holds the value an advance produced, for cursors that must look at an
/// element before deciding to yield it.
#[derive(Debug)]
pub(crate) struct Cached<T> {
    pos: Position,
    value: Option<T>,
}

impl<T: Clone> Cached<T> {
    pub(crate) fn new() -> Self {
        Self { pos: Position::Before, value: None }
    }

    pub(crate) fn set(&mut self, value: T) -> bool {
        self.value = Some(value);
        self.pos.settle(true)
    }

    pub(crate) fn finish(&mut self) -> bool {
        self.value = None;
        self.pos.settle(false)
    }

    pub(crate) fn is_after(&self) -> bool {
        self.pos.is_after()
    }

    pub(crate) fn get(&self) -> Result<T> {
        self.pos.ensure_on()?;
        self.value.clone().ok_or(LinqError::NotStarted)
    }
}

/// Adapts any Rust iterator to the cursor protocol.
pub struct IterCursor<T> {
    iter: Box<dyn Iterator<Item = T>>,
    slot: Cached<T>,
}

impl<T: Clone + 'static> IterCursor<T> {
    pub fn new<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: 'static,
    {
        Self { iter: Box::new(iter.into_iter()), slot: Cached::new() }
    }
}

impl<T: Clone> Cursor<T> for IterCursor<T> {
    fn advance(&mut self) -> Result<bool> {
        if self.slot.is_after() {
            return Ok(false);
        }
        Ok(match self.iter.next() {
            Some(v) => self.slot.set(v),
            None => self.slot.finish(),
        })
    }

    fn current(&self) -> Result<T> {
        self.slot.get()
    }
}

/// Iterator over a sequence, yielding `Result<T>`.
///
/// The cursor is opened on the first call to `next`, so building the
/// iterator performs no work. After an error is yielded the iterator is
/// fused.
pub struct SeqIter<T> {
    seq: Seq<T>,
    cursor: Option<BoxCursor<T>>,
    done: bool,
}

impl<T: Elem> SeqIter<T> {
    pub(crate) fn new(seq: Seq<T>) -> Self {
        Self { seq, cursor: None, done: false }
    }

    fn pull(&mut self) -> Result<Option<T>> {
        if self.cursor.is_none() {
            self.cursor = Some(self.seq.cursor()?);
        }
        let Some(cursor) = self.cursor.as_mut() else {
            return Ok(None);
        };
        if cursor.advance()? {
            cursor.current().map(Some)
        } else {
            Ok(None)
        }
    }
}

impl<T: Elem> Iterator for SeqIter<T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.pull() {
            Ok(Some(v)) => Some(Ok(v)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

impl<T: Elem> IntoIterator for &Seq<T> {
    type Item = Result<T>;
    type IntoIter = SeqIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_reports_protocol_misuse() {
        let mut p = Position::default();
        assert!(matches!(p.ensure_on(), Err(LinqError::NotStarted)));
        assert!(p.settle(true));
        assert!(p.ensure_on().is_ok());
        assert!(!p.settle(false));
        assert!(matches!(p.ensure_on(), Err(LinqError::Exhausted)));
    }

    #[test]
    fn iter_cursor_is_fused() -> anyhow::Result<()> {
        let mut c = IterCursor::new(vec![1, 2]);
        assert!(matches!(c.current(), Err(LinqError::NotStarted)));
        assert!(c.advance()?);
        assert_eq!(c.current()?, 1);
        assert!(c.advance()?);
        assert_eq!(c.current()?, 2);
        assert!(!c.advance()?);
        assert!(!c.advance()?);
        assert!(matches!(c.current(), Err(LinqError::Exhausted)));
        Ok(())
    }
}
