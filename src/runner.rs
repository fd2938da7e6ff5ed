//! Interpreter turning [`Node`] descriptions into cursors.

use crate::collection::{Elem, Seq};
use crate::comparer::Comparer;
use crate::config::OrderMode;
use crate::cursor::{BoxCursor, Cached, Cursor, IterCursor, Position};
use crate::error::{LinqError, Result};
use crate::heap::{DrainCursor, PairingHeap};
use crate::node::{Generator, Node, Predicate, Step};
use std::cmp::Ordering;
use std::sync::{Arc, PoisonError};

/// Open a fresh cursor over `node`.
///
/// Every variant is lazy except [`Node::Order`], which drains its source
/// here, and [`Node::Factory`], which runs its one-shot factory here.
pub fn open<T: Elem>(node: &Node<T>) -> Result<BoxCursor<T>> {
    let cursor: BoxCursor<T> = match node {
        Node::Empty => Box::new(IterCursor::new(std::iter::empty::<T>())),
        Node::Once(v) => Box::new(IterCursor::new(std::iter::once(v.clone()))),
        Node::Repeat(v) => Box::new(IterCursor::new(std::iter::repeat(v.clone()))),
        Node::Buffer(data) => Box::new(BufferCursor { data: Arc::clone(data), next: 0, pos: Position::Before }),
        Node::Range(make) => Box::new(IterCursor::new(make())),
        Node::Sequence { start, condition, next } => Box::new(SequenceCursor {
            start: start.clone(),
            condition: Arc::clone(condition),
            next: Arc::clone(next),
            slot: Cached::new(),
        }),
        Node::Generate(f) => Box::new(GenerateCursor { f: Arc::clone(f), slot: Cached::new() }),
        Node::Factory(once) => {
            let make = once.lock().unwrap_or_else(PoisonError::into_inner).take();
            match make {
                Some(make) => {
                    tracing::debug!("opening single-use sequence");
                    make()?
                }
                None => {
                    tracing::warn!("rejected second enumeration of a single-use sequence");
                    return Err(LinqError::AlreadyEnumerated);
                }
            }
        }
        Node::Filter { source, predicate } => Box::new(FilterCursor {
            source: source.cursor()?,
            predicate: Arc::clone(predicate),
            slot: Cached::new(),
        }),
        Node::Take { source, count } => {
            if *count == 0 {
                return open(&Node::Empty);
            }
            Box::new(TakeCursor { source: source.cursor()?, remaining: *count, pos: Position::Before })
        }
        Node::Skip { source, count } => {
            Box::new(SkipCursor { source: source.cursor()?, to_skip: *count, pos: Position::Before })
        }
        Node::TakeWhile { source, predicate } => Box::new(TakeWhileCursor {
            source: source.cursor()?,
            predicate: Arc::clone(predicate),
            slot: Cached::new(),
        }),
        Node::SkipWhile { source, predicate } => Box::new(SkipWhileCursor {
            source: source.cursor()?,
            predicate: Arc::clone(predicate),
            skipping: true,
            slot: Cached::new(),
        }),
        Node::Concat { first, second } => Box::new(ConcatCursor {
            first: first.cursor()?,
            second_seq: second.clone(),
            second: None,
            pos: Position::Before,
        }),
        Node::Order { source, comparer, mode } => open_order(source, comparer, *mode)?,
        Node::Merge { first, second, comparer } => Box::new(MergeCursor {
            a: first.cursor()?,
            b: second.cursor()?,
            head_a: None,
            head_b: None,
            last: None,
            comparer: Arc::clone(comparer),
            pos: Position::Before,
        }),
        Node::Memoize { source } => Box::new(MemoizeCursor { source: source.cursor()?, slot: Cached::new() }),
        Node::Op(op) => op.open()?,
    };
    Ok(cursor)
}

/// Pull the next value out of a cursor, if any.
pub(crate) fn pull<T>(c: &mut BoxCursor<T>) -> Result<Option<T>> {
    if c.advance()? { c.current().map(Some) } else { Ok(None) }
}

/// Drain a sequence into a `Vec`.
pub(crate) fn drain<T: Elem>(seq: &Seq<T>) -> Result<Vec<T>> {
    let mut c = seq.cursor()?;
    let mut out = Vec::new();
    while let Some(v) = pull(&mut c)? {
        out.push(v);
    }
    Ok(out)
}

fn open_order<T: Elem>(source: &Seq<T>, comparer: &Comparer<T>, mode: OrderMode) -> Result<BoxCursor<T>> {
    let mut c = source.cursor()?;
    match mode {
        OrderMode::PairingHeap => {
            let mut heap = PairingHeap::with_comparer(Arc::clone(comparer));
            while let Some(v) = pull(&mut c)? {
                heap.insert(v);
            }
            tracing::debug!(drained = heap.len(), mode = ?mode, "order barrier filled");
            Ok(Box::new(DrainCursor::new(heap)))
        }
        OrderMode::StableSort => {
            let mut buf = Vec::new();
            while let Some(v) = pull(&mut c)? {
                buf.push(v);
            }
            buf.sort_by(|a, b| comparer(a, b));
            tracing::debug!(drained = buf.len(), mode = ?mode, "order barrier filled");
            Ok(Box::new(IterCursor::new(buf)))
        }
    }
}

/* ===================== sources ===================== */

struct BufferCursor<T> {
    data: Arc<Vec<T>>,
    next: usize,
    pos: Position,
}

impl<T: Clone> Cursor<T> for BufferCursor<T> {
    fn advance(&mut self) -> Result<bool> {
        if self.pos.is_after() {
            return Ok(false);
        }
        let moved = self.next < self.data.len();
        if moved {
            self.next += 1;
        }
        Ok(self.pos.settle(moved))
    }

    fn current(&self) -> Result<T> {
        self.pos.ensure_on()?;
        self.data.get(self.next - 1).cloned().ok_or(LinqError::Exhausted)
    }
}

struct SequenceCursor<T> {
    start: T,
    condition: Predicate<T>,
    next: Step<T>,
    slot: Cached<T>,
}

impl<T: Clone> Cursor<T> for SequenceCursor<T> {
    fn advance(&mut self) -> Result<bool> {
        if self.slot.is_after() {
            return Ok(false);
        }
        let value = match self.slot.get() {
            Ok(prev) => (self.next)(&prev),
            Err(_) => self.start.clone(),
        };
        Ok(if (self.condition)(&value) { self.slot.set(value) } else { self.slot.finish() })
    }

    fn current(&self) -> Result<T> {
        self.slot.get()
    }
}

struct GenerateCursor<T> {
    f: Generator<T>,
    slot: Cached<T>,
}

impl<T: Clone> Cursor<T> for GenerateCursor<T> {
    fn advance(&mut self) -> Result<bool> {
        let value = {
            let mut f = self.f.lock().unwrap_or_else(PoisonError::into_inner);
            (&mut *f)()
        };
        Ok(self.slot.set(value))
    }

    fn current(&self) -> Result<T> {
        self.slot.get()
    }
}

/* ===================== stateless operators ===================== */

struct FilterCursor<T> {
    source: BoxCursor<T>,
    predicate: Predicate<T>,
    slot: Cached<T>,
}

impl<T: Clone> Cursor<T> for FilterCursor<T> {
    fn advance(&mut self) -> Result<bool> {
        if self.slot.is_after() {
            return Ok(false);
        }
        while let Some(v) = pull(&mut self.source)? {
            if (self.predicate)(&v) {
                return Ok(self.slot.set(v));
            }
        }
        Ok(self.slot.finish())
    }

    fn current(&self) -> Result<T> {
        self.slot.get()
    }
}

struct TakeCursor<T> {
    source: BoxCursor<T>,
    remaining: usize,
    pos: Position,
}

impl<T> Cursor<T> for TakeCursor<T> {
    fn advance(&mut self) -> Result<bool> {
        if self.remaining == 0 {
            return Ok(self.pos.settle(false));
        }
        self.remaining -= 1;
        let moved = self.source.advance()?;
        if !moved {
            self.remaining = 0;
        }
        Ok(self.pos.settle(moved))
    }

    fn current(&self) -> Result<T> {
        self.pos.ensure_on()?;
        self.source.current()
    }
}

struct SkipCursor<T> {
    source: BoxCursor<T>,
    to_skip: usize,
    pos: Position,
}

impl<T> Cursor<T> for SkipCursor<T> {
    fn advance(&mut self) -> Result<bool> {
        if self.pos.is_after() {
            return Ok(false);
        }
        while self.to_skip > 0 {
            self.to_skip -= 1;
            if !self.source.advance()? {
                self.to_skip = 0;
                return Ok(self.pos.settle(false));
            }
        }
        let moved = self.source.advance()?;
        Ok(self.pos.settle(moved))
    }

    fn current(&self) -> Result<T> {
        self.pos.ensure_on()?;
        self.source.current()
    }
}

struct TakeWhileCursor<T> {
    source: BoxCursor<T>,
    predicate: Predicate<T>,
    slot: Cached<T>,
}

impl<T: Clone> Cursor<T> for TakeWhileCursor<T> {
    fn advance(&mut self) -> Result<bool> {
        if self.slot.is_after() {
            return Ok(false);
        }
        Ok(match pull(&mut self.source)? {
            Some(v) if (self.predicate)(&v) => self.slot.set(v),
            _ => self.slot.finish(),
        })
    }

    fn current(&self) -> Result<T> {
        self.slot.get()
    }
}

struct SkipWhileCursor<T> {
    source: BoxCursor<T>,
    predicate: Predicate<T>,
    skipping: bool,
    slot: Cached<T>,
}

impl<T: Clone> Cursor<T> for SkipWhileCursor<T> {
    fn advance(&mut self) -> Result<bool> {
        if self.slot.is_after() {
            return Ok(false);
        }
        while let Some(v) = pull(&mut self.source)? {
            if self.skipping && (self.predicate)(&v) {
                continue;
            }
            self.skipping = false;
            return Ok(self.slot.set(v));
        }
        Ok(self.slot.finish())
    }

    fn current(&self) -> Result<T> {
        self.slot.get()
    }
}

/* ===================== combining operators ===================== */

struct ConcatCursor<T> {
    first: BoxCursor<T>,
    second_seq: Seq<T>,
    second: Option<BoxCursor<T>>,
    pos: Position,
}

impl<T: Elem> Cursor<T> for ConcatCursor<T> {
    fn advance(&mut self) -> Result<bool> {
        if self.pos.is_after() {
            return Ok(false);
        }
        if self.second.is_none() {
            if self.first.advance()? {
                return Ok(self.pos.settle(true));
            }
            self.second = Some(self.second_seq.cursor()?);
        }
        let moved = match &mut self.second {
            Some(c) => c.advance()?,
            None => false,
        };
        Ok(self.pos.settle(moved))
    }

    fn current(&self) -> Result<T> {
        self.pos.ensure_on()?;
        match &self.second {
            Some(c) => c.current(),
            None => self.first.current(),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Side {
    A,
    B,
}

struct MergeCursor<T> {
    a: BoxCursor<T>,
    b: BoxCursor<T>,
    head_a: Option<T>,
    head_b: Option<T>,
    last: Option<Side>,
    comparer: Comparer<T>,
    pos: Position,
}

impl<T: Clone> Cursor<T> for MergeCursor<T> {
    fn advance(&mut self) -> Result<bool> {
        if self.pos.is_after() {
            return Ok(false);
        }
        match self.last {
            None => {
                self.head_a = pull(&mut self.a)?;
                self.head_b = pull(&mut self.b)?;
            }
            Some(Side::A) => self.head_a = pull(&mut self.a)?,
            Some(Side::B) => self.head_b = pull(&mut self.b)?,
        }
        self.last = match (&self.head_a, &self.head_b) {
            (Some(x), Some(y)) => {
                if (self.comparer)(y, x) == Ordering::Less { Some(Side::B) } else { Some(Side::A) }
            }
            (Some(_), None) => Some(Side::A),
            (None, Some(_)) => Some(Side::B),
            (None, None) => return Ok(self.pos.settle(false)),
        };
        Ok(self.pos.settle(true))
    }

    fn current(&self) -> Result<T> {
        self.pos.ensure_on()?;
        let head = match self.last {
            Some(Side::A) => &self.head_a,
            Some(Side::B) => &self.head_b,
            None => return Err(LinqError::NotStarted),
        };
        head.clone().ok_or(LinqError::Exhausted)
    }
}

struct MemoizeCursor<T> {
    source: BoxCursor<T>,
    slot: Cached<T>,
}

impl<T: Clone> Cursor<T> for MemoizeCursor<T> {
    fn advance(&mut self) -> Result<bool> {
        if self.slot.is_after() {
            return Ok(false);
        }
        Ok(match pull(&mut self.source)? {
            Some(v) => self.slot.set(v),
            None => self.slot.finish(),
        })
    }

    fn current(&self) -> Result<T> {
        self.slot.get()
    }
}
