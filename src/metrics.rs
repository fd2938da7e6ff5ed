//! Pull accounting for sequences.
//!
//! A [`PullCounter`] is a cheap, cloneable handle over shared atomic
//! counters. Attach it anywhere in a description with
//! [`Seq::observe`]; every cursor opened through that point reports to the
//! same counter, so the numbers survive re-enumeration and cross threads.
//!
//! # Example
//!
//! ```
//! use ironlinq::*;
//! use ironlinq::metrics::PullCounter;
//!
//! let counter = PullCounter::new();
//! let q = from_vec(vec![1, 2, 3, 4, 5]).observe(&counter).take(2);
//! assert_eq!(q.to_vec()?, vec![1, 2]);
//!
//! let stats = counter.snapshot();
//! assert_eq!(stats.cursors, 1);
//! assert_eq!(stats.yielded, 2);
//! # anyhow::Result::<()>::Ok(())
//! ```

use crate::collection::{Elem, Seq};
use crate::cursor::{BoxCursor, Cursor};
use crate::error::Result;
use crate::node::{Describe, DynOp};
use serde::Serialize;
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Default)]
struct Counters {
    cursors: AtomicU64,
    pulls: AtomicU64,
    yielded: AtomicU64,
    reads: AtomicU64,
}

/// Shared counters for cursors opened, `advance` calls, successful advances
/// and `current` reads.
#[derive(Clone, Default)]
pub struct PullCounter {
    label: Option<Arc<str>>,
    inner: Arc<Counters>,
}

/// Point-in-time copy of a [`PullCounter`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PullStats {
    /// Cursors opened.
    pub cursors: u64,
    /// Calls to `advance`, including the final one that returned `false`.
    pub pulls: u64,
    /// Calls to `advance` that returned `true`.
    pub yielded: u64,
    /// Calls to `current`.
    pub reads: u64,
}

impl PullCounter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A counter whose trace events carry `label`.
    #[must_use]
    pub fn named(label: &str) -> Self {
        Self { label: Some(Arc::from(label)), inner: Arc::default() }
    }

    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    #[must_use]
    pub fn snapshot(&self) -> PullStats {
        PullStats {
            cursors: self.inner.cursors.load(Ordering::Relaxed),
            pulls: self.inner.pulls.load(Ordering::Relaxed),
            yielded: self.inner.yielded.load(Ordering::Relaxed),
            reads: self.inner.reads.load(Ordering::Relaxed),
        }
    }

    /// Zero every counter.
    pub fn reset(&self) {
        self.inner.cursors.store(0, Ordering::Relaxed);
        self.inner.pulls.store(0, Ordering::Relaxed);
        self.inner.yielded.store(0, Ordering::Relaxed);
        self.inner.reads.store(0, Ordering::Relaxed);
    }

    /// The current counts as a JSON object, keyed by field name, with the
    /// label included when set.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let stats = self.snapshot();
        let mut obj = json!(stats);
        if let (Some(label), Some(map)) = (self.label(), obj.as_object_mut()) {
            map.insert("label".to_string(), json!(label));
        }
        obj
    }

    /// Print the current counts to stdout.
    pub fn print(&self) {
        let stats = self.snapshot();
        println!("\n=== Pull Counter{} ===", self.label().map_or_else(String::new, |l| format!(" ({l})")));
        println!("  cursors: {}", stats.cursors);
        println!("  pulls:   {}", stats.pulls);
        println!("  yielded: {}", stats.yielded);
        println!("  reads:   {}", stats.reads);
        println!("=====================\n");
    }
}

impl std::fmt::Debug for PullCounter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PullCounter")
            .field("label", &self.label())
            .field("stats", &self.snapshot())
            .finish()
    }
}

struct ObserveOp<T> {
    source: Seq<T>,
    counter: PullCounter,
}

impl<T: Elem> Describe for ObserveOp<T> {
    fn label(&self) -> String {
        match self.counter.label() {
            Some(l) => format!("Observe({l})"),
            None => "Observe".into(),
        }
    }

    fn inputs(&self) -> Vec<&dyn Describe> {
        vec![&self.source as &dyn Describe]
    }

    fn known_len(&self) -> Option<usize> {
        self.source.known_len()
    }

    fn cost_hint(&self) -> u8 {
        1
    }
}

impl<T: Elem> DynOp<T> for ObserveOp<T> {
    fn open(&self) -> Result<BoxCursor<T>> {
        let source = self.source.cursor()?;
        let opened = self.counter.inner.cursors.fetch_add(1, Ordering::Relaxed) + 1;
        tracing::trace!(label = self.counter.label(), opened, "observed cursor opened");
        Ok(Box::new(ObserveCursor { source, counter: self.counter.clone() }))
    }
}

struct ObserveCursor<T> {
    source: BoxCursor<T>,
    counter: PullCounter,
}

impl<T> Cursor<T> for ObserveCursor<T> {
    fn advance(&mut self) -> Result<bool> {
        self.counter.inner.pulls.fetch_add(1, Ordering::Relaxed);
        let moved = self.source.advance()?;
        if moved {
            self.counter.inner.yielded.fetch_add(1, Ordering::Relaxed);
        } else {
            tracing::trace!(label = self.counter.label(), "observed cursor exhausted");
        }
        Ok(moved)
    }

    fn current(&self) -> Result<T> {
        self.counter.inner.reads.fetch_add(1, Ordering::Relaxed);
        self.source.current()
    }
}

impl<T: Elem> Seq<T> {
    /// Count cursors, pulls and reads passing through this point into
    /// `counter`. Elements are forwarded unchanged.
    #[must_use]
    pub fn observe(self, counter: &PullCounter) -> Seq<T> {
        Seq::from_op(ObserveOp { source: self, counter: counter.clone() })
    }
}
