//! Debug utilities for watching elements as they are pulled.
//!
//! These operators forward elements unchanged. They trace through `tracing`
//! at `debug` level, so install a subscriber in the test to see the output.

use crate::collection::{Elem, Seq};
use crate::cursor::{BoxCursor, Cursor};
use crate::error::Result;
use crate::metrics::PullCounter;
use crate::node::{Describe, DynOp};
use std::fmt::Debug;
use std::sync::Arc;

/// Elements past this index are counted but not logged.
const LOG_LIMIT: usize = 10;

struct InspectOp<T, F> {
    label: Arc<str>,
    source: Seq<T>,
    inspector: Arc<F>,
}

impl<T: Elem, F> Describe for InspectOp<T, F> {
    fn label(&self) -> String {
        format!("Inspect({})", self.label)
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

impl<T, F> DynOp<T> for InspectOp<T, F>
where
    T: Elem + Debug,
    F: Fn(&T) + Send + Sync + 'static,
{
    fn open(&self) -> Result<BoxCursor<T>> {
        tracing::debug!(label = %self.label, "inspect: cursor opened");
        Ok(Box::new(InspectCursor {
            label: Arc::clone(&self.label),
            source: self.source.cursor()?,
            inspector: Arc::clone(&self.inspector),
            seen: 0,
        }))
    }
}

struct InspectCursor<T, F> {
    label: Arc<str>,
    source: BoxCursor<T>,
    inspector: Arc<F>,
    seen: usize,
}

impl<T, F> Cursor<T> for InspectCursor<T, F>
where
    T: Debug,
    F: Fn(&T),
{
    fn advance(&mut self) -> Result<bool> {
        if !self.source.advance()? {
            tracing::debug!(label = %self.label, count = self.seen, "inspect: exhausted");
            return Ok(false);
        }
        let item = self.source.current()?;
        (self.inspector)(&item);
        if self.seen < LOG_LIMIT {
            tracing::debug!(label = %self.label, index = self.seen, item = ?item, "inspect");
        }
        self.seen += 1;
        Ok(true)
    }

    fn current(&self) -> Result<T> {
        self.source.current()
    }
}

impl<T: Elem + Debug> Seq<T> {
    /// Call `inspector` on every element as it is pulled and trace the
    /// first few elements under `label`.
    pub fn inspect<F>(self, label: &str, inspector: F) -> Seq<T>
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        Seq::from_op(InspectOp { label: Arc::from(label), source: self, inspector: Arc::new(inspector) })
    }

    /// Trace elements under `label` without a callback.
    pub fn debug_inspect(self, label: &str) -> Seq<T> {
        self.inspect(label, |_| {})
    }
}

/// Attach a fresh [`PullCounter`] to `seq` and return both.
#[must_use]
pub fn spy<T: Elem>(seq: Seq<T>) -> (Seq<T>, PullCounter) {
    let counter = PullCounter::new();
    (seq.observe(&counter), counter)
}
