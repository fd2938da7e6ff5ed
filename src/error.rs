//! Error types shared by cursors, terminals and the pairing heap.
//!
//! Every fallible operation in the crate returns [`Result`], whose error is
//! [`LinqError`]. Failures raised by user callbacks (`try_map`, `try_filter`,
//! ...) travel through [`LinqError::Callback`] untouched, so the original
//! `anyhow` chain is still available to the caller.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T, E = LinqError> = std::result::Result<T, E>;

/// Errors raised while enumerating or reducing a sequence.
#[derive(Debug, Error)]
pub enum LinqError {
    /// A terminal that needs at least one element saw none.
    #[error("{op} failed because the sequence is empty")]
    Empty { op: &'static str },

    /// `single` (or `single_where`) saw a second matching element.
    #[error("{op} failed because the sequence has more than one matching element")]
    MoreThanOne { op: &'static str },

    /// `current()` was read before the first successful `advance()`.
    #[error("cursor read before the first successful advance")]
    NotStarted,

    /// `current()` was read after `advance()` returned false.
    #[error("cursor read after the sequence was exhausted")]
    Exhausted,

    /// A single-use sequence was asked for a second cursor.
    #[error("single-use sequence has already been enumerated")]
    AlreadyEnumerated,

    #[error(transparent)]
    Heap(#[from] HeapError),

    /// Error returned by a user-supplied callback.
    #[error(transparent)]
    Callback(#[from] anyhow::Error),
}

impl LinqError {
    pub fn is_empty(&self) -> bool {
        matches!(self, LinqError::Empty { .. } | LinqError::Heap(HeapError::Empty))
    }

    pub fn is_more_than_one(&self) -> bool {
        matches!(self, LinqError::MoreThanOne { .. })
    }
}

/// Structural misuse of a [`PairingHeap`](crate::heap::PairingHeap).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HeapError {
    #[error("cannot extract from an empty heap")]
    Empty,

    #[error("cannot insert active node {0}")]
    NodeActive(usize),

    #[error("cannot remove inactive node {0}")]
    NodeInactive(usize),

    #[error("can only pair two root nodes (got {0} and {1})")]
    NotRoot(usize, usize),

    #[error("node {0} does not belong to this heap")]
    UnknownHandle(usize),

    #[error("decrease_key on node {0} would increase its key")]
    KeyIncreased(usize),
}
