//! # Ironlinq
//!
//! A **lazy sequence combinator library** for Rust. Ironlinq builds
//! re-enumerable sequence descriptions out of sources, operators and
//! terminals, and drives them with a small pull protocol. It also ships an
//! indexed [`PairingHeap`] that backs ordering.
//!
//! ## Key Features
//!
//! - **Pull-based and lazy** - nothing runs until a terminal opens a cursor,
//!   and each operator pulls only what its consumer asks for
//! - **Re-enumerable** - a [`Seq`] is a description; every terminal opens a
//!   fresh cursor, so the same query can be run again
//! - **Query operators** - map, filter, flat_map, zip, concat, take/skip,
//!   group_by, distinct, order, merge and more
//! - **Terminals** - to_vec, first/last/single, aggregate, count, min/max,
//!   sum/average, and reusable [`CombineFn`] reductions
//! - **Pairing heap** - handle-addressed min-heap with removal of arbitrary
//!   nodes and key decrease
//! - **Introspection** - [`explain`](Seq::explain) a query, count pulls with
//!   [`PullCounter`](metrics::PullCounter)
//!
//! ## Quick Start
//!
//! ```
//! use ironlinq::*;
//!
//! # fn main() -> anyhow::Result<()> {
//! let words = from_vec(vec!["pear", "fig", "apple", "kiwi", "fig"]);
//!
//! let short = words
//!     .clone()
//!     .filter(|w| w.len() <= 4)
//!     .distinct()
//!     .order();
//! assert_eq!(short.to_vec()?, vec!["fig", "kiwi", "pear"]);
//!
//! let lengths = words.map(|w: &&str| w.len()).sum()?;
//! assert_eq!(lengths, 19);
//! # Ok(())
//! # }
//! ```
//!
//! ## Core Concepts
//!
//! ### Cursor
//!
//! A [`Cursor<T>`] has two operations: `advance()` moves to the next element
//! and reports whether one exists, `current()` reads it. Reading before the
//! first advance fails with [`LinqError::NotStarted`]; reading after the end
//! fails with [`LinqError::Exhausted`]. Cursors stay exhausted once they
//! report the end.
//!
//! ### Seq
//!
//! A [`Seq<T>`] is an immutable, cheaply cloneable description. Combinators
//! consume `self` and return a new `Seq`; terminals borrow `&self`.
//! Sources built from one-shot inputs ([`from_iter_once`], [`factory`]) can be
//! enumerated only once.
//!
//! ### Barriers
//!
//! [`order`](Seq::order), [`group_by`](Seq::group_by) and
//! [`distinct`](Seq::distinct) must see their whole input before yielding
//! the first element. They drain the source when their cursor is opened.
//! Ordering fills a [`PairingHeap`] by default; pick
//! [`OrderMode::StableSort`] for a stable order.
//!
//! ### Combiners
//!
//! The [`combiners`] module provides reusable reductions: [`Count`], [`Sum`],
//! [`Min`], [`Max`], [`AverageF64`] and [`TopK`]. Implement [`CombineFn`] for
//! your own.
//!
//! ## Examples
//!
//! ### Lazy infinite sources
//! ```
//! use ironlinq::*;
//!
//! let squares = iota(1u64).map(|x: &u64| x * x).take_while(|x| *x < 50);
//! assert_eq!(squares.to_vec().unwrap(), vec![1, 4, 9, 16, 25, 36, 49]);
//! ```
//!
//! ### Group and aggregate
//! ```
//! use ironlinq::*;
//!
//! let sales = from_vec(vec![("a", 100u64), ("b", 200), ("a", 150)]);
//! let totals = sales.combine_values(Sum::<u64>::default()).to_vec().unwrap();
//! assert_eq!(totals, vec![("a", 250), ("b", 200)]);
//! ```
//!
//! ### Heap
//! ```
//! use ironlinq::PairingHeap;
//!
//! let mut heap = PairingHeap::new();
//! let a = heap.insert(5);
//! let b = heap.insert(3);
//! heap.insert(8);
//! heap.remove(b).unwrap();
//! assert_eq!(heap.peek(), Some(&5));
//! assert_eq!(heap.extract_min().unwrap(), a);
//! ```

pub mod collection;
pub mod combiners;
pub mod comparer;
pub mod config;
pub mod cursor;
pub mod error;
pub mod extensions;
pub mod heap;
pub mod metrics;
pub mod node;
pub mod planner;
pub mod runner;
pub mod testing;
mod helpers;

pub use collection::{Elem, Seq};
pub use combiners::{AverageF64, CombineFn, Count, Max, Min, Sum, TopK};
pub use comparer::Comparer;
pub use config::OrderMode;
pub use cursor::{BoxCursor, Cursor, IterCursor, SeqIter};
pub use error::{HeapError, LinqError, Result};
pub use heap::{HandleMap, NodeHandle, PairingHeap};
pub use helpers::*;
pub use node::{Describe, DynOp, Node};
