use crate::comparer::{self, Comparer};
use crate::config::OrderMode;
use crate::cursor::{BoxCursor, SeqIter};
use crate::error::Result;
use crate::node::{Describe, DynOp, Node};
use crate::runner;
use std::fmt;
use std::sync::Arc;

/// Bound every element type must satisfy.
///
/// Descriptions are shared behind `Arc` and may be handed to other threads,
/// so elements must be `Send + Sync`; cursors hand out owned values, so they
/// must be `Clone`.
pub trait Elem: 'static + Send + Sync + Clone {}
impl<T> Elem for T where T: 'static + Send + Sync + Clone {}

/// A lazy, re-enumerable sequence description.
///
/// Cloning a `Seq` is cheap and shares the description. Combinators consume
/// `self` and return a new description; terminals borrow `&self`, open one
/// fresh cursor and drive it.
pub struct Seq<T> {
    pub(crate) node: Arc<Node<T>>,
}

impl<T> Clone for Seq<T> {
    fn clone(&self) -> Self {
        Self { node: Arc::clone(&self.node) }
    }
}

impl<T: Elem> Seq<T> {
    pub fn from_node(node: Node<T>) -> Self {
        Self { node: Arc::new(node) }
    }

    /// Wrap a custom operator.
    pub fn from_op<O: DynOp<T> + 'static>(op: O) -> Self {
        Self::from_node(Node::Op(Arc::new(op)))
    }

    pub fn node(&self) -> &Node<T> {
        &self.node
    }

    /// Open a fresh cursor positioned before the first element.
    pub fn cursor(&self) -> Result<BoxCursor<T>> {
        runner::open(&self.node)
    }

    /// Iterate the sequence with Rust's `Iterator`, one `Result` per element.
    pub fn iter(&self) -> SeqIter<T> {
        SeqIter::new(self.clone())
    }

    /* ---- stateless same-type operators ---- */

    /// Keep elements matching `pred`.
    #[doc(alias = "where")]
    pub fn filter<F>(self, pred: F) -> Seq<T>
    where
        F: 'static + Send + Sync + Fn(&T) -> bool,
    {
        Seq::from_node(Node::Filter { source: self, predicate: Arc::new(pred) })
    }

    /// At most the first `count` elements. `take(0)` never pulls the source.
    pub fn take(self, count: usize) -> Seq<T> {
        Seq::from_node(Node::Take { source: self, count })
    }

    /// Everything after the first `count` elements.
    pub fn skip(self, count: usize) -> Seq<T> {
        Seq::from_node(Node::Skip { source: self, count })
    }

    /// Elements up to (not including) the first one failing `pred`.
    pub fn take_while<F>(self, pred: F) -> Seq<T>
    where
        F: 'static + Send + Sync + Fn(&T) -> bool,
    {
        Seq::from_node(Node::TakeWhile { source: self, predicate: Arc::new(pred) })
    }

    /// Elements from the first one failing `pred` onward.
    pub fn skip_while<F>(self, pred: F) -> Seq<T>
    where
        F: 'static + Send + Sync + Fn(&T) -> bool,
    {
        Seq::from_node(Node::SkipWhile { source: self, predicate: Arc::new(pred) })
    }

    /// All of `self`, then all of `other`. `other` is not opened until
    /// `self` is exhausted.
    pub fn concat(self, other: Seq<T>) -> Seq<T> {
        Seq::from_node(Node::Concat { first: self, second: other })
    }

    /// Cache the upstream value on each advance so repeated reads of
    /// `current()` do not re-run upstream work.
    pub fn memoize(self) -> Seq<T> {
        Seq::from_node(Node::Memoize { source: self })
    }

    /* ---- ordering ---- */

    /// Sort by `comparer`. Opening a cursor drains the whole source.
    pub fn order_by(self, comparer: Comparer<T>) -> Seq<T> {
        self.order_with(comparer, OrderMode::default())
    }

    pub fn order_with(self, comparer: Comparer<T>, mode: OrderMode) -> Seq<T> {
        Seq::from_node(Node::Order { source: self, comparer, mode })
    }

    /// Merge two inputs that are each sorted by `comparer`. On ties the
    /// element from `self` comes first.
    pub fn merge_by(self, other: Seq<T>, comparer: Comparer<T>) -> Seq<T> {
        Seq::from_node(Node::Merge { first: self, second: other, comparer })
    }
}

impl<T: Elem + Ord> Seq<T> {
    /// Ascending natural order.
    pub fn order(self) -> Seq<T> {
        self.order_by(comparer::natural())
    }

    /// Descending natural order.
    pub fn order_desc(self) -> Seq<T> {
        self.order_by(comparer::reverse(comparer::natural()))
    }

    pub fn merge(self, other: Seq<T>) -> Seq<T> {
        self.merge_by(other, comparer::natural())
    }
}

impl<T: Elem> Describe for Seq<T> {
    fn label(&self) -> String {
        self.node.label()
    }

    fn inputs(&self) -> Vec<&dyn Describe> {
        self.node.inputs()
    }

    fn is_barrier(&self) -> bool {
        self.node.is_barrier()
    }

    fn known_len(&self) -> Option<usize> {
        self.node.known_len()
    }

    fn cost_hint(&self) -> u8 {
        self.node.cost_hint()
    }
}

impl<T: Elem> fmt::Debug for Seq<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Seq({})", self.node.label())
    }
}

impl<T: Elem> FromIterator<T> for Seq<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        crate::from_vec(iter.into_iter().collect())
    }
}
