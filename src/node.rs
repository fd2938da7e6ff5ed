use crate::collection::{Elem, Seq};
use crate::comparer::Comparer;
use crate::config::OrderMode;
use crate::cursor::BoxCursor;
use crate::error::Result;
use std::sync::{Arc, Mutex};

pub type Predicate<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;
pub type Step<T> = Arc<dyn Fn(&T) -> T + Send + Sync>;
pub type IterFactory<T> = Arc<dyn Fn() -> Box<dyn Iterator<Item = T>> + Send + Sync>;
pub type Generator<T> = Arc<Mutex<dyn FnMut() -> T + Send>>;
pub type OneShot<T> = Mutex<Option<Box<dyn FnOnce() -> Result<BoxCursor<T>> + Send>>>;

/// Type-erased view of a description node, used by
/// [`explain`](crate::planner::explain) to walk a sequence graph whose nodes
/// have different element types.
pub trait Describe {
    fn label(&self) -> String;

    fn inputs(&self) -> Vec<&dyn Describe> {
        Vec::new()
    }

    /// Whether opening a cursor drains the whole input first.
    fn is_barrier(&self) -> bool {
        false
    }

    /// Element count, when it is known without enumerating.
    fn known_len(&self) -> Option<usize> {
        None
    }

    fn cost_hint(&self) -> u8 {
        10
    }
}

/// An operator whose cursor is built by user or library code rather than by
/// the dispatcher. Type-changing operators (`map`, `zip`, `group_by`, ...)
/// are all `DynOp`s, since [`Node`] only carries one element type.
pub trait DynOp<T>: Describe + Send + Sync {
    fn open(&self) -> Result<BoxCursor<T>>;
}

/// Description of how to produce a cursor.
///
/// Sources and same-type operators are plain variants interpreted by
/// [`runner::open`](crate::runner::open); everything else goes through
/// [`Node::Op`].
pub enum Node<T> {
    Empty,
    Once(T),
    Repeat(T),
    Buffer(Arc<Vec<T>>),
    /// A re-iterable range: the factory is called once per cursor.
    Range(IterFactory<T>),
    Sequence {
        start: T,
        condition: Predicate<T>,
        next: Step<T>,
    },
    /// Calls the generator on every pull.
    Generate(Generator<T>),
    /// Single-use: the factory runs on the first cursor request only.
    Factory(OneShot<T>),

    Filter {
        source: Seq<T>,
        predicate: Predicate<T>,
    },
    Take {
        source: Seq<T>,
        count: usize,
    },
    Skip {
        source: Seq<T>,
        count: usize,
    },
    TakeWhile {
        source: Seq<T>,
        predicate: Predicate<T>,
    },
    SkipWhile {
        source: Seq<T>,
        predicate: Predicate<T>,
    },
    Concat {
        first: Seq<T>,
        second: Seq<T>,
    },
    Order {
        source: Seq<T>,
        comparer: Comparer<T>,
        mode: OrderMode,
    },
    /// Two-way merge of inputs already sorted by `comparer`.
    Merge {
        first: Seq<T>,
        second: Seq<T>,
        comparer: Comparer<T>,
    },
    Memoize {
        source: Seq<T>,
    },

    Op(Arc<dyn DynOp<T>>),
}

impl<T: Elem> Describe for Node<T> {
    fn label(&self) -> String {
        match self {
            Node::Empty => "Empty".into(),
            Node::Once(_) => "Once".into(),
            Node::Repeat(_) => "Repeat".into(),
            Node::Buffer(v) => format!("Buffer(len={})", v.len()),
            Node::Range(_) => "Range".into(),
            Node::Sequence { .. } => "Sequence".into(),
            Node::Generate(_) => "Generate".into(),
            Node::Factory(_) => "Factory(single-use)".into(),
            Node::Filter { .. } => "Filter".into(),
            Node::Take { count, .. } => format!("Take({count})"),
            Node::Skip { count, .. } => format!("Skip({count})"),
            Node::TakeWhile { .. } => "TakeWhile".into(),
            Node::SkipWhile { .. } => "SkipWhile".into(),
            Node::Concat { .. } => "Concat".into(),
            Node::Order { mode, .. } => format!("Order({mode:?})"),
            Node::Merge { .. } => "Merge".into(),
            Node::Memoize { .. } => "Memoize".into(),
            Node::Op(op) => op.label(),
        }
    }

    fn inputs(&self) -> Vec<&dyn Describe> {
        match self {
            Node::Filter { source, .. }
            | Node::Take { source, .. }
            | Node::Skip { source, .. }
            | Node::TakeWhile { source, .. }
            | Node::SkipWhile { source, .. }
            | Node::Order { source, .. }
            | Node::Memoize { source } => vec![source as &dyn Describe],
            Node::Concat { first, second } | Node::Merge { first, second, .. } => {
                vec![first as &dyn Describe, second as &dyn Describe]
            }
            Node::Op(op) => op.inputs(),
            _ => Vec::new(),
        }
    }

    fn is_barrier(&self) -> bool {
        match self {
            Node::Order { .. } => true,
            Node::Op(op) => op.is_barrier(),
            _ => false,
        }
    }

    fn known_len(&self) -> Option<usize> {
        match self {
            Node::Empty => Some(0),
            Node::Once(_) => Some(1),
            Node::Buffer(v) => Some(v.len()),
            Node::Op(op) => op.known_len(),
            _ => None,
        }
    }

    fn cost_hint(&self) -> u8 {
        match self {
            Node::Order { .. } => 40,
            Node::Merge { .. } | Node::Concat { .. } => 5,
            Node::Take { .. } | Node::Skip { .. } | Node::Memoize { .. } => 1,
            Node::Op(op) => op.cost_hint(),
            _ => 2,
        }
    }
}
