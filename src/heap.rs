//! Arena-backed pairing heap.
//!
//! Nodes live in a `Vec` and link to each other by index, using the
//! child/sibling encoding of a multiway tree:
//!
//! - `child`: first child
//! - `right`: next sibling
//! - `left`: previous sibling, or the parent for a first child
//!
//! A node with neither `left` nor `right` is a root. Removed nodes stay in the
//! arena with `active == false`, so their values remain readable through
//! their [`NodeHandle`] and they can be put back with
//! [`reinsert`](PairingHeap::reinsert). Because every link is an index,
//! cloning the heap is a plain copy of the arena.

use crate::collection::{Elem, Seq};
use crate::comparer::{self, Comparer};
use crate::cursor::{BoxCursor, Cursor, Position};
use crate::error::{HeapError, LinqError, Result};
use crate::node::{Describe, DynOp};
use std::cmp::Ordering;
use std::fmt;

/// Stable reference to a node of one [`PairingHeap`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeHandle(usize);

impl NodeHandle {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Translates handles of a heap that was [merged](PairingHeap::merge) into
/// another one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HandleMap {
    offset: usize,
}

impl HandleMap {
    pub fn translate(&self, h: NodeHandle) -> NodeHandle {
        NodeHandle(h.0 + self.offset)
    }
}

#[derive(Clone, Debug)]
struct Slot<T> {
    value: T,
    active: bool,
    left: Option<usize>,
    right: Option<usize>,
    child: Option<usize>,
}

impl<T> Slot<T> {
    fn is_root(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// Mergeable min-heap ordered by a [`Comparer`].
#[derive(Clone)]
pub struct PairingHeap<T> {
    slots: Vec<Slot<T>>,
    root: Option<usize>,
    len: usize,
    comparer: Comparer<T>,
}

impl<T: Ord + 'static> PairingHeap<T> {
    pub fn new() -> Self {
        Self::with_comparer(comparer::natural())
    }
}

impl<T: Ord + 'static> Default for PairingHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PairingHeap<T> {
    pub fn with_comparer(comparer: Comparer<T>) -> Self {
        Self { slots: Vec::new(), root: None, len: 0, comparer }
    }

    /// Number of active nodes.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn comparer(&self) -> &Comparer<T> {
        &self.comparer
    }

    /// Add `value` as a new active node. O(1).
    pub fn insert(&mut self, value: T) -> NodeHandle {
        let idx = self.slots.len();
        self.slots.push(Slot { value, active: true, left: None, right: None, child: None });
        self.root = Some(match self.root {
            Some(r) => self.link(r, idx),
            None => idx,
        });
        self.len += 1;
        NodeHandle(idx)
    }

    /// Put a previously removed node back into the heap.
    pub fn reinsert(&mut self, h: NodeHandle) -> Result<(), HeapError> {
        let idx = self.check(h)?;
        if self.slots[idx].active {
            return Err(HeapError::NodeActive(idx));
        }
        self.slots[idx].active = true;
        self.root = Some(match self.root {
            Some(r) => self.pair(r, idx)?,
            None => idx,
        });
        self.len += 1;
        Ok(())
    }

    /// The minimum element, if any.
    pub fn peek(&self) -> Option<&T> {
        self.root.map(|r| &self.slots[r].value)
    }

    pub fn peek_handle(&self) -> Option<NodeHandle> {
        self.root.map(NodeHandle)
    }

    /// Value held by a node, active or not.
    pub fn get(&self, h: NodeHandle) -> Result<&T, HeapError> {
        let idx = self.check(h)?;
        Ok(&self.slots[idx].value)
    }

    pub fn is_active(&self, h: NodeHandle) -> bool {
        self.slots.get(h.0).is_some_and(|s| s.active)
    }

    /// Detach the minimum node and return its handle. O(log n) amortized.
    pub fn extract_min(&mut self) -> Result<NodeHandle, HeapError> {
        let root = self.root.ok_or(HeapError::Empty)?;
        self.remove(NodeHandle(root))?;
        Ok(NodeHandle(root))
    }

    /// Remove an arbitrary active node. O(log n) amortized.
    ///
    /// The node's children are combined with the two-pass pairing
    /// reduction and the result is paired back with the remaining tree.
    pub fn remove(&mut self, h: NodeHandle) -> Result<(), HeapError> {
        let idx = self.check(h)?;
        if !self.slots[idx].active {
            return Err(HeapError::NodeInactive(idx));
        }
        if self.root == Some(idx) {
            self.root = self.combine_children(idx)?;
        } else {
            self.splice_out(idx);
            let rest = self.combine_children(idx)?;
            self.root = match (self.root, rest) {
                (Some(r), Some(s)) => Some(self.pair(r, s)?),
                (r, s) => r.or(s),
            };
        }
        self.slots[idx].active = false;
        self.len -= 1;
        Ok(())
    }

    /// Replace a node's value with one that compares less or equal.
    pub fn decrease_key(&mut self, h: NodeHandle, value: T) -> Result<(), HeapError> {
        let idx = self.check(h)?;
        if !self.slots[idx].active {
            return Err(HeapError::NodeInactive(idx));
        }
        if (self.comparer)(&value, &self.slots[idx].value) == Ordering::Greater {
            return Err(HeapError::KeyIncreased(idx));
        }
        self.slots[idx].value = value;
        match self.root {
            Some(r) if r != idx => {
                self.splice_out(idx);
                self.root = Some(self.pair(r, idx)?);
            }
            _ => {}
        }
        Ok(())
    }

    /// Move every node of `other` into this heap. O(1) linking plus the
    /// arena copy.
    ///
    /// Ordering uses this heap's comparer. Handles issued by `other` must be
    /// passed through the returned [`HandleMap`] before use.
    pub fn merge(&mut self, other: PairingHeap<T>) -> HandleMap {
        let offset = self.slots.len();
        let shift = |o: Option<usize>| o.map(|i| i + offset);
        self.slots.extend(other.slots.into_iter().map(|s| Slot {
            value: s.value,
            active: s.active,
            left: shift(s.left),
            right: shift(s.right),
            child: shift(s.child),
        }));
        if let Some(o) = shift(other.root) {
            self.root = Some(match self.root {
                Some(r) => self.link(r, o),
                None => o,
            });
        }
        self.len += other.len;
        HandleMap { offset }
    }

    /// Drop every node, active or not. Outstanding handles become unknown.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.root = None;
        self.len = 0;
    }

    /// Active values in tree pre-order (not sorted).
    pub fn iter(&self) -> Iter<'_, T> {
        Iter { heap: self, stack: self.root.into_iter().collect() }
    }

    /// Consume the heap, returning its active values in ascending order.
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut order = Vec::with_capacity(self.len);
        while let Ok(h) = self.extract_min() {
            order.push(h.0);
        }
        let mut values: Vec<Option<T>> = self.slots.into_iter().map(|s| Some(s.value)).collect();
        order.into_iter().filter_map(|i| values[i].take()).collect()
    }

    fn check(&self, h: NodeHandle) -> Result<usize, HeapError> {
        if h.0 < self.slots.len() {
            Ok(h.0)
        } else {
            Err(HeapError::UnknownHandle(h.0))
        }
    }

    /// Pair two roots, failing on anything else.
    fn pair(&mut self, a: usize, b: usize) -> Result<usize, HeapError> {
        if a == b || !self.slots[a].is_root() || !self.slots[b].is_root() {
            return Err(HeapError::NotRoot(a, b));
        }
        Ok(self.link(a, b))
    }

    /// The losing root becomes the first child of the winner; `a` wins ties.
    fn link(&mut self, a: usize, b: usize) -> usize {
        let (winner, loser) = match (self.comparer)(&self.slots[b].value, &self.slots[a].value) {
            Ordering::Less => (b, a),
            _ => (a, b),
        };
        let first = self.slots[winner].child;
        if let Some(c) = first {
            self.slots[c].left = Some(loser);
        }
        self.slots[loser].left = Some(winner);
        self.slots[loser].right = first;
        self.slots[winner].child = Some(loser);
        winner
    }

    /// Unlink a non-root node (and its subtree) from its parent or sibling.
    fn splice_out(&mut self, idx: usize) {
        let left = self.slots[idx].left.take();
        let right = self.slots[idx].right.take();
        if let Some(l) = left {
            if self.slots[l].child == Some(idx) {
                self.slots[l].child = right;
            } else {
                self.slots[l].right = right;
            }
        }
        if let Some(r) = right {
            self.slots[r].left = left;
        }
    }

    /// Detach the children of `idx` and fold them into one tree: pair
    /// neighbours left to right, then merge the pairs right to left.
    fn combine_children(&mut self, idx: usize) -> Result<Option<usize>, HeapError> {
        let mut roots = Vec::new();
        let mut next = self.slots[idx].child.take();
        while let Some(c) = next {
            next = self.slots[c].right.take();
            self.slots[c].left = None;
            roots.push(c);
        }

        let mut pairs = Vec::with_capacity(roots.len().div_ceil(2));
        let mut it = roots.into_iter();
        while let Some(a) = it.next() {
            pairs.push(match it.next() {
                Some(b) => self.pair(a, b)?,
                None => a,
            });
        }

        let mut acc = pairs.pop();
        while let Some(p) = pairs.pop() {
            acc = Some(match acc {
                Some(t) => self.pair(p, t)?,
                None => p,
            });
        }
        Ok(acc)
    }
}

impl<T: Clone> PairingHeap<T> {
    /// Detach the minimum node and return a copy of its value.
    ///
    /// The node stays in the arena, so its handle still resolves through
    /// [`get`](Self::get) and [`reinsert`](Self::reinsert).
    pub fn pop_min(&mut self) -> Result<T, HeapError> {
        let h = self.extract_min()?;
        Ok(self.slots[h.0].value.clone())
    }
}

impl<T: fmt::Debug> fmt::Debug for PairingHeap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PairingHeap")
            .field("len", &self.len)
            .field("min", &self.peek())
            .finish()
    }
}

impl<T> Extend<T> for PairingHeap<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for v in iter {
            self.insert(v);
        }
    }
}

impl<T: Ord + 'static> FromIterator<T> for PairingHeap<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut heap = Self::new();
        heap.extend(iter);
        heap
    }
}

/// Pre-order walk over the active nodes of a heap.
pub struct Iter<'a, T> {
    heap: &'a PairingHeap<T>,
    stack: Vec<usize>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.stack.pop()?;
        let slot = &self.heap.slots[idx];
        self.stack.extend(slot.right);
        self.stack.extend(slot.child);
        Some(&slot.value)
    }
}

/* ===================== sorted reads ===================== */

/// Cursor that extracts one minimum per advance from a heap it owns.
pub(crate) struct DrainCursor<T> {
    heap: PairingHeap<T>,
    current: Option<NodeHandle>,
    pos: Position,
}

impl<T> DrainCursor<T> {
    pub(crate) fn new(heap: PairingHeap<T>) -> Self {
        Self { heap, current: None, pos: Position::Before }
    }
}

impl<T: Clone> Cursor<T> for DrainCursor<T> {
    fn advance(&mut self) -> Result<bool> {
        if self.pos.is_after() || self.heap.is_empty() {
            self.current = None;
            return Ok(self.pos.settle(false));
        }
        self.current = Some(self.heap.extract_min()?);
        Ok(self.pos.settle(true))
    }

    fn current(&self) -> Result<T> {
        self.pos.ensure_on()?;
        let h = self.current.ok_or(LinqError::NotStarted)?;
        Ok(self.heap.get(h)?.clone())
    }
}

struct SortedOp<T> {
    snapshot: PairingHeap<T>,
}

impl<T> Describe for SortedOp<T> {
    fn label(&self) -> String {
        format!("HeapSnapshot(len={})", self.snapshot.len())
    }

    fn known_len(&self) -> Option<usize> {
        Some(self.snapshot.len())
    }
}

impl<T: Elem> DynOp<T> for SortedOp<T> {
    fn open(&self) -> Result<BoxCursor<T>> {
        Ok(Box::new(DrainCursor::new(self.snapshot.clone())))
    }
}

impl<T: Elem> PairingHeap<T> {
    /// Read the heap in ascending order without modifying it.
    ///
    /// The returned sequence holds a snapshot taken now; every cursor drains
    /// its own clone of that snapshot.
    pub fn sorted(&self) -> Seq<T> {
        Seq::from_op(SortedOp { snapshot: self.clone() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    impl<T> PairingHeap<T> {
        /// Walk the tree checking link symmetry, heap order and the count.
        fn assert_invariants(&self) {
            let mut seen = 0;
            let mut stack: Vec<usize> = self.root.into_iter().collect();
            if let Some(r) = self.root {
                assert!(self.slots[r].is_root(), "root {r} has siblings");
            }
            while let Some(i) = stack.pop() {
                let s = &self.slots[i];
                assert!(s.active, "inactive node {i} reachable");
                seen += 1;
                let mut prev = i;
                let mut c = s.child;
                while let Some(ci) = c {
                    assert_eq!(self.slots[ci].left, Some(prev), "bad back link on {ci}");
                    assert_ne!(
                        (self.comparer)(&self.slots[ci].value, &s.value),
                        Ordering::Less,
                        "child {ci} smaller than parent {i}"
                    );
                    stack.push(ci);
                    prev = ci;
                    c = self.slots[ci].right;
                }
            }
            assert_eq!(seen, self.len);
        }
    }

    #[test]
    fn extract_in_order() -> anyhow::Result<()> {
        let mut h: PairingHeap<i32> = [5, 3, 8, 1, 9, 2].into_iter().collect();
        h.assert_invariants();
        let mut out = Vec::new();
        while let Ok(n) = h.extract_min() {
            h.assert_invariants();
            out.push(*h.get(n)?);
        }
        assert_eq!(out, vec![1, 2, 3, 5, 8, 9]);
        assert_eq!(h.extract_min(), Err(HeapError::Empty));
        Ok(())
    }

    #[test]
    fn remove_inner_node_keeps_structure() -> anyhow::Result<()> {
        let mut h = PairingHeap::new();
        let handles: Vec<_> = (0..20).map(|i| h.insert((i * 7) % 20)).collect();
        h.extract_min()?;
        h.assert_invariants();
        h.remove(handles[5])?;
        h.assert_invariants();
        h.remove(handles[11])?;
        h.assert_invariants();
        assert_eq!(h.len(), 17);
        assert_eq!(h.remove(handles[5]), Err(HeapError::NodeInactive(5)));
        assert_eq!(*h.get(handles[5])?, 15);
        Ok(())
    }

    #[test]
    fn pairing_non_roots_fails() {
        let mut h = PairingHeap::new();
        let a = h.insert(1);
        let b = h.insert(2);
        assert_eq!(h.pair(a.0, b.0), Err(HeapError::NotRoot(0, 1)));
        assert_eq!(h.pair(a.0, a.0), Err(HeapError::NotRoot(0, 0)));
    }

    #[test]
    fn reinsert_and_active_checks() -> anyhow::Result<()> {
        let mut h = PairingHeap::new();
        let a = h.insert(4);
        h.insert(6);
        assert_eq!(h.reinsert(a), Err(HeapError::NodeActive(0)));
        h.remove(a)?;
        assert!(!h.is_active(a));
        h.reinsert(a)?;
        h.assert_invariants();
        assert_eq!(h.peek(), Some(&4));
        assert_eq!(h.get(NodeHandle(9)), Err(HeapError::UnknownHandle(9)));
        Ok(())
    }

    #[test]
    fn decrease_key_moves_node_up() -> anyhow::Result<()> {
        let mut h = PairingHeap::new();
        h.insert(10);
        let b = h.insert(20);
        h.insert(30);
        h.decrease_key(b, 1)?;
        h.assert_invariants();
        assert_eq!(h.peek(), Some(&1));
        assert_eq!(h.decrease_key(b, 50), Err(HeapError::KeyIncreased(1)));
        Ok(())
    }

    #[test]
    fn merge_translates_handles() -> anyhow::Result<()> {
        let mut a: PairingHeap<i32> = [4, 7].into_iter().collect();
        let mut b = PairingHeap::new();
        let h = b.insert(2);
        b.insert(9);
        let map = a.merge(b);
        a.assert_invariants();
        assert_eq!(a.len(), 4);
        a.remove(map.translate(h))?;
        assert_eq!(a.into_sorted_vec(), vec![4, 7, 9]);
        Ok(())
    }

    #[test]
    fn clone_is_independent() {
        let mut h: PairingHeap<i32> = [3, 1, 2].into_iter().collect();
        h.extract_min().ok();
        let c = h.clone();
        h.clear();
        assert!(h.is_empty());
        c.assert_invariants();
        assert_eq!(c.into_sorted_vec(), vec![2, 3]);
    }

    #[test]
    fn iter_visits_every_active_node() {
        let h: PairingHeap<i32> = [6, 2, 4].into_iter().collect();
        let mut seen: Vec<_> = h.iter().copied().collect();
        seen.sort();
        assert_eq!(seen, vec![2, 4, 6]);
    }
}
