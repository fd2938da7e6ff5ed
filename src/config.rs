//! Per-operator configuration.

/// How an ordering operator sorts the elements it drains.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OrderMode {
    /// Drain into a [`PairingHeap`](crate::heap::PairingHeap) and extract one
    /// minimum per advance. Cheap when only a prefix is consumed; ties come
    /// out in no particular order.
    #[default]
    PairingHeap,
    /// Drain into a buffer and stable-sort it up front. Equal elements keep
    /// their source order.
    StableSort,
}
