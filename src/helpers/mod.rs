pub(crate) mod combine;
pub(crate) mod flatten;
pub(crate) mod grouping;
pub(crate) mod keyed;
pub(crate) mod ordering;
pub(crate) mod sources;
pub(crate) mod terminal;
pub(crate) mod try_process;
pub(crate) mod values;

// Only re-export files with top-level functions
pub use sources::*;
