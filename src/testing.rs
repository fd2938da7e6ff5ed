//! Testing utilities for sequences.
//!
//! - **Assertions**: compare sequence output with expected values, check
//!   that a description re-enumerates identically
//! - **Debug utilities**: trace elements as they are pulled, count pulls
//!
//! # Quick Start
//!
//! ```
//! use ironlinq::*;
//! use ironlinq::testing::*;
//!
//! # fn main() -> anyhow::Result<()> {
//! let q = from_vec(vec![3, 1, 2]).map(|x: &i32| x * 2).order();
//! assert_seq_eq(&q, &[2, 4, 6]);
//! assert_reenumerable(&q);
//! # Ok(())
//! # }
//! ```
//!
//! # Counting pulls
//!
//! [`spy`] wraps a sequence in a [`PullCounter`](crate::metrics::PullCounter)
//! so tests can check how much of a source was actually consumed:
//!
//! ```
//! use ironlinq::*;
//! use ironlinq::testing::*;
//!
//! # fn main() -> anyhow::Result<()> {
//! let (src, counter) = spy(iota(0u64));
//! assert_eq!(src.filter(|x| x % 2 == 0).take(3).to_vec()?, vec![0, 2, 4]);
//! assert_eq!(counter.snapshot().yielded, 5);
//! # Ok(())
//! # }
//! ```

pub mod assertions;
pub mod debug;

pub use assertions::*;
pub use debug::*;
