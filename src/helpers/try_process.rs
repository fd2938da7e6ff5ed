//! Sequences of `Result`s: pass failures along as data, then stop at the
//! first one.

use crate::collection::{Elem, Seq};
use crate::error::{LinqError, Result};
use crate::helpers::values::map_fallible;
use anyhow::anyhow;
use std::fmt::Display;

impl<T: Elem, E> Seq<std::result::Result<T, E>>
where
    E: Elem + Display,
{
    /// Unwrap every `Ok`; the first `Err` becomes a callback error raised
    /// from the read that reached it.
    pub fn ok_or_fail(self) -> Seq<T> {
        map_fallible(self, |r: &std::result::Result<T, E>| match r {
            Ok(v) => Ok(v.clone()),
            Err(e) => Err(LinqError::Callback(anyhow!("element failed: {e}"))),
        })
    }

    // Fail-fast terminal (keeps errors ergonomic)
    pub fn collect_fail_fast(&self) -> Result<Vec<T>> {
        self.clone().ok_or_fail().to_vec()
    }

    /// Split into successes and failures, keeping sequence order in each.
    pub fn partition_results(&self) -> Result<(Vec<T>, Vec<E>)> {
        let mut ok = Vec::new();
        let mut failed = Vec::new();
        self.for_each(|r| match r {
            Ok(v) => ok.push(v),
            Err(e) => failed.push(e),
        })?;
        Ok((ok, failed))
    }
}
