//! Statistical combiners: `AverageF64`

use super::CombineFn;
use crate::error::{LinqError, Result};

/* ===================== AverageF64 ===================== */

/// Average of values as `f64`.
///
/// Values must be convertible into `f64` via `Into<f64>`.
///
/// - Accumulator: `(sum_f64, count_u64)`
/// - Output: `f64`
///
/// Empty input is an error rather than `0.0` or `NaN`.
#[derive(Clone, Copy, Debug, Default)]
pub struct AverageF64;

impl<V> CombineFn<V, (f64, u64), f64> for AverageF64
where
    V: Into<f64>,
{
    fn create(&self) -> (f64, u64) {
        (0.0, 0)
    }

    fn add_input(&self, acc: &mut (f64, u64), v: V) {
        acc.0 += v.into();
        acc.1 += 1;
    }

    #[allow(clippy::cast_precision_loss)]
    fn finish(&self, acc: (f64, u64)) -> Result<f64> {
        if acc.1 == 0 {
            Err(LinqError::Empty { op: "average" })
        } else {
            Ok(acc.0 / (acc.1 as f64))
        }
    }
}
