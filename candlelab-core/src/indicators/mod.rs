//! Technical indicators and their textual summary.
//!
//! The series functions (`rsi`, `ema`, `atr`) produce a `Vec<f64>` of the
//! same length as the input with NaN during warmup; [`IndicatorSummary`]
//! surfaces only the latest values, as `Option<f64>`, together with the
//! derived trend and RSI-zone labels. Short series degrade to `None`
//! fields, never an error.

pub mod atr;
pub mod ema;
pub mod rsi;
pub mod summary;

pub use atr::{atr, true_range};
pub use ema::{ema, ema_of_series};
pub use rsi::rsi;
pub use summary::{IndicatorSummary, RsiZone};

/// Last element of an indicator series, `None` when missing or still NaN.
pub(crate) fn last_finite(series: &[f64]) -> Option<f64> {
    series.last().copied().filter(|v| v.is_finite())
}
