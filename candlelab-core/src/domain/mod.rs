//! Domain types shared by every analyzer.

mod candle;

pub use candle::{Candle, Direction};
