//! Candle series ingestion from CSV.
//!
//! Expected columns: timestamp, open, high, low, close, volume. Timestamps
//! may be RFC 3339 or the plain `YYYY-MM-DD HH:MM:SS` form (read as UTC).
//! The loader validates ordering up front so the analyzers can assume a
//! strictly increasing series.

use std::path::Path;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::domain::Candle;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("unparseable timestamp {value:?} at row {row}")]
    Timestamp { row: usize, value: String },
    #[error("no candles in input")]
    Empty,
    #[error("timestamps not strictly increasing at row {row}")]
    OutOfOrder { row: usize },
    #[error("non-finite or inverted prices at row {row}")]
    BadPrices { row: usize },
}

#[derive(Debug, Deserialize)]
struct RawRow {
    timestamp: String,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: f64,
}

fn parse_timestamp(row: usize, value: &str) -> Result<DateTime<Utc>, DataError> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Ok(ts.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return Ok(naive.and_utc());
    }
    Err(DataError::Timestamp {
        row,
        value: value.to_string(),
    })
}

/// Load a candle series from a CSV file.
pub fn load_csv(path: impl AsRef<Path>) -> Result<Vec<Candle>, DataError> {
    let path = path.as_ref();
    let mut reader = csv::Reader::from_path(path)?;
    let candles = read_candles(&mut reader)?;
    info!(path = %path.display(), bars = candles.len(), "loaded candle series");
    Ok(candles)
}

/// Load a candle series from any CSV reader (used by tests and stdin).
pub fn load_csv_reader<R: std::io::Read>(reader: R) -> Result<Vec<Candle>, DataError> {
    let mut reader = csv::Reader::from_reader(reader);
    read_candles(&mut reader)
}

fn read_candles<R: std::io::Read>(reader: &mut csv::Reader<R>) -> Result<Vec<Candle>, DataError> {
    let mut candles: Vec<Candle> = Vec::new();
    for (i, record) in reader.deserialize::<RawRow>().enumerate() {
        let row = i + 1;
        let raw = record?;
        let candle = Candle {
            timestamp: parse_timestamp(row, &raw.timestamp)?,
            open: raw.open,
            high: raw.high,
            low: raw.low,
            close: raw.close,
            volume: raw.volume,
        };
        if !candle.is_sane() {
            return Err(DataError::BadPrices { row });
        }
        if let Some(prev) = candles.last() {
            if candle.timestamp <= prev.timestamp {
                return Err(DataError::OutOfOrder { row });
            }
        }
        candles.push(candle);
    }
    if candles.is_empty() {
        return Err(DataError::Empty);
    }
    Ok(candles)
}
