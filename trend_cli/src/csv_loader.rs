use std::io::Read;

use chrono::{NaiveDate, NaiveDateTime};
use csv::Reader;
use trend_core::{ErrCode, TrendError};

const TIMESTAMP_COLUMN: &str = "timestamp";

#[derive(Debug)]
struct PriceRecord {
    timestamp: Option<NaiveDateTime>,
    price: f64,
}

/// Read the `column` prices from CSV, oldest first.
///
/// Rows are sorted by the `timestamp` column when the file has one, otherwise
/// file order is kept.
pub fn load_prices<R: Read>(source: R, column: &str) -> Result<Vec<f64>, TrendError> {
    let mut rdr = Reader::from_reader(source);
    let headers = rdr.headers().map_err(format_err)?.clone();

    let price_idx = find_column(&headers, column).ok_or_else(|| {
        TrendError::new(
            format!("column '{}' not found in header", column),
            ErrCode::SrcDataFormatError,
        )
    })?;
    let ts_idx = find_column(&headers, TIMESTAMP_COLUMN);

    let mut records = Vec::new();
    for (line, result) in rdr.records().enumerate() {
        let record = result.map_err(format_err)?;
        records.push(parse_record(&record, line + 2, price_idx, ts_idx)?);
    }

    if ts_idx.is_some() {
        records.sort_by_key(|r| r.timestamp);
    }
    Ok(records.into_iter().map(|r| r.price).collect())
}

fn find_column(headers: &csv::StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h.trim().eq_ignore_ascii_case(name))
}

fn parse_record(
    record: &csv::StringRecord,
    line: usize,
    price_idx: usize,
    ts_idx: Option<usize>,
) -> Result<PriceRecord, TrendError> {
    let raw = record.get(price_idx).unwrap_or("").trim();
    let price = raw.parse::<f64>().map_err(|_| {
        TrendError::new(
            format!("line {}: price '{}' is not a number", line, raw),
            ErrCode::SrcDataFormatError,
        )
    })?;

    let timestamp = match ts_idx {
        Some(idx) => Some(parse_timestamp(record.get(idx).unwrap_or("").trim()).ok_or_else(|| {
            TrendError::new(
                format!("line {}: bad timestamp", line),
                ErrCode::SrcDataFormatError,
            )
        })?),
        None => None,
    };

    Ok(PriceRecord { timestamp, price })
}

fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

fn format_err(e: csv::Error) -> TrendError {
    TrendError::new(e.to_string(), ErrCode::SrcDataFormatError)
}
