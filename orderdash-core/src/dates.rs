//! Calendar-date normalization for export date cells.
//!
//! Exports carry dates as ISO strings, US-style slash dates, spelled-out month
//! names, or (from spreadsheets) serial day numbers. Time of day is dropped.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use thiserror::Error;

use crate::record::RawValue;

/// Date-times without an offset, tried in order
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Date-only forms, tried in order
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d-%b-%Y",
    "%d %b %Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%d %B %Y",
];

/// Spreadsheet serial days count from 1899-12-30 (1900 date system)
const SERIAL_EPOCH: (i32, u32, u32) = (1899, 12, 30);

/// Largest serial accepted (9999-12-31)
const MAX_SERIAL: f64 = 2_958_465.0;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DateError {
    #[error("empty date value")]
    Empty,
    #[error("unrecognized date '{0}'")]
    Unrecognized(String),
    #[error("serial date {0} out of range")]
    SerialOutOfRange(f64),
}

/// Normalize a raw cell to a calendar date
pub fn normalize_date(value: &RawValue) -> Result<NaiveDate, DateError> {
    match value {
        RawValue::Empty => Err(DateError::Empty),
        RawValue::DateTime(dt) => Ok(dt.date()),
        RawValue::Number(n) => from_serial(*n),
        RawValue::Text(s) => parse_date_text(s),
    }
}

/// Parse a textual date, dropping any time of day.
/// Inputs carrying a UTC offset are converted to UTC first.
pub fn parse_date_text(text: &str) -> Result<NaiveDate, DateError> {
    let s = text.trim();
    if s.is_empty() {
        return Err(DateError::Empty);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc).date_naive());
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(ndt.date());
        }
    }

    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(d);
        }
    }

    Err(DateError::Unrecognized(s.to_string()))
}

fn from_serial(serial: f64) -> Result<NaiveDate, DateError> {
    if !serial.is_finite() || !(0.0..=MAX_SERIAL).contains(&serial) {
        return Err(DateError::SerialOutOfRange(serial));
    }
    let (y, m, d) = SERIAL_EPOCH;
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|epoch| epoch.checked_add_signed(Duration::days(serial.trunc() as i64)))
        .ok_or(DateError::SerialOutOfRange(serial))
}
