//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, calendar dates as `YYYY-MM-DD`,
//! JSON blobs as compact JSON text, and booleans as 0/1 integers.

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::types::Value;

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

pub fn decode_dt_opt(s: Option<&str>) -> Result<Option<DateTime<Utc>>> {
  s.map(decode_dt).transpose()
}

// ─── NaiveDate ───────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String {
  d.format("%Y-%m-%d").to_string()
}

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── JSON blobs ──────────────────────────────────────────────────────────────

pub fn encode_json(v: &serde_json::Value) -> String { v.to_string() }

pub fn decode_json(s: &str) -> Result<serde_json::Value> {
  Ok(serde_json::from_str(s)?)
}

pub fn decode_json_opt(s: Option<&str>) -> Result<Option<serde_json::Value>> {
  s.map(decode_json).transpose()
}

// ─── Bind values ─────────────────────────────────────────────────────────────

pub fn text(s: &str) -> Value { Value::Text(s.to_owned()) }

pub fn integer(i: i64) -> Value { Value::Integer(i) }

pub fn flag(b: bool) -> Value { Value::Integer(i64::from(b)) }
