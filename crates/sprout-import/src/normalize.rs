//! Timestamp normalization for fixture documents.
//!
//! The fixtures serialise timestamps as `{"seconds": n, "nanoseconds": m}`
//! objects. The document store wants its native timestamp type, which this
//! module renders as an RFC 3339 string built from `seconds * 1000`
//! milliseconds — the nanoseconds component is dropped, matching what the
//! store keeps.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::{Error, Result};

/// Recursively rewrite every timestamp-shaped object in `value`.
///
/// Objects carrying both `seconds` and `nanoseconds` keys become RFC 3339
/// strings; everything else is walked structurally. Each level operates on a
/// fresh copy — the input is never mutated.
pub fn convert_timestamps(value: &Value) -> Result<Value> {
  match value {
    Value::Object(map) => {
      if map.contains_key("seconds") && map.contains_key("nanoseconds") {
        return Ok(Value::String(decode_timestamp(map)?.to_rfc3339()));
      }
      let mut out = serde_json::Map::with_capacity(map.len());
      for (key, nested) in map {
        out.insert(key.clone(), convert_timestamps(nested)?);
      }
      Ok(Value::Object(out))
    }
    Value::Array(items) => Ok(Value::Array(
      items.iter().map(convert_timestamps).collect::<Result<_>>()?,
    )),
    other => Ok(other.clone()),
  }
}

fn decode_timestamp(
  map: &serde_json::Map<String, Value>,
) -> Result<DateTime<Utc>> {
  let malformed = || Error::MalformedTimestamp(Value::Object(map.clone()));
  let seconds = map.get("seconds").and_then(Value::as_i64).ok_or_else(malformed)?;
  let millis = seconds.checked_mul(1000).ok_or_else(malformed)?;
  DateTime::from_timestamp_millis(millis).ok_or_else(malformed)
}
