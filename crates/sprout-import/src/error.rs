//! Error type for `sprout-import`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("cannot read fixture file: {0}")]
  Io(#[from] std::io::Error),

  #[error("fixture is not valid JSON: {0}")]
  Json(#[from] serde_json::Error),

  /// An object carried both `seconds` and `nanoseconds` keys but could not
  /// be turned into a timestamp.
  #[error("malformed timestamp object: {0}")]
  MalformedTimestamp(serde_json::Value),

  /// The item has no usable `id` field to key the document by.
  #[error("item has no `id` field")]
  MissingId,

  #[error("document write failed: {0}")]
  Write(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
