//! Fixture import utility for the Sprout document mirror.
//!
//! Reads `dummy_<collection>.json` files, normalizes embedded
//! `{seconds, nanoseconds}` objects into RFC 3339 timestamps, and upserts
//! each item into the document service keyed by the item's own `id` field.
//! The whole run is best-effort: one bad item never stops the batch.

pub mod error;
pub mod import;
pub mod normalize;
pub mod sink;

pub use error::{Error, Result};
