//! The batch import pass: seven fixture files, one upsert per item,
//! best-effort end to end.
//!
//! Collections are processed strictly in order, items within a collection
//! strictly in order. A failing item is logged and skipped; a failing
//! collection (unreadable file, bad JSON) is logged and the remaining
//! collections still run. Nothing is retried.

use std::path::Path;

use serde_json::Value;
use tracing::{error, info};

use crate::{
  Error, Result,
  normalize::convert_timestamps,
  sink::DocumentSink,
};

/// The collections imported by one run, in order. Each corresponds to a
/// `dummy_<collection>.json` fixture file.
pub const COLLECTIONS: [&str; 7] = [
  "teachers",
  "parents",
  "children",
  "activities",
  "checklist_items",
  "plans",
  "follow_up_suggestions",
];

/// Per-collection (or whole-run) import tally.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
  pub imported: usize,
  pub failed:   usize,
}

fn item_id(item: &Value) -> Option<String> {
  match item.get("id") {
    Some(Value::String(s)) => Some(s.clone()),
    Some(Value::Number(n)) => Some(n.to_string()),
    _ => None,
  }
}

async fn import_item<S: DocumentSink>(
  collection: &str,
  item: &Value,
  sink: &S,
) -> Result<String> {
  let id = item_id(item).ok_or(Error::MissingId)?;
  let document = convert_timestamps(item)?;
  sink.put(collection, &id, &document).await?;
  Ok(id)
}

/// Import `dummy_<collection>.json` from `dir` into `sink`.
///
/// Per-item failures are logged and counted, never raised. An unreadable or
/// unparsable fixture file fails the collection as a whole.
pub async fn import_collection<S: DocumentSink>(
  dir: &Path,
  collection: &str,
  sink: &S,
) -> Result<ImportSummary> {
  let path = dir.join(format!("dummy_{collection}.json"));
  info!(%collection, path = %path.display(), "importing collection");

  let text = std::fs::read_to_string(&path)?;
  let data: Value = serde_json::from_str(&text)?;
  let items = match data.get(collection).and_then(Value::as_array) {
    Some(items) => items,
    None => {
      info!(%collection, "no data to import");
      return Ok(ImportSummary::default());
    }
  };

  let mut summary = ImportSummary::default();
  for item in items {
    match import_item(collection, item, sink).await {
      Ok(id) => {
        info!(%collection, %id, "imported document");
        summary.imported += 1;
      }
      Err(e) => {
        let id = item_id(item).unwrap_or_else(|| "?".to_string());
        error!(%collection, %id, error = %e, "skipping item");
        summary.failed += 1;
      }
    }
  }

  info!(
    %collection,
    imported = summary.imported,
    failed = summary.failed,
    "finished collection"
  );
  Ok(summary)
}

/// Run the whole batch. A failed collection does not stop the rest; the
/// returned summary aggregates every collection that produced one.
pub async fn import_all<S: DocumentSink>(
  dir: &Path,
  sink: &S,
) -> ImportSummary {
  let mut total = ImportSummary::default();
  for collection in COLLECTIONS {
    match import_collection(dir, collection, sink).await {
      Ok(summary) => {
        total.imported += summary.imported;
        total.failed += summary.failed;
      }
      Err(e) => error!(%collection, error = %e, "collection import failed"),
    }
  }
  total
}
