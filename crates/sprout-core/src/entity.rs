//! The per-entity descriptor consumed by the generic CRUD machinery.
//!
//! Every resource exposed over HTTP is described once — collection name,
//! required-field list, patch shape, external view — and the store and API
//! layers interpret that description instead of duplicating controller code
//! per entity.

use serde::{Serialize, de::DeserializeOwned};

use crate::validate::{FieldError, ValidationError};

/// A persistent record exposed as a uniform CRUD resource.
pub trait Entity: Sized + Send + Sync + 'static {
  /// Collection name, plural snake_case. Doubles as the table name and the
  /// URL path segment.
  const NAME: &'static str;

  /// Fields that must be present in a create payload. Updates accept any
  /// subset of fields, so nothing is required there.
  const REQUIRED: &'static [&'static str];

  /// Partial payload accepted by create and update. Every field is optional
  /// at the type level; create-time presence is checked by
  /// [`validate_create`].
  type Patch: Patch;

  /// External JSON projection with the entity's fixed key set.
  type View: Serialize + Send + Sync + 'static;

  fn id(&self) -> i64;

  /// Flat projection with no relations embedded.
  fn view(&self) -> Self::View;
}

/// An all-fields-optional payload that can report which fields it carries.
pub trait Patch: DeserializeOwned + Clone + Send + Sync + 'static {
  /// Whether `field` carries a value in this payload. A JSON `null` counts
  /// as absent.
  fn has(&self, field: &str) -> bool;
}

/// Check a create payload against the entity's required-field list.
///
/// Collects one [`FieldError`] per missing field so the caller gets the full
/// list in a single round trip. Must be called before any store mutation.
pub fn validate_create<E: Entity>(
  patch: &E::Patch,
) -> Result<(), ValidationError> {
  let errors: Vec<FieldError> = E::REQUIRED
    .iter()
    .copied()
    .filter(|field| !patch.has(field))
    .map(FieldError::required)
    .collect();

  if errors.is_empty() {
    Ok(())
  } else {
    Err(ValidationError { errors })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::activity::{Activity, ActivityPatch};

  #[test]
  fn create_with_all_required_fields_passes() {
    let patch = ActivityPatch {
      name: Some("Painting".into()),
      date: Some("2024-03-01".parse().unwrap()),
    };
    assert!(validate_create::<Activity>(&patch).is_ok());
  }

  #[test]
  fn create_missing_one_field_reports_it() {
    let patch = ActivityPatch { name: Some("Painting".into()), date: None };
    let err = validate_create::<Activity>(&patch).unwrap_err();
    assert_eq!(err.errors.len(), 1);
    assert_eq!(err.errors[0].field, "date");
  }

  #[test]
  fn create_empty_payload_reports_every_required_field() {
    let patch = ActivityPatch::default();
    let err = validate_create::<Activity>(&patch).unwrap_err();
    let fields: Vec<_> = err.errors.iter().map(|e| e.field).collect();
    assert_eq!(fields, vec!["name", "date"]);
  }

  #[test]
  fn json_null_counts_as_absent() {
    let patch: ActivityPatch =
      serde_json::from_str(r#"{"name": null, "date": "2024-03-01"}"#).unwrap();
    let err = validate_create::<Activity>(&patch).unwrap_err();
    assert_eq!(err.errors[0].field, "name");
  }
}
