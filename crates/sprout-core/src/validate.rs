//! Validation failure types surfaced to API callers as per-field messages.

use std::collections::BTreeMap;

use thiserror::Error;

/// A single field-level complaint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
  pub field:   &'static str,
  pub message: String,
}

impl FieldError {
  /// The standard required-field message, e.g. `"The due date field is
  /// required."` for `due_date`.
  pub fn required(field: &'static str) -> Self {
    let readable = field.replace('_', " ");
    Self { field, message: format!("The {readable} field is required.") }
  }
}

/// A rejected payload with one message list per offending field.
#[derive(Debug, Clone, Error)]
#[error("validation failed for {} field(s)", .errors.len())]
pub struct ValidationError {
  pub errors: Vec<FieldError>,
}

impl ValidationError {
  /// Group messages by field name for the external error body.
  pub fn by_field(&self) -> BTreeMap<&'static str, Vec<&str>> {
    let mut map: BTreeMap<&'static str, Vec<&str>> = BTreeMap::new();
    for e in &self.errors {
      map.entry(e.field).or_default().push(e.message.as_str());
    }
    map
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn required_message_humanises_underscores() {
    let e = FieldError::required("child_id");
    assert_eq!(e.message, "The child id field is required.");
  }

  #[test]
  fn by_field_groups_messages() {
    let err = ValidationError {
      errors: vec![
        FieldError::required("name"),
        FieldError::required("date"),
      ],
    };
    let map = err.by_field();
    assert_eq!(map.len(), 2);
    assert_eq!(map["name"], vec!["The name field is required."]);
  }
}
