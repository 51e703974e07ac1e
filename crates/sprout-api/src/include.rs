//! The `?include=` query parameter: callers declare which relations they want
//! embedded in a read or list response.

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IncludeParams {
  include: Option<String>,
}

impl IncludeParams {
  /// Whether `relation` appears in the comma-separated `include` list.
  pub fn wants(&self, relation: &str) -> bool {
    self
      .include
      .as_deref()
      .is_some_and(|list| list.split(',').any(|part| part.trim() == relation))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn params(include: &str) -> IncludeParams {
    IncludeParams { include: Some(include.to_string()) }
  }

  #[test]
  fn absent_list_wants_nothing() {
    assert!(!IncludeParams::default().wants("child"));
  }

  #[test]
  fn comma_separated_relations_match() {
    let p = params("child, activity");
    assert!(p.wants("child"));
    assert!(p.wants("activity"));
    assert!(!p.wants("planning"));
  }

  #[test]
  fn partial_names_do_not_match() {
    assert!(!params("childhood").wants("child"));
  }
}
