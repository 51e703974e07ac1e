//! Child — the other root entity; checklist items and follow-up suggestions
//! hang off it.

use serde::{Deserialize, Serialize};

use crate::entity::{Entity, Patch};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Child {
  pub id:   i64,
  pub name: String,
  pub age:  i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChildPatch {
  pub name: Option<String>,
  pub age:  Option<i64>,
}

/// External representation of a [`Child`].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildView {
  pub id:   i64,
  pub name: String,
  pub age:  i64,
}

impl Entity for Child {
  const NAME: &'static str = "children";
  const REQUIRED: &'static [&'static str] = &["name", "age"];
  type Patch = ChildPatch;
  type View = ChildView;

  fn id(&self) -> i64 { self.id }

  fn view(&self) -> ChildView {
    ChildView { id: self.id, name: self.name.clone(), age: self.age }
  }
}

impl Patch for ChildPatch {
  fn has(&self, field: &str) -> bool {
    match field {
      "name" => self.name.is_some(),
      "age" => self.age.is_some(),
      _ => false,
    }
  }
}
