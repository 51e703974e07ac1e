//! Activity — the root entity most tracking records reference — and the
//! per-teacher step customizations attached to it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::entity::{Entity, Patch};

// ─── Activity ────────────────────────────────────────────────────────────────

/// A curriculum activity children can be assigned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
  pub id:   i64,
  pub name: String,
  pub date: NaiveDate,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActivityPatch {
  pub name: Option<String>,
  pub date: Option<NaiveDate>,
}

/// External representation of an [`Activity`].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityView {
  pub id:   i64,
  pub name: String,
  pub date: NaiveDate,
}

impl Entity for Activity {
  const NAME: &'static str = "activities";
  const REQUIRED: &'static [&'static str] = &["name", "date"];
  type Patch = ActivityPatch;
  type View = ActivityView;

  fn id(&self) -> i64 { self.id }

  fn view(&self) -> ActivityView {
    ActivityView { id: self.id, name: self.name.clone(), date: self.date }
  }
}

impl Patch for ActivityPatch {
  fn has(&self, field: &str) -> bool {
    match field {
      "name" => self.name.is_some(),
      "date" => self.date.is_some(),
      _ => false,
    }
  }
}

// ─── CustomStep ──────────────────────────────────────────────────────────────

/// A teacher's reworked step list for one activity. The `steps` payload is an
/// opaque JSON array; only clients interpret it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomStep {
  pub id:          i64,
  pub activity_id: i64,
  pub teacher_id:  String,
  pub steps:       serde_json::Value,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomStepPatch {
  pub activity_id: Option<i64>,
  pub teacher_id:  Option<String>,
  pub steps:       Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomStepView {
  pub id:          i64,
  pub activity_id: i64,
  pub teacher_id:  String,
  pub steps:       serde_json::Value,
}

impl Entity for CustomStep {
  const NAME: &'static str = "custom_steps";
  const REQUIRED: &'static [&'static str] =
    &["activity_id", "teacher_id", "steps"];
  type Patch = CustomStepPatch;
  type View = CustomStepView;

  fn id(&self) -> i64 { self.id }

  fn view(&self) -> CustomStepView {
    CustomStepView {
      id:          self.id,
      activity_id: self.activity_id,
      teacher_id:  self.teacher_id.clone(),
      steps:       self.steps.clone(),
    }
  }
}

impl Patch for CustomStepPatch {
  fn has(&self, field: &str) -> bool {
    match field {
      "activity_id" => self.activity_id.is_some(),
      "teacher_id" => self.teacher_id.is_some(),
      "steps" => self.steps.is_some(),
      _ => false,
    }
  }
}
