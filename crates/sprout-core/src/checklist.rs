//! Checklists and the per-child checklist items assigned from activities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  activity::{Activity, ActivityView},
  child::{Child, ChildView},
  entity::{Entity, Patch},
};

// ─── Checklist ───────────────────────────────────────────────────────────────

/// A free-standing toggle list, unrelated to any child or activity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Checklist {
  pub id:         i64,
  pub name:       String,
  pub is_checked: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChecklistPatch {
  pub name:       Option<String>,
  pub is_checked: Option<bool>,
}

/// External representation of a [`Checklist`].
///
/// `is_checked` keeps its snake_case name — the historical contract exposes
/// this one field unrenamed.
#[derive(Debug, Clone, Serialize)]
pub struct ChecklistView {
  pub id:         i64,
  pub name:       String,
  pub is_checked: bool,
}

impl Entity for Checklist {
  const NAME: &'static str = "checklists";
  const REQUIRED: &'static [&'static str] = &["name"];
  type Patch = ChecklistPatch;
  type View = ChecklistView;

  fn id(&self) -> i64 { self.id }

  fn view(&self) -> ChecklistView {
    ChecklistView {
      id:         self.id,
      name:       self.name.clone(),
      is_checked: self.is_checked,
    }
  }
}

impl Patch for ChecklistPatch {
  fn has(&self, field: &str) -> bool {
    match field {
      "name" => self.name.is_some(),
      "is_checked" => self.is_checked.is_some(),
      _ => false,
    }
  }
}

// ─── ChecklistItem ───────────────────────────────────────────────────────────

/// One activity assigned to one child, with observation blobs recorded from
/// home and school. The JSON fields are opaque to the relational layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChecklistItem {
  pub id:                 i64,
  pub child_id:           i64,
  pub activity_id:        i64,
  pub assigned_date:      Option<DateTime<Utc>>,
  pub due_date:           Option<DateTime<Utc>>,
  pub status:             String,
  pub home_observation:   Option<serde_json::Value>,
  pub school_observation: Option<serde_json::Value>,
  pub custom_steps_used:  Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChecklistItemPatch {
  pub child_id:           Option<i64>,
  pub activity_id:        Option<i64>,
  pub assigned_date:      Option<DateTime<Utc>>,
  pub due_date:           Option<DateTime<Utc>>,
  pub status:             Option<String>,
  pub home_observation:   Option<serde_json::Value>,
  pub school_observation: Option<serde_json::Value>,
  pub custom_steps_used:  Option<serde_json::Value>,
}

/// External representation of a [`ChecklistItem`]. The `child` and `activity`
/// keys appear only when the caller asked for those relations.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItemView {
  pub id:                 i64,
  pub child_id:           i64,
  pub activity_id:        i64,
  pub assigned_date:      Option<DateTime<Utc>>,
  pub due_date:           Option<DateTime<Utc>>,
  pub status:             String,
  pub home_observation:   Option<serde_json::Value>,
  pub school_observation: Option<serde_json::Value>,
  pub custom_steps_used:  Option<serde_json::Value>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub child:              Option<ChildView>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub activity:           Option<ActivityView>,
}

impl ChecklistItem {
  /// Projection with pre-fetched relations embedded. Relations the caller
  /// did not load stay `None` and are omitted from the serialized output.
  pub fn view_with(
    &self,
    child: Option<&Child>,
    activity: Option<&Activity>,
  ) -> ChecklistItemView {
    ChecklistItemView {
      id:                 self.id,
      child_id:           self.child_id,
      activity_id:        self.activity_id,
      assigned_date:      self.assigned_date,
      due_date:           self.due_date,
      status:             self.status.clone(),
      home_observation:   self.home_observation.clone(),
      school_observation: self.school_observation.clone(),
      custom_steps_used:  self.custom_steps_used.clone(),
      child:              child.map(Child::view),
      activity:           activity.map(Activity::view),
    }
  }
}

impl Entity for ChecklistItem {
  const NAME: &'static str = "checklist_items";
  const REQUIRED: &'static [&'static str] = &["child_id", "activity_id"];
  type Patch = ChecklistItemPatch;
  type View = ChecklistItemView;

  fn id(&self) -> i64 { self.id }

  fn view(&self) -> ChecklistItemView { self.view_with(None, None) }
}

impl Patch for ChecklistItemPatch {
  fn has(&self, field: &str) -> bool {
    match field {
      "child_id" => self.child_id.is_some(),
      "activity_id" => self.activity_id.is_some(),
      "assigned_date" => self.assigned_date.is_some(),
      "due_date" => self.due_date.is_some(),
      "status" => self.status.is_some(),
      "home_observation" => self.home_observation.is_some(),
      "school_observation" => self.school_observation.is_some(),
      "custom_steps_used" => self.custom_steps_used.is_some(),
      _ => false,
    }
  }
}

// ─── Bulk assign ─────────────────────────────────────────────────────────────

/// Input to [`crate::store::TrackerStore::bulk_assign`]: one activity fanned
/// out to a list of children.
#[derive(Debug, Clone, Deserialize)]
pub struct BulkAssign {
  pub child_ids:         Vec<i64>,
  pub activity_id:       i64,
  #[serde(default)]
  pub custom_steps_used: Vec<i64>,
  pub due_date:          Option<DateTime<Utc>>,
}
