//! Follow-up suggestions — a just-completed activity linked to a suggested
//! next one for a specific child.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  activity::{Activity, ActivityView},
  child::{Child, ChildView},
  entity::{Entity, Patch},
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowUpSuggestion {
  pub id:                    i64,
  pub child_id:              i64,
  pub completed_activity_id: i64,
  pub suggested_activity_id: i64,
  pub auto_assigned:         bool,
  pub assigned_date:         Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FollowUpSuggestionPatch {
  pub child_id:              Option<i64>,
  pub completed_activity_id: Option<i64>,
  pub suggested_activity_id: Option<i64>,
  pub auto_assigned:         Option<bool>,
  pub assigned_date:         Option<DateTime<Utc>>,
}

/// External representation of a [`FollowUpSuggestion`]. The three relation
/// keys appear only when the caller asked for them.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowUpSuggestionView {
  pub id:                    i64,
  pub child_id:              i64,
  pub completed_activity_id: i64,
  pub suggested_activity_id: i64,
  pub auto_assigned:         bool,
  pub assigned_date:         Option<DateTime<Utc>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub child:                 Option<ChildView>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub completed_activity:    Option<ActivityView>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub suggested_activity:    Option<ActivityView>,
}

impl FollowUpSuggestion {
  /// Projection with pre-fetched relations embedded.
  pub fn view_with(
    &self,
    child: Option<&Child>,
    completed: Option<&Activity>,
    suggested: Option<&Activity>,
  ) -> FollowUpSuggestionView {
    FollowUpSuggestionView {
      id:                    self.id,
      child_id:              self.child_id,
      completed_activity_id: self.completed_activity_id,
      suggested_activity_id: self.suggested_activity_id,
      auto_assigned:         self.auto_assigned,
      assigned_date:         self.assigned_date,
      child:                 child.map(Child::view),
      completed_activity:    completed.map(Activity::view),
      suggested_activity:    suggested.map(Activity::view),
    }
  }
}

impl Entity for FollowUpSuggestion {
  const NAME: &'static str = "follow_up_suggestions";
  const REQUIRED: &'static [&'static str] =
    &["child_id", "completed_activity_id", "suggested_activity_id"];
  type Patch = FollowUpSuggestionPatch;
  type View = FollowUpSuggestionView;

  fn id(&self) -> i64 { self.id }

  fn view(&self) -> FollowUpSuggestionView {
    self.view_with(None, None, None)
  }
}

impl Patch for FollowUpSuggestionPatch {
  fn has(&self, field: &str) -> bool {
    match field {
      "child_id" => self.child_id.is_some(),
      "completed_activity_id" => self.completed_activity_id.is_some(),
      "suggested_activity_id" => self.suggested_activity_id.is_some(),
      "auto_assigned" => self.auto_assigned.is_some(),
      "assigned_date" => self.assigned_date.is_some(),
      _ => false,
    }
  }
}
