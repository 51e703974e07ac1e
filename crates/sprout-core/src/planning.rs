//! Plannings and the scheduled activities that belong to them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  activity::{Activity, ActivityView},
  entity::{Entity, Patch},
};

// ─── Planning ────────────────────────────────────────────────────────────────

/// A named plan grouping scheduled activities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Planning {
  pub id:          i64,
  pub title:       String,
  pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlanningPatch {
  pub title:       Option<String>,
  pub description: Option<String>,
}

/// External representation of a [`Planning`]. `plannedActivities` appears
/// only when the caller asked for the has-many relation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanningView {
  pub id:                 i64,
  pub title:              String,
  pub description:        Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub planned_activities: Option<Vec<PlannedActivityView>>,
}

impl Planning {
  /// Projection with the pre-fetched planned-activity list embedded.
  pub fn view_with(
    &self,
    planned: Option<&[PlannedActivity]>,
  ) -> PlanningView {
    PlanningView {
      id:                 self.id,
      title:              self.title.clone(),
      description:        self.description.clone(),
      planned_activities: planned
        .map(|items| items.iter().map(PlannedActivity::view).collect()),
    }
  }
}

impl Entity for Planning {
  const NAME: &'static str = "plannings";
  const REQUIRED: &'static [&'static str] = &["title"];
  type Patch = PlanningPatch;
  type View = PlanningView;

  fn id(&self) -> i64 { self.id }

  fn view(&self) -> PlanningView { self.view_with(None) }
}

impl Patch for PlanningPatch {
  fn has(&self, field: &str) -> bool {
    match field {
      "title" => self.title.is_some(),
      "description" => self.description.is_some(),
      _ => false,
    }
  }
}

// ─── PlannedActivity ─────────────────────────────────────────────────────────

/// One activity scheduled inside a planning, with an optional reminder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannedActivity {
  pub id:             i64,
  pub planning_id:    i64,
  pub activity_id:    i64,
  pub scheduled_date: DateTime<Utc>,
  pub scheduled_time: Option<String>,
  pub reminder:       bool,
  pub completed:      bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlannedActivityPatch {
  pub planning_id:    Option<i64>,
  pub activity_id:    Option<i64>,
  pub scheduled_date: Option<DateTime<Utc>>,
  pub scheduled_time: Option<String>,
  pub reminder:       Option<bool>,
  pub completed:      Option<bool>,
}

/// External representation of a [`PlannedActivity`].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedActivityView {
  pub id:             i64,
  pub planning_id:    i64,
  pub activity_id:    i64,
  pub scheduled_date: DateTime<Utc>,
  pub scheduled_time: Option<String>,
  pub reminder:       bool,
  pub completed:      bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub activity:       Option<ActivityView>,
}

impl PlannedActivity {
  /// Projection with the pre-fetched activity embedded.
  pub fn view_with(&self, activity: Option<&Activity>) -> PlannedActivityView {
    PlannedActivityView {
      id:             self.id,
      planning_id:    self.planning_id,
      activity_id:    self.activity_id,
      scheduled_date: self.scheduled_date,
      scheduled_time: self.scheduled_time.clone(),
      reminder:       self.reminder,
      completed:      self.completed,
      activity:       activity.map(Activity::view),
    }
  }
}

impl Entity for PlannedActivity {
  const NAME: &'static str = "planned_activities";
  const REQUIRED: &'static [&'static str] =
    &["planning_id", "activity_id", "scheduled_date"];
  type Patch = PlannedActivityPatch;
  type View = PlannedActivityView;

  fn id(&self) -> i64 { self.id }

  fn view(&self) -> PlannedActivityView { self.view_with(None) }
}

impl Patch for PlannedActivityPatch {
  fn has(&self, field: &str) -> bool {
    match field {
      "planning_id" => self.planning_id.is_some(),
      "activity_id" => self.activity_id.is_some(),
      "scheduled_date" => self.scheduled_date.is_some(),
      "scheduled_time" => self.scheduled_time.is_some(),
      "reminder" => self.reminder.is_some(),
      "completed" => self.completed.is_some(),
      _ => false,
    }
  }
}
