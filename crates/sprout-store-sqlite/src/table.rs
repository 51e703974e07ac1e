//! Per-entity SQL descriptors consumed by the generic CRUD engine.
//!
//! Each entity declares its data columns, a raw row type read inside the
//! connection closure, a decoder into the domain type, and a binder that
//! turns the fields present in a patch into SQL parameters. The engine in
//! [`crate::store`] builds every statement from this description.

use rusqlite::{Row, types::Value};
use sprout_core::{
  activity::{Activity, CustomStep},
  checklist::{Checklist, ChecklistItem},
  child::Child,
  entity::Entity,
  notification::Notification,
  planning::{PlannedActivity, Planning},
  suggestion::FollowUpSuggestion,
};

use crate::{
  Result,
  encode::{
    decode_date, decode_dt, decode_dt_opt, decode_json, decode_json_opt,
    encode_date, encode_dt, encode_json, flag, integer, text,
  },
};

/// SQL-level description of one entity's table.
pub(crate) trait Table: Entity {
  /// Raw column values read inside the connection closure; decoded into the
  /// domain type outside it.
  type Raw: Send + 'static;

  /// Data columns in SELECT/bind order, primary key excluded.
  const COLUMNS: &'static [&'static str];

  /// Read one row laid out as `id, COLUMNS...`.
  fn read_row(row: &Row<'_>) -> rusqlite::Result<Self::Raw>;

  fn decode(raw: Self::Raw) -> Result<Self>;

  /// Bind the fields present in `patch`, in column order. Absent fields are
  /// left to their SQL column defaults.
  fn bind(patch: &Self::Patch) -> Vec<(&'static str, Value)>;
}

// ─── Activity ────────────────────────────────────────────────────────────────

pub(crate) struct RawActivity {
  pub id:   i64,
  pub name: String,
  pub date: String,
}

impl Table for Activity {
  type Raw = RawActivity;
  const COLUMNS: &'static [&'static str] = &["name", "date"];

  fn read_row(row: &Row<'_>) -> rusqlite::Result<RawActivity> {
    Ok(RawActivity { id: row.get(0)?, name: row.get(1)?, date: row.get(2)? })
  }

  fn decode(raw: RawActivity) -> Result<Self> {
    Ok(Activity { id: raw.id, name: raw.name, date: decode_date(&raw.date)? })
  }

  fn bind(patch: &Self::Patch) -> Vec<(&'static str, Value)> {
    let mut binds = Vec::new();
    if let Some(name) = &patch.name {
      binds.push(("name", text(name)));
    }
    if let Some(date) = patch.date {
      binds.push(("date", Value::Text(encode_date(date))));
    }
    binds
  }
}

// ─── Child ───────────────────────────────────────────────────────────────────

pub(crate) struct RawChild {
  pub id:   i64,
  pub name: String,
  pub age:  i64,
}

impl Table for Child {
  type Raw = RawChild;
  const COLUMNS: &'static [&'static str] = &["name", "age"];

  fn read_row(row: &Row<'_>) -> rusqlite::Result<RawChild> {
    Ok(RawChild { id: row.get(0)?, name: row.get(1)?, age: row.get(2)? })
  }

  fn decode(raw: RawChild) -> Result<Self> {
    Ok(Child { id: raw.id, name: raw.name, age: raw.age })
  }

  fn bind(patch: &Self::Patch) -> Vec<(&'static str, Value)> {
    let mut binds = Vec::new();
    if let Some(name) = &patch.name {
      binds.push(("name", text(name)));
    }
    if let Some(age) = patch.age {
      binds.push(("age", integer(age)));
    }
    binds
  }
}

// ─── Checklist ───────────────────────────────────────────────────────────────

pub(crate) struct RawChecklist {
  pub id:         i64,
  pub name:       String,
  pub is_checked: i64,
}

impl Table for Checklist {
  type Raw = RawChecklist;
  const COLUMNS: &'static [&'static str] = &["name", "is_checked"];

  fn read_row(row: &Row<'_>) -> rusqlite::Result<RawChecklist> {
    Ok(RawChecklist {
      id:         row.get(0)?,
      name:       row.get(1)?,
      is_checked: row.get(2)?,
    })
  }

  fn decode(raw: RawChecklist) -> Result<Self> {
    Ok(Checklist {
      id:         raw.id,
      name:       raw.name,
      is_checked: raw.is_checked != 0,
    })
  }

  fn bind(patch: &Self::Patch) -> Vec<(&'static str, Value)> {
    let mut binds = Vec::new();
    if let Some(name) = &patch.name {
      binds.push(("name", text(name)));
    }
    if let Some(is_checked) = patch.is_checked {
      binds.push(("is_checked", flag(is_checked)));
    }
    binds
  }
}

// ─── ChecklistItem ───────────────────────────────────────────────────────────

pub(crate) struct RawChecklistItem {
  pub id:                 i64,
  pub child_id:           i64,
  pub activity_id:        i64,
  pub assigned_date:      Option<String>,
  pub due_date:           Option<String>,
  pub status:             String,
  pub home_observation:   Option<String>,
  pub school_observation: Option<String>,
  pub custom_steps_used:  Option<String>,
}

impl Table for ChecklistItem {
  type Raw = RawChecklistItem;
  const COLUMNS: &'static [&'static str] = &[
    "child_id",
    "activity_id",
    "assigned_date",
    "due_date",
    "status",
    "home_observation",
    "school_observation",
    "custom_steps_used",
  ];

  fn read_row(row: &Row<'_>) -> rusqlite::Result<RawChecklistItem> {
    Ok(RawChecklistItem {
      id:                 row.get(0)?,
      child_id:           row.get(1)?,
      activity_id:        row.get(2)?,
      assigned_date:      row.get(3)?,
      due_date:           row.get(4)?,
      status:             row.get(5)?,
      home_observation:   row.get(6)?,
      school_observation: row.get(7)?,
      custom_steps_used:  row.get(8)?,
    })
  }

  fn decode(raw: RawChecklistItem) -> Result<Self> {
    Ok(ChecklistItem {
      id:                 raw.id,
      child_id:           raw.child_id,
      activity_id:        raw.activity_id,
      assigned_date:      decode_dt_opt(raw.assigned_date.as_deref())?,
      due_date:           decode_dt_opt(raw.due_date.as_deref())?,
      status:             raw.status,
      home_observation:   decode_json_opt(raw.home_observation.as_deref())?,
      school_observation: decode_json_opt(raw.school_observation.as_deref())?,
      custom_steps_used:  decode_json_opt(raw.custom_steps_used.as_deref())?,
    })
  }

  fn bind(patch: &Self::Patch) -> Vec<(&'static str, Value)> {
    let mut binds = Vec::new();
    if let Some(child_id) = patch.child_id {
      binds.push(("child_id", integer(child_id)));
    }
    if let Some(activity_id) = patch.activity_id {
      binds.push(("activity_id", integer(activity_id)));
    }
    if let Some(assigned_date) = patch.assigned_date {
      binds.push(("assigned_date", Value::Text(encode_dt(assigned_date))));
    }
    if let Some(due_date) = patch.due_date {
      binds.push(("due_date", Value::Text(encode_dt(due_date))));
    }
    if let Some(status) = &patch.status {
      binds.push(("status", text(status)));
    }
    if let Some(v) = &patch.home_observation {
      binds.push(("home_observation", Value::Text(encode_json(v))));
    }
    if let Some(v) = &patch.school_observation {
      binds.push(("school_observation", Value::Text(encode_json(v))));
    }
    if let Some(v) = &patch.custom_steps_used {
      binds.push(("custom_steps_used", Value::Text(encode_json(v))));
    }
    binds
  }
}

// ─── CustomStep ──────────────────────────────────────────────────────────────

pub(crate) struct RawCustomStep {
  pub id:          i64,
  pub activity_id: i64,
  pub teacher_id:  String,
  pub steps:       String,
}

impl Table for CustomStep {
  type Raw = RawCustomStep;
  const COLUMNS: &'static [&'static str] =
    &["activity_id", "teacher_id", "steps"];

  fn read_row(row: &Row<'_>) -> rusqlite::Result<RawCustomStep> {
    Ok(RawCustomStep {
      id:          row.get(0)?,
      activity_id: row.get(1)?,
      teacher_id:  row.get(2)?,
      steps:       row.get(3)?,
    })
  }

  fn decode(raw: RawCustomStep) -> Result<Self> {
    Ok(CustomStep {
      id:          raw.id,
      activity_id: raw.activity_id,
      teacher_id:  raw.teacher_id,
      steps:       decode_json(&raw.steps)?,
    })
  }

  fn bind(patch: &Self::Patch) -> Vec<(&'static str, Value)> {
    let mut binds = Vec::new();
    if let Some(activity_id) = patch.activity_id {
      binds.push(("activity_id", integer(activity_id)));
    }
    if let Some(teacher_id) = &patch.teacher_id {
      binds.push(("teacher_id", text(teacher_id)));
    }
    if let Some(steps) = &patch.steps {
      binds.push(("steps", Value::Text(encode_json(steps))));
    }
    binds
  }
}

// ─── FollowUpSuggestion ──────────────────────────────────────────────────────

pub(crate) struct RawFollowUpSuggestion {
  pub id:                    i64,
  pub child_id:              i64,
  pub completed_activity_id: i64,
  pub suggested_activity_id: i64,
  pub auto_assigned:         i64,
  pub assigned_date:         Option<String>,
}

impl Table for FollowUpSuggestion {
  type Raw = RawFollowUpSuggestion;
  const COLUMNS: &'static [&'static str] = &[
    "child_id",
    "completed_activity_id",
    "suggested_activity_id",
    "auto_assigned",
    "assigned_date",
  ];

  fn read_row(row: &Row<'_>) -> rusqlite::Result<RawFollowUpSuggestion> {
    Ok(RawFollowUpSuggestion {
      id:                    row.get(0)?,
      child_id:              row.get(1)?,
      completed_activity_id: row.get(2)?,
      suggested_activity_id: row.get(3)?,
      auto_assigned:         row.get(4)?,
      assigned_date:         row.get(5)?,
    })
  }

  fn decode(raw: RawFollowUpSuggestion) -> Result<Self> {
    Ok(FollowUpSuggestion {
      id:                    raw.id,
      child_id:              raw.child_id,
      completed_activity_id: raw.completed_activity_id,
      suggested_activity_id: raw.suggested_activity_id,
      auto_assigned:         raw.auto_assigned != 0,
      assigned_date:         decode_dt_opt(raw.assigned_date.as_deref())?,
    })
  }

  fn bind(patch: &Self::Patch) -> Vec<(&'static str, Value)> {
    let mut binds = Vec::new();
    if let Some(child_id) = patch.child_id {
      binds.push(("child_id", integer(child_id)));
    }
    if let Some(id) = patch.completed_activity_id {
      binds.push(("completed_activity_id", integer(id)));
    }
    if let Some(id) = patch.suggested_activity_id {
      binds.push(("suggested_activity_id", integer(id)));
    }
    if let Some(auto_assigned) = patch.auto_assigned {
      binds.push(("auto_assigned", flag(auto_assigned)));
    }
    if let Some(assigned_date) = patch.assigned_date {
      binds.push(("assigned_date", Value::Text(encode_dt(assigned_date))));
    }
    binds
  }
}

// ─── Planning ────────────────────────────────────────────────────────────────

pub(crate) struct RawPlanning {
  pub id:          i64,
  pub title:       String,
  pub description: Option<String>,
}

impl Table for Planning {
  type Raw = RawPlanning;
  const COLUMNS: &'static [&'static str] = &["title", "description"];

  fn read_row(row: &Row<'_>) -> rusqlite::Result<RawPlanning> {
    Ok(RawPlanning {
      id:          row.get(0)?,
      title:       row.get(1)?,
      description: row.get(2)?,
    })
  }

  fn decode(raw: RawPlanning) -> Result<Self> {
    Ok(Planning {
      id:          raw.id,
      title:       raw.title,
      description: raw.description,
    })
  }

  fn bind(patch: &Self::Patch) -> Vec<(&'static str, Value)> {
    let mut binds = Vec::new();
    if let Some(title) = &patch.title {
      binds.push(("title", text(title)));
    }
    if let Some(description) = &patch.description {
      binds.push(("description", text(description)));
    }
    binds
  }
}

// ─── PlannedActivity ─────────────────────────────────────────────────────────

pub(crate) struct RawPlannedActivity {
  pub id:             i64,
  pub planning_id:    i64,
  pub activity_id:    i64,
  pub scheduled_date: String,
  pub scheduled_time: Option<String>,
  pub reminder:       i64,
  pub completed:      i64,
}

impl Table for PlannedActivity {
  type Raw = RawPlannedActivity;
  const COLUMNS: &'static [&'static str] = &[
    "planning_id",
    "activity_id",
    "scheduled_date",
    "scheduled_time",
    "reminder",
    "completed",
  ];

  fn read_row(row: &Row<'_>) -> rusqlite::Result<RawPlannedActivity> {
    Ok(RawPlannedActivity {
      id:             row.get(0)?,
      planning_id:    row.get(1)?,
      activity_id:    row.get(2)?,
      scheduled_date: row.get(3)?,
      scheduled_time: row.get(4)?,
      reminder:       row.get(5)?,
      completed:      row.get(6)?,
    })
  }

  fn decode(raw: RawPlannedActivity) -> Result<Self> {
    Ok(PlannedActivity {
      id:             raw.id,
      planning_id:    raw.planning_id,
      activity_id:    raw.activity_id,
      scheduled_date: decode_dt(&raw.scheduled_date)?,
      scheduled_time: raw.scheduled_time,
      reminder:       raw.reminder != 0,
      completed:      raw.completed != 0,
    })
  }

  fn bind(patch: &Self::Patch) -> Vec<(&'static str, Value)> {
    let mut binds = Vec::new();
    if let Some(planning_id) = patch.planning_id {
      binds.push(("planning_id", integer(planning_id)));
    }
    if let Some(activity_id) = patch.activity_id {
      binds.push(("activity_id", integer(activity_id)));
    }
    if let Some(scheduled_date) = patch.scheduled_date {
      binds.push(("scheduled_date", Value::Text(encode_dt(scheduled_date))));
    }
    if let Some(scheduled_time) = &patch.scheduled_time {
      binds.push(("scheduled_time", text(scheduled_time)));
    }
    if let Some(reminder) = patch.reminder {
      binds.push(("reminder", flag(reminder)));
    }
    if let Some(completed) = patch.completed {
      binds.push(("completed", flag(completed)));
    }
    binds
  }
}

// ─── Notification ────────────────────────────────────────────────────────────

pub(crate) struct RawNotification {
  pub id:         i64,
  pub message:    String,
  pub created_at: Option<String>,
}

impl Table for Notification {
  type Raw = RawNotification;
  const COLUMNS: &'static [&'static str] = &["message", "created_at"];

  fn read_row(row: &Row<'_>) -> rusqlite::Result<RawNotification> {
    Ok(RawNotification {
      id:         row.get(0)?,
      message:    row.get(1)?,
      created_at: row.get(2)?,
    })
  }

  fn decode(raw: RawNotification) -> Result<Self> {
    Ok(Notification {
      id:         raw.id,
      message:    raw.message,
      created_at: decode_dt_opt(raw.created_at.as_deref())?,
    })
  }

  fn bind(patch: &Self::Patch) -> Vec<(&'static str, Value)> {
    let mut binds = Vec::new();
    if let Some(message) = &patch.message {
      binds.push(("message", text(message)));
    }
    if let Some(created_at) = patch.created_at {
      binds.push(("created_at", Value::Text(encode_dt(created_at))));
    }
    binds
  }
}
