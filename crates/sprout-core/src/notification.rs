//! Notifications — plain messages with a caller-supplied creation time.
//!
//! Unlike every other table, notifications carry no bookkeeping timestamps;
//! `created_at` here is ordinary data the caller may set or omit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::{Entity, Patch};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
  pub id:         i64,
  pub message:    String,
  pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotificationPatch {
  pub message:    Option<String>,
  pub created_at: Option<DateTime<Utc>>,
}

/// External representation of a [`Notification`].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationView {
  pub id:         i64,
  pub message:    String,
  pub created_at: Option<DateTime<Utc>>,
}

impl Entity for Notification {
  const NAME: &'static str = "notifications";
  const REQUIRED: &'static [&'static str] = &["message"];
  type Patch = NotificationPatch;
  type View = NotificationView;

  fn id(&self) -> i64 { self.id }

  fn view(&self) -> NotificationView {
    NotificationView {
      id:         self.id,
      message:    self.message.clone(),
      created_at: self.created_at,
    }
  }
}

impl Patch for NotificationPatch {
  fn has(&self, field: &str) -> bool {
    match field {
      "message" => self.message.is_some(),
      "created_at" => self.created_at.is_some(),
      _ => false,
    }
  }
}
