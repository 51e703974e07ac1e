//! Accounts that can authenticate against the API.
//!
//! Users are provisioned out of band (server CLI), not exposed as a CRUD
//! resource. The password hash is an argon2 PHC string and never leaves the
//! process.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
  pub id:            i64,
  pub name:          String,
  pub email:         String,
  pub password_hash: String,
}

/// Input to [`crate::store::AuthStore::add_user`]. The hash is computed by
/// the caller; this crate has no argon2 dependency.
#[derive(Debug, Clone)]
pub struct NewUser {
  pub name:          String,
  pub email:         String,
  pub password_hash: String,
}

/// External representation of a [`User`] — the password hash is omitted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
  pub id:    i64,
  pub name:  String,
  pub email: String,
}

impl User {
  pub fn view(&self) -> UserView {
    UserView {
      id:    self.id,
      name:  self.name.clone(),
      email: self.email.clone(),
    }
  }
}
