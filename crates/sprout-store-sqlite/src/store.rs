//! [`SqliteStore`] — the SQLite implementation of the Sprout store traits.
//!
//! One generic [`CrudStore`] impl covers every entity; the SQL text is built
//! from the [`Table`] descriptor at the call site. Only the two operations
//! outside the uniform CRUD shape (bulk assign, per-planning listing) and the
//! auth queries are written out by hand.

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use sprout_core::{
  checklist::{BulkAssign, ChecklistItem},
  planning::PlannedActivity,
  store::{AuthStore, CrudStore, StoreBackend, TrackerStore},
  user::{NewUser, User},
};

use crate::{
  Error, Result,
  encode::encode_dt,
  schema::SCHEMA,
  table::Table,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Sprout tracking store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

/// `SELECT id, <columns> FROM <table>` for one entity.
fn select_sql<E: Table>() -> String {
  format!("SELECT id, {} FROM {}", E::COLUMNS.join(", "), E::NAME)
}

// ─── Generic CRUD impl ───────────────────────────────────────────────────────

impl StoreBackend for SqliteStore {
  type Error = Error;
}

impl<E: Table> CrudStore<E> for SqliteStore {
  async fn list(&self) -> Result<Vec<E>> {
    let sql = select_sql::<E>();

    let raws: Vec<E::Raw> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map([], |row| E::read_row(row))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(E::decode).collect()
  }

  async fn find(&self, id: i64) -> Result<Option<E>> {
    let sql = format!("{} WHERE id = ?1", select_sql::<E>());

    let raw: Option<E::Raw> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(&sql, rusqlite::params![id], |row| E::read_row(row))
            .optional()?,
        )
      })
      .await?;

    raw.map(E::decode).transpose()
  }

  async fn insert(&self, patch: E::Patch) -> Result<E> {
    let binds = E::bind(&patch);
    let columns: Vec<&str> = binds.iter().map(|(c, _)| *c).collect();
    let placeholders: Vec<String> =
      (1..=binds.len()).map(|i| format!("?{i}")).collect();

    let insert_sql = format!(
      "INSERT INTO {} ({}) VALUES ({})",
      E::NAME,
      columns.join(", "),
      placeholders.join(", "),
    );
    let read_sql = format!("{} WHERE id = ?1", select_sql::<E>());
    let values: Vec<rusqlite::types::Value> =
      binds.into_iter().map(|(_, v)| v).collect();

    let raw: E::Raw = self
      .conn
      .call(move |conn| {
        conn.execute(&insert_sql, rusqlite::params_from_iter(values))?;
        let id = conn.last_insert_rowid();
        Ok(conn.query_row(&read_sql, rusqlite::params![id], |row| {
          E::read_row(row)
        })?)
      })
      .await?;

    E::decode(raw)
  }

  async fn update(&self, id: i64, patch: E::Patch) -> Result<Option<E>> {
    let binds = E::bind(&patch);

    // An empty patch degenerates to a re-read; id is always ?1.
    let update_sql = (!binds.is_empty()).then(|| {
      let set_list: Vec<String> = binds
        .iter()
        .enumerate()
        .map(|(i, (column, _))| format!("{column} = ?{}", i + 2))
        .collect();
      format!("UPDATE {} SET {} WHERE id = ?1", E::NAME, set_list.join(", "))
    });
    let read_sql = format!("{} WHERE id = ?1", select_sql::<E>());
    let values: Vec<rusqlite::types::Value> =
      binds.into_iter().map(|(_, v)| v).collect();

    let raw: Option<E::Raw> = self
      .conn
      .call(move |conn| {
        if let Some(sql) = update_sql {
          let mut params = Vec::with_capacity(values.len() + 1);
          params.push(rusqlite::types::Value::Integer(id));
          params.extend(values);
          conn.execute(&sql, rusqlite::params_from_iter(params))?;
        }
        Ok(
          conn
            .query_row(&read_sql, rusqlite::params![id], |row| {
              E::read_row(row)
            })
            .optional()?,
        )
      })
      .await?;

    raw.map(E::decode).transpose()
  }

  async fn delete(&self, id: i64) -> Result<bool> {
    let sql = format!("DELETE FROM {} WHERE id = ?1", E::NAME);

    let changed = self
      .conn
      .call(move |conn| Ok(conn.execute(&sql, rusqlite::params![id])?))
      .await?;

    Ok(changed > 0)
  }
}

// ─── TrackerStore impl ───────────────────────────────────────────────────────

impl TrackerStore for SqliteStore {
  async fn bulk_assign(
    &self,
    input: BulkAssign,
  ) -> Result<Vec<ChecklistItem>> {
    let assigned_str = encode_dt(Utc::now());
    let due_str = input.due_date.map(encode_dt);
    let steps_json = serde_json::to_string(&input.custom_steps_used)?;
    let observation = r#"{"completed":false}"#;
    let read_sql = format!("{} WHERE id = ?1", select_sql::<ChecklistItem>());
    let activity_id = input.activity_id;
    let child_ids = input.child_ids;

    let raws = self
      .conn
      .call(move |conn| {
        // One transaction: either every child gets a row or none does.
        let tx = conn.transaction()?;
        let mut created = Vec::with_capacity(child_ids.len());
        for child_id in &child_ids {
          tx.execute(
            "INSERT INTO checklist_items (
               child_id, activity_id, assigned_date, due_date, status,
               home_observation, school_observation, custom_steps_used
             ) VALUES (?1, ?2, ?3, ?4, 'pending', ?5, ?5, ?6)",
            rusqlite::params![
              child_id,
              activity_id,
              assigned_str,
              due_str,
              observation,
              steps_json,
            ],
          )?;
          created.push(tx.last_insert_rowid());
        }
        let mut rows = Vec::with_capacity(created.len());
        for id in created {
          rows.push(tx.query_row(&read_sql, rusqlite::params![id], |row| {
            ChecklistItem::read_row(row)
          })?);
        }
        tx.commit()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(ChecklistItem::decode).collect()
  }

  async fn planned_for(
    &self,
    planning_id: i64,
  ) -> Result<Vec<PlannedActivity>> {
    let sql =
      format!("{} WHERE planning_id = ?1", select_sql::<PlannedActivity>());

    let raws = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params![planning_id], |row| {
            PlannedActivity::read_row(row)
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(PlannedActivity::decode).collect()
  }
}

// ─── AuthStore impl ──────────────────────────────────────────────────────────

const USER_SELECT: &str = "SELECT id, name, email, password_hash FROM users";

fn user_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<User> {
  Ok(User {
    id:            row.get(0)?,
    name:          row.get(1)?,
    email:         row.get(2)?,
    password_hash: row.get(3)?,
  })
}

impl AuthStore for SqliteStore {
  async fn add_user(&self, input: NewUser) -> Result<User> {
    let NewUser { name, email, password_hash } = input;

    let user = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO users (name, email, password_hash) VALUES (?1, ?2, ?3)",
          rusqlite::params![name, email, password_hash],
        )?;
        let id = conn.last_insert_rowid();
        Ok(conn.query_row(
          &format!("{USER_SELECT} WHERE id = ?1"),
          rusqlite::params![id],
          user_from_row,
        )?)
      })
      .await?;

    Ok(user)
  }

  fn find_user_by_email(
    &self,
    email: &str,
  ) -> impl std::future::Future<Output = Result<Option<User>>> + Send + '_ {
    let email = email.to_owned();

    async move {
      let user = self
        .conn
        .call(move |conn| {
          Ok(
            conn
              .query_row(
                &format!("{USER_SELECT} WHERE email = ?1"),
                rusqlite::params![email],
                user_from_row,
              )
              .optional()?,
          )
        })
        .await?;

      Ok(user)
    }
  }

  fn add_token(
    &self,
    user_id: i64,
    token_hash: &str,
  ) -> impl std::future::Future<Output = Result<()>> + Send + '_ {
    let token_hash = token_hash.to_owned();
    let created_at = encode_dt(Utc::now());

    async move {
      self
        .conn
        .call(move |conn| {
          conn.execute(
            "INSERT INTO api_tokens (user_id, token_hash, created_at)
             VALUES (?1, ?2, ?3)",
            rusqlite::params![user_id, token_hash, created_at],
          )?;
          Ok(())
        })
        .await?;

      Ok(())
    }
  }

  fn user_for_token(
    &self,
    token_hash: &str,
  ) -> impl std::future::Future<Output = Result<Option<User>>> + Send + '_ {
    let token_hash = token_hash.to_owned();

    async move {
      let user = self
        .conn
        .call(move |conn| {
          Ok(
            conn
              .query_row(
                "SELECT u.id, u.name, u.email, u.password_hash
                 FROM users u
                 JOIN api_tokens t ON t.user_id = u.id
                 WHERE t.token_hash = ?1",
                rusqlite::params![token_hash],
                user_from_row,
              )
              .optional()?,
          )
        })
        .await?;

      Ok(user)
    }
  }
}
