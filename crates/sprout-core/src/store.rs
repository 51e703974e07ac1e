//! Store traits implemented by storage backends (e.g. `sprout-store-sqlite`).
//!
//! Higher layers (`sprout-api`) depend on these abstractions, not on any
//! concrete backend. All methods return `Send` futures so the traits can be
//! used in multi-threaded async runtimes (tokio with `axum`).

use std::future::Future;

use crate::{
  activity::{Activity, CustomStep},
  checklist::{BulkAssign, Checklist, ChecklistItem},
  child::Child,
  entity::Entity,
  notification::Notification,
  planning::{PlannedActivity, Planning},
  suggestion::FollowUpSuggestion,
  user::{NewUser, User},
};

/// The error type shared by every operation on one backend.
pub trait StoreBackend: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;
}

// ─── Generic CRUD ────────────────────────────────────────────────────────────

/// Uniform persistence operations for one entity type.
///
/// A backend implements this once, generically over its own per-entity table
/// descriptors — the per-entity configuration lives in data, not in
/// duplicated code.
pub trait CrudStore<E: Entity>: StoreBackend {
  /// Every row, unfiltered and unpaginated.
  fn list(
    &self,
  ) -> impl Future<Output = Result<Vec<E>, Self::Error>> + Send + '_;

  /// Fetch by primary key. `None` if absent.
  fn find(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<E>, Self::Error>> + Send + '_;

  /// Insert a validated payload and return the stored row, with column
  /// defaults applied.
  fn insert(
    &self,
    patch: E::Patch,
  ) -> impl Future<Output = Result<E, Self::Error>> + Send + '_;

  /// Apply the supplied fields to an existing row and return the result.
  /// `None` if the row does not exist; an empty patch is a plain re-read.
  fn update(
    &self,
    id: i64,
    patch: E::Patch,
  ) -> impl Future<Output = Result<Option<E>, Self::Error>> + Send + '_;

  /// Hard-delete by primary key. Returns whether a row was removed.
  fn delete(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}

// ─── Tracker store ───────────────────────────────────────────────────────────

/// The full resource surface plus the two operations that fall outside the
/// uniform CRUD shape.
pub trait TrackerStore:
  CrudStore<Activity>
  + CrudStore<Child>
  + CrudStore<Checklist>
  + CrudStore<ChecklistItem>
  + CrudStore<CustomStep>
  + CrudStore<FollowUpSuggestion>
  + CrudStore<Planning>
  + CrudStore<PlannedActivity>
  + CrudStore<Notification>
{
  /// Create one pending checklist item per child in `input`, atomically:
  /// either every row lands or none does.
  fn bulk_assign(
    &self,
    input: BulkAssign,
  ) -> impl Future<Output = Result<Vec<ChecklistItem>, Self::Error>> + Send + '_;

  /// All planned activities belonging to one planning.
  fn planned_for(
    &self,
    planning_id: i64,
  ) -> impl Future<Output = Result<Vec<PlannedActivity>, Self::Error>> + Send + '_;
}

// ─── Auth store ──────────────────────────────────────────────────────────────

/// Credential and token persistence backing `/login` and the bearer-token
/// check. Token plaintext is never stored; callers pass a digest.
pub trait AuthStore: StoreBackend {
  fn add_user(
    &self,
    input: NewUser,
  ) -> impl Future<Output = Result<User, Self::Error>> + Send + '_;

  fn find_user_by_email(
    &self,
    email: &str,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + '_;

  /// Persist a freshly minted token digest for `user_id`.
  fn add_token(
    &self,
    user_id: i64,
    token_hash: &str,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Resolve a token digest back to its owner. `None` means the credential
  /// is invalid.
  fn user_for_token(
    &self,
    token_hash: &str,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + '_;
}
