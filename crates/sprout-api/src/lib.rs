//! JSON REST API for the Sprout tracking backend.
//!
//! Exposes an axum [`Router`] backed by any store implementing
//! [`TrackerStore`] + [`AuthStore`]. Every route except `/login` requires a
//! bearer token. Each resource gets the same five CRUD routes, instantiated
//! from the generic handlers in [`crud`]; the handful of endpoints with
//! relation embedding or bulk semantics have their own modules.

pub mod auth;
pub mod checklists;
pub mod crud;
pub mod error;
pub mod include;
pub mod items;
pub mod planned;
pub mod plannings;
pub mod suggestions;

pub use error::ApiError;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::{get, post},
};
use serde::Deserialize;
use sprout_core::{
  activity::{Activity, CustomStep},
  checklist::{Checklist, ChecklistItem},
  child::Child,
  notification::Notification,
  planning::{PlannedActivity, Planning},
  store::{AuthStore, TrackerStore},
  suggestion::FollowUpSuggestion,
};
use tower_http::trace::TraceLayer;

// ─── Configuration ───────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml`.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
}

// ─── Application state ───────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S> {
  pub store: Arc<S>,
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build the full API router for `state`.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: TrackerStore + AuthStore + Clone + Send + Sync + 'static,
{
  Router::new()
    .route("/login", post(auth::login::<S>))
    // Activities
    .route(
      "/activities",
      get(crud::list::<Activity, S>).post(crud::create::<Activity, S>),
    )
    .route(
      "/activities/{id}",
      get(crud::read::<Activity, S>)
        .put(crud::update::<Activity, S>)
        .patch(crud::update::<Activity, S>)
        .delete(crud::delete::<Activity, S>),
    )
    // Children
    .route(
      "/children",
      get(crud::list::<Child, S>).post(crud::create::<Child, S>),
    )
    .route(
      "/children/{id}",
      get(crud::read::<Child, S>)
        .put(crud::update::<Child, S>)
        .patch(crud::update::<Child, S>)
        .delete(crud::delete::<Child, S>),
    )
    // Checklists, plus the two special-case operations
    .route(
      "/checklists",
      get(crud::list::<Checklist, S>).post(crud::create::<Checklist, S>),
    )
    .route("/checklists/bulk-assign", post(checklists::bulk_assign::<S>))
    .route("/checklists/follow-up", post(checklists::follow_up::<S>))
    .route(
      "/checklists/{id}",
      get(crud::read::<Checklist, S>)
        .put(crud::update::<Checklist, S>)
        .patch(crud::update::<Checklist, S>)
        .delete(crud::delete::<Checklist, S>),
    )
    // Checklist items — reads embed relations on request
    .route(
      "/checklist_items",
      get(items::list::<S>).post(crud::create::<ChecklistItem, S>),
    )
    .route(
      "/checklist_items/{id}",
      get(items::read::<S>)
        .put(crud::update::<ChecklistItem, S>)
        .patch(crud::update::<ChecklistItem, S>)
        .delete(crud::delete::<ChecklistItem, S>),
    )
    // Custom steps
    .route(
      "/custom_steps",
      get(crud::list::<CustomStep, S>).post(crud::create::<CustomStep, S>),
    )
    .route(
      "/custom_steps/{id}",
      get(crud::read::<CustomStep, S>)
        .put(crud::update::<CustomStep, S>)
        .patch(crud::update::<CustomStep, S>)
        .delete(crud::delete::<CustomStep, S>),
    )
    // Follow-up suggestions — reads embed relations on request
    .route(
      "/follow_up_suggestions",
      get(suggestions::list::<S>)
        .post(crud::create::<FollowUpSuggestion, S>),
    )
    .route(
      "/follow_up_suggestions/{id}",
      get(suggestions::read::<S>)
        .put(crud::update::<FollowUpSuggestion, S>)
        .patch(crud::update::<FollowUpSuggestion, S>)
        .delete(crud::delete::<FollowUpSuggestion, S>),
    )
    // Plannings — reads embed the has-many planned-activity list on request
    .route(
      "/plannings",
      get(plannings::list::<S>).post(crud::create::<Planning, S>),
    )
    .route(
      "/plannings/{id}",
      get(plannings::read::<S>)
        .put(crud::update::<Planning, S>)
        .patch(crud::update::<Planning, S>)
        .delete(crud::delete::<Planning, S>),
    )
    // Planned activities — reads embed relations on request
    .route(
      "/planned_activities",
      get(planned::list::<S>).post(crud::create::<PlannedActivity, S>),
    )
    .route(
      "/planned_activities/{id}",
      get(planned::read::<S>)
        .put(crud::update::<PlannedActivity, S>)
        .patch(crud::update::<PlannedActivity, S>)
        .delete(crud::delete::<PlannedActivity, S>),
    )
    // Notifications
    .route(
      "/notifications",
      get(crud::list::<Notification, S>)
        .post(crud::create::<Notification, S>),
    )
    .route(
      "/notifications/{id}",
      get(crud::read::<Notification, S>)
        .put(crud::update::<Notification, S>)
        .patch(crud::update::<Notification, S>)
        .delete(crud::delete::<Notification, S>),
    )
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

// ─── Integration tests ───────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use argon2::{Argon2, PasswordHasher, password_hash::SaltString};
  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use rand_core::OsRng;
  use serde_json::{Value, json};
  use sprout_core::{store::AuthStore, user::NewUser};
  use sprout_store_sqlite::SqliteStore;
  use tower::ServiceExt as _;

  async fn make_state() -> AppState<SqliteStore> {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
      .hash_password(b"secret", &salt)
      .unwrap()
      .to_string();
    store
      .add_user(NewUser {
        name:          "Ibu Rina".into(),
        email:         "rina@example.com".into(),
        password_hash: hash,
      })
      .await
      .unwrap();
    AppState { store: Arc::new(store) }
  }

  async fn request(
    state: AppState<SqliteStore>,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
  ) -> axum::response::Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(t) = token {
      builder = builder.header(header::AUTHORIZATION, format!("Bearer {t}"));
    }
    let req = match body {
      Some(v) => builder
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(v.to_string()))
        .unwrap(),
      None => builder.body(Body::empty()).unwrap(),
    };
    router(state).oneshot(req).await.unwrap()
  }

  async fn body_json(resp: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    serde_json::from_slice(&bytes).unwrap()
  }

  async fn login_token(state: &AppState<SqliteStore>) -> String {
    let resp = request(
      state.clone(),
      "POST",
      "/login",
      None,
      Some(json!({"email": "rina@example.com", "password": "secret"})),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    body_json(resp).await["token"].as_str().unwrap().to_string()
  }

  // ── Auth ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn login_returns_token_and_user() {
    let state = make_state().await;
    let resp = request(
      state,
      "POST",
      "/login",
      None,
      Some(json!({"email": "rina@example.com", "password": "secret"})),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert!(!body["token"].as_str().unwrap().is_empty());
    assert_eq!(body["user"]["email"], "rina@example.com");
    assert!(body["user"].get("passwordHash").is_none());
  }

  #[tokio::test]
  async fn login_with_wrong_password_returns_401() {
    let state = make_state().await;
    let resp = request(
      state,
      "POST",
      "/login",
      None,
      Some(json!({"email": "rina@example.com", "password": "wrong"})),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(resp).await, json!({"message": "Unauthorized"}));
  }

  #[tokio::test]
  async fn requests_without_token_return_401() {
    let state = make_state().await;
    let resp = request(state, "GET", "/activities", None, None).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
  }

  #[tokio::test]
  async fn requests_with_bogus_token_return_401() {
    let state = make_state().await;
    let resp =
      request(state, "GET", "/activities", Some("not-a-token"), None).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
  }

  // ── CRUD ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn create_activity_exposes_fixed_key_set() {
    let state = make_state().await;
    let token = login_token(&state).await;

    let resp = request(
      state,
      "POST",
      "/activities",
      Some(&token),
      Some(json!({"name": "Painting", "date": "2024-03-01"})),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = body_json(resp).await;
    let mut keys: Vec<&str> =
      body.as_object().unwrap().keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, vec!["date", "id", "name"]);
  }

  #[tokio::test]
  async fn create_missing_required_field_leaves_table_unchanged() {
    let state = make_state().await;
    let token = login_token(&state).await;

    let resp = request(
      state.clone(),
      "POST",
      "/activities",
      Some(&token),
      Some(json!({"name": "Painting"})),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(resp).await;
    assert_eq!(body["errors"]["date"][0], "The date field is required.");

    let resp = request(state, "GET", "/activities", Some(&token), None).await;
    assert_eq!(body_json(resp).await.as_array().unwrap().len(), 0);
  }

  #[tokio::test]
  async fn read_missing_returns_404() {
    let state = make_state().await;
    let token = login_token(&state).await;
    let resp =
      request(state, "GET", "/activities/99", Some(&token), None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn partial_update_preserves_other_fields() {
    let state = make_state().await;
    let token = login_token(&state).await;

    let resp = request(
      state.clone(),
      "POST",
      "/children",
      Some(&token),
      Some(json!({"name": "Sari", "age": 5})),
    )
    .await;
    let id = body_json(resp).await["id"].as_i64().unwrap();

    let resp = request(
      state.clone(),
      "PATCH",
      &format!("/children/{id}"),
      Some(&token),
      Some(json!({"age": 6})),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["name"], "Sari");
    assert_eq!(body["age"], 6);
  }

  #[tokio::test]
  async fn delete_returns_204_and_read_returns_404() {
    let state = make_state().await;
    let token = login_token(&state).await;

    let resp = request(
      state.clone(),
      "POST",
      "/checklists",
      Some(&token),
      Some(json!({"name": "Prep"})),
    )
    .await;
    let id = body_json(resp).await["id"].as_i64().unwrap();

    let resp = request(
      state.clone(),
      "DELETE",
      &format!("/checklists/{id}"),
      Some(&token),
      None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    assert!(bytes.is_empty());

    let resp = request(
      state,
      "GET",
      &format!("/checklists/{id}"),
      Some(&token),
      None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn checklist_view_keeps_is_checked_key() {
    let state = make_state().await;
    let token = login_token(&state).await;

    let resp = request(
      state,
      "POST",
      "/checklists",
      Some(&token),
      Some(json!({"name": "Prep", "is_checked": true})),
    )
    .await;
    let body = body_json(resp).await;
    assert_eq!(body["is_checked"], true);
  }

  // ── Bulk assign & follow-up ───────────────────────────────────────────────

  async fn seed_children_and_activity(
    state: &AppState<SqliteStore>,
    token: &str,
  ) -> (Vec<i64>, i64) {
    let mut child_ids = Vec::new();
    for name in ["Sari", "Budi", "Ayu"] {
      let resp = request(
        state.clone(),
        "POST",
        "/children",
        Some(token),
        Some(json!({"name": name, "age": 5})),
      )
      .await;
      child_ids.push(body_json(resp).await["id"].as_i64().unwrap());
    }
    let resp = request(
      state.clone(),
      "POST",
      "/activities",
      Some(token),
      Some(json!({"name": "Painting", "date": "2024-03-01"})),
    )
    .await;
    let activity_id = body_json(resp).await["id"].as_i64().unwrap();
    (child_ids, activity_id)
  }

  #[tokio::test]
  async fn bulk_assign_creates_one_pending_item_per_child() {
    let state = make_state().await;
    let token = login_token(&state).await;
    let (child_ids, activity_id) =
      seed_children_and_activity(&state, &token).await;

    let resp = request(
      state.clone(),
      "POST",
      "/checklists/bulk-assign",
      Some(&token),
      Some(json!({
        "child_ids": child_ids,
        "activity_id": activity_id,
        "due_date": "2024-03-10T00:00:00Z",
      })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
      body_json(resp).await,
      json!({"message": "Bulk assign success"})
    );

    let resp = request(
      state,
      "GET",
      "/checklist_items",
      Some(&token),
      None,
    )
    .await;
    let items = body_json(resp).await;
    let items = items.as_array().unwrap();
    assert_eq!(items.len(), 3);
    for item in items {
      assert_eq!(item["status"], "pending");
      assert_eq!(item["homeObservation"], json!({"completed": false}));
      assert_eq!(item["schoolObservation"], json!({"completed": false}));
    }
  }

  #[tokio::test]
  async fn follow_up_creates_suggestion_without_relation_keys() {
    let state = make_state().await;
    let token = login_token(&state).await;
    let (child_ids, activity_id) =
      seed_children_and_activity(&state, &token).await;

    let resp = request(
      state,
      "POST",
      "/checklists/follow-up",
      Some(&token),
      Some(json!({
        "child_id": child_ids[0],
        "completed_activity_id": activity_id,
        "suggested_activity_id": activity_id,
        "auto_assigned": true,
        "assigned_date": "2024-03-05T09:00:00Z",
      })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = body_json(resp).await;
    assert_eq!(body["childId"], child_ids[0]);
    assert_eq!(body["autoAssigned"], true);
    assert!(body.get("child").is_none());
    assert!(body.get("completedActivity").is_none());
  }

  // ── Relation embedding ────────────────────────────────────────────────────

  #[tokio::test]
  async fn include_embeds_requested_relations() {
    let state = make_state().await;
    let token = login_token(&state).await;
    let (child_ids, activity_id) =
      seed_children_and_activity(&state, &token).await;

    let resp = request(
      state.clone(),
      "POST",
      "/checklist_items",
      Some(&token),
      Some(json!({"child_id": child_ids[0], "activity_id": activity_id})),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let id = body_json(resp).await["id"].as_i64().unwrap();

    let resp = request(
      state.clone(),
      "GET",
      &format!("/checklist_items/{id}?include=child,activity"),
      Some(&token),
      None,
    )
    .await;
    let body = body_json(resp).await;
    assert_eq!(body["child"]["name"], "Sari");
    assert_eq!(body["activity"]["name"], "Painting");

    // Without include, the relation keys are absent.
    let resp = request(
      state,
      "GET",
      &format!("/checklist_items/{id}"),
      Some(&token),
      None,
    )
    .await;
    let body = body_json(resp).await;
    assert!(body.get("child").is_none());
    assert!(body.get("activity").is_none());
  }

  #[tokio::test]
  async fn plannings_embed_planned_activities_on_request() {
    let state = make_state().await;
    let token = login_token(&state).await;
    let (_, activity_id) = seed_children_and_activity(&state, &token).await;

    let resp = request(
      state.clone(),
      "POST",
      "/plannings",
      Some(&token),
      Some(json!({"title": "Week 12"})),
    )
    .await;
    let planning_id = body_json(resp).await["id"].as_i64().unwrap();

    let resp = request(
      state.clone(),
      "POST",
      "/planned_activities",
      Some(&token),
      Some(json!({
        "planning_id": planning_id,
        "activity_id": activity_id,
        "scheduled_date": "2024-03-04T08:00:00Z",
      })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let planned = body_json(resp).await;
    // Column defaults surface in the response.
    assert_eq!(planned["reminder"], true);
    assert_eq!(planned["completed"], false);

    let resp = request(
      state,
      "GET",
      &format!("/plannings/{planning_id}?include=plannedActivities"),
      Some(&token),
      None,
    )
    .await;
    let body = body_json(resp).await;
    assert_eq!(body["plannedActivities"].as_array().unwrap().len(), 1);
    assert_eq!(
      body["plannedActivities"][0]["activityId"],
      activity_id
    );
  }
}
