//! The two operations under `/checklists` that fall outside the uniform CRUD
//! shape: bulk assignment and follow-up suggestion creation.

use axum::{
  Json,
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;
use sprout_core::{
  checklist::BulkAssign,
  entity::Entity as _,
  store::{AuthStore, CrudStore, TrackerStore},
  suggestion::{FollowUpSuggestion, FollowUpSuggestionPatch},
};

use crate::{AppState, auth::Authenticated, error::ApiError};

/// `POST /checklists/bulk-assign` — one pending checklist item per child,
/// all-or-nothing.
pub async fn bulk_assign<S>(
  _auth: Authenticated,
  State(state): State<AppState<S>>,
  Json(input): Json<BulkAssign>,
) -> Result<Json<serde_json::Value>, ApiError>
where
  S: TrackerStore + AuthStore + Clone + Send + Sync + 'static,
{
  state.store.bulk_assign(input).await.map_err(ApiError::store)?;
  Ok(Json(json!({ "message": "Bulk assign success" })))
}

#[derive(Debug, Deserialize)]
pub struct FollowUpBody {
  pub child_id:              i64,
  pub completed_activity_id: i64,
  pub suggested_activity_id: i64,
  #[serde(default)]
  pub auto_assigned:         bool,
  pub assigned_date:         Option<DateTime<Utc>>,
}

/// `POST /checklists/follow-up` — record one follow-up suggestion linking a
/// completed activity to a suggested next one.
///
/// The create path does not load relations, so the embedded keys are absent
/// from the response; callers wanting them re-read with `?include=`.
pub async fn follow_up<S>(
  _auth: Authenticated,
  State(state): State<AppState<S>>,
  Json(body): Json<FollowUpBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: TrackerStore + AuthStore + Clone + Send + Sync + 'static,
{
  let patch = FollowUpSuggestionPatch {
    child_id:              Some(body.child_id),
    completed_activity_id: Some(body.completed_activity_id),
    suggested_activity_id: Some(body.suggested_activity_id),
    auto_assigned:         Some(body.auto_assigned),
    assigned_date:         body.assigned_date,
  };
  let suggestion: FollowUpSuggestion =
    CrudStore::<FollowUpSuggestion>::insert(state.store.as_ref(), patch)
      .await
      .map_err(ApiError::store)?;
  Ok((StatusCode::CREATED, Json(suggestion.view())))
}
