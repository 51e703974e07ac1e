//! Read handlers for `/follow_up_suggestions` with the three embeddable
//! relations: `child`, `completedActivity`, `suggestedActivity`.

use axum::{
  Json,
  extract::{Path, Query, State},
};
use sprout_core::{
  activity::Activity,
  child::Child,
  entity::Entity,
  store::{AuthStore, CrudStore, TrackerStore},
  suggestion::{FollowUpSuggestion, FollowUpSuggestionView},
};

use crate::{
  AppState,
  auth::Authenticated,
  error::ApiError,
  include::IncludeParams,
};

async fn embed<S>(
  state: &AppState<S>,
  suggestion: &FollowUpSuggestion,
  params: &IncludeParams,
) -> Result<FollowUpSuggestionView, ApiError>
where
  S: TrackerStore + Clone + Send + Sync + 'static,
{
  let child: Option<Child> = if params.wants("child") {
    CrudStore::<Child>::find(state.store.as_ref(), suggestion.child_id)
      .await
      .map_err(ApiError::store)?
  } else {
    None
  };
  let completed: Option<Activity> = if params.wants("completedActivity") {
    CrudStore::<Activity>::find(state.store.as_ref(), suggestion.completed_activity_id)
      .await
      .map_err(ApiError::store)?
  } else {
    None
  };
  let suggested: Option<Activity> = if params.wants("suggestedActivity") {
    CrudStore::<Activity>::find(state.store.as_ref(), suggestion.suggested_activity_id)
      .await
      .map_err(ApiError::store)?
  } else {
    None
  };
  Ok(suggestion.view_with(child.as_ref(), completed.as_ref(), suggested.as_ref()))
}

/// `GET /follow_up_suggestions[?include=...]`
pub async fn list<S>(
  _auth: Authenticated,
  State(state): State<AppState<S>>,
  Query(params): Query<IncludeParams>,
) -> Result<Json<Vec<FollowUpSuggestionView>>, ApiError>
where
  S: TrackerStore + AuthStore + Clone + Send + Sync + 'static,
{
  let suggestions: Vec<FollowUpSuggestion> =
    CrudStore::<FollowUpSuggestion>::list(state.store.as_ref())
      .await
      .map_err(ApiError::store)?;

  let mut views = Vec::with_capacity(suggestions.len());
  for suggestion in &suggestions {
    views.push(embed(&state, suggestion, &params).await?);
  }
  Ok(Json(views))
}

/// `GET /follow_up_suggestions/{id}[?include=...]`
pub async fn read<S>(
  _auth: Authenticated,
  State(state): State<AppState<S>>,
  Path(id): Path<i64>,
  Query(params): Query<IncludeParams>,
) -> Result<Json<FollowUpSuggestionView>, ApiError>
where
  S: TrackerStore + AuthStore + Clone + Send + Sync + 'static,
{
  let suggestion: FollowUpSuggestion = CrudStore::<FollowUpSuggestion>::find(state.store.as_ref(), id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::not_found(FollowUpSuggestion::NAME, id))?;
  Ok(Json(embed(&state, &suggestion, &params).await?))
}
