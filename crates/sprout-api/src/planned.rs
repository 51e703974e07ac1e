//! Read handlers for `/planned_activities` that honour `?include=activity`.

use axum::{
  Json,
  extract::{Path, Query, State},
};
use sprout_core::{
  activity::Activity,
  entity::Entity,
  planning::{PlannedActivity, PlannedActivityView},
  store::{AuthStore, CrudStore, TrackerStore},
};

use crate::{
  AppState,
  auth::Authenticated,
  error::ApiError,
  include::IncludeParams,
};

async fn embed<S>(
  state: &AppState<S>,
  planned: &PlannedActivity,
  params: &IncludeParams,
) -> Result<PlannedActivityView, ApiError>
where
  S: TrackerStore + Clone + Send + Sync + 'static,
{
  let activity: Option<Activity> = if params.wants("activity") {
    CrudStore::<Activity>::find(state.store.as_ref(), planned.activity_id)
      .await
      .map_err(ApiError::store)?
  } else {
    None
  };
  Ok(planned.view_with(activity.as_ref()))
}

/// `GET /planned_activities[?include=activity]`
pub async fn list<S>(
  _auth: Authenticated,
  State(state): State<AppState<S>>,
  Query(params): Query<IncludeParams>,
) -> Result<Json<Vec<PlannedActivityView>>, ApiError>
where
  S: TrackerStore + AuthStore + Clone + Send + Sync + 'static,
{
  let rows: Vec<PlannedActivity> =
    CrudStore::<PlannedActivity>::list(state.store.as_ref())
      .await
      .map_err(ApiError::store)?;

  let mut views = Vec::with_capacity(rows.len());
  for planned in &rows {
    views.push(embed(&state, planned, &params).await?);
  }
  Ok(Json(views))
}

/// `GET /planned_activities/{id}[?include=activity]`
pub async fn read<S>(
  _auth: Authenticated,
  State(state): State<AppState<S>>,
  Path(id): Path<i64>,
  Query(params): Query<IncludeParams>,
) -> Result<Json<PlannedActivityView>, ApiError>
where
  S: TrackerStore + AuthStore + Clone + Send + Sync + 'static,
{
  let planned: PlannedActivity = CrudStore::<PlannedActivity>::find(state.store.as_ref(), id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::not_found(PlannedActivity::NAME, id))?;
  Ok(Json(embed(&state, &planned, &params).await?))
}
