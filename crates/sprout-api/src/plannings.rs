//! Read handlers for `/plannings` that honour `?include=plannedActivities`,
//! the one has-many embed in the API.

use axum::{
  Json,
  extract::{Path, Query, State},
};
use sprout_core::{
  entity::Entity,
  planning::{Planning, PlanningView},
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
  planning: &Planning,
  params: &IncludeParams,
) -> Result<PlanningView, ApiError>
where
  S: TrackerStore + Clone + Send + Sync + 'static,
{
  if !params.wants("plannedActivities") {
    return Ok(planning.view());
  }
  let planned = state
    .store
    .planned_for(planning.id)
    .await
    .map_err(ApiError::store)?;
  Ok(planning.view_with(Some(planned.as_slice())))
}

/// `GET /plannings[?include=plannedActivities]`
pub async fn list<S>(
  _auth: Authenticated,
  State(state): State<AppState<S>>,
  Query(params): Query<IncludeParams>,
) -> Result<Json<Vec<PlanningView>>, ApiError>
where
  S: TrackerStore + AuthStore + Clone + Send + Sync + 'static,
{
  let rows: Vec<Planning> =
    CrudStore::<Planning>::list(state.store.as_ref())
      .await
      .map_err(ApiError::store)?;

  let mut views = Vec::with_capacity(rows.len());
  for planning in &rows {
    views.push(embed(&state, planning, &params).await?);
  }
  Ok(Json(views))
}

/// `GET /plannings/{id}[?include=plannedActivities]`
pub async fn read<S>(
  _auth: Authenticated,
  State(state): State<AppState<S>>,
  Path(id): Path<i64>,
  Query(params): Query<IncludeParams>,
) -> Result<Json<PlanningView>, ApiError>
where
  S: TrackerStore + AuthStore + Clone + Send + Sync + 'static,
{
  let planning: Planning = CrudStore::<Planning>::find(state.store.as_ref(), id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::not_found(Planning::NAME, id))?;
  Ok(Json(embed(&state, &planning, &params).await?))
}
