//! Read handlers for `/checklist_items` that honour `?include=child,activity`.
//!
//! Create, update, and delete go through the generic [`crate::crud`]
//! handlers; only the read side embeds relations.

use axum::{
  Json,
  extract::{Path, Query, State},
};
use sprout_core::{
  activity::Activity,
  checklist::{ChecklistItem, ChecklistItemView},
  child::Child,
  entity::Entity,
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
  item: &ChecklistItem,
  params: &IncludeParams,
) -> Result<ChecklistItemView, ApiError>
where
  S: TrackerStore + Clone + Send + Sync + 'static,
{
  let child: Option<Child> = if params.wants("child") {
    CrudStore::<Child>::find(state.store.as_ref(), item.child_id)
      .await
      .map_err(ApiError::store)?
  } else {
    None
  };
  let activity: Option<Activity> = if params.wants("activity") {
    CrudStore::<Activity>::find(state.store.as_ref(), item.activity_id)
      .await
      .map_err(ApiError::store)?
  } else {
    None
  };
  Ok(item.view_with(child.as_ref(), activity.as_ref()))
}

/// `GET /checklist_items[?include=child,activity]`
pub async fn list<S>(
  _auth: Authenticated,
  State(state): State<AppState<S>>,
  Query(params): Query<IncludeParams>,
) -> Result<Json<Vec<ChecklistItemView>>, ApiError>
where
  S: TrackerStore + AuthStore + Clone + Send + Sync + 'static,
{
  let items: Vec<ChecklistItem> =
    CrudStore::<ChecklistItem>::list(state.store.as_ref())
      .await
      .map_err(ApiError::store)?;

  let mut views = Vec::with_capacity(items.len());
  for item in &items {
    views.push(embed(&state, item, &params).await?);
  }
  Ok(Json(views))
}

/// `GET /checklist_items/{id}[?include=child,activity]`
pub async fn read<S>(
  _auth: Authenticated,
  State(state): State<AppState<S>>,
  Path(id): Path<i64>,
  Query(params): Query<IncludeParams>,
) -> Result<Json<ChecklistItemView>, ApiError>
where
  S: TrackerStore + AuthStore + Clone + Send + Sync + 'static,
{
  let item: ChecklistItem = CrudStore::<ChecklistItem>::find(state.store.as_ref(), id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::not_found(ChecklistItem::NAME, id))?;
  Ok(Json(embed(&state, &item, &params).await?))
}
