//! The five generic CRUD handlers, instantiated once per resource in the
//! router. Per-entity behaviour lives entirely in the [`Entity`] descriptor.

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use sprout_core::{
  entity::{Entity, validate_create},
  store::{AuthStore, CrudStore},
};

use crate::{AppState, auth::Authenticated, error::ApiError};

/// `GET /{resource}` — the whole table, unfiltered.
pub async fn list<E, S>(
  _auth: Authenticated,
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<E::View>>, ApiError>
where
  E: Entity,
  S: CrudStore<E> + AuthStore + Clone + Send + Sync + 'static,
{
  let rows: Vec<E> = state.store.list().await.map_err(ApiError::store)?;
  Ok(Json(rows.iter().map(E::view).collect()))
}

/// `POST /{resource}` — validate, insert, return the stored row.
pub async fn create<E, S>(
  _auth: Authenticated,
  State(state): State<AppState<S>>,
  Json(patch): Json<E::Patch>,
) -> Result<impl IntoResponse, ApiError>
where
  E: Entity,
  S: CrudStore<E> + AuthStore + Clone + Send + Sync + 'static,
{
  validate_create::<E>(&patch)?;
  let row: E = state.store.insert(patch).await.map_err(ApiError::store)?;
  Ok((StatusCode::CREATED, Json(row.view())))
}

/// `GET /{resource}/{id}` — 404 if absent.
pub async fn read<E, S>(
  _auth: Authenticated,
  State(state): State<AppState<S>>,
  Path(id): Path<i64>,
) -> Result<Json<E::View>, ApiError>
where
  E: Entity,
  S: CrudStore<E> + AuthStore + Clone + Send + Sync + 'static,
{
  let row: E = state
    .store
    .find(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::not_found(E::NAME, id))?;
  Ok(Json(row.view()))
}

/// `PUT|PATCH /{resource}/{id}` — partial merge of the supplied fields.
pub async fn update<E, S>(
  _auth: Authenticated,
  State(state): State<AppState<S>>,
  Path(id): Path<i64>,
  Json(patch): Json<E::Patch>,
) -> Result<Json<E::View>, ApiError>
where
  E: Entity,
  S: CrudStore<E> + AuthStore + Clone + Send + Sync + 'static,
{
  let row: E = state
    .store
    .update(id, patch)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::not_found(E::NAME, id))?;
  Ok(Json(row.view()))
}

/// `DELETE /{resource}/{id}` — hard delete, 204 with empty body.
pub async fn delete<E, S>(
  _auth: Authenticated,
  State(state): State<AppState<S>>,
  Path(id): Path<i64>,
) -> Result<StatusCode, ApiError>
where
  E: Entity,
  S: CrudStore<E> + AuthStore + Clone + Send + Sync + 'static,
{
  let removed = CrudStore::<E>::delete(state.store.as_ref(), id)
    .await
    .map_err(ApiError::store)?;
  if removed {
    Ok(StatusCode::NO_CONTENT)
  } else {
    Err(ApiError::not_found(E::NAME, id))
  }
}
