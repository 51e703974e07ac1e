//! Bearer-token authentication: the `/login` handler, token minting, and the
//! extractor every protected handler takes as its first argument.
//!
//! Token plaintext is handed to the client once and never stored; the store
//! keeps only a sha-256 digest, so a leaked database does not leak live
//! credentials.

use argon2::{Argon2, PasswordHash, PasswordVerifier};
use axum::{
  Json,
  extract::{FromRequestParts, State},
  http::{header, request::Parts},
};
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand_core::{OsRng, RngCore as _};
use serde::{Deserialize, Serialize};
use sha2::{Digest as _, Sha256};
use sprout_core::{store::AuthStore, user::{User, UserView}};

use crate::{AppState, error::ApiError};

// ─── Tokens ──────────────────────────────────────────────────────────────────

/// Mint an opaque bearer token: 32 random bytes, base64url.
pub fn mint_token() -> String {
  let mut bytes = [0u8; 32];
  OsRng.fill_bytes(&mut bytes);
  URL_SAFE_NO_PAD.encode(bytes)
}

/// The sha-256 hex digest stored and looked up in place of the token.
pub fn token_digest(token: &str) -> String {
  hex::encode(Sha256::digest(token.as_bytes()))
}

// ─── Extractor ───────────────────────────────────────────────────────────────

/// Present in a handler's arguments means the request carried a valid
/// `Authorization: Bearer` token.
pub struct Authenticated {
  pub user: User,
}

impl<S> FromRequestParts<AppState<S>> for Authenticated
where
  S: AuthStore + Clone + Send + Sync + 'static,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    let header_val = parts
      .headers
      .get(header::AUTHORIZATION)
      .and_then(|v| v.to_str().ok())
      .ok_or(ApiError::Unauthorized)?;

    let token = header_val
      .strip_prefix("Bearer ")
      .ok_or(ApiError::Unauthorized)?;

    let user = state
      .store
      .user_for_token(&token_digest(token))
      .await
      .map_err(ApiError::store)?
      .ok_or(ApiError::Unauthorized)?;

    Ok(Authenticated { user })
  }
}

// ─── Login ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct LoginBody {
  pub email:    String,
  pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
  pub token: String,
  pub user:  UserView,
}

/// `POST /login` — body: `{"email": ..., "password": ...}`.
///
/// Verifies the argon2 hash, mints a fresh token, and returns it alongside
/// the user's own record. Any failure mode collapses to the same 401 so the
/// response does not reveal whether the email exists.
pub async fn login<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<LoginBody>,
) -> Result<Json<LoginResponse>, ApiError>
where
  S: AuthStore + Clone + Send + Sync + 'static,
{
  let user = state
    .store
    .find_user_by_email(&body.email)
    .await
    .map_err(ApiError::store)?
    .ok_or(ApiError::Unauthorized)?;

  let parsed_hash = PasswordHash::new(&user.password_hash)
    .map_err(|_| ApiError::Unauthorized)?;
  Argon2::default()
    .verify_password(body.password.as_bytes(), &parsed_hash)
    .map_err(|_| ApiError::Unauthorized)?;

  let token = mint_token();
  state
    .store
    .add_token(user.id, &token_digest(&token))
    .await
    .map_err(ApiError::store)?;

  Ok(Json(LoginResponse { token, user: user.view() }))
}
