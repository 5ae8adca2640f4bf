//! HTTP Basic-auth tenant extractor.
//!
//! The username is the account (tenant) UUID and the password is the
//! deployment API key. The key is checked against an argon2 hash resolved
//! once at start-up; nothing is re-read per request.

use argon2::{Argon2, PasswordHash, PasswordVerifier};
use axum::{
  extract::FromRequestParts,
  http::{HeaderMap, header, request::Parts},
};
use base64::{Engine as _, engine::general_purpose::STANDARD as B64};
use fleet_core::store::FleetStore;
use uuid::Uuid;

use crate::{AppState, error::ApiError};

/// Credentials accepted by this deployment.
#[derive(Clone)]
pub struct AuthConfig {
  /// PHC string produced by argon2, e.g. `$argon2id$v=19$…`
  pub api_key_hash: String,
}

/// The authenticated account. Every service call is scoped to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tenant(pub Uuid);

/// Resolve the tenant from an `Authorization: Basic` header.
pub fn verify_auth(headers: &HeaderMap, config: &AuthConfig) -> Result<Uuid, ApiError> {
  let header_val = headers
    .get(header::AUTHORIZATION)
    .and_then(|v| v.to_str().ok())
    .ok_or(ApiError::Unauthorized)?;

  let encoded = header_val
    .strip_prefix("Basic ")
    .ok_or(ApiError::Unauthorized)?;

  let decoded = B64.decode(encoded).map_err(|_| ApiError::Unauthorized)?;
  let creds = std::str::from_utf8(&decoded).map_err(|_| ApiError::Unauthorized)?;

  let (account, key) = creds.split_once(':').ok_or(ApiError::Unauthorized)?;
  let tenant = Uuid::parse_str(account).map_err(|_| ApiError::Unauthorized)?;

  let parsed_hash =
    PasswordHash::new(&config.api_key_hash).map_err(|_| ApiError::Unauthorized)?;

  Argon2::default()
    .verify_password(key.as_bytes(), &parsed_hash)
    .map_err(|_| ApiError::Unauthorized)?;

  Ok(tenant)
}

impl<S> FromRequestParts<AppState<S>> for Tenant
where
  S: FleetStore + 'static,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    let tenant = verify_auth(&parts.headers, &state.auth)?;
    Ok(Tenant(tenant))
  }
}

#[cfg(test)]
mod tests {
  use argon2::{PasswordHasher, password_hash::SaltString};
  use axum::http::HeaderValue;
  use rand_core::OsRng;

  use super::*;

  fn config(key: &str) -> AuthConfig {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
      .hash_password(key.as_bytes(), &salt)
      .unwrap()
      .to_string();
    AuthConfig { api_key_hash: hash }
  }

  fn headers(value: &str) -> HeaderMap {
    let mut h = HeaderMap::new();
    h.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
    h
  }

  fn basic(user: &str, pass: &str) -> String {
    format!("Basic {}", B64.encode(format!("{user}:{pass}")))
  }

  #[test]
  fn correct_credentials_yield_tenant() {
    let cfg = config("fleet-key");
    let tenant = Uuid::new_v4();
    let got = verify_auth(&headers(&basic(&tenant.to_string(), "fleet-key")), &cfg);
    assert_eq!(got.unwrap(), tenant);
  }

  #[test]
  fn wrong_key() {
    let cfg = config("fleet-key");
    let h = headers(&basic(&Uuid::new_v4().to_string(), "nope"));
    assert!(matches!(verify_auth(&h, &cfg), Err(ApiError::Unauthorized)));
  }

  #[test]
  fn username_must_be_a_uuid() {
    let cfg = config("fleet-key");
    let h = headers(&basic("dispatcher", "fleet-key"));
    assert!(matches!(verify_auth(&h, &cfg), Err(ApiError::Unauthorized)));
  }

  #[test]
  fn missing_or_malformed_header() {
    let cfg = config("fleet-key");
    assert!(matches!(
      verify_auth(&HeaderMap::new(), &cfg),
      Err(ApiError::Unauthorized)
    ));
    assert!(matches!(
      verify_auth(&headers("Basic !!!not-base64!!!"), &cfg),
      Err(ApiError::Unauthorized)
    ));
    assert!(matches!(
      verify_auth(&headers("Bearer abc"), &cfg),
      Err(ApiError::Unauthorized)
    ));
  }
}
