//! Request extractors whose rejections render as [`ApiError`].
//!
//! Thin wrappers over axum's `Json`, `Query` and `Path`, so a malformed body,
//! query string or id gets the same `{"error": ...}` body as every other
//! failure.

use axum::{
  extract::{FromRequest, FromRequestParts, OptionalFromRequest, Request},
  http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

#[derive(Debug, Clone, Copy, Default)]
pub struct ApiQuery<T>(pub T);

#[derive(Debug, Clone, Copy)]
pub struct ApiPath<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
  T: DeserializeOwned,
  S: Send + Sync,
{
  type Rejection = ApiError;

  async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
    let axum::Json(value) =
      <axum::Json<T> as FromRequest<S>>::from_request(req, state).await?;
    Ok(Self(value))
  }
}

/// A request without a `Content-Type` yields `None`; a declared but broken
/// body is still rejected.
impl<T, S> OptionalFromRequest<S> for ApiJson<T>
where
  T: DeserializeOwned,
  S: Send + Sync,
{
  type Rejection = ApiError;

  async fn from_request(
    req: Request,
    state: &S,
  ) -> Result<Option<Self>, Self::Rejection> {
    let value =
      <axum::Json<T> as OptionalFromRequest<S>>::from_request(req, state).await?;
    Ok(value.map(|axum::Json(v)| Self(v)))
  }
}

impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
  T: DeserializeOwned,
  S: Send + Sync,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &S,
  ) -> Result<Self, Self::Rejection> {
    let axum::extract::Query(value) =
      <axum::extract::Query<T> as FromRequestParts<S>>::from_request_parts(parts, state)
        .await?;
    Ok(Self(value))
  }
}

impl<T, S> FromRequestParts<S> for ApiPath<T>
where
  T: DeserializeOwned + Send,
  S: Send + Sync,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &S,
  ) -> Result<Self, Self::Rejection> {
    let axum::extract::Path(value) =
      <axum::extract::Path<T> as FromRequestParts<S>>::from_request_parts(parts, state)
        .await?;
    Ok(Self(value))
  }
}
