//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  extract::rejection::{JsonRejection, PathRejection, QueryRejection},
  http::{HeaderValue, StatusCode, header},
  response::{IntoResponse, Response},
};
use fleet_core::Error as CoreError;
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("unauthorized")]
  Unauthorized,

  #[error(transparent)]
  Core(#[from] CoreError),

  #[error("{}", .0.body_text())]
  Body(#[from] JsonRejection),

  #[error("{}", .0.body_text())]
  Query(#[from] QueryRejection),

  #[error("{}", .0.body_text())]
  Path(#[from] PathRejection),
}

impl ApiError {
  pub fn status(&self) -> StatusCode {
    match self {
      ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
      ApiError::Body(r) => r.status(),
      ApiError::Query(r) => r.status(),
      ApiError::Path(r) => r.status(),
      ApiError::Core(e) => match e {
        CoreError::Validation(_) => StatusCode::BAD_REQUEST,
        CoreError::NotFound { .. } => StatusCode::NOT_FOUND,
        CoreError::InvalidTransition { .. } | CoreError::Conflict { .. } => {
          StatusCode::CONFLICT
        }
        CoreError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
      },
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    if status.is_server_error() {
      tracing::error!(error = %self, "request failed");
    }

    let mut res = (status, Json(json!({ "error": self.to_string() }))).into_response();
    if matches!(self, ApiError::Unauthorized) {
      res.headers_mut().insert(
        header::WWW_AUTHENTICATE,
        HeaderValue::from_static("Basic realm=\"fleet\""),
      );
    }
    res
  }
}

#[cfg(test)]
mod tests {
  use uuid::Uuid;

  use super::*;

  #[test]
  fn core_errors_map_to_statuses() {
    let id = Uuid::new_v4();
    let cases = [
      (CoreError::Validation("bad".into()), StatusCode::BAD_REQUEST),
      (CoreError::NotFound { entity: "trip", id }, StatusCode::NOT_FOUND),
      (
        CoreError::InvalidTransition {
          entity:    "trip",
          current:   "completed".into(),
          attempted: "canceled".into(),
        },
        StatusCode::CONFLICT,
      ),
      (
        CoreError::Conflict { entity: "trip", id, attempts: 3 },
        StatusCode::CONFLICT,
      ),
      (
        CoreError::Repository("disk full".into()),
        StatusCode::INTERNAL_SERVER_ERROR,
      ),
    ];
    for (err, status) in cases {
      assert_eq!(ApiError::from(err).status(), status);
    }
    assert_eq!(ApiError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
  }

  #[test]
  fn unauthorized_carries_challenge() {
    let res = ApiError::Unauthorized.into_response();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert!(res.headers().contains_key(header::WWW_AUTHENTICATE));
  }
}
