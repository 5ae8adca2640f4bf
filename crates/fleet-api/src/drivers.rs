//! Handlers for `/drivers` endpoints.
//!
//! | Method  | Path                        | Notes |
//! |---------|-----------------------------|-------|
//! | `POST`  | `/drivers`                  | Body: [`NewDriver`]; 201 |
//! | `PATCH` | `/drivers/{id}`             | Body: [`DriverUpdate`] |
//! | `POST`  | `/drivers/{id}/suspend`     | `active -> suspended` |
//! | `POST`  | `/drivers/{id}/reinstate`   | `suspended -> active` |
//! | `POST`  | `/drivers/{id}/terminate`   | `active\|suspended -> terminated` |

use axum::{
  Json,
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use fleet_core::{
  driver::{Driver, DriverUpdate, NewDriver},
  store::FleetStore,
};
use uuid::Uuid;

use crate::{
  AppState,
  auth::Tenant,
  error::ApiError,
  extract::{ApiJson, ApiPath},
};

/// `POST /drivers`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  Tenant(owner): Tenant,
  ApiJson(body): ApiJson<NewDriver>,
) -> Result<impl IntoResponse, ApiError>
where
  S: FleetStore + 'static,
{
  let driver = state.service.create_driver(owner, body).await?;
  Ok((StatusCode::CREATED, Json(driver)))
}

/// `PATCH /drivers/{id}`
pub async fn update<S>(
  State(state): State<AppState<S>>,
  Tenant(owner): Tenant,
  ApiPath(id): ApiPath<Uuid>,
  ApiJson(body): ApiJson<DriverUpdate>,
) -> Result<Json<Driver>, ApiError>
where
  S: FleetStore + 'static,
{
  Ok(Json(state.service.update_driver(id, owner, body).await?))
}

/// `POST /drivers/{id}/suspend`
pub async fn suspend<S>(
  State(state): State<AppState<S>>,
  Tenant(owner): Tenant,
  ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Driver>, ApiError>
where
  S: FleetStore + 'static,
{
  Ok(Json(state.service.suspend_driver(id, owner).await?))
}

/// `POST /drivers/{id}/reinstate`
pub async fn reinstate<S>(
  State(state): State<AppState<S>>,
  Tenant(owner): Tenant,
  ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Driver>, ApiError>
where
  S: FleetStore + 'static,
{
  Ok(Json(state.service.reinstate_driver(id, owner).await?))
}

/// `POST /drivers/{id}/terminate`
pub async fn terminate<S>(
  State(state): State<AppState<S>>,
  Tenant(owner): Tenant,
  ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Driver>, ApiError>
where
  S: FleetStore + 'static,
{
  Ok(Json(state.service.terminate_driver(id, owner).await?))
}
