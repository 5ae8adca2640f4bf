//! Handlers for `/trucks` endpoints.
//!
//! | Method  | Path                            | Notes |
//! |---------|---------------------------------|-------|
//! | `POST`  | `/trucks`                       | Body: [`NewTruck`]; 201 |
//! | `PATCH` | `/trucks/{id}`                  | Body: [`TruckUpdate`] |
//! | `POST`  | `/trucks/{id}/dispatch`         | `available -> in_transit` |
//! | `POST`  | `/trucks/{id}/release`          | `in_transit -> available` |
//! | `POST`  | `/trucks/{id}/maintenance`      | `in_transit -> maintenance` |
//! | `POST`  | `/trucks/{id}/maintenance/end`  | `maintenance -> in_transit` |
//! | `POST`  | `/trucks/{id}/retire`           | any live status `-> retired` |

use axum::{
  Json,
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use fleet_core::{
  store::FleetStore,
  truck::{NewTruck, Truck, TruckUpdate},
};
use uuid::Uuid;

use crate::{
  AppState,
  auth::Tenant,
  error::ApiError,
  extract::{ApiJson, ApiPath},
};

/// `POST /trucks`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  Tenant(owner): Tenant,
  ApiJson(body): ApiJson<NewTruck>,
) -> Result<impl IntoResponse, ApiError>
where
  S: FleetStore + 'static,
{
  let truck = state.service.create_truck(owner, body).await?;
  Ok((StatusCode::CREATED, Json(truck)))
}

/// `PATCH /trucks/{id}`
pub async fn update<S>(
  State(state): State<AppState<S>>,
  Tenant(owner): Tenant,
  ApiPath(id): ApiPath<Uuid>,
  ApiJson(body): ApiJson<TruckUpdate>,
) -> Result<Json<Truck>, ApiError>
where
  S: FleetStore + 'static,
{
  Ok(Json(state.service.update_truck(id, owner, body).await?))
}

/// `POST /trucks/{id}/dispatch`
pub async fn dispatch<S>(
  State(state): State<AppState<S>>,
  Tenant(owner): Tenant,
  ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Truck>, ApiError>
where
  S: FleetStore + 'static,
{
  Ok(Json(state.service.dispatch_truck(id, owner).await?))
}

/// `POST /trucks/{id}/release`
pub async fn release<S>(
  State(state): State<AppState<S>>,
  Tenant(owner): Tenant,
  ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Truck>, ApiError>
where
  S: FleetStore + 'static,
{
  Ok(Json(state.service.release_truck(id, owner).await?))
}

/// `POST /trucks/{id}/maintenance`
pub async fn begin_maintenance<S>(
  State(state): State<AppState<S>>,
  Tenant(owner): Tenant,
  ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Truck>, ApiError>
where
  S: FleetStore + 'static,
{
  Ok(Json(state.service.begin_truck_maintenance(id, owner).await?))
}

/// `POST /trucks/{id}/maintenance/end`
pub async fn end_maintenance<S>(
  State(state): State<AppState<S>>,
  Tenant(owner): Tenant,
  ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Truck>, ApiError>
where
  S: FleetStore + 'static,
{
  Ok(Json(state.service.end_truck_maintenance(id, owner).await?))
}

/// `POST /trucks/{id}/retire`
pub async fn retire<S>(
  State(state): State<AppState<S>>,
  Tenant(owner): Tenant,
  ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Truck>, ApiError>
where
  S: FleetStore + 'static,
{
  Ok(Json(state.service.retire_truck(id, owner).await?))
}
