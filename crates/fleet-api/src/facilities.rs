//! Handlers for `/facilities` endpoints.

use axum::{
  Json,
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use fleet_core::{
  facility::{Facility, FacilityUpdate, NewFacility},
  store::FleetStore,
};
use uuid::Uuid;

use crate::{
  AppState,
  auth::Tenant,
  error::ApiError,
  extract::{ApiJson, ApiPath},
};

/// `POST /facilities`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  Tenant(owner): Tenant,
  ApiJson(body): ApiJson<NewFacility>,
) -> Result<impl IntoResponse, ApiError>
where
  S: FleetStore + 'static,
{
  let facility = state.service.create_facility(owner, body).await?;
  Ok((StatusCode::CREATED, Json(facility)))
}

/// `PATCH /facilities/{id}`
pub async fn update<S>(
  State(state): State<AppState<S>>,
  Tenant(owner): Tenant,
  ApiPath(id): ApiPath<Uuid>,
  ApiJson(body): ApiJson<FacilityUpdate>,
) -> Result<Json<Facility>, ApiError>
where
  S: FleetStore + 'static,
{
  Ok(Json(state.service.update_facility(id, owner, body).await?))
}
