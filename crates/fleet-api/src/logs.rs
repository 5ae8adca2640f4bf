//! Create handlers for `/fuel-logs`, `/maintenance-logs` and `/incidents`.
//!
//! Logs are append-only from the API's point of view: they can be listed,
//! fetched and deleted through the shared handlers, but not edited.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use fleet_core::{
  logs::{NewFuelLog, NewIncidentReport, NewMaintenanceLog},
  store::FleetStore,
};

use crate::{AppState, auth::Tenant, error::ApiError, extract::ApiJson};

/// `POST /fuel-logs`
pub async fn create_fuel<S>(
  State(state): State<AppState<S>>,
  Tenant(owner): Tenant,
  ApiJson(body): ApiJson<NewFuelLog>,
) -> Result<impl IntoResponse, ApiError>
where
  S: FleetStore + 'static,
{
  let log = state.service.create_fuel_log(owner, body).await?;
  Ok((StatusCode::CREATED, Json(log)))
}

/// `POST /maintenance-logs`
pub async fn create_maintenance<S>(
  State(state): State<AppState<S>>,
  Tenant(owner): Tenant,
  ApiJson(body): ApiJson<NewMaintenanceLog>,
) -> Result<impl IntoResponse, ApiError>
where
  S: FleetStore + 'static,
{
  let log = state.service.create_maintenance_log(owner, body).await?;
  Ok((StatusCode::CREATED, Json(log)))
}

/// `POST /incidents`
pub async fn create_incident<S>(
  State(state): State<AppState<S>>,
  Tenant(owner): Tenant,
  ApiJson(body): ApiJson<NewIncidentReport>,
) -> Result<impl IntoResponse, ApiError>
where
  S: FleetStore + 'static,
{
  let report = state.service.create_incident_report(owner, body).await?;
  Ok((StatusCode::CREATED, Json(report)))
}
