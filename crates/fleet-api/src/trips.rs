//! Handlers for `/trips` endpoints.
//!
//! | Method  | Path                    | Notes |
//! |---------|-------------------------|-------|
//! | `POST`  | `/trips`                | Body: [`NewTrip`]; 201 |
//! | `PATCH` | `/trips/{id}`           | Body: [`TripUpdateBody`]; `null` detaches a link |
//! | `POST`  | `/trips/{id}/begin`     | Optional body: `{"departure_actual": "..."}`; defaults to now |
//! | `POST`  | `/trips/{id}/complete`  | Optional body: `{"arrival_actual": "..."}` |
//! | `POST`  | `/trips/{id}/fail`      | Optional body: `{"arrival_actual": "..."}` |
//! | `POST`  | `/trips/{id}/cancel`    | No body |
//! | `POST`  | `/trips/{id}/notes`     | Body: `{"content": "..."}` |

use axum::{
  Json,
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use chrono::{DateTime, Utc};
use fleet_core::{
  store::FleetStore,
  trip::{Cargo, NewTrip, Trip, TripUpdate},
};
use serde::{Deserialize, Deserializer};
use uuid::Uuid;

use crate::{
  AppState,
  auth::Tenant,
  error::ApiError,
  extract::{ApiJson, ApiPath},
};

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /trips`. Returns 201 and the stored trip in `scheduled`.
pub async fn create<S>(
  State(state): State<AppState<S>>,
  Tenant(owner): Tenant,
  ApiJson(body): ApiJson<NewTrip>,
) -> Result<impl IntoResponse, ApiError>
where
  S: FleetStore + 'static,
{
  let trip = state.service.create_trip(owner, body).await?;
  Ok((StatusCode::CREATED, Json(trip)))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// JSON body accepted by `PATCH /trips/{id}`.
///
/// An absent link field is left alone; an explicit `null` detaches it.
#[derive(Debug, Default, Deserialize)]
pub struct TripUpdateBody {
  #[serde(default, deserialize_with = "double_option")]
  pub driver_id:           Option<Option<Uuid>>,
  #[serde(default, deserialize_with = "double_option")]
  pub truck_id:            Option<Option<Uuid>>,
  #[serde(default, deserialize_with = "double_option")]
  pub start_facility_id:   Option<Option<Uuid>>,
  #[serde(default, deserialize_with = "double_option")]
  pub end_facility_id:     Option<Option<Uuid>>,
  pub scheduled_departure: Option<DateTime<Utc>>,
  pub scheduled_arrival:   Option<DateTime<Utc>>,
  pub cargo:               Option<Cargo>,
  pub fuel_usage:          Option<f64>,
  pub distance_miles:      Option<f64>,
}

impl From<TripUpdateBody> for TripUpdate {
  fn from(b: TripUpdateBody) -> Self {
    TripUpdate {
      driver_id:           b.driver_id,
      truck_id:            b.truck_id,
      start_facility_id:   b.start_facility_id,
      end_facility_id:     b.end_facility_id,
      scheduled_departure: b.scheduled_departure,
      scheduled_arrival:   b.scheduled_arrival,
      cargo:               b.cargo,
      fuel_usage:          b.fuel_usage,
      distance_miles:      b.distance_miles,
    }
  }
}

/// Present-but-null deserialises to `Some(None)`; `#[serde(default)]`
/// covers the absent case.
fn double_option<'de, D, T>(de: D) -> Result<Option<Option<T>>, D::Error>
where
  D: Deserializer<'de>,
  T: Deserialize<'de>,
{
  Option::<T>::deserialize(de).map(Some)
}

/// `PATCH /trips/{id}`
pub async fn update<S>(
  State(state): State<AppState<S>>,
  Tenant(owner): Tenant,
  ApiPath(id): ApiPath<Uuid>,
  ApiJson(body): ApiJson<TripUpdateBody>,
) -> Result<Json<Trip>, ApiError>
where
  S: FleetStore + 'static,
{
  let trip = state.service.update_trip(id, owner, body.into()).await?;
  Ok(Json(trip))
}

// ─── Lifecycle ────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct BeginBody {
  pub departure_actual: Option<DateTime<Utc>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ArrivalBody {
  pub arrival_actual: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct NoteBody {
  pub content: String,
}

/// `POST /trips/{id}/begin`
pub async fn begin<S>(
  State(state): State<AppState<S>>,
  Tenant(owner): Tenant,
  ApiPath(id): ApiPath<Uuid>,
  body: Option<ApiJson<BeginBody>>,
) -> Result<Json<Trip>, ApiError>
where
  S: FleetStore + 'static,
{
  let at = body.and_then(|ApiJson(b)| b.departure_actual).unwrap_or_else(Utc::now);
  let trip = state.service.begin_trip(id, owner, at).await?;
  Ok(Json(trip))
}

/// `POST /trips/{id}/complete`
pub async fn complete<S>(
  State(state): State<AppState<S>>,
  Tenant(owner): Tenant,
  ApiPath(id): ApiPath<Uuid>,
  body: Option<ApiJson<ArrivalBody>>,
) -> Result<Json<Trip>, ApiError>
where
  S: FleetStore + 'static,
{
  let at = body.and_then(|ApiJson(b)| b.arrival_actual).unwrap_or_else(Utc::now);
  let trip = state
    .service
    .complete_trip_successfully(id, owner, at)
    .await?;
  Ok(Json(trip))
}

/// `POST /trips/{id}/fail`
pub async fn fail<S>(
  State(state): State<AppState<S>>,
  Tenant(owner): Tenant,
  ApiPath(id): ApiPath<Uuid>,
  body: Option<ApiJson<ArrivalBody>>,
) -> Result<Json<Trip>, ApiError>
where
  S: FleetStore + 'static,
{
  let at = body.and_then(|ApiJson(b)| b.arrival_actual).unwrap_or_else(Utc::now);
  let trip = state
    .service
    .complete_trip_unsuccessfully(id, owner, at)
    .await?;
  Ok(Json(trip))
}

/// `POST /trips/{id}/cancel`
pub async fn cancel<S>(
  State(state): State<AppState<S>>,
  Tenant(owner): Tenant,
  ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Trip>, ApiError>
where
  S: FleetStore + 'static,
{
  let trip = state.service.cancel_trip(id, owner).await?;
  Ok(Json(trip))
}

/// `POST /trips/{id}/notes`
pub async fn add_note<S>(
  State(state): State<AppState<S>>,
  Tenant(owner): Tenant,
  ApiPath(id): ApiPath<Uuid>,
  ApiJson(body): ApiJson<NoteBody>,
) -> Result<Json<Trip>, ApiError>
where
  S: FleetStore + 'static,
{
  let trip = state.service.add_trip_note(id, owner, &body.content).await?;
  Ok(Json(trip))
}
