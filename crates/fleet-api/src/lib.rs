//! JSON REST API for the fleet service.
//!
//! Exposes an axum [`Router`] over a [`FleetService`] backed by any
//! [`FleetStore`]. Every route requires HTTP Basic credentials that resolve
//! to a tenant; see [`auth`].
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = fleet_api::api_router(AppState::new(service, auth));
//! ```

pub mod auth;
pub mod drivers;
pub mod error;
pub mod extract;
pub mod facilities;
pub mod logs;
pub mod records;
pub mod trips;
pub mod trucks;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use fleet_core::{
  FleetService,
  driver::Driver,
  facility::Facility,
  filter::{
    DriverFilter, FacilityFilter, FuelLogFilter, IncidentFilter,
    MaintenanceLogFilter, TripFilter, TruckFilter,
  },
  logs::{FuelLog, IncidentReport, MaintenanceLog},
  store::FleetStore,
  trip::Trip,
  truck::Truck,
};
use tower_http::trace::TraceLayer;

pub use auth::{AuthConfig, Tenant};
pub use error::ApiError;

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
pub struct AppState<S> {
  pub service: FleetService<S>,
  pub auth:    Arc<AuthConfig>,
}

impl<S> AppState<S> {
  pub fn new(service: FleetService<S>, auth: AuthConfig) -> Self {
    Self { service, auth: Arc::new(auth) }
  }
}

impl<S> Clone for AppState<S> {
  fn clone(&self) -> Self {
    Self { service: self.service.clone(), auth: Arc::clone(&self.auth) }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the fully-materialised API router.
pub fn api_router<S>(state: AppState<S>) -> Router
where
  S: FleetStore + 'static,
{
  Router::new()
    // Trips
    .route(
      "/trips",
      get(records::list::<S, TripFilter>).post(trips::create::<S>),
    )
    .route(
      "/trips/{id}",
      get(records::get_one::<S, Trip>)
        .patch(trips::update::<S>)
        .delete(records::delete_one::<S, Trip>),
    )
    .route("/trips/{id}/begin", post(trips::begin::<S>))
    .route("/trips/{id}/complete", post(trips::complete::<S>))
    .route("/trips/{id}/fail", post(trips::fail::<S>))
    .route("/trips/{id}/cancel", post(trips::cancel::<S>))
    .route("/trips/{id}/notes", post(trips::add_note::<S>))
    // Drivers
    .route(
      "/drivers",
      get(records::list::<S, DriverFilter>).post(drivers::create::<S>),
    )
    .route(
      "/drivers/{id}",
      get(records::get_one::<S, Driver>)
        .patch(drivers::update::<S>)
        .delete(records::delete_one::<S, Driver>),
    )
    .route("/drivers/{id}/suspend", post(drivers::suspend::<S>))
    .route("/drivers/{id}/reinstate", post(drivers::reinstate::<S>))
    .route("/drivers/{id}/terminate", post(drivers::terminate::<S>))
    // Trucks
    .route(
      "/trucks",
      get(records::list::<S, TruckFilter>).post(trucks::create::<S>),
    )
    .route(
      "/trucks/{id}",
      get(records::get_one::<S, Truck>)
        .patch(trucks::update::<S>)
        .delete(records::delete_one::<S, Truck>),
    )
    .route("/trucks/{id}/dispatch", post(trucks::dispatch::<S>))
    .route("/trucks/{id}/release", post(trucks::release::<S>))
    .route("/trucks/{id}/maintenance", post(trucks::begin_maintenance::<S>))
    .route("/trucks/{id}/maintenance/end", post(trucks::end_maintenance::<S>))
    .route("/trucks/{id}/retire", post(trucks::retire::<S>))
    // Facilities
    .route(
      "/facilities",
      get(records::list::<S, FacilityFilter>).post(facilities::create::<S>),
    )
    .route(
      "/facilities/{id}",
      get(records::get_one::<S, Facility>)
        .patch(facilities::update::<S>)
        .delete(records::delete_one::<S, Facility>),
    )
    // Logs
    .route(
      "/fuel-logs",
      get(records::list::<S, FuelLogFilter>).post(logs::create_fuel::<S>),
    )
    .route(
      "/fuel-logs/{id}",
      get(records::get_one::<S, FuelLog>).delete(records::delete_one::<S, FuelLog>),
    )
    .route(
      "/maintenance-logs",
      get(records::list::<S, MaintenanceLogFilter>)
        .post(logs::create_maintenance::<S>),
    )
    .route(
      "/maintenance-logs/{id}",
      get(records::get_one::<S, MaintenanceLog>)
        .delete(records::delete_one::<S, MaintenanceLog>),
    )
    .route(
      "/incidents",
      get(records::list::<S, IncidentFilter>).post(logs::create_incident::<S>),
    )
    .route(
      "/incidents/{id}",
      get(records::get_one::<S, IncidentReport>)
        .delete(records::delete_one::<S, IncidentReport>),
    )
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}
