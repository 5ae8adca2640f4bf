//! Operational logs: fuel purchases, maintenance work, and incidents.
//!
//! These records have no lifecycle. They are created, read, listed, and
//! deleted, and every truck/driver/trip they reference must belong to the
//! same tenant.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  Result,
  record::{Meta, check_measure, check_present, impl_record},
};

// ─── Fuel ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FuelLog {
  #[serde(flatten)]
  pub(crate) meta:     Meta,
  pub truck_id:        Uuid,
  pub driver_id:       Option<Uuid>,
  pub trip_id:         Option<Uuid>,
  pub gallons:         f64,
  pub cost_per_gallon: f64,
  pub odometer_miles:  f64,
  pub station:         Option<String>,
  pub fueled_at:       DateTime<Utc>,
}

impl_record!(FuelLog, "fuel_logs", "fuel log");

impl FuelLog {
  pub fn total_cost(&self) -> f64 { self.gallons * self.cost_per_gallon }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewFuelLog {
  pub truck_id:        Uuid,
  pub driver_id:       Option<Uuid>,
  pub trip_id:         Option<Uuid>,
  pub gallons:         f64,
  pub cost_per_gallon: f64,
  pub odometer_miles:  f64,
  pub station:         Option<String>,
  pub fueled_at:       DateTime<Utc>,
}

impl NewFuelLog {
  pub fn validate(&self) -> Result<()> {
    check_measure("gallons", Some(self.gallons))?;
    check_measure("cost per gallon", Some(self.cost_per_gallon))?;
    check_measure("odometer", Some(self.odometer_miles))
  }

  pub(crate) fn into_record(self, owner_id: Uuid, now: DateTime<Utc>) -> FuelLog {
    FuelLog {
      meta:            Meta::new(owner_id, now),
      truck_id:        self.truck_id,
      driver_id:       self.driver_id,
      trip_id:         self.trip_id,
      gallons:         self.gallons,
      cost_per_gallon: self.cost_per_gallon,
      odometer_miles:  self.odometer_miles,
      station:         self.station,
      fueled_at:       self.fueled_at,
    }
  }
}

// ─── Maintenance ─────────────────────────────────────────────────────────────

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
  strum::Display,
  strum::AsRefStr,
  strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MaintenanceKind {
  Inspection,
  OilChange,
  Tires,
  Brakes,
  Engine,
  Other,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintenanceLog {
  #[serde(flatten)]
  pub(crate) meta:    Meta,
  pub truck_id:       Uuid,
  pub service_type:   MaintenanceKind,
  pub description:    String,
  pub cost:           f64,
  pub odometer_miles: f64,
  pub performed_at:   DateTime<Utc>,
}

impl_record!(MaintenanceLog, "maintenance_logs", "maintenance log");

#[derive(Debug, Clone, Deserialize)]
pub struct NewMaintenanceLog {
  pub truck_id:       Uuid,
  pub service_type:   MaintenanceKind,
  pub description:    String,
  pub cost:           f64,
  pub odometer_miles: f64,
  pub performed_at:   DateTime<Utc>,
}

impl NewMaintenanceLog {
  pub fn validate(&self) -> Result<()> {
    check_present("description", &self.description)?;
    check_measure("cost", Some(self.cost))?;
    check_measure("odometer", Some(self.odometer_miles))
  }

  pub(crate) fn into_record(self, owner_id: Uuid, now: DateTime<Utc>) -> MaintenanceLog {
    MaintenanceLog {
      meta:           Meta::new(owner_id, now),
      truck_id:       self.truck_id,
      service_type:   self.service_type,
      description:    self.description,
      cost:           self.cost,
      odometer_miles: self.odometer_miles,
      performed_at:   self.performed_at,
    }
  }
}

// ─── Incidents ───────────────────────────────────────────────────────────────

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
  strum::Display,
  strum::AsRefStr,
  strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Severity {
  Minor,
  Moderate,
  Severe,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncidentReport {
  #[serde(flatten)]
  pub(crate) meta: Meta,
  pub trip_id:     Option<Uuid>,
  pub truck_id:    Option<Uuid>,
  pub driver_id:   Option<Uuid>,
  pub severity:    Severity,
  pub description: String,
  pub location:    Option<String>,
  pub occurred_at: DateTime<Utc>,
}

impl_record!(IncidentReport, "incidents", "incident report");

#[derive(Debug, Clone, Deserialize)]
pub struct NewIncidentReport {
  pub trip_id:     Option<Uuid>,
  pub truck_id:    Option<Uuid>,
  pub driver_id:   Option<Uuid>,
  pub severity:    Severity,
  pub description: String,
  pub location:    Option<String>,
  pub occurred_at: DateTime<Utc>,
}

impl NewIncidentReport {
  pub fn validate(&self) -> Result<()> {
    check_present("description", &self.description)
  }

  pub(crate) fn into_record(self, owner_id: Uuid, now: DateTime<Utc>) -> IncidentReport {
    IncidentReport {
      meta:        Meta::new(owner_id, now),
      trip_id:     self.trip_id,
      truck_id:    self.truck_id,
      driver_id:   self.driver_id,
      severity:    self.severity,
      description: self.description.trim().to_owned(),
      location:    self.location,
      occurred_at: self.occurred_at,
    }
  }
}
