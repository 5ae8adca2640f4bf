//! Truck: a power unit that can be assigned to trips.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  Result,
  lifecycle::Status,
  record::{Meta, check_measure, check_present, impl_record},
  trip::TruckSnapshot,
};

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
pub enum TruckStatus {
  Available,
  InTransit,
  Maintenance,
  Retired,
}

impl Status for TruckStatus {
  const ENTITY: &'static str = "truck";

  const TRANSITIONS: &'static [(Self, Self)] = &[
    (Self::Available, Self::InTransit),
    (Self::InTransit, Self::Available),
    (Self::InTransit, Self::Maintenance),
    (Self::Maintenance, Self::InTransit),
    (Self::Available, Self::Retired),
    (Self::InTransit, Self::Retired),
    (Self::Maintenance, Self::Retired),
  ];
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Truck {
  #[serde(flatten)]
  pub(crate) meta:   Meta,
  pub plate_number:  String,
  pub vin:           Option<String>,
  pub make:          String,
  pub model:         String,
  pub year:          Option<u16>,
  /// Payload capacity in pounds.
  pub capacity_lbs:  f64,
  pub(crate) status: TruckStatus,
}

impl_record!(Truck, "trucks", "truck");

impl Truck {
  pub(crate) fn new(owner_id: Uuid, input: NewTruck, now: DateTime<Utc>) -> Self {
    Self {
      meta:         Meta::new(owner_id, now),
      plate_number: input.plate_number.trim().to_ascii_uppercase(),
      vin:          input.vin,
      make:         input.make.trim().to_owned(),
      model:        input.model.trim().to_owned(),
      year:         input.year,
      capacity_lbs: input.capacity_lbs,
      status:       TruckStatus::Available,
    }
  }

  pub fn status(&self) -> TruckStatus { self.status }

  pub fn snapshot(&self) -> TruckSnapshot {
    TruckSnapshot {
      truck_id:     self.meta.id,
      plate_number: self.plate_number.clone(),
      make:         self.make.clone(),
      model:        self.model.clone(),
    }
  }
}

/// Input to [`crate::FleetService::create_truck`].
#[derive(Debug, Clone, Deserialize)]
pub struct NewTruck {
  pub plate_number: String,
  pub vin:          Option<String>,
  pub make:         String,
  pub model:        String,
  pub year:         Option<u16>,
  pub capacity_lbs: f64,
}

impl NewTruck {
  pub fn validate(&self) -> Result<()> {
    check_present("plate number", &self.plate_number)?;
    check_present("make", &self.make)?;
    check_present("model", &self.model)?;
    check_measure("capacity", Some(self.capacity_lbs))
  }
}

/// Edits to the non-status fields of a truck.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TruckUpdate {
  pub plate_number: Option<String>,
  pub vin:          Option<String>,
  pub make:         Option<String>,
  pub model:        Option<String>,
  pub year:         Option<u16>,
  pub capacity_lbs: Option<f64>,
}

impl TruckUpdate {
  pub(crate) fn apply(&self, truck: &mut Truck, now: DateTime<Utc>) -> Result<()> {
    if let Some(plate) = &self.plate_number {
      check_present("plate number", plate)?;
    }
    if let Some(make) = &self.make {
      check_present("make", make)?;
    }
    if let Some(model) = &self.model {
      check_present("model", model)?;
    }
    check_measure("capacity", self.capacity_lbs)?;

    if let Some(plate) = &self.plate_number {
      truck.plate_number = plate.trim().to_ascii_uppercase();
    }
    if let Some(vin) = &self.vin {
      truck.vin = Some(vin.clone());
    }
    if let Some(make) = &self.make {
      truck.make = make.trim().to_owned();
    }
    if let Some(model) = &self.model {
      truck.model = model.trim().to_owned();
    }
    if let Some(year) = self.year {
      truck.year = Some(year);
    }
    if let Some(capacity) = self.capacity_lbs {
      truck.capacity_lbs = capacity;
    }
    truck.meta.touch(now);
    Ok(())
  }
}
