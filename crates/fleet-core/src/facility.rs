//! Facility: a place trips start from or end at.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  Result,
  driver::normalize_state,
  record::{Meta, check_present, impl_record},
  trip::FacilitySnapshot,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
  pub street:      String,
  pub city:        String,
  /// Two-letter state code, upper-cased on write.
  pub state:       String,
  pub postal_code: String,
}

impl Address {
  fn validate(&self) -> Result<()> {
    check_present("street", &self.street)?;
    check_present("city", &self.city)?;
    check_present("state", &self.state)?;
    check_present("postal code", &self.postal_code)
  }

  fn normalized(mut self) -> Self {
    self.state = normalize_state(&self.state);
    self
  }
}

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
pub enum ServiceType {
  Warehouse,
  DistributionCenter,
  CrossDock,
  Terminal,
  Customer,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Facility {
  #[serde(flatten)]
  pub(crate) meta:  Meta,
  pub name:         String,
  pub address:      Address,
  pub service_type: ServiceType,
  pub dock_count:   u32,
}

impl_record!(Facility, "facilities", "facility");

impl Facility {
  pub(crate) fn new(owner_id: Uuid, input: NewFacility, now: DateTime<Utc>) -> Self {
    Self {
      meta:         Meta::new(owner_id, now),
      name:         input.name.trim().to_owned(),
      address:      input.address.normalized(),
      service_type: input.service_type,
      dock_count:   input.dock_count,
    }
  }

  pub fn snapshot(&self) -> FacilitySnapshot {
    FacilitySnapshot {
      facility_id: self.meta.id,
      name:        self.name.clone(),
      address:     self.address.clone(),
    }
  }
}

/// Input to [`crate::FleetService::create_facility`].
#[derive(Debug, Clone, Deserialize)]
pub struct NewFacility {
  pub name:         String,
  pub address:      Address,
  pub service_type: ServiceType,
  pub dock_count:   u32,
}

impl NewFacility {
  pub fn validate(&self) -> Result<()> {
    check_present("facility name", &self.name)?;
    self.address.validate()
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FacilityUpdate {
  pub name:         Option<String>,
  pub address:      Option<Address>,
  pub service_type: Option<ServiceType>,
  pub dock_count:   Option<u32>,
}

impl FacilityUpdate {
  pub(crate) fn apply(&self, facility: &mut Facility, now: DateTime<Utc>) -> Result<()> {
    if let Some(name) = &self.name {
      check_present("facility name", name)?;
    }
    if let Some(address) = &self.address {
      address.validate()?;
    }

    if let Some(name) = &self.name {
      facility.name = name.trim().to_owned();
    }
    if let Some(address) = &self.address {
      facility.address = address.clone().normalized();
    }
    if let Some(service_type) = self.service_type {
      facility.service_type = service_type;
    }
    if let Some(docks) = self.dock_count {
      facility.dock_count = docks;
    }
    facility.meta.touch(now);
    Ok(())
  }
}
