//! Driver: an employee who can be assigned to trips.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  Result,
  lifecycle::Status,
  record::{Meta, check_present, impl_record},
  trip::DriverSnapshot,
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
pub enum EmploymentStatus {
  Active,
  Suspended,
  Terminated,
}

impl Status for EmploymentStatus {
  const ENTITY: &'static str = "driver";

  const TRANSITIONS: &'static [(Self, Self)] = &[
    (Self::Active, Self::Suspended),
    (Self::Suspended, Self::Active),
    (Self::Active, Self::Terminated),
    (Self::Suspended, Self::Terminated),
  ];
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Driver {
  #[serde(flatten)]
  pub(crate) meta:              Meta,
  pub first_name:               String,
  pub last_name:                String,
  pub license_number:           String,
  /// Two-letter issuing state, upper-cased on write.
  pub license_state:            String,
  pub phone:                    Option<String>,
  pub email:                    Option<String>,
  pub(crate) employment_status: EmploymentStatus,
}

impl_record!(Driver, "drivers", "driver");

impl Driver {
  pub(crate) fn new(owner_id: Uuid, input: NewDriver, now: DateTime<Utc>) -> Self {
    Self {
      meta:              Meta::new(owner_id, now),
      first_name:        input.first_name.trim().to_owned(),
      last_name:         input.last_name.trim().to_owned(),
      license_number:    input.license_number.trim().to_owned(),
      license_state:     normalize_state(&input.license_state),
      phone:             input.phone,
      email:             input.email,
      employment_status: EmploymentStatus::Active,
    }
  }

  pub fn employment_status(&self) -> EmploymentStatus { self.employment_status }

  pub fn full_name(&self) -> String {
    format!("{} {}", self.first_name, self.last_name)
  }

  pub fn snapshot(&self) -> DriverSnapshot {
    DriverSnapshot {
      driver_id:      self.meta.id,
      full_name:      self.full_name(),
      license_number: self.license_number.clone(),
    }
  }
}

/// Input to [`crate::FleetService::create_driver`].
#[derive(Debug, Clone, Deserialize)]
pub struct NewDriver {
  pub first_name:     String,
  pub last_name:      String,
  pub license_number: String,
  pub license_state:  String,
  pub phone:          Option<String>,
  pub email:          Option<String>,
}

impl NewDriver {
  pub fn validate(&self) -> Result<()> {
    check_present("first name", &self.first_name)?;
    check_present("last name", &self.last_name)?;
    check_present("license number", &self.license_number)?;
    check_present("license state", &self.license_state)
  }
}

/// Edits to the non-status fields of a driver.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DriverUpdate {
  pub first_name:     Option<String>,
  pub last_name:      Option<String>,
  pub license_number: Option<String>,
  pub license_state:  Option<String>,
  pub phone:          Option<String>,
  pub email:          Option<String>,
}

impl DriverUpdate {
  pub(crate) fn apply(&self, driver: &mut Driver, now: DateTime<Utc>) -> Result<()> {
    for (field, value) in [
      ("first name", &self.first_name),
      ("last name", &self.last_name),
      ("license number", &self.license_number),
      ("license state", &self.license_state),
    ] {
      if let Some(value) = value {
        check_present(field, value)?;
      }
    }

    if let Some(v) = &self.first_name {
      driver.first_name = v.trim().to_owned();
    }
    if let Some(v) = &self.last_name {
      driver.last_name = v.trim().to_owned();
    }
    if let Some(v) = &self.license_number {
      driver.license_number = v.trim().to_owned();
    }
    if let Some(v) = &self.license_state {
      driver.license_state = normalize_state(v);
    }
    if let Some(v) = &self.phone {
      driver.phone = Some(v.clone());
    }
    if let Some(v) = &self.email {
      driver.email = Some(v.clone());
    }
    driver.meta.touch(now);
    Ok(())
  }
}

pub(crate) fn normalize_state(state: &str) -> String {
  state.trim().to_ascii_uppercase()
}
