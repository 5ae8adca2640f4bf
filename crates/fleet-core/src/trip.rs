//! Trip: the central entity of the fleet domain.
//!
//! A trip moves cargo from a start facility to an end facility with an
//! assigned driver and truck. Its status, the observed halves of its time
//! windows, and its notes are crate-private: they change only through
//! [`crate::lifecycle::trip`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  Error, Result,
  facility::Address,
  lifecycle::Status,
  record::{Meta, check_measure, check_present, impl_record},
};

// ─── Status ──────────────────────────────────────────────────────────────────

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
pub enum TripStatus {
  Scheduled,
  InTransit,
  Completed,
  FailedDelivery,
  Canceled,
}

impl Status for TripStatus {
  const ENTITY: &'static str = "trip";

  const TRANSITIONS: &'static [(Self, Self)] = &[
    (Self::Scheduled, Self::InTransit),
    (Self::Scheduled, Self::Canceled),
    (Self::InTransit, Self::Completed),
    (Self::InTransit, Self::FailedDelivery),
  ];
}

// ─── Value objects ───────────────────────────────────────────────────────────

/// A planned time and, once the lifecycle records it, the observed one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeWindow {
  pub scheduled:     DateTime<Utc>,
  pub(crate) actual: Option<DateTime<Utc>>,
}

impl TimeWindow {
  pub fn scheduled(at: DateTime<Utc>) -> Self {
    Self { scheduled: at, actual: None }
  }

  pub fn actual(&self) -> Option<DateTime<Utc>> { self.actual }
}

/// What the trip carries. Never touched by the lifecycle engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cargo {
  pub description: String,
  pub weight_lbs:  f64,
  #[serde(default)]
  pub hazardous:   bool,
}

impl Cargo {
  fn validate(&self) -> Result<()> {
    check_present("cargo description", &self.description)?;
    check_measure("cargo weight", Some(self.weight_lbs))
  }
}

/// One entry of the append-only trip log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripNote {
  pub timestamp: DateTime<Utc>,
  pub content:   String,
}

// ─── Association snapshots ───────────────────────────────────────────────────

/// The assigned driver as it looked when it was attached to the trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverSnapshot {
  pub driver_id:      Uuid,
  pub full_name:      String,
  pub license_number: String,
}

/// The assigned truck as it looked when it was attached to the trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TruckSnapshot {
  pub truck_id:     Uuid,
  pub plate_number: String,
  pub make:         String,
  pub model:        String,
}

/// A start or end facility as it looked when it was attached to the trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacilitySnapshot {
  pub facility_id: Uuid,
  pub name:        String,
  pub address:     Address,
}

// ─── Trip ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trip {
  #[serde(flatten)]
  pub(crate) meta:           Meta,
  pub driver:                Option<DriverSnapshot>,
  pub truck:                 Option<TruckSnapshot>,
  pub start_facility:        Option<FacilitySnapshot>,
  pub end_facility:          Option<FacilitySnapshot>,
  pub(crate) departure_time: TimeWindow,
  pub(crate) arrival_time:   TimeWindow,
  pub(crate) status:         TripStatus,
  pub cargo:                 Cargo,
  pub(crate) notes:          Vec<TripNote>,
  pub fuel_usage:            Option<f64>,
  pub distance_miles:        Option<f64>,
}

impl_record!(Trip, "trips", "trip");

impl Trip {
  /// Build a freshly scheduled trip from validated input and resolved
  /// association snapshots.
  pub(crate) fn new(
    owner_id: Uuid,
    input: NewTrip,
    links: TripLinks,
    now: DateTime<Utc>,
  ) -> Self {
    Self {
      meta:           Meta::new(owner_id, now),
      driver:         links.driver,
      truck:          links.truck,
      start_facility: links.start_facility,
      end_facility:   links.end_facility,
      departure_time: TimeWindow::scheduled(input.scheduled_departure),
      arrival_time:   TimeWindow::scheduled(input.scheduled_arrival),
      status:         TripStatus::Scheduled,
      cargo:          input.cargo,
      notes:          Vec::new(),
      fuel_usage:     input.fuel_usage,
      distance_miles: input.distance_miles,
    }
  }

  pub fn status(&self) -> TripStatus { self.status }

  pub fn departure_time(&self) -> &TimeWindow { &self.departure_time }

  pub fn arrival_time(&self) -> &TimeWindow { &self.arrival_time }

  pub fn notes(&self) -> &[TripNote] { &self.notes }
}

// ─── Inputs ──────────────────────────────────────────────────────────────────

/// Input to [`crate::FleetService::create_trip`].
#[derive(Debug, Clone, Deserialize)]
pub struct NewTrip {
  pub driver_id:           Option<Uuid>,
  pub truck_id:            Option<Uuid>,
  pub start_facility_id:   Option<Uuid>,
  pub end_facility_id:     Option<Uuid>,
  pub scheduled_departure: DateTime<Utc>,
  pub scheduled_arrival:   DateTime<Utc>,
  pub cargo:               Cargo,
  pub fuel_usage:          Option<f64>,
  pub distance_miles:      Option<f64>,
}

impl NewTrip {
  /// Convenience constructor with no associations or measurements.
  pub fn new(
    scheduled_departure: DateTime<Utc>,
    scheduled_arrival: DateTime<Utc>,
    cargo: Cargo,
  ) -> Self {
    Self {
      driver_id: None,
      truck_id: None,
      start_facility_id: None,
      end_facility_id: None,
      scheduled_departure,
      scheduled_arrival,
      cargo,
      fuel_usage: None,
      distance_miles: None,
    }
  }

  pub fn validate(&self) -> Result<()> {
    self.cargo.validate()?;
    check_schedule(self.scheduled_departure, self.scheduled_arrival)?;
    check_measure("fuel usage", self.fuel_usage)?;
    check_measure("distance", self.distance_miles)
  }
}

/// Edits to the non-status fields of a trip.
///
/// For the association fields, `None` leaves the link alone, `Some(None)`
/// detaches it, and `Some(Some(id))` attaches the referenced record.
#[derive(Debug, Clone, Default)]
pub struct TripUpdate {
  pub driver_id:           Option<Option<Uuid>>,
  pub truck_id:            Option<Option<Uuid>>,
  pub start_facility_id:   Option<Option<Uuid>>,
  pub end_facility_id:     Option<Option<Uuid>>,
  pub scheduled_departure: Option<DateTime<Utc>>,
  pub scheduled_arrival:   Option<DateTime<Utc>>,
  pub cargo:               Option<Cargo>,
  pub fuel_usage:          Option<f64>,
  pub distance_miles:      Option<f64>,
}

/// Association snapshots resolved by the service before a create.
#[derive(Debug, Clone, Default)]
pub(crate) struct TripLinks {
  pub driver:         Option<DriverSnapshot>,
  pub truck:          Option<TruckSnapshot>,
  pub start_facility: Option<FacilitySnapshot>,
  pub end_facility:   Option<FacilitySnapshot>,
}

/// Association snapshots resolved before an update, following the
/// `Option<Option<_>>` convention of [`TripUpdate`].
#[derive(Debug, Clone, Default)]
pub(crate) struct TripLinkChanges {
  pub driver:         Option<Option<DriverSnapshot>>,
  pub truck:          Option<Option<TruckSnapshot>>,
  pub start_facility: Option<Option<FacilitySnapshot>>,
  pub end_facility:   Option<Option<FacilitySnapshot>>,
}

impl TripUpdate {
  /// Apply the edit, or return an error and leave `trip` untouched.
  pub(crate) fn apply(
    &self,
    trip: &mut Trip,
    links: &TripLinkChanges,
    now: DateTime<Utc>,
  ) -> Result<()> {
    let departure = self
      .scheduled_departure
      .unwrap_or(trip.departure_time.scheduled);
    let arrival = self
      .scheduled_arrival
      .unwrap_or(trip.arrival_time.scheduled);
    let rescheduled =
      self.scheduled_departure.is_some() || self.scheduled_arrival.is_some();

    if rescheduled && trip.status != TripStatus::Scheduled {
      return Err(Error::validation(format!(
        "a {} trip can no longer be rescheduled",
        trip.status
      )));
    }
    check_schedule(departure, arrival)?;
    if let Some(cargo) = &self.cargo {
      cargo.validate()?;
    }
    check_measure("fuel usage", self.fuel_usage)?;
    check_measure("distance", self.distance_miles)?;

    trip.departure_time.scheduled = departure;
    trip.arrival_time.scheduled = arrival;
    if let Some(cargo) = &self.cargo {
      trip.cargo = cargo.clone();
    }
    if let Some(fuel) = self.fuel_usage {
      trip.fuel_usage = Some(fuel);
    }
    if let Some(distance) = self.distance_miles {
      trip.distance_miles = Some(distance);
    }
    if let Some(driver) = &links.driver {
      trip.driver = driver.clone();
    }
    if let Some(truck) = &links.truck {
      trip.truck = truck.clone();
    }
    if let Some(start) = &links.start_facility {
      trip.start_facility = start.clone();
    }
    if let Some(end) = &links.end_facility {
      trip.end_facility = end.clone();
    }
    trip.meta.touch(now);
    Ok(())
  }
}

fn check_schedule(departure: DateTime<Utc>, arrival: DateTime<Utc>) -> Result<()> {
  if arrival < departure {
    Err(Error::validation(
      "scheduled arrival must not precede scheduled departure",
    ))
  } else {
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use chrono::{Duration, TimeZone};

  use super::*;
  use crate::Record;

  fn cargo() -> Cargo {
    Cargo {
      description: "pallets of canned tomatoes".into(),
      weight_lbs:  18_000.0,
      hazardous:   false,
    }
  }

  fn trip() -> Trip {
    let dep = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
    Trip::new(
      Uuid::new_v4(),
      NewTrip::new(dep, dep + Duration::hours(6), cargo()),
      TripLinks::default(),
      dep - Duration::days(1),
    )
  }

  #[test]
  fn new_trip_starts_scheduled_without_actuals() {
    let t = trip();
    assert_eq!(t.status(), TripStatus::Scheduled);
    assert!(t.departure_time().actual().is_none());
    assert!(t.arrival_time().actual().is_none());
    assert!(t.notes().is_empty());
    assert_eq!(t.meta().version(), 1);
  }

  #[test]
  fn new_trip_validation() {
    let dep = Utc::now();
    assert!(NewTrip::new(dep, dep, cargo()).validate().is_ok());

    let backwards = NewTrip::new(dep, dep - Duration::minutes(1), cargo());
    assert!(matches!(backwards.validate(), Err(Error::Validation(_))));

    let mut blank = NewTrip::new(dep, dep, cargo());
    blank.cargo.description = "   ".into();
    assert!(matches!(blank.validate(), Err(Error::Validation(_))));

    let mut negative = NewTrip::new(dep, dep, cargo());
    negative.distance_miles = Some(-3.0);
    assert!(matches!(negative.validate(), Err(Error::Validation(_))));
  }

  #[test]
  fn update_rejects_inverted_schedule_and_leaves_trip_alone() {
    let mut t = trip();
    let before = serde_json::to_value(&t).unwrap();
    let update = TripUpdate {
      scheduled_arrival: Some(t.departure_time.scheduled - Duration::hours(1)),
      cargo: Some(Cargo { description: "other".into(), ..cargo() }),
      ..Default::default()
    };

    let err = update
      .apply(&mut t, &TripLinkChanges::default(), Utc::now())
      .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    assert_eq!(serde_json::to_value(&t).unwrap(), before);
  }

  #[test]
  fn update_detaches_and_replaces_links() {
    let mut t = trip();
    t.driver = Some(DriverSnapshot {
      driver_id:      Uuid::new_v4(),
      full_name:      "Ada Lovelace".into(),
      license_number: "D123".into(),
    });
    let truck = TruckSnapshot {
      truck_id:     Uuid::new_v4(),
      plate_number: "7ABC123".into(),
      make:         "Volvo".into(),
      model:        "VNL".into(),
    };
    let links = TripLinkChanges {
      driver: Some(None),
      truck: Some(Some(truck.clone())),
      ..Default::default()
    };

    TripUpdate::default().apply(&mut t, &links, Utc::now()).unwrap();
    assert!(t.driver.is_none());
    assert_eq!(t.truck, Some(truck));
    assert_eq!(t.status(), TripStatus::Scheduled);
  }

  #[test]
  fn serialised_form_is_flat() {
    let t = trip();
    let json = serde_json::to_value(&t).unwrap();
    assert_eq!(json["status"], "scheduled");
    assert_eq!(json["owner_id"], t.meta().owner_id().to_string());
    assert!(json["departure_time"]["actual"].is_null());

    let back: Trip = serde_json::from_value(json).unwrap();
    assert_eq!(back.meta(), t.meta());
  }

  #[test]
  fn status_table_and_names() {
    crate::lifecycle::tests::assert_table_matches_guard::<TripStatus>();
    crate::lifecycle::tests::assert_wire_names_agree::<TripStatus>();
    assert!(TripStatus::Completed.is_terminal());
    assert!(TripStatus::FailedDelivery.is_terminal());
    assert!(TripStatus::Canceled.is_terminal());
    assert!(!TripStatus::Scheduled.is_terminal());
  }
}
