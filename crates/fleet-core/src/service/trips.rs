use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::FleetService;
use crate::{
  Record, Result,
  driver::Driver,
  facility::Facility,
  lifecycle,
  store::{FleetStore, Repository},
  trip::{NewTrip, Trip, TripLinkChanges, TripLinks, TripUpdate},
  truck::Truck,
};

impl<S: FleetStore> FleetService<S> {
  /// Create a trip in `Scheduled`. Referenced drivers, trucks and
  /// facilities must belong to `owner_id`.
  pub async fn create_trip(&self, owner_id: Uuid, input: NewTrip) -> Result<Trip> {
    input.validate()?;
    let links = TripLinks {
      driver:         self
        .resolve(input.driver_id, owner_id, Driver::snapshot)
        .await?,
      truck:          self
        .resolve(input.truck_id, owner_id, Truck::snapshot)
        .await?,
      start_facility: self
        .resolve(input.start_facility_id, owner_id, Facility::snapshot)
        .await?,
      end_facility:   self
        .resolve(input.end_facility_id, owner_id, Facility::snapshot)
        .await?,
    };
    self.insert(Trip::new(owner_id, input, links, Utc::now())).await
  }

  /// Edit the non-status fields of a trip.
  pub async fn update_trip(
    &self,
    id: Uuid,
    owner_id: Uuid,
    update: TripUpdate,
  ) -> Result<Trip> {
    let links = TripLinkChanges {
      driver:         self
        .resolve_change(update.driver_id, owner_id, Driver::snapshot)
        .await?,
      truck:          self
        .resolve_change(update.truck_id, owner_id, Truck::snapshot)
        .await?,
      start_facility: self
        .resolve_change(update.start_facility_id, owner_id, Facility::snapshot)
        .await?,
      end_facility:   self
        .resolve_change(update.end_facility_id, owner_id, Facility::snapshot)
        .await?,
    };
    self
      .mutate(id, owner_id, |trip: &mut Trip| {
        update.apply(trip, &links, Utc::now())
      })
      .await
  }

  pub async fn begin_trip(
    &self,
    id: Uuid,
    owner_id: Uuid,
    departure_actual: DateTime<Utc>,
  ) -> Result<Trip> {
    self
      .mutate(id, owner_id, |trip: &mut Trip| {
        lifecycle::trip::begin_trip(trip, departure_actual)
      })
      .await
  }

  pub async fn complete_trip_successfully(
    &self,
    id: Uuid,
    owner_id: Uuid,
    arrival_actual: DateTime<Utc>,
  ) -> Result<Trip> {
    self
      .mutate(id, owner_id, |trip: &mut Trip| {
        lifecycle::trip::complete_successfully(trip, arrival_actual)
      })
      .await
  }

  pub async fn complete_trip_unsuccessfully(
    &self,
    id: Uuid,
    owner_id: Uuid,
    arrival_actual: DateTime<Utc>,
  ) -> Result<Trip> {
    self
      .mutate(id, owner_id, |trip: &mut Trip| {
        lifecycle::trip::complete_unsuccessfully(trip, arrival_actual)
      })
      .await
  }

  pub async fn cancel_trip(&self, id: Uuid, owner_id: Uuid) -> Result<Trip> {
    self.mutate(id, owner_id, lifecycle::trip::cancel).await
  }

  pub async fn add_trip_note(
    &self,
    id: Uuid,
    owner_id: Uuid,
    content: &str,
  ) -> Result<Trip> {
    self
      .mutate(id, owner_id, |trip: &mut Trip| {
        lifecycle::trip::add_note(trip, content)
      })
      .await
  }

  async fn resolve_change<R, T>(
    &self,
    change: Option<Option<Uuid>>,
    owner_id: Uuid,
    snapshot: impl FnOnce(&R) -> T + Send,
  ) -> Result<Option<Option<T>>>
  where
    R: Record,
    S: Repository<R>,
  {
    match change {
      Some(id) => Ok(Some(self.resolve(id, owner_id, snapshot).await?)),
      None => Ok(None),
    }
  }
}
