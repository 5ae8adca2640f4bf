//! Driver, truck, facility and log operations.

use chrono::Utc;
use uuid::Uuid;

use super::FleetService;
use crate::{
  Result,
  driver::{Driver, DriverUpdate, NewDriver},
  facility::{Facility, FacilityUpdate, NewFacility},
  lifecycle,
  logs::{
    FuelLog, IncidentReport, MaintenanceLog, NewFuelLog, NewIncidentReport,
    NewMaintenanceLog,
  },
  store::FleetStore,
  trip::Trip,
  truck::{NewTruck, Truck, TruckUpdate},
};

impl<S: FleetStore> FleetService<S> {
  // ── Drivers ───────────────────────────────────────────────────────────

  pub async fn create_driver(&self, owner_id: Uuid, input: NewDriver) -> Result<Driver> {
    input.validate()?;
    self.insert(Driver::new(owner_id, input, Utc::now())).await
  }

  pub async fn update_driver(
    &self,
    id: Uuid,
    owner_id: Uuid,
    update: DriverUpdate,
  ) -> Result<Driver> {
    self
      .mutate(id, owner_id, |d: &mut Driver| update.apply(d, Utc::now()))
      .await
  }

  pub async fn suspend_driver(&self, id: Uuid, owner_id: Uuid) -> Result<Driver> {
    self.mutate(id, owner_id, lifecycle::driver::suspend).await
  }

  pub async fn reinstate_driver(&self, id: Uuid, owner_id: Uuid) -> Result<Driver> {
    self.mutate(id, owner_id, lifecycle::driver::reinstate).await
  }

  pub async fn terminate_driver(&self, id: Uuid, owner_id: Uuid) -> Result<Driver> {
    self.mutate(id, owner_id, lifecycle::driver::terminate).await
  }

  // ── Trucks ────────────────────────────────────────────────────────────

  pub async fn create_truck(&self, owner_id: Uuid, input: NewTruck) -> Result<Truck> {
    input.validate()?;
    self.insert(Truck::new(owner_id, input, Utc::now())).await
  }

  pub async fn update_truck(
    &self,
    id: Uuid,
    owner_id: Uuid,
    update: TruckUpdate,
  ) -> Result<Truck> {
    self
      .mutate(id, owner_id, |t: &mut Truck| update.apply(t, Utc::now()))
      .await
  }

  pub async fn dispatch_truck(&self, id: Uuid, owner_id: Uuid) -> Result<Truck> {
    self.mutate(id, owner_id, lifecycle::truck::dispatch).await
  }

  pub async fn release_truck(&self, id: Uuid, owner_id: Uuid) -> Result<Truck> {
    self.mutate(id, owner_id, lifecycle::truck::release).await
  }

  pub async fn begin_truck_maintenance(
    &self,
    id: Uuid,
    owner_id: Uuid,
  ) -> Result<Truck> {
    self.mutate(id, owner_id, lifecycle::truck::begin_maintenance).await
  }

  pub async fn end_truck_maintenance(
    &self,
    id: Uuid,
    owner_id: Uuid,
  ) -> Result<Truck> {
    self.mutate(id, owner_id, lifecycle::truck::end_maintenance).await
  }

  pub async fn retire_truck(&self, id: Uuid, owner_id: Uuid) -> Result<Truck> {
    self.mutate(id, owner_id, lifecycle::truck::retire).await
  }

  // ── Facilities ────────────────────────────────────────────────────────

  pub async fn create_facility(
    &self,
    owner_id: Uuid,
    input: NewFacility,
  ) -> Result<Facility> {
    input.validate()?;
    self.insert(Facility::new(owner_id, input, Utc::now())).await
  }

  pub async fn update_facility(
    &self,
    id: Uuid,
    owner_id: Uuid,
    update: FacilityUpdate,
  ) -> Result<Facility> {
    self
      .mutate(id, owner_id, |f: &mut Facility| update.apply(f, Utc::now()))
      .await
  }

  // ── Logs ──────────────────────────────────────────────────────────────

  pub async fn create_fuel_log(
    &self,
    owner_id: Uuid,
    input: NewFuelLog,
  ) -> Result<FuelLog> {
    input.validate()?;
    self.require::<Truck>(Some(input.truck_id), owner_id).await?;
    self.require::<Driver>(input.driver_id, owner_id).await?;
    self.require::<Trip>(input.trip_id, owner_id).await?;
    self.insert(input.into_record(owner_id, Utc::now())).await
  }

  pub async fn create_maintenance_log(
    &self,
    owner_id: Uuid,
    input: NewMaintenanceLog,
  ) -> Result<MaintenanceLog> {
    input.validate()?;
    self.require::<Truck>(Some(input.truck_id), owner_id).await?;
    self.insert(input.into_record(owner_id, Utc::now())).await
  }

  pub async fn create_incident_report(
    &self,
    owner_id: Uuid,
    input: NewIncidentReport,
  ) -> Result<IncidentReport> {
    input.validate()?;
    self.require::<Trip>(input.trip_id, owner_id).await?;
    self.require::<Truck>(input.truck_id, owner_id).await?;
    self.require::<Driver>(input.driver_id, owner_id).await?;
    self.insert(input.into_record(owner_id, Utc::now())).await
  }
}
