//! The `Repository` trait.
//!
//! Implemented by storage backends (e.g. `fleet-store-sqlite`). The service
//! layer depends on this abstraction only. Every read and write is scoped by
//! owner; a record that exists under another owner is indistinguishable from
//! one that does not exist at all.

use std::future::Future;

use uuid::Uuid;

use crate::{
  Record,
  driver::Driver,
  facility::Facility,
  filter::Criterion,
  logs::{FuelLog, IncidentReport, MaintenanceLog},
  trip::Trip,
  truck::Truck,
};

/// Result of a version-conditioned write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
  Applied,
  /// No record with that id under that owner.
  Missing,
  /// The record exists but no longer carries the expected version.
  Stale,
}

/// Persistence for one record type.
///
/// All methods return `Send` futures so a repository can sit behind an axum
/// router on a multi-threaded runtime.
pub trait Repository<R: Record>: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Persist a freshly created record.
  fn insert(
    &self,
    record: R,
  ) -> impl Future<Output = Result<R, Self::Error>> + Send + '_;

  fn find_by_id(
    &self,
    id: Uuid,
    owner_id: Uuid,
  ) -> impl Future<Output = Result<Option<R>, Self::Error>> + Send + '_;

  /// Replace the stored record if, and only if, it still carries
  /// `expected_version` under the record's owner. The record passed in
  /// already holds its new version.
  fn save(
    &self,
    record: R,
    expected_version: u64,
  ) -> impl Future<Output = Result<WriteOutcome, Self::Error>> + Send + '_;

  /// Returns the number of rows removed (0 or 1).
  fn delete_by_id(
    &self,
    id: Uuid,
    owner_id: Uuid,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  /// One page of matches, newest-created first with ties broken by id,
  /// together with the total number of matches ignoring the bounds.
  fn query(
    &self,
    criterion: Criterion,
    limit: u32,
    offset: u64,
  ) -> impl Future<Output = Result<(Vec<R>, u64), Self::Error>> + Send + '_;
}

/// A backend that persists every fleet record type.
pub trait FleetStore:
  Repository<Trip>
  + Repository<Driver>
  + Repository<Truck>
  + Repository<Facility>
  + Repository<FuelLog>
  + Repository<MaintenanceLog>
  + Repository<IncidentReport>
{
}

impl<T> FleetStore for T where
  T: Repository<Trip>
    + Repository<Driver>
    + Repository<Truck>
    + Repository<Facility>
    + Repository<FuelLog>
    + Repository<MaintenanceLog>
    + Repository<IncidentReport>
{
}
