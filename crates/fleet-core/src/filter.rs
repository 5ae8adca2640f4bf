//! The filter and pagination engine.
//!
//! Turns a caller's filter and paging request into a bounded, tenant-scoped
//! [`Criterion`], and a repository result into a [`Page`]. Nothing here fails:
//! out-of-range bounds are clamped and blank filter fields are ignored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  Record,
  driver::{Driver, EmploymentStatus},
  facility::{Facility, ServiceType},
  lifecycle::Status,
  logs::{FuelLog, IncidentReport, MaintenanceKind, MaintenanceLog, Severity},
  trip::{Trip, TripStatus},
  truck::{Truck, TruckStatus},
};

pub const DEFAULT_LIMIT: u32 = 10;
pub const MAX_LIMIT: u32 = 100;

// ─── Bounds ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
  pub limit:  u32,
  pub offset: u64,
}

/// Clamp a requested page into `limit ∈ [1, MAX_LIMIT]` and `offset ≥ 0`.
/// A missing or non-positive limit becomes [`DEFAULT_LIMIT`].
pub fn normalize_bounds(limit: Option<i64>, offset: Option<i64>) -> Bounds {
  let limit = match limit {
    Some(l) if l > 0 => l.min(i64::from(MAX_LIMIT)) as u32,
    _ => DEFAULT_LIMIT,
  };
  let offset = offset.map_or(0, |o| o.max(0) as u64);
  Bounds { limit, offset }
}

// ─── Criterion ───────────────────────────────────────────────────────────────

/// A scalar a clause compares against.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
  Text(String),
  Number(f64),
  Bool(bool),
  Time(DateTime<Utc>),
}

impl From<Uuid> for Value {
  fn from(id: Uuid) -> Self { Self::Text(id.hyphenated().to_string()) }
}

impl From<f64> for Value {
  fn from(n: f64) -> Self { Self::Number(n) }
}

impl From<bool> for Value {
  fn from(b: bool) -> Self { Self::Bool(b) }
}

impl From<DateTime<Utc>> for Value {
  fn from(t: DateTime<Utc>) -> Self { Self::Time(t) }
}

/// One constraint on a field of the stored document. `field` is a dotted
/// path, e.g. `address.state` or `departure_time.scheduled`.
#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
  Eq {
    field: &'static str,
    value: Value,
  },
  /// A single two-sided bound; at least one side is present. Both ends are
  /// inclusive.
  Range {
    field: &'static str,
    min:   Option<Value>,
    max:   Option<Value>,
  },
}

/// An abstract, always tenant-scoped query predicate.
///
/// The owner constraint is fixed at construction and cannot be removed; the
/// builder methods only ever add clauses.
#[derive(Debug, Clone, PartialEq)]
pub struct Criterion {
  owner_id: Uuid,
  clauses:  Vec<Clause>,
}

impl Criterion {
  pub fn owned_by(owner_id: Uuid) -> Self {
    Self { owner_id, clauses: Vec::new() }
  }

  pub fn owner_id(&self) -> Uuid { self.owner_id }

  pub fn clauses(&self) -> &[Clause] { &self.clauses }

  /// Add an equality clause if `value` is present.
  pub fn eq<V: Into<Value>>(mut self, field: &'static str, value: Option<V>) -> Self {
    if let Some(value) = value {
      self.clauses.push(Clause::Eq { field, value: value.into() });
    }
    self
  }

  /// Add a case-sensitive text equality clause if `value` is present and not
  /// blank. Surrounding whitespace is trimmed.
  pub fn eq_text(mut self, field: &'static str, value: Option<&str>) -> Self {
    if let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) {
      self.clauses.push(Clause::Eq { field, value: Value::Text(value.to_owned()) });
    }
    self
  }

  /// Add an equality clause on a status enumeration if present.
  pub fn eq_status<S: Status>(mut self, field: &'static str, value: Option<S>) -> Self {
    if let Some(value) = value {
      self.clauses.push(Clause::Eq { field, value: Value::Text(value.as_ref().to_owned()) });
    }
    self
  }

  /// Equality on any `snake_case` enumeration that is not a lifecycle status.
  fn eq_tag<T: AsRef<str>>(mut self, field: &'static str, value: Option<T>) -> Self {
    if let Some(value) = value {
      self.clauses.push(Clause::Eq { field, value: Value::Text(value.as_ref().to_owned()) });
    }
    self
  }

  /// Add one two-sided clause if either bound is present.
  pub fn range<V: Into<Value>>(
    mut self,
    field: &'static str,
    min: Option<V>,
    max: Option<V>,
  ) -> Self {
    if min.is_some() || max.is_some() {
      self.clauses.push(Clause::Range {
        field,
        min: min.map(Into::into),
        max: max.map(Into::into),
      });
    }
    self
  }
}

/// The per-resource filter fields accepted by a list operation.
pub trait Filter {
  type Record: Record;

  /// Add this filter's clauses to an owner-scoped criterion.
  fn constrain(&self, criterion: Criterion) -> Criterion;
}

/// Build the criterion for a list request. The owner clause is always
/// present; each filter field only adds a clause when supplied.
pub fn build_criterion<F: Filter>(owner_id: Uuid, filter: &F) -> Criterion {
  filter.constrain(Criterion::owned_by(owner_id))
}

// ─── Envelope ────────────────────────────────────────────────────────────────

/// One page of a listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
  pub items:       Vec<T>,
  pub total:       u64,
  pub limit:       u32,
  pub offset:      u64,
  /// Offset of the following page, computed against `total` at query time.
  pub next_offset: Option<u64>,
}

pub fn build_envelope<T>(items: Vec<T>, total: u64, bounds: Bounds) -> Page<T> {
  let end = bounds.offset.saturating_add(u64::from(bounds.limit));
  Page {
    items,
    total,
    limit: bounds.limit,
    offset: bounds.offset,
    next_offset: (end < total).then_some(end),
  }
}

// ─── Resource filters ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TripFilter {
  pub status:         Option<TripStatus>,
  pub driver_id:      Option<Uuid>,
  pub truck_id:       Option<Uuid>,
  pub hazardous:      Option<bool>,
  pub departs_after:  Option<DateTime<Utc>>,
  pub departs_before: Option<DateTime<Utc>>,
}

impl Filter for TripFilter {
  type Record = Trip;

  fn constrain(&self, c: Criterion) -> Criterion {
    c.eq_status("status", self.status)
      .eq("driver.driver_id", self.driver_id)
      .eq("truck.truck_id", self.truck_id)
      .eq("cargo.hazardous", self.hazardous)
      .range("departure_time.scheduled", self.departs_after, self.departs_before)
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DriverFilter {
  pub license_state:     Option<String>,
  pub employment_status: Option<EmploymentStatus>,
}

impl Filter for DriverFilter {
  type Record = Driver;

  fn constrain(&self, c: Criterion) -> Criterion {
    let state = self.license_state.as_deref().map(str::to_ascii_uppercase);
    c.eq_text("license_state", state.as_deref())
      .eq_status("employment_status", self.employment_status)
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TruckFilter {
  pub status:       Option<TruckStatus>,
  pub make:         Option<String>,
  pub min_capacity: Option<f64>,
  pub max_capacity: Option<f64>,
}

impl Filter for TruckFilter {
  type Record = Truck;

  fn constrain(&self, c: Criterion) -> Criterion {
    c.eq_status("status", self.status)
      .eq_text("make", self.make.as_deref())
      .range("capacity_lbs", self.min_capacity, self.max_capacity)
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FacilityFilter {
  pub state:        Option<String>,
  pub service_type: Option<ServiceType>,
}

impl Filter for FacilityFilter {
  type Record = Facility;

  fn constrain(&self, c: Criterion) -> Criterion {
    let state = self.state.as_deref().map(str::to_ascii_uppercase);
    c.eq_text("address.state", state.as_deref())
      .eq_tag("service_type", self.service_type)
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FuelLogFilter {
  pub truck_id:      Option<Uuid>,
  pub driver_id:     Option<Uuid>,
  pub trip_id:       Option<Uuid>,
  pub fueled_after:  Option<DateTime<Utc>>,
  pub fueled_before: Option<DateTime<Utc>>,
}

impl Filter for FuelLogFilter {
  type Record = FuelLog;

  fn constrain(&self, c: Criterion) -> Criterion {
    c.eq("truck_id", self.truck_id)
      .eq("driver_id", self.driver_id)
      .eq("trip_id", self.trip_id)
      .range("fueled_at", self.fueled_after, self.fueled_before)
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MaintenanceLogFilter {
  pub truck_id:         Option<Uuid>,
  pub service_type:     Option<MaintenanceKind>,
  pub performed_after:  Option<DateTime<Utc>>,
  pub performed_before: Option<DateTime<Utc>>,
}

impl Filter for MaintenanceLogFilter {
  type Record = MaintenanceLog;

  fn constrain(&self, c: Criterion) -> Criterion {
    c.eq("truck_id", self.truck_id)
      .eq_tag("service_type", self.service_type)
      .range("performed_at", self.performed_after, self.performed_before)
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IncidentFilter {
  pub trip_id:   Option<Uuid>,
  pub truck_id:  Option<Uuid>,
  pub driver_id: Option<Uuid>,
  pub severity:  Option<Severity>,
}

impl Filter for IncidentFilter {
  type Record = IncidentReport;

  fn constrain(&self, c: Criterion) -> Criterion {
    c.eq("trip_id", self.trip_id)
      .eq("truck_id", self.truck_id)
      .eq("driver_id", self.driver_id)
      .eq_tag("severity", self.severity)
  }
}
