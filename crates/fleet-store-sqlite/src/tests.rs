//! Integration tests for `SqliteStore` against an in-memory database.

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use fleet_core::{
  Error as CoreError, FleetService, Record,
  driver::{Driver, EmploymentStatus, NewDriver},
  facility::{Address, Facility, NewFacility, ServiceType},
  filter::{Criterion, DriverFilter, FacilityFilter, TripFilter, TruckFilter},
  store::{Repository, WriteOutcome},
  trip::{Cargo, NewTrip, Trip, TripStatus},
  truck::{NewTruck, Truck, TruckStatus},
};
use uuid::Uuid;

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

async fn service() -> FleetService<SqliteStore> {
  FleetService::new(Arc::new(store().await))
}

fn at(day: u32, hour: u32) -> DateTime<Utc> {
  Utc.with_ymd_and_hms(2024, 6, day, hour, 0, 0).unwrap()
}

fn trip_on(day: u32, hazardous: bool) -> NewTrip {
  NewTrip::new(at(day, 6), at(day, 18), Cargo {
    description: "Palletised steel".into(),
    weight_lbs: 30_000.0,
    hazardous,
  })
}

fn truck(make: &str, capacity_lbs: f64) -> NewTruck {
  NewTruck {
    plate_number: format!("{make}-{capacity_lbs}"),
    vin: None,
    make: make.into(),
    model: "T680".into(),
    year: None,
    capacity_lbs,
  }
}

// ─── Repository contract ─────────────────────────────────────────────────────

#[tokio::test]
async fn find_is_scoped_by_owner() {
  let s = store().await;
  let svc = FleetService::new(Arc::new(s.clone()));
  let owner = Uuid::new_v4();
  let trip = svc.create_trip(owner, trip_on(3, false)).await.unwrap();

  let found: Option<Trip> = s.find_by_id(trip.id(), owner).await.unwrap();
  let found = found.unwrap();
  assert_eq!(found.id(), trip.id());
  assert_eq!(found.status(), TripStatus::Scheduled);
  assert_eq!(found.cargo.description, "Palletised steel");

  let other: Option<Trip> = s.find_by_id(trip.id(), Uuid::new_v4()).await.unwrap();
  assert!(other.is_none());

  // Same id under a different kind is a different row.
  let as_truck: Option<Truck> = s.find_by_id(trip.id(), owner).await.unwrap();
  assert!(as_truck.is_none());
}

#[tokio::test]
async fn save_distinguishes_stale_from_missing() {
  let s = store().await;
  let svc = FleetService::new(Arc::new(s.clone()));
  let owner = Uuid::new_v4();
  let truck = svc.create_truck(owner, truck("Kenworth", 40_000.0)).await.unwrap();

  // Bumped by someone else first.
  svc.dispatch_truck(truck.id(), owner).await.unwrap();

  // Still expects version 1; the row is at 2.
  let outcome = <SqliteStore as Repository<Truck>>::save(&s, truck.clone(), 1)
    .await
    .unwrap();
  assert_eq!(outcome, WriteOutcome::Stale);

  let stored: Truck = svc.get(truck.id(), owner).await.unwrap();
  assert_eq!(stored.status(), TruckStatus::InTransit);
  assert_eq!(stored.meta().version(), 2);

  svc.delete::<Truck>(truck.id(), owner).await.unwrap();
  let outcome = <SqliteStore as Repository<Truck>>::save(&s, truck, 2)
    .await
    .unwrap();
  assert_eq!(outcome, WriteOutcome::Missing);
}

#[tokio::test]
async fn delete_reports_row_count() {
  let s = store().await;
  let svc = FleetService::new(Arc::new(s.clone()));
  let owner = Uuid::new_v4();
  let driver = svc
    .create_driver(owner, NewDriver {
      first_name:     "Lin".into(),
      last_name:      "Okafor".into(),
      license_number: "K-77".into(),
      license_state:  "ks".into(),
      phone:          None,
      email:          None,
    })
    .await
    .unwrap();

  let n = <SqliteStore as Repository<Driver>>::delete_by_id(&s, driver.id(), Uuid::new_v4())
    .await
    .unwrap();
  assert_eq!(n, 0);
  let n = <SqliteStore as Repository<Driver>>::delete_by_id(&s, driver.id(), owner)
    .await
    .unwrap();
  assert_eq!(n, 1);
}

// ─── Listing ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn query_orders_newest_first_and_counts_total() {
  let s = store().await;
  let svc = FleetService::new(Arc::new(s.clone()));
  let owner = Uuid::new_v4();

  let mut ids = Vec::new();
  for i in 0..5 {
    let t = svc
      .create_truck(owner, truck("Mack", 20_000.0 + f64::from(i)))
      .await
      .unwrap();
    ids.push(t.id());
    tokio::time::sleep(std::time::Duration::from_millis(2)).await;
  }
  svc.create_truck(Uuid::new_v4(), truck("Mack", 1.0)).await.unwrap();

  let (items, total): (Vec<Truck>, u64) = s
    .query(Criterion::owned_by(owner), 2, 1)
    .await
    .unwrap();
  assert_eq!(total, 5);
  let got: Vec<Uuid> = items.iter().map(Record::id).collect();
  assert_eq!(got, vec![ids[3], ids[2]]);
}

#[tokio::test]
async fn truck_filters() {
  let svc = service().await;
  let owner = Uuid::new_v4();
  for (make, cap) in [("Volvo", 26_000.0), ("Volvo", 44_000.0), ("Peterbilt", 34_000.0)] {
    svc.create_truck(owner, truck(make, cap)).await.unwrap();
  }
  let retired = svc.create_truck(owner, truck("Peterbilt", 50_000.0)).await.unwrap();
  svc.retire_truck(retired.id(), owner).await.unwrap();

  let volvo = svc
    .list(owner, &TruckFilter { make: Some("Volvo".into()), ..Default::default() }, None, None)
    .await
    .unwrap();
  assert_eq!(volvo.total, 2);

  let mid = svc
    .list(
      owner,
      &TruckFilter {
        min_capacity: Some(30_000.0),
        max_capacity: Some(45_000.0),
        ..Default::default()
      },
      None,
      None,
    )
    .await
    .unwrap();
  assert_eq!(mid.total, 2);

  let gone = svc
    .list(
      owner,
      &TruckFilter { status: Some(TruckStatus::Retired), ..Default::default() },
      None,
      None,
    )
    .await
    .unwrap();
  assert_eq!(gone.total, 1);
  assert_eq!(gone.items[0].id(), retired.id());

  let blank = svc
    .list(owner, &TruckFilter { make: Some("  ".into()), ..Default::default() }, None, None)
    .await
    .unwrap();
  assert_eq!(blank.total, 4);
}

#[tokio::test]
async fn trip_filters_reach_nested_fields() {
  let svc = service().await;
  let owner = Uuid::new_v4();
  let driver = svc
    .create_driver(owner, NewDriver {
      first_name:     "Rosa".into(),
      last_name:      "Diaz".into(),
      license_number: "NM-4".into(),
      license_state:  "nm".into(),
      phone:          None,
      email:          None,
    })
    .await
    .unwrap();

  let mut with_driver = trip_on(10, true);
  with_driver.driver_id = Some(driver.id());
  let driven = svc.create_trip(owner, with_driver).await.unwrap();
  svc.create_trip(owner, trip_on(12, false)).await.unwrap();
  let late = svc.create_trip(owner, trip_on(20, false)).await.unwrap();
  svc.begin_trip(late.id(), owner, at(20, 7)).await.unwrap();

  let by_driver = svc
    .list(owner, &TripFilter { driver_id: Some(driver.id()), ..Default::default() }, None, None)
    .await
    .unwrap();
  assert_eq!(by_driver.total, 1);
  assert_eq!(by_driver.items[0].id(), driven.id());

  let hazardous = svc
    .list(owner, &TripFilter { hazardous: Some(true), ..Default::default() }, None, None)
    .await
    .unwrap();
  assert_eq!(hazardous.total, 1);

  let window = svc
    .list(
      owner,
      &TripFilter {
        departs_after: Some(at(11, 0)),
        departs_before: Some(at(20, 6)),
        ..Default::default()
      },
      None,
      None,
    )
    .await
    .unwrap();
  assert_eq!(window.total, 2);

  let moving = svc
    .list(
      owner,
      &TripFilter { status: Some(TripStatus::InTransit), ..Default::default() },
      None,
      None,
    )
    .await
    .unwrap();
  assert_eq!(moving.total, 1);
  assert_eq!(moving.items[0].departure_time().actual(), Some(at(20, 7)));

  let after_everything = svc
    .list(
      owner,
      &TripFilter { departs_after: Some(at(20, 6) + Duration::seconds(1)), ..Default::default() },
      None,
      None,
    )
    .await
    .unwrap();
  assert_eq!(after_everything.total, 0);
}

#[tokio::test]
async fn departure_window_is_inclusive_below_a_millisecond() {
  let svc = service().await;
  let owner = Uuid::new_v4();
  let dep = at(5, 6) + Duration::microseconds(123_900);
  let mut input = trip_on(5, false);
  input.scheduled_departure = dep;
  let trip = svc.create_trip(owner, input).await.unwrap();

  for filter in [
    TripFilter { departs_before: Some(dep), ..Default::default() },
    TripFilter { departs_after: Some(dep), ..Default::default() },
    TripFilter { departs_after: Some(dep), departs_before: Some(dep), ..Default::default() },
  ] {
    let page = svc.list(owner, &filter, None, None).await.unwrap();
    assert_eq!(page.total, 1, "{filter:?}");
    assert_eq!(page.items[0].id(), trip.id());
  }

  let before = svc
    .list(
      owner,
      &TripFilter { departs_before: Some(dep - Duration::milliseconds(2)), ..Default::default() },
      None,
      None,
    )
    .await
    .unwrap();
  assert_eq!(before.total, 0);
}

#[tokio::test]
async fn driver_and_facility_filters() {
  let svc = service().await;
  let owner = Uuid::new_v4();
  for (name, state) in [("Ana", "tx"), ("Bo", "TX"), ("Cy", "ok")] {
    let d = svc
      .create_driver(owner, NewDriver {
        first_name:     name.into(),
        last_name:      "Driver".into(),
        license_number: format!("L-{name}"),
        license_state:  state.into(),
        phone:          None,
        email:          None,
      })
      .await
      .unwrap();
    if name == "Bo" {
      svc.suspend_driver(d.id(), owner).await.unwrap();
    }
  }

  let texans = svc
    .list(owner, &DriverFilter { license_state: Some("tx".into()), ..Default::default() }, None, None)
    .await
    .unwrap();
  assert_eq!(texans.total, 2);

  let suspended = svc
    .list(
      owner,
      &DriverFilter {
        employment_status: Some(EmploymentStatus::Suspended),
        ..Default::default()
      },
      None,
      None,
    )
    .await
    .unwrap();
  assert_eq!(suspended.total, 1);
  assert_eq!(suspended.items[0].first_name, "Bo");

  let dock = svc
    .create_facility(owner, NewFacility {
      name:         "South Cross-Dock".into(),
      address:      Address {
        street:      "9 Rail Spur".into(),
        city:        "Tulsa".into(),
        state:       "ok".into(),
        postal_code: "74101".into(),
      },
      service_type: ServiceType::CrossDock,
      dock_count:   30,
    })
    .await
    .unwrap();
  let page = svc
    .list(
      owner,
      &FacilityFilter { state: Some("OK".into()), service_type: Some(ServiceType::CrossDock) },
      None,
      None,
    )
    .await
    .unwrap();
  assert_eq!(page.total, 1);
  let got: &Facility = &page.items[0];
  assert_eq!(got.id(), dock.id());
}

// ─── Service over SQLite ─────────────────────────────────────────────────────

#[tokio::test]
async fn lifecycle_round_trips_through_storage() {
  let svc = service().await;
  let owner = Uuid::new_v4();
  let trip = svc.create_trip(owner, trip_on(5, false)).await.unwrap();

  svc.begin_trip(trip.id(), owner, at(5, 7)).await.unwrap();
  svc.add_trip_note(trip.id(), owner, "Delayed at weigh station").await.unwrap();
  svc.complete_trip_unsuccessfully(trip.id(), owner, at(5, 19)).await.unwrap();

  let stored: Trip = svc.get(trip.id(), owner).await.unwrap();
  assert_eq!(stored.status(), TripStatus::FailedDelivery);
  assert_eq!(stored.arrival_time().actual(), Some(at(5, 19)));
  assert_eq!(stored.notes().len(), 1);
  assert_eq!(stored.meta().version(), 4);

  assert!(matches!(
    svc.cancel_trip(trip.id(), owner).await,
    Err(CoreError::InvalidTransition { .. })
  ));
  assert!(matches!(
    svc.get::<Trip>(trip.id(), Uuid::new_v4()).await,
    Err(CoreError::NotFound { .. })
  ));
}

#[tokio::test]
async fn reopen_from_file_keeps_records() {
  let dir = std::env::temp_dir().join(format!("fleet-store-{}", Uuid::new_v4()));
  std::fs::create_dir_all(&dir).unwrap();
  let path = dir.join("fleet.db");
  let owner = Uuid::new_v4();

  let id = {
    let svc = FleetService::new(Arc::new(SqliteStore::open(&path).await.unwrap()));
    svc.create_truck(owner, truck("Isuzu", 12_000.0)).await.unwrap().id()
  };

  let svc = FleetService::new(Arc::new(SqliteStore::open(&path).await.unwrap()));
  let t: Truck = svc.get(id, owner).await.unwrap();
  assert_eq!(t.make, "Isuzu");

  std::fs::remove_dir_all(&dir).ok();
}
