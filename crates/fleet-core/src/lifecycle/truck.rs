//! Named truck operational transitions.

use chrono::Utc;

use super::guard;
use crate::{
  Result,
  truck::{Truck, TruckStatus},
};

/// `Available -> InTransit`.
pub fn dispatch(truck: &mut Truck) -> Result<()> {
  set(truck, TruckStatus::InTransit)
}

/// `InTransit -> Available`.
pub fn release(truck: &mut Truck) -> Result<()> {
  set(truck, TruckStatus::Available)
}

/// `InTransit -> Maintenance`.
pub fn begin_maintenance(truck: &mut Truck) -> Result<()> {
  set(truck, TruckStatus::Maintenance)
}

/// `Maintenance -> InTransit`.
pub fn end_maintenance(truck: &mut Truck) -> Result<()> {
  set(truck, TruckStatus::InTransit)
}

/// Any non-retired status `-> Retired`.
pub fn retire(truck: &mut Truck) -> Result<()> {
  set(truck, TruckStatus::Retired)
}

fn set(truck: &mut Truck, next: TruckStatus) -> Result<()> {
  guard(truck.status, next)?;
  truck.status = next;
  truck.meta.touch(Utc::now());
  Ok(())
}

#[cfg(test)]
mod tests {
  use strum::IntoEnumIterator;
  use uuid::Uuid;

  use super::*;
  use crate::{Error, lifecycle::Status, truck::NewTruck};

  fn truck() -> Truck {
    Truck::new(
      Uuid::new_v4(),
      NewTruck {
        plate_number: "tx 4821k".into(),
        vin:          None,
        make:         "Freightliner".into(),
        model:        "Cascadia".into(),
        year:         Some(2021),
        capacity_lbs: 45_000.0,
      },
      Utc::now(),
    )
  }

  #[test]
  fn new_truck_is_available() {
    let t = truck();
    assert_eq!(t.status(), TruckStatus::Available);
    assert_eq!(t.plate_number, "TX 4821K");
  }

  #[test]
  fn maintenance_is_entered_from_transit() {
    let mut t = truck();
    assert!(matches!(begin_maintenance(&mut t), Err(Error::InvalidTransition { .. })));
    dispatch(&mut t).unwrap();
    begin_maintenance(&mut t).unwrap();
    assert_eq!(t.status(), TruckStatus::Maintenance);
    end_maintenance(&mut t).unwrap();
    release(&mut t).unwrap();
    assert_eq!(t.status(), TruckStatus::Available);
  }

  #[test]
  fn every_live_status_can_retire() {
    for status in TruckStatus::iter().filter(|s| *s != TruckStatus::Retired) {
      assert!(status.can_become(TruckStatus::Retired), "{status}");
    }
    let mut t = truck();
    retire(&mut t).unwrap();
    assert!(TruckStatus::Retired.is_terminal());
    assert!(matches!(retire(&mut t), Err(Error::InvalidTransition { .. })));
    assert!(matches!(dispatch(&mut t), Err(Error::InvalidTransition { .. })));
  }

  #[test]
  fn table_and_names() {
    super::super::tests::assert_table_matches_guard::<TruckStatus>();
    super::super::tests::assert_wire_names_agree::<TruckStatus>();
  }
}
