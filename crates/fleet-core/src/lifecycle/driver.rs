//! Named driver employment transitions.

use chrono::Utc;

use super::guard;
use crate::{
  Result,
  driver::{Driver, EmploymentStatus},
};

/// `Active -> Suspended`.
pub fn suspend(driver: &mut Driver) -> Result<()> {
  set(driver, EmploymentStatus::Suspended)
}

/// `Suspended -> Active`.
pub fn reinstate(driver: &mut Driver) -> Result<()> {
  set(driver, EmploymentStatus::Active)
}

/// `Active | Suspended -> Terminated`.
pub fn terminate(driver: &mut Driver) -> Result<()> {
  set(driver, EmploymentStatus::Terminated)
}

fn set(driver: &mut Driver, next: EmploymentStatus) -> Result<()> {
  guard(driver.employment_status, next)?;
  driver.employment_status = next;
  driver.meta.touch(Utc::now());
  Ok(())
}

#[cfg(test)]
mod tests {
  use uuid::Uuid;

  use super::*;
  use crate::{Error, driver::NewDriver, lifecycle::Status};

  fn driver() -> Driver {
    Driver::new(
      Uuid::new_v4(),
      NewDriver {
        first_name:     "Grace".into(),
        last_name:      "Hopper".into(),
        license_number: "H-55012".into(),
        license_state:  " va ".into(),
        phone:          None,
        email:          None,
      },
      Utc::now(),
    )
  }

  #[test]
  fn new_driver_is_active_with_normalised_state() {
    let d = driver();
    assert_eq!(d.employment_status(), EmploymentStatus::Active);
    assert_eq!(d.license_state, "VA");
    assert_eq!(d.snapshot().full_name, "Grace Hopper");
  }

  #[test]
  fn suspend_and_reinstate_round_trip() {
    let mut d = driver();
    suspend(&mut d).unwrap();
    assert_eq!(d.employment_status(), EmploymentStatus::Suspended);
    assert!(matches!(suspend(&mut d), Err(Error::InvalidTransition { .. })));
    reinstate(&mut d).unwrap();
    assert_eq!(d.employment_status(), EmploymentStatus::Active);
  }

  #[test]
  fn termination_is_final() {
    let mut d = driver();
    suspend(&mut d).unwrap();
    terminate(&mut d).unwrap();
    assert!(EmploymentStatus::Terminated.is_terminal());
    for op in [suspend, reinstate, terminate] {
      assert!(matches!(op(&mut d), Err(Error::InvalidTransition { .. })));
    }
    assert_eq!(d.employment_status(), EmploymentStatus::Terminated);
  }

  #[test]
  fn table_and_names() {
    super::super::tests::assert_table_matches_guard::<EmploymentStatus>();
    super::super::tests::assert_wire_names_agree::<EmploymentStatus>();
  }
}
