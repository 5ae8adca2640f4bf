//! Named trip transitions.
//!
//! Each operation owns its side effects. `complete_successfully` and
//! `complete_unsuccessfully` both write `arrival_time.actual` but land in
//! different statuses, so nothing is inferred from the target state alone.

use chrono::{DateTime, Utc};

use super::guard;
use crate::{
  Error, Result,
  trip::{Trip, TripNote, TripStatus},
};

/// Upper bound on a note's length, in characters, after trimming.
pub const MAX_NOTE_CHARS: usize = 1000;

/// `Scheduled -> InTransit`, recording when the truck actually left.
pub fn begin_trip(trip: &mut Trip, departure_actual: DateTime<Utc>) -> Result<()> {
  guard(trip.status, TripStatus::InTransit)?;
  trip.status = TripStatus::InTransit;
  trip.departure_time.actual = Some(departure_actual);
  trip.meta.touch(Utc::now());
  Ok(())
}

/// `InTransit -> Completed`, recording when the cargo was delivered.
pub fn complete_successfully(
  trip: &mut Trip,
  arrival_actual: DateTime<Utc>,
) -> Result<()> {
  arrive(trip, TripStatus::Completed, arrival_actual)
}

/// `InTransit -> FailedDelivery`, recording when the attempt ended.
pub fn complete_unsuccessfully(
  trip: &mut Trip,
  arrival_actual: DateTime<Utc>,
) -> Result<()> {
  arrive(trip, TripStatus::FailedDelivery, arrival_actual)
}

/// `Scheduled -> Canceled`.
pub fn cancel(trip: &mut Trip) -> Result<()> {
  guard(trip.status, TripStatus::Canceled)?;
  trip.status = TripStatus::Canceled;
  trip.meta.touch(Utc::now());
  Ok(())
}

/// Append a note. Legal in every status, terminal ones included.
pub fn add_note(trip: &mut Trip, content: &str) -> Result<()> {
  let content = content.trim();
  if content.is_empty() {
    return Err(Error::validation("note content must not be empty"));
  }
  if content.chars().count() > MAX_NOTE_CHARS {
    return Err(Error::validation(format!(
      "note content exceeds {MAX_NOTE_CHARS} characters"
    )));
  }

  let now = Utc::now();
  trip.notes.push(TripNote { timestamp: now, content: content.to_owned() });
  trip.meta.touch(now);
  Ok(())
}

fn arrive(
  trip: &mut Trip,
  target: TripStatus,
  arrival_actual: DateTime<Utc>,
) -> Result<()> {
  guard(trip.status, target)?;
  if let Some(departed) = trip.departure_time.actual
    && arrival_actual < departed
  {
    return Err(Error::validation(
      "actual arrival must not precede actual departure",
    ));
  }

  trip.status = target;
  trip.arrival_time.actual = Some(arrival_actual);
  trip.meta.touch(Utc::now());
  Ok(())
}
