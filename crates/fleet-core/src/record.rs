//! The header shared by every stored entity.
//!
//! Identity, ownership, and bookkeeping timestamps live in [`Meta`]. Its
//! fields are crate-private: the owner never changes after creation, and only
//! the service and the lifecycle engine move `version` and `updated_at`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use uuid::Uuid;

/// Identity and bookkeeping fields, flattened into every entity's JSON form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meta {
  pub(crate) id:         Uuid,
  pub(crate) owner_id:   Uuid,
  /// Optimistic-concurrency counter; starts at 1 and grows by one per save.
  pub(crate) version:    u64,
  pub(crate) created_at: DateTime<Utc>,
  pub(crate) updated_at: DateTime<Utc>,
}

impl Meta {
  pub(crate) fn new(owner_id: Uuid, now: DateTime<Utc>) -> Self {
    Self {
      id: Uuid::new_v4(),
      owner_id,
      version: 1,
      created_at: now,
      updated_at: now,
    }
  }

  pub fn id(&self) -> Uuid { self.id }

  pub fn owner_id(&self) -> Uuid { self.owner_id }

  pub fn version(&self) -> u64 { self.version }

  pub fn created_at(&self) -> DateTime<Utc> { self.created_at }

  pub fn updated_at(&self) -> DateTime<Utc> { self.updated_at }

  pub(crate) fn touch(&mut self, now: DateTime<Utc>) { self.updated_at = now; }

  /// Advance the version ahead of a conditional save, returning the version
  /// the stored row must still carry.
  pub(crate) fn advance_version(&mut self) -> u64 {
    let expected = self.version;
    self.version += 1;
    expected
  }
}

/// A tenant-owned entity that the repository can persist and query.
pub trait Record:
  Clone + Serialize + DeserializeOwned + Send + Sync + 'static
{
  /// Stable collection name used by storage backends.
  const KIND: &'static str;

  /// Singular name used in error messages.
  const NOUN: &'static str;

  fn meta(&self) -> &Meta;

  fn meta_mut(&mut self) -> &mut Meta;

  fn id(&self) -> Uuid { self.meta().id }

  fn owner_id(&self) -> Uuid { self.meta().owner_id }
}

/// Implements [`Record`] for a struct with a `meta: Meta` field.
macro_rules! impl_record {
  ($ty:ty, $kind:literal, $noun:literal) => {
    impl $crate::record::Record for $ty {
      const KIND: &'static str = $kind;
      const NOUN: &'static str = $noun;

      fn meta(&self) -> &$crate::record::Meta { &self.meta }

      fn meta_mut(&mut self) -> &mut $crate::record::Meta { &mut self.meta }
    }
  };
}

pub(crate) use impl_record;

/// Rejects negative or non-finite measurements.
pub(crate) fn check_measure(
  field: &str,
  value: Option<f64>,
) -> crate::Result<()> {
  match value {
    Some(v) if !v.is_finite() || v < 0.0 => Err(crate::Error::validation(
      format!("{field} must be a non-negative number"),
    )),
    _ => Ok(()),
  }
}

/// Rejects strings that are empty once trimmed.
pub(crate) fn check_present(field: &str, value: &str) -> crate::Result<()> {
  if value.trim().is_empty() {
    Err(crate::Error::validation(format!("{field} must not be empty")))
  } else {
    Ok(())
  }
}
