//! Error types for `fleet-core`.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  /// Malformed input reaching the core; the caller must correct it.
  #[error("validation failed: {0}")]
  Validation(String),

  /// Nothing matches id + owner. Also covers records that exist
  /// but belong to another tenant.
  #[error("{entity} not found: {id}")]
  NotFound { entity: &'static str, id: Uuid },

  /// The requested move is absent from the entity's transition table.
  #[error("{entity} cannot move from {current} to {attempted}")]
  InvalidTransition {
    entity:    &'static str,
    current:   String,
    attempted: String,
  },

  /// Concurrent writers kept invalidating the read version.
  #[error("{entity} {id} was modified concurrently; gave up after {attempts} attempts")]
  Conflict {
    entity:   &'static str,
    id:       Uuid,
    attempts: u32,
  },

  #[error("repository error: {0}")]
  Repository(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub(crate) fn validation(message: impl Into<String>) -> Self {
    Self::Validation(message.into())
  }

  pub(crate) fn repository<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Repository(Box::new(err))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
