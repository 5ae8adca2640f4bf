//! The lifecycle engine.
//!
//! Each status enumeration carries its complete set of legal moves as a
//! constant table ([`Status::TRANSITIONS`]). Entity modules expose one
//! function per named transition. Each function checks the table before it
//! touches anything, so a rejected transition leaves the entity exactly as
//! it was.

pub mod driver;
pub mod trip;
pub mod truck;

use std::fmt;

use crate::{Error, Result};

/// A closed status enumeration governed by a transition table.
pub trait Status:
  Copy + Eq + fmt::Debug + fmt::Display + AsRef<str> + Send + Sync + 'static
{
  /// Entity name used in [`Error::InvalidTransition`].
  const ENTITY: &'static str;

  /// Every legal `(from, to)` pair. Anything absent is illegal.
  const TRANSITIONS: &'static [(Self, Self)];

  fn can_become(self, next: Self) -> bool {
    Self::TRANSITIONS
      .iter()
      .any(|&(from, to)| from == self && to == next)
  }

  /// A status with no outgoing edges.
  fn is_terminal(self) -> bool {
    !Self::TRANSITIONS.iter().any(|&(from, _)| from == self)
  }
}

/// Fail with [`Error::InvalidTransition`] unless `from -> to` is in the table.
pub(crate) fn guard<S: Status>(from: S, to: S) -> Result<()> {
  if from.can_become(to) {
    Ok(())
  } else {
    Err(Error::InvalidTransition {
      entity:    S::ENTITY,
      current:   from.to_string(),
      attempted: to.to_string(),
    })
  }
}

#[cfg(test)]
pub(crate) mod tests {
  use strum::IntoEnumIterator;

  use super::*;

  /// Every pair the table does not list must be rejected by `guard`, and
  /// every listed pair accepted.
  pub(crate) fn assert_table_matches_guard<S>()
  where
    S: Status + IntoEnumIterator,
  {
    for from in S::iter() {
      for to in S::iter() {
        let listed = S::TRANSITIONS.contains(&(from, to));
        assert_eq!(guard(from, to).is_ok(), listed, "{from} -> {to}");
      }
    }
  }

  /// The serde and strum spellings of a status must agree, because filters
  /// compare against the serialised document.
  pub(crate) fn assert_wire_names_agree<S>()
  where
    S: Status + IntoEnumIterator + serde::Serialize,
  {
    for s in S::iter() {
      let json = serde_json::to_value(s).unwrap();
      assert_eq!(json.as_str(), Some(s.as_ref()));
      assert_eq!(s.to_string(), s.as_ref());
    }
  }
}
