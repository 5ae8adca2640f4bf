//! The resource service.
//!
//! [`FleetService`] is the only caller of the repository. It scopes every
//! lookup by owner, runs lifecycle operations as a versioned
//! read → transition → write cycle, and builds list envelopes.

mod fleet;
mod trips;


use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
  Error, Record, Result,
  filter::{Filter, Page, build_criterion, build_envelope, normalize_bounds},
  store::{Repository, WriteOutcome},
};

/// Attempts a versioned write gets before surfacing [`Error::Conflict`].
pub const DEFAULT_WRITE_ATTEMPTS: u32 = 3;

pub struct FleetService<S> {
  store:        Arc<S>,
  max_attempts: u32,
}

impl<S> Clone for FleetService<S> {
  fn clone(&self) -> Self {
    Self { store: Arc::clone(&self.store), max_attempts: self.max_attempts }
  }
}

impl<S> FleetService<S> {
  pub fn new(store: Arc<S>) -> Self {
    Self { store, max_attempts: DEFAULT_WRITE_ATTEMPTS }
  }

  /// Override the write attempt budget. Values below 1 are raised to 1.
  pub fn with_max_attempts(mut self, attempts: u32) -> Self {
    self.max_attempts = attempts.max(1);
    self
  }

  pub fn store(&self) -> &S { &self.store }

  // ── Generic record operations ─────────────────────────────────────────

  /// Fetch one record by id, scoped to `owner_id`.
  pub async fn get<R>(&self, id: Uuid, owner_id: Uuid) -> Result<R>
  where
    R: Record,
    S: Repository<R>,
  {
    debug!(kind = R::KIND, %id, "fetching record");
    <S as Repository<R>>::find_by_id(&*self.store, id, owner_id)
      .await
      .map_err(Error::repository)?
      .ok_or(Error::NotFound { entity: R::NOUN, id })
  }

  /// One page of the owner's records matching `filter`.
  pub async fn list<F>(
    &self,
    owner_id: Uuid,
    filter: &F,
    limit: Option<i64>,
    offset: Option<i64>,
  ) -> Result<Page<F::Record>>
  where
    F: Filter,
    S: Repository<F::Record>,
  {
    let bounds = normalize_bounds(limit, offset);
    let criterion = build_criterion(owner_id, filter);
    debug!(
      kind = <F::Record as Record>::KIND,
      clauses = criterion.clauses().len(),
      limit = bounds.limit,
      offset = bounds.offset,
      "listing records"
    );
    let (items, total) = <S as Repository<F::Record>>::query(
      &*self.store,
      criterion,
      bounds.limit,
      bounds.offset,
    )
    .await
    .map_err(Error::repository)?;
    Ok(build_envelope(items, total, bounds))
  }

  /// Delete one record. Deleting nothing is [`Error::NotFound`].
  pub async fn delete<R>(&self, id: Uuid, owner_id: Uuid) -> Result<()>
  where
    R: Record,
    S: Repository<R>,
  {
    let removed = <S as Repository<R>>::delete_by_id(&*self.store, id, owner_id)
      .await
      .map_err(Error::repository)?;
    if removed == 0 {
      return Err(Error::NotFound { entity: R::NOUN, id });
    }
    info!(kind = R::KIND, %id, "deleted record");
    Ok(())
  }

  // ── Internals ─────────────────────────────────────────────────────────

  async fn insert<R>(&self, record: R) -> Result<R>
  where
    R: Record,
    S: Repository<R>,
  {
    let record = <S as Repository<R>>::insert(&*self.store, record)
      .await
      .map_err(Error::repository)?;
    info!(kind = R::KIND, id = %record.id(), "created record");
    Ok(record)
  }

  /// Resolve an optional reference to a snapshot of the referenced record.
  async fn resolve<R, T>(
    &self,
    id: Option<Uuid>,
    owner_id: Uuid,
    snapshot: impl FnOnce(&R) -> T + Send,
  ) -> Result<Option<T>>
  where
    R: Record,
    S: Repository<R>,
  {
    match id {
      Some(id) => Ok(Some(snapshot(&self.get::<R>(id, owner_id).await?))),
      None => Ok(None),
    }
  }

  /// Fail with [`Error::NotFound`] unless the owner holds the referenced
  /// record.
  async fn require<R>(&self, id: Option<Uuid>, owner_id: Uuid) -> Result<()>
  where
    R: Record,
    S: Repository<R>,
  {
    if let Some(id) = id {
      self.get::<R>(id, owner_id).await?;
    }
    Ok(())
  }

  /// Read the record, apply `op`, and write it back conditioned on the
  /// version that was read. A stale write restarts the whole cycle; once
  /// the attempt budget is spent the result is [`Error::Conflict`].
  ///
  /// An error from `op` aborts immediately and nothing is written.
  async fn mutate<R, F>(&self, id: Uuid, owner_id: Uuid, op: F) -> Result<R>
  where
    R: Record,
    S: Repository<R>,
    F: Fn(&mut R) -> Result<()> + Send,
  {
    for attempt in 1..=self.max_attempts {
      let mut record = self.get::<R>(id, owner_id).await?;
      op(&mut record)?;
      let expected = record.meta_mut().advance_version();

      let outcome =
        <S as Repository<R>>::save(&*self.store, record.clone(), expected)
          .await
          .map_err(Error::repository)?;
      match outcome {
        WriteOutcome::Applied => {
          info!(
            kind = R::KIND,
            %id,
            version = record.meta().version(),
            "saved record"
          );
          return Ok(record);
        }
        WriteOutcome::Missing => {
          return Err(Error::NotFound { entity: R::NOUN, id });
        }
        WriteOutcome::Stale => {
          warn!(kind = R::KIND, %id, attempt, "stale write, retrying");
        }
      }
    }

    Err(Error::Conflict {
      entity: R::NOUN,
      id,
      attempts: self.max_attempts,
    })
  }
}
