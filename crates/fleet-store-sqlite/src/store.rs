//! [`SqliteStore`]: the SQLite implementation of [`Repository`].

use std::path::Path;

use fleet_core::{
  Record,
  filter::Criterion,
  store::{Repository, WriteOutcome},
};
use rusqlite::OptionalExtension as _;
use tracing::debug;
use uuid::Uuid;

use crate::{
  Result,
  encode::{RecordRow, decode_body, encode_count, encode_criterion, encode_uuid},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A fleet record store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── Repository impl ─────────────────────────────────────────────────────────

impl<R: Record> Repository<R> for SqliteStore {
  type Error = crate::Error;

  async fn insert(&self, record: R) -> Result<R> {
    let row = RecordRow::encode(&record)?;

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO records (
             kind, record_id, owner_id, version, created_at, updated_at, body_json
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
          rusqlite::params![
            row.kind,
            row.record_id,
            row.owner_id,
            row.version,
            row.created_at,
            row.updated_at,
            row.body_json,
          ],
        )?;
        Ok(())
      })
      .await?;

    debug!(kind = R::KIND, id = %record.id(), "inserted row");
    Ok(record)
  }

  async fn find_by_id(&self, id: Uuid, owner_id: Uuid) -> Result<Option<R>> {
    let id_str = encode_uuid(id);
    let owner_str = encode_uuid(owner_id);

    let body: Option<String> = self
      .conn
      .call(move |conn| {
        let body = conn
          .query_row(
            "SELECT body_json FROM records
             WHERE kind = ?1 AND record_id = ?2 AND owner_id = ?3",
            rusqlite::params![R::KIND, id_str, owner_str],
            |r| r.get(0),
          )
          .optional()?;
        Ok(body)
      })
      .await?;

    body.as_deref().map(decode_body).transpose()
  }

  async fn save(&self, record: R, expected_version: u64) -> Result<WriteOutcome> {
    let row = RecordRow::encode(&record)?;
    let expected = encode_count(expected_version);

    let outcome = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let changed = tx.execute(
          "UPDATE records
           SET version = ?1, updated_at = ?2, body_json = ?3
           WHERE kind = ?4 AND record_id = ?5 AND owner_id = ?6 AND version = ?7",
          rusqlite::params![
            row.version,
            row.updated_at,
            row.body_json,
            row.kind,
            row.record_id,
            row.owner_id,
            expected,
          ],
        )?;

        let outcome = if changed > 0 {
          WriteOutcome::Applied
        } else {
          let exists = tx
            .query_row(
              "SELECT 1 FROM records
               WHERE kind = ?1 AND record_id = ?2 AND owner_id = ?3",
              rusqlite::params![row.kind, row.record_id, row.owner_id],
              |_| Ok(()),
            )
            .optional()?
            .is_some();
          if exists { WriteOutcome::Stale } else { WriteOutcome::Missing }
        };
        tx.commit()?;
        Ok(outcome)
      })
      .await?;

    debug!(
      kind = R::KIND,
      id = %record.id(),
      expected_version,
      ?outcome,
      "conditional save"
    );
    Ok(outcome)
  }

  async fn delete_by_id(&self, id: Uuid, owner_id: Uuid) -> Result<u64> {
    let id_str = encode_uuid(id);
    let owner_str = encode_uuid(owner_id);

    let removed = self
      .conn
      .call(move |conn| {
        let n = conn.execute(
          "DELETE FROM records
           WHERE kind = ?1 AND record_id = ?2 AND owner_id = ?3",
          rusqlite::params![R::KIND, id_str, owner_str],
        )?;
        Ok(n)
      })
      .await?;

    Ok(removed as u64)
  }

  async fn query(
    &self,
    criterion: Criterion,
    limit: u32,
    offset: u64,
  ) -> Result<(Vec<R>, u64)> {
    let filter = encode_criterion(R::KIND, &criterion);
    let offset = encode_count(offset);

    let (bodies, total): (Vec<String>, i64) = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let total: i64 = tx.query_row(
          &format!("SELECT COUNT(*) FROM records WHERE {}", filter.sql),
          rusqlite::params_from_iter(filter.params.iter()),
          |r| r.get(0),
        )?;

        let mut page_params = filter.params;
        page_params.push(rusqlite::types::Value::Integer(i64::from(limit)));
        page_params.push(rusqlite::types::Value::Integer(offset));

        let bodies = {
          let mut stmt = tx.prepare(&format!(
            "SELECT body_json FROM records
             WHERE {}
             ORDER BY created_at DESC, record_id
             LIMIT ? OFFSET ?",
            filter.sql
          ))?;
          stmt
            .query_map(rusqlite::params_from_iter(page_params.iter()), |r| {
              r.get::<_, String>(0)
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?
        };

        tx.commit()?;
        Ok((bodies, total))
      })
      .await?;

    debug!(kind = R::KIND, total, returned = bodies.len(), "query");
    let items = bodies
      .iter()
      .map(|b| decode_body(b))
      .collect::<Result<Vec<R>>>()?;
    Ok((items, total.max(0) as u64))
  }
}
