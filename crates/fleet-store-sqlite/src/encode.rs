//! Encoding helpers between fleet records and SQLite columns.
//!
//! UUIDs are stored as hyphenated lowercase strings. Column timestamps use
//! RFC 3339 with a fixed nanosecond width so that text order is time order.
//! Inside `body_json` timestamps keep their serde form and are compared
//! through `julianday()`.

use chrono::{DateTime, SecondsFormat, Utc};
use fleet_core::{
  Record,
  filter::{Clause, Criterion, Value},
};
use rusqlite::types::Value as SqlValue;
use uuid::Uuid;

use crate::Result;

// ─── Scalars ─────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

/// Clamp a `u64` into SQLite's signed integer range.
pub fn encode_count(n: u64) -> i64 { i64::try_from(n).unwrap_or(i64::MAX) }

// ─── Rows ────────────────────────────────────────────────────────────────────

/// Column values for one `records` row, ready to move into a `call` closure.
pub struct RecordRow {
  pub kind:       &'static str,
  pub record_id:  String,
  pub owner_id:   String,
  pub version:    i64,
  pub created_at: String,
  pub updated_at: String,
  pub body_json:  String,
}

impl RecordRow {
  pub fn encode<R: Record>(record: &R) -> Result<Self> {
    let meta = record.meta();
    Ok(Self {
      kind:       R::KIND,
      record_id:  encode_uuid(meta.id()),
      owner_id:   encode_uuid(meta.owner_id()),
      version:    encode_count(meta.version()),
      created_at: encode_dt(meta.created_at()),
      updated_at: encode_dt(meta.updated_at()),
      body_json:  serde_json::to_string(record)?,
    })
  }
}

pub fn decode_body<R: Record>(body_json: &str) -> Result<R> {
  Ok(serde_json::from_str(body_json)?)
}

// ─── Criterion ───────────────────────────────────────────────────────────────

/// A `WHERE` clause body and its positional parameters.
pub struct WhereClause {
  pub sql:    String,
  pub params: Vec<SqlValue>,
}

/// Translate a criterion into SQL over the `records` table. The kind and
/// owner constraints come first and are always present.
pub fn encode_criterion(kind: &'static str, criterion: &Criterion) -> WhereClause {
  let mut conds = vec!["kind = ?".to_owned(), "owner_id = ?".to_owned()];
  let mut params = vec![
    SqlValue::Text(kind.to_owned()),
    SqlValue::Text(encode_uuid(criterion.owner_id())),
  ];

  for clause in criterion.clauses() {
    match clause {
      Clause::Eq { field, value } => {
        conds.push(format!("{} = {}", lhs(value), rhs(value)));
        params.push(SqlValue::Text(json_path(field)));
        params.push(sql_value(value));
      }
      Clause::Range { field, min, max } => {
        let mut sides = Vec::with_capacity(2);
        if let Some(min) = min {
          sides.push(format!("{} >= {}", lhs(min), rhs(min)));
          params.push(SqlValue::Text(json_path(field)));
          params.push(sql_value(min));
        }
        if let Some(max) = max {
          sides.push(format!("{} <= {}", lhs(max), rhs(max)));
          params.push(SqlValue::Text(json_path(field)));
          params.push(sql_value(max));
        }
        if !sides.is_empty() {
          conds.push(format!("({})", sides.join(" AND ")));
        }
      }
    }
  }

  WhereClause { sql: conds.join(" AND "), params }
}

fn json_path(field: &str) -> String { format!("$.{field}") }

fn lhs(value: &Value) -> &'static str {
  match value {
    Value::Time(_) => "julianday(json_extract(body_json, ?))",
    _ => "json_extract(body_json, ?)",
  }
}

fn rhs(value: &Value) -> &'static str {
  match value {
    Value::Time(_) => "julianday(?)",
    _ => "?",
  }
}

fn sql_value(value: &Value) -> SqlValue {
  match value {
    Value::Text(s) => SqlValue::Text(s.clone()),
    Value::Number(n) => SqlValue::Real(*n),
    // json_extract yields 1/0 for JSON booleans.
    Value::Bool(b) => SqlValue::Integer(i64::from(*b)),
    // Must match the serde spelling of the stored value; julianday() rounds
    // both sides to the millisecond.
    Value::Time(t) => SqlValue::Text(t.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn column_timestamps_have_fixed_width() {
    let whole = "2024-05-01T08:00:00Z".parse::<DateTime<Utc>>().unwrap();
    let frac = "2024-05-01T08:00:00.5Z".parse::<DateTime<Utc>>().unwrap();
    assert_eq!(encode_dt(whole).len(), encode_dt(frac).len());
    assert!(encode_dt(whole) < encode_dt(frac));
  }

  #[test]
  fn time_bounds_match_the_serialised_form() {
    let t = "2024-06-05T06:00:00.1239Z".parse::<DateTime<Utc>>().unwrap();
    let stored = serde_json::to_value(t).unwrap();
    assert_eq!(sql_value(&Value::Time(t)), SqlValue::Text(stored.as_str().unwrap().into()));
  }

  #[test]
  fn owner_scope_leads_every_where_clause() {
    let owner = Uuid::new_v4();
    let c = Criterion::owned_by(owner)
      .eq("cargo.hazardous", Some(true))
      .range("capacity_lbs", Some(1.0), None::<f64>);
    let w = encode_criterion("trucks", &c);
    assert_eq!(
      w.sql,
      "kind = ? AND owner_id = ? AND json_extract(body_json, ?) = ? \
       AND (json_extract(body_json, ?) >= ?)"
    );
    assert_eq!(w.params.len(), 6);
    assert_eq!(w.params[1], SqlValue::Text(encode_uuid(owner)));
    assert_eq!(w.params[2], SqlValue::Text("$.cargo.hazardous".into()));
    assert_eq!(w.params[3], SqlValue::Integer(1));
  }
}
