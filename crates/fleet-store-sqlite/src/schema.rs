//! SQL schema for the fleet SQLite store.

/// Full schema DDL; idempotent thanks to `IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One row per record of any kind. body_json holds the complete serialised
-- record; the other columns duplicate the header for keyed access.
CREATE TABLE IF NOT EXISTS records (
    kind        TEXT    NOT NULL,   -- Record::KIND, e.g. 'trips'
    record_id   TEXT    NOT NULL,
    owner_id    TEXT    NOT NULL,
    version     INTEGER NOT NULL,
    created_at  TEXT    NOT NULL,   -- fixed-width RFC 3339, sorts lexically
    updated_at  TEXT    NOT NULL,
    body_json   TEXT    NOT NULL,
    PRIMARY KEY (kind, record_id)
);

CREATE INDEX IF NOT EXISTS records_owner_idx
    ON records(kind, owner_id, created_at DESC);

PRAGMA user_version = 1;
";
