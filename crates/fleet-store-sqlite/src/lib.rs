//! SQLite backend for the fleet record store.
//!
//! Every record type shares one `records` table: the identity, ownership
//! and version columns are broken out for keyed access, and the full record
//! is kept as a JSON document that filters reach into with `json_extract`.
//! Access goes through [`tokio_rusqlite`] so queries run on a dedicated
//! thread without blocking the async runtime.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;

#[cfg(test)]
mod tests;
