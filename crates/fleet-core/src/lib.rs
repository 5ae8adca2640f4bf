//! Core types, engines and trait definitions for the fleet-logistics service.
//!
//! No HTTP or database dependencies. The storage adapter and the REST layer
//! depend on this crate.

pub mod driver;
pub mod error;
pub mod facility;
pub mod filter;
pub mod lifecycle;
pub mod logs;
pub mod record;
pub mod service;
pub mod store;
pub mod trip;
pub mod truck;

pub use error::{Error, Result};
pub use record::{Meta, Record};
pub use service::FleetService;
