//! Core types and trait definitions for the Khata dashboard backend.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod collection;
pub mod error;
pub mod record;
pub mod snapshot;
pub mod store;
pub mod sync;

pub use collection::Collection;
pub use error::{Error, Result};
pub use record::Record;
pub use snapshot::Snapshot;
