//! Error type for `khata-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] khata_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  /// A column value could not be represented as JSON (e.g. a blob).
  #[error("unrepresentable value in column {0:?}")]
  Unrepresentable(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
