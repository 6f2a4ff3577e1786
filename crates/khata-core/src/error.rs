//! Error types for `khata-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// Caller-supplied collection name is not in the closed registry.
  #[error("unknown collection: {0:?}")]
  UnknownCollection(String),

  /// Record field name is not a known column of the target table.
  #[error("unknown column {column:?} for collection {collection:?}")]
  UnknownColumn {
    collection: &'static str,
    column:     String,
  },

  /// Record values must be JSON scalars (string, number, bool, null).
  #[error("value for column {column:?} is not a scalar")]
  NonScalarValue { column: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
