//! Error type for `kin-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] kin_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  #[error("unknown invitation status: {0:?}")]
  UnknownStatus(String),

  /// Attempted to resolve an invitation that was already resolved.
  #[error("invitation {0} is already resolved")]
  AlreadyResolved(uuid::Uuid),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
