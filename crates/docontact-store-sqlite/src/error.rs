//! Error type for `docontact-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json encode error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// An insert reported a row count other than one.
  #[error("insert affected {0} rows, expected 1")]
  NotInserted(usize),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
