//! Error types for `docontact-core`.
//!
//! Display strings are the messages shown to visitors and administrators, so
//! store failures never leak their cause through `Display`; the cause is kept
//! as the error source for logging.

use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum Error {
  /// One or more submitted fields failed validation.
  #[error("{}", .0.join(" "))]
  Invalid(Vec<String>),

  #[error("Invalid submission ID.")]
  InvalidId,

  #[error("No valid submission IDs provided.")]
  NoValidIds,

  /// The delete ran but no row with this id existed.
  #[error("Failed to delete submission.")]
  NotDeleted(i64),

  #[error("Failed to save submission. Please try again later.")]
  NotSaved(#[source] BoxError),

  #[error("Failed to delete submissions.")]
  BulkDeleteFailed(#[source] BoxError),

  #[error("Failed to delete submission.")]
  DeleteFailed(#[source] BoxError),

  #[error("Failed to load submissions.")]
  Store(#[source] BoxError),
}

impl Error {
  /// Whether the caller supplied bad input, as opposed to a storage failure.
  pub fn is_input_error(&self) -> bool {
    matches!(self, Self::Invalid(_) | Self::InvalidId | Self::NoValidIds)
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
