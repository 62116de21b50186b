//! The `SubmissionStore` trait.
//!
//! Implemented by storage backends (e.g. `docontact-store-sqlite`). The
//! service and the web layer depend on this abstraction only.

use std::future::Future;

use crate::submission::{NewSubmission, Submission};

/// Single-table access to persisted submissions.
///
/// The store assigns nothing but the row identifier: timestamps and the
/// client address arrive fully formed in [`NewSubmission`].
///
/// All methods return `Send` futures so the trait can be used from axum
/// handlers on a multi-threaded runtime.
pub trait SubmissionStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Persist a submission and return its new identifier. Fails if the write
  /// did not affect exactly one row.
  fn insert(
    &self,
    record: NewSubmission,
  ) -> impl Future<Output = Result<i64, Self::Error>> + Send + '_;

  /// Newest first by `created_at`, then by descending id.
  fn list(
    &self,
    limit: u32,
    offset: u64,
  ) -> impl Future<Output = Result<Vec<Submission>, Self::Error>> + Send + '_;

  /// Total number of rows.
  fn count(&self) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  /// Delete one row. `Ok(false)` means no row had this id.
  fn delete_one(&self, id: i64) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Delete every listed row in one statement and return how many were
  /// actually removed. Ids that do not exist are skipped silently.
  fn delete_many<'a>(
    &'a self,
    ids: &'a [i64],
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + 'a;
}
