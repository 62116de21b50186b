//! [`SubmissionService`] handles validation and persistence for the contact form
//! and its admin actions.
//!
//! The service knows nothing about HTTP, sessions or capabilities. Callers
//! run their own guards first and hand over typed input.

use std::{collections::BTreeSet, sync::Arc};

use chrono::Utc;
use serde::Serialize;

use crate::{
  Error, Result,
  origin::RequestOrigin,
  page::{PAGE_SIZE, Pagination, SubmissionPage},
  store::SubmissionStore,
  submission::{NewSubmission, SubmissionInput},
  validate::validate,
};

pub const SUBMIT_CONFIRMATION: &str = "Thank you — your message has been received.";
pub const DELETE_CONFIRMATION: &str = "Submission deleted successfully.";

/// Outcome of a successful submission.
#[derive(Debug, Clone, Serialize)]
pub struct Submitted {
  pub id:      i64,
  pub message: String,
}

/// Outcome of a successful bulk delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BulkDeleted {
  pub deleted_count: u64,
  pub message:       String,
}

/// Orchestrates the validator and a [`SubmissionStore`].
///
/// Cloning is cheap; the store is shared behind an `Arc`.
pub struct SubmissionService<S> {
  store: Arc<S>,
}

impl<S> Clone for SubmissionService<S> {
  fn clone(&self) -> Self { Self { store: Arc::clone(&self.store) } }
}

impl<S: SubmissionStore> SubmissionService<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  pub fn store(&self) -> &S { &self.store }

  /// Validate and persist a visitor's submission.
  ///
  /// On validation failure every message is returned, joined by a space, and
  /// nothing is written.
  pub async fn submit(&self, input: SubmissionInput, origin: &RequestOrigin) -> Result<Submitted> {
    let errors = validate(&input.full_name, &input.email, &input.phone);
    if !errors.is_empty() {
      return Err(Error::Invalid(errors));
    }

    let record = NewSubmission {
      full_name:  input.full_name,
      email:      input.email,
      phone:      input.phone,
      service:    input.service,
      message:    input.message,
      ip_address: origin.resolve_ip(),
      created_at: Utc::now(),
    };

    let id = self
      .store
      .insert(record)
      .await
      .map_err(|e| Error::NotSaved(Box::new(e)))?;

    Ok(Submitted { id, message: SUBMIT_CONFIRMATION.to_owned() })
  }

  /// Delete one submission. Only succeeds if a row was actually removed.
  pub async fn delete(&self, id: i64) -> Result<String> {
    if id <= 0 {
      return Err(Error::InvalidId);
    }

    let removed = self
      .store
      .delete_one(id)
      .await
      .map_err(|e| Error::DeleteFailed(Box::new(e)))?;

    if removed {
      Ok(DELETE_CONFIRMATION.to_owned())
    } else {
      Err(Error::NotDeleted(id))
    }
  }

  /// Delete every positive id in `ids`. Ids that no longer exist are not an
  /// error; the reported count is what was actually removed.
  pub async fn bulk_delete(&self, ids: Vec<i64>) -> Result<BulkDeleted> {
    let ids: Vec<i64> = ids
      .into_iter()
      .filter(|id| *id > 0)
      .collect::<BTreeSet<_>>()
      .into_iter()
      .collect();
    if ids.is_empty() {
      return Err(Error::NoValidIds);
    }

    let deleted_count = self
      .store
      .delete_many(&ids)
      .await
      .map_err(|e| Error::BulkDeleteFailed(Box::new(e)))?;

    Ok(BulkDeleted {
      deleted_count,
      message: format!("{deleted_count} submission(s) deleted successfully."),
    })
  }

  /// Fetch one admin page of submissions, newest first.
  pub async fn page(&self, page: u64) -> Result<SubmissionPage> {
    let total = self.store.count().await.map_err(|e| Error::Store(Box::new(e)))?;
    let pagination = Pagination::new(page, PAGE_SIZE, total);
    let items = self
      .store
      .list(pagination.per_page, pagination.offset())
      .await
      .map_err(|e| Error::Store(Box::new(e)))?;

    Ok(SubmissionPage { items, pagination })
  }
}
