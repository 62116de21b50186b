//! Submission: the single record type collected by the contact form.
//!
//! A submission is written once, after validation, and never updated. It is
//! removed only by an administrator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumMessage, EnumString, IntoEnumIterator, IntoStaticStr};

// ─── Service options ─────────────────────────────────────────────────────────

/// The services a visitor can pick from the form's select menu.
///
/// Stored by key (`web_dev`); displayed by label (`Web Development`).
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
  Display,
  EnumIter,
  EnumMessage,
  EnumString,
  IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ServiceOption {
  #[strum(message = "General Inquiry")]
  General,
  #[strum(message = "Web Development")]
  WebDev,
  #[strum(message = "SEO")]
  Seo,
  #[strum(message = "Support")]
  Support,
  #[strum(message = "Other")]
  Other,
}

impl ServiceOption {
  /// Every option, in menu order.
  pub fn all() -> impl Iterator<Item = Self> { Self::iter() }

  /// The storage key, e.g. `"web_dev"`.
  pub fn key(self) -> &'static str { self.into() }

  /// Human-readable label shown in the form and the admin table.
  pub fn label(&self) -> &'static str { self.get_message().unwrap_or("Other") }

  /// Map a raw form value to an option. Unknown or empty values yield `None`.
  pub fn from_key(raw: &str) -> Option<Self> { raw.trim().parse().ok() }

  /// Label for a stored column value; values that are no longer a known key
  /// are shown verbatim.
  pub fn display_stored(stored: &str) -> String {
    match Self::from_key(stored) {
      Some(opt) => opt.label().to_owned(),
      None => stored.to_owned(),
    }
  }
}

// ─── Records ─────────────────────────────────────────────────────────────────

/// A persisted submission row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
  pub id:         i64,
  pub full_name:  String,
  pub email:      String,
  pub phone:      String,
  pub service:    Option<String>,
  pub message:    Option<String>,
  pub ip_address: Option<String>,
  pub created_at: DateTime<Utc>,
}

/// Every column of a row except the identifier, supplied by the caller of
/// [`SubmissionStore::insert`](crate::store::SubmissionStore::insert).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubmission {
  pub full_name:  String,
  pub email:      String,
  pub phone:      String,
  pub service:    Option<ServiceOption>,
  pub message:    Option<String>,
  pub ip_address: Option<String>,
  pub created_at: DateTime<Utc>,
}

/// Visitor-supplied fields after sanitisation, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionInput {
  pub full_name: String,
  pub email:     String,
  pub phone:     String,
  pub service:   Option<ServiceOption>,
  pub message:   Option<String>,
}
