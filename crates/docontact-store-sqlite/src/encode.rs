//! Conversions between domain types and the plain-text column values.
//!
//! Timestamps are stored as RFC 3339 strings with a fixed number of
//! fractional digits so that lexical order matches chronological order.

use chrono::{DateTime, SecondsFormat, Utc};
use docontact_core::submission::Submission;

use crate::{Error, Result};

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339_opts(SecondsFormat::Micros, true) }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

/// Column order used by every `SELECT` in this crate.
pub const SUBMISSION_COLUMNS: &str =
  "id, full_name, email, phone, service, message, ip_address, created_at";

/// A `docontact_submissions` row as read from SQLite, before timestamp
/// parsing.
pub struct RawSubmission {
  pub id:         i64,
  pub full_name:  String,
  pub email:      String,
  pub phone:      String,
  pub service:    Option<String>,
  pub message:    Option<String>,
  pub ip_address: Option<String>,
  pub created_at: String,
}

impl RawSubmission {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(0)?,
      full_name:  row.get(1)?,
      email:      row.get(2)?,
      phone:      row.get(3)?,
      service:    row.get(4)?,
      message:    row.get(5)?,
      ip_address: row.get(6)?,
      created_at: row.get(7)?,
    })
  }

  pub fn into_submission(self) -> Result<Submission> {
    Ok(Submission {
      id:         self.id,
      full_name:  self.full_name,
      email:      self.email,
      phone:      self.phone,
      service:    self.service,
      message:    self.message,
      ip_address: self.ip_address,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}
