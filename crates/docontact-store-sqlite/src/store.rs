//! [`SqliteStore`] is the SQLite implementation of [`SubmissionStore`].

use std::path::Path;

use docontact_core::{
  store::SubmissionStore,
  submission::{NewSubmission, Submission},
};

use crate::{
  Error, Result,
  encode::{RawSubmission, SUBMISSION_COLUMNS, encode_dt},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A submission store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema setup.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.migrate().await?;
    Ok(store)
  }

  /// Open an in-memory store for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.migrate().await?;
    Ok(store)
  }

  /// Create the table and indexes if absent. Safe to run repeatedly.
  pub async fn migrate(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// The schema version recorded in `PRAGMA user_version`.
  pub async fn schema_version(&self) -> Result<i64> {
    let version = self
      .conn
      .call(|conn| Ok(conn.query_row("PRAGMA user_version", [], |row| row.get(0))?))
      .await?;
    Ok(version)
  }
}

// ─── SubmissionStore impl ────────────────────────────────────────────────────

impl SubmissionStore for SqliteStore {
  type Error = Error;

  async fn insert(&self, record: NewSubmission) -> Result<i64> {
    let service_key = record.service.map(|s| s.key());
    let created_at  = encode_dt(record.created_at);

    let (affected, id) = self
      .conn
      .call(move |conn| {
        let affected = conn.execute(
          "INSERT INTO docontact_submissions (
             full_name, email, phone, service, message, ip_address, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
          rusqlite::params![
            record.full_name,
            record.email,
            record.phone,
            service_key,
            record.message,
            record.ip_address,
            created_at,
          ],
        )?;
        Ok((affected, conn.last_insert_rowid()))
      })
      .await?;

    if affected != 1 {
      return Err(Error::NotInserted(affected));
    }
    Ok(id)
  }

  async fn list(&self, limit: u32, offset: u64) -> Result<Vec<Submission>> {
    let offset_val = i64::try_from(offset).unwrap_or(i64::MAX);

    let raws: Vec<RawSubmission> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {SUBMISSION_COLUMNS}
           FROM docontact_submissions
           ORDER BY created_at DESC, id DESC
           LIMIT ?1 OFFSET ?2"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![limit, offset_val], RawSubmission::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawSubmission::into_submission).collect()
  }

  async fn count(&self) -> Result<u64> {
    let total: i64 = self
      .conn
      .call(|conn| {
        Ok(conn.query_row("SELECT COUNT(*) FROM docontact_submissions", [], |row| row.get(0))?)
      })
      .await?;
    Ok(u64::try_from(total).unwrap_or(0))
  }

  async fn delete_one(&self, id: i64) -> Result<bool> {
    let affected = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM docontact_submissions WHERE id = ?1",
          rusqlite::params![id],
        )?)
      })
      .await?;
    Ok(affected > 0)
  }

  /// One statement regardless of how many ids: the list is bound as a
  /// single JSON array and expanded with `json_each`.
  async fn delete_many<'a>(&'a self, ids: &'a [i64]) -> Result<u64> {
    if ids.is_empty() {
      return Ok(0);
    }
    let ids_json = serde_json::to_string(ids)?;

    let affected = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM docontact_submissions
           WHERE id IN (SELECT value FROM json_each(?1))",
          rusqlite::params![ids_json],
        )?)
      })
      .await?;
    Ok(affected as u64)
  }
}
