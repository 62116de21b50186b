//! SQL schema for the DoContact SQLite store.
//!
//! Executed when a store is opened and by `docontact --migrate`. Every
//! statement is guarded, so running it against a populated database leaves
//! the rows untouched.

/// Value written to `PRAGMA user_version` once the schema is in place.
pub const SCHEMA_VERSION: i64 = 1;

/// Full schema DDL; idempotent thanks to `IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- AUTOINCREMENT keeps ids monotonic: a deleted id is never handed out again.
CREATE TABLE IF NOT EXISTS docontact_submissions (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    full_name   TEXT NOT NULL,
    email       TEXT NOT NULL,
    phone       TEXT NOT NULL,
    service     TEXT,              -- service option key, e.g. 'web_dev'
    message     TEXT,
    ip_address  TEXT,
    created_at  TEXT NOT NULL      -- RFC 3339 UTC, fixed microsecond width
);

CREATE INDEX IF NOT EXISTS docontact_submissions_email_idx
    ON docontact_submissions(email);
CREATE INDEX IF NOT EXISTS docontact_submissions_created_idx
    ON docontact_submissions(created_at);

PRAGMA user_version = 1;
";
