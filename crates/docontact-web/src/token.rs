//! Scoped anti-forgery tokens.
//!
//! A token is `hex(SHA-256(secret, scope, session, tick))`. The tick advances
//! every half lifetime and a token is accepted for the current and the
//! previous tick, so a rendered page stays usable for at least half the
//! configured lifetime and at most the whole of it.
//!
//! The scope is part of the digest: a submit token never verifies as a
//! delete token, and vice versa.

use chrono::{DateTime, Utc};
use rand_core::{OsRng, RngCore};
use sha2::{Digest, Sha256};

/// What a token authorizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenScope {
  /// Posting the public contact form.
  Submit,
  /// Deleting submissions from the admin list.
  Delete,
}

impl TokenScope {
  /// Action name mixed into the digest; also the form field name.
  pub fn action(self) -> &'static str {
    match self {
      Self::Submit => "docontact_submit_nonce",
      Self::Delete => "docontact_delete_nonce",
    }
  }
}

/// Issues and verifies tokens with a server-side secret.
pub struct TokenIssuer {
  secret:    Vec<u8>,
  tick_secs: i64,
}

impl TokenIssuer {
  pub fn new(secret: impl Into<Vec<u8>>, lifetime_secs: u64) -> Self {
    let half = i64::try_from(lifetime_secs / 2).unwrap_or(i64::MAX).max(1);
    Self { secret: secret.into(), tick_secs: half }
  }

  /// An issuer with a fresh random secret. Tokens do not survive a restart.
  pub fn random(lifetime_secs: u64) -> Self {
    let mut secret = [0u8; 32];
    OsRng.fill_bytes(&mut secret);
    Self::new(secret.to_vec(), lifetime_secs)
  }

  pub fn issue(&self, scope: TokenScope, session: &str) -> String {
    self.issue_at(scope, session, Utc::now())
  }

  pub fn verify(&self, scope: TokenScope, session: &str, token: &str) -> bool {
    self.verify_at(scope, session, token, Utc::now())
  }

  pub fn issue_at(&self, scope: TokenScope, session: &str, at: DateTime<Utc>) -> String {
    self.digest(scope, session, self.tick(at))
  }

  pub fn verify_at(&self, scope: TokenScope, session: &str, token: &str, at: DateTime<Utc>) -> bool {
    if token.is_empty() {
      return false;
    }
    let tick = self.tick(at);
    [tick, tick - 1]
      .into_iter()
      .any(|t| constant_time_eq(self.digest(scope, session, t).as_bytes(), token.as_bytes()))
  }

  fn tick(&self, at: DateTime<Utc>) -> i64 { at.timestamp().div_euclid(self.tick_secs) }

  fn digest(&self, scope: TokenScope, session: &str, tick: i64) -> String {
    let mut hasher = Sha256::new();
    hasher.update(&self.secret);
    hasher.update([0u8]);
    hasher.update(scope.action().as_bytes());
    hasher.update([0u8]);
    hasher.update(session.as_bytes());
    hasher.update([0u8]);
    hasher.update(tick.to_le_bytes());
    hex::encode(hasher.finalize())
  }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
  if a.len() != b.len() {
    return false;
  }
  a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
