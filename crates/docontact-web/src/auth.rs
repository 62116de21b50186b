//! Elevated-privilege guard: HTTP Basic auth against an argon2 hash.

use argon2::{Argon2, PasswordHash, PasswordVerifier};
use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, header, request::Parts};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as B64;
use docontact_core::store::SubmissionStore;

use crate::{AppState, error::ApiError};

/// Credentials of the administrator allowed to manage submissions.
#[derive(Clone)]
pub struct AuthConfig {
  pub username:      String,
  /// PHC string produced by argon2, e.g. `$argon2id$v=19$…`
  pub password_hash: String,
}

/// Extractor for the admin list page. Rejects with a Basic challenge.
///
/// The username is kept because delete tokens are issued to it: the
/// `data-nonce` rendered on the list only verifies for requests carrying the
/// same admin's credentials.
pub struct Admin(pub String);

/// Check the request's Basic credentials against `config` and return the
/// username that delete tokens are bound to.
///
/// Every failure is [`ApiError::Unauthorized`]; the JSON delete endpoints
/// map it to a 403 themselves.
pub fn verify_auth(headers: &HeaderMap, config: &AuthConfig) -> Result<String, ApiError> {
  let (username, password) = basic_credentials(headers).ok_or(ApiError::Unauthorized)?;
  if username != config.username || !password_matches(&password, &config.password_hash) {
    return Err(ApiError::Unauthorized);
  }
  Ok(username)
}

/// `(user, password)` from an `Authorization: Basic` header.
fn basic_credentials(headers: &HeaderMap) -> Option<(String, String)> {
  let encoded = headers
    .get(header::AUTHORIZATION)?
    .to_str()
    .ok()?
    .strip_prefix("Basic ")?;
  let decoded = String::from_utf8(B64.decode(encoded.trim()).ok()?).ok()?;
  let (user, password) = decoded.split_once(':')?;
  Some((user.to_owned(), password.to_owned()))
}

/// An unparsable stored hash never matches.
fn password_matches(password: &str, phc: &str) -> bool {
  PasswordHash::new(phc)
    .is_ok_and(|hash| Argon2::default().verify_password(password.as_bytes(), &hash).is_ok())
}

impl<S> FromRequestParts<AppState<S>> for Admin
where
  S: SubmissionStore + Clone + 'static,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    verify_auth(&parts.headers, &state.auth).map(Admin)
  }
}
