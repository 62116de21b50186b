//! Visitor session cookie, used to bind submit tokens to one browser.

use axum::http::{HeaderMap, HeaderValue, header};
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "docontact_session";

const MAX_SESSION_LEN: usize = 64;

/// Read the visitor's session id from the `Cookie` header, ignoring values
/// that could not have been issued by [`new_session`].
pub fn session_from_headers(headers: &HeaderMap) -> Option<String> {
  headers
    .get_all(header::COOKIE)
    .iter()
    .filter_map(|v| v.to_str().ok())
    .flat_map(|v| v.split(';'))
    .filter_map(|pair| pair.trim().split_once('='))
    .find(|(name, _)| *name == SESSION_COOKIE)
    .map(|(_, value)| value.to_owned())
    .filter(|value| is_well_formed(value))
}

pub fn new_session() -> String { Uuid::new_v4().hyphenated().to_string() }

/// `Set-Cookie` value for a session id.
pub fn session_cookie(session: &str) -> Option<HeaderValue> {
  HeaderValue::from_str(&format!("{SESSION_COOKIE}={session}; Path=/; HttpOnly; SameSite=Lax")).ok()
}

fn is_well_formed(value: &str) -> bool {
  !value.is_empty()
    && value.len() <= MAX_SESSION_LEN
    && value.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}
