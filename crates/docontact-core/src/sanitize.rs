//! Boundary clean-up of untrusted form values.
//!
//! Runs before validation: markup is stripped from free-text fields, every
//! field is trimmed, and the service value is narrowed to a known option.

use std::sync::LazyLock;

use regex::Regex;

use crate::submission::{ServiceOption, SubmissionInput};

static SCRIPT_STYLE_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(?is)<(?:script|style)\b[^>]*>.*?</(?:script|style)\s*>")
    .expect("script pattern compiles")
});

static TAG_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("tag pattern compiles"));

/// Raw, untrusted form values as received.
#[derive(Debug, Clone, Default)]
pub struct RawFields {
  pub full_name: Option<String>,
  pub email:     Option<String>,
  pub phone:     Option<String>,
  pub service:   Option<String>,
  pub message:   Option<String>,
}

/// Remove markup tags (and the bodies of `<script>`/`<style>` elements).
pub fn strip_tags(raw: &str) -> String {
  let without_blocks = SCRIPT_STYLE_RE.replace_all(raw, "");
  TAG_RE.replace_all(&without_blocks, "").into_owned()
}

/// Build a [`SubmissionInput`] from raw fields.
pub fn sanitize(raw: RawFields) -> SubmissionInput {
  let full_name = raw
    .full_name
    .map(|v| strip_tags(&v).trim().to_owned())
    .unwrap_or_default();
  let email = raw.email.map(|v| v.trim().to_owned()).unwrap_or_default();
  let phone = raw.phone.map(|v| v.trim().to_owned()).unwrap_or_default();
  let service = raw.service.as_deref().and_then(ServiceOption::from_key);
  let message = raw
    .message
    .map(|v| strip_tags(&v).trim().to_owned())
    .filter(|v| !v.is_empty());

  SubmissionInput { full_name, email, phone, service, message }
}
