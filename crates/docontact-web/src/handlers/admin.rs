//! Admin endpoints: the paginated submissions page and the two delete
//! actions.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/admin/submissions` | HTML; `?paged=N`, 401 challenge without credentials |
//! | `POST` | `/admin/submissions/delete` | JSON `{submission_id, docontact_delete_nonce}` |
//! | `POST` | `/admin/submissions/bulk-delete` | JSON `{submission_ids: [...], docontact_delete_nonce}` |
//!
//! The delete actions need both admin credentials and a delete-scoped token
//! issued to the same admin; a submit token is rejected.

use axum::{
  Json,
  extract::{FromRequest, RawQuery, Request, State},
  http::Method,
  response::{Html, Response},
};
use docontact_core::{page::parse_page, store::SubmissionStore};
use serde::Deserialize;
use serde_json::json;

use crate::{
  AppState,
  auth::{Admin, verify_auth},
  error::{ApiError, INSUFFICIENT_PERMISSIONS, SECURITY_CHECK_FAILED, success},
  handlers::query_value,
  render,
  token::TokenScope,
};

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /admin/submissions[?paged=N]`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  Admin(username): Admin,
  RawQuery(raw_query): RawQuery,
) -> Result<Html<String>, ApiError>
where
  S: SubmissionStore + Clone + 'static,
{
  let page = parse_page(query_value(raw_query.as_deref(), "paged"));
  let submissions = state.service.page(page).await?;
  let token = state.tokens.issue(TokenScope::Delete, &username);

  Ok(Html(render::admin_page(&submissions, &token, raw_query.as_deref())))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// An id as sent by a browser: a JSON number or a numeric string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawId {
  Number(i64),
  Text(String),
}

impl RawId {
  /// Unparsable text maps to 0, which the service rejects as invalid.
  pub fn value(&self) -> i64 {
    match self {
      Self::Number(n) => *n,
      Self::Text(s) => s.trim().parse().unwrap_or(0),
    }
  }
}

#[derive(Debug, Deserialize)]
pub struct DeleteBody {
  pub submission_id:          Option<RawId>,
  pub docontact_delete_nonce: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BulkDeleteBody {
  #[serde(default)]
  pub submission_ids:         Vec<RawId>,
  pub docontact_delete_nonce: Option<String>,
}

/// `POST /admin/submissions/delete`
pub async fn delete<S>(State(state): State<AppState<S>>, req: Request) -> Result<Response, ApiError>
where
  S: SubmissionStore + Clone + 'static,
{
  let username = admin_guard(&state, &req)?;
  let Json(body) = Json::<DeleteBody>::from_request(req, &state)
    .await
    .map_err(|e| ApiError::BadRequest(e.body_text()))?;
  check_delete_token(&state, &username, body.docontact_delete_nonce.as_deref())?;

  let id = body.submission_id.as_ref().map_or(0, RawId::value);
  let message = state.service.delete(id).await?;

  tracing::info!(id, "submission deleted");
  Ok(success(json!({ "message": message })))
}

/// `POST /admin/submissions/bulk-delete`
pub async fn bulk_delete<S>(
  State(state): State<AppState<S>>,
  req: Request,
) -> Result<Response, ApiError>
where
  S: SubmissionStore + Clone + 'static,
{
  let username = admin_guard(&state, &req)?;
  let Json(body) = Json::<BulkDeleteBody>::from_request(req, &state)
    .await
    .map_err(|e| ApiError::BadRequest(e.body_text()))?;
  check_delete_token(&state, &username, body.docontact_delete_nonce.as_deref())?;

  let ids = body.submission_ids.iter().map(RawId::value).collect();
  let outcome = state.service.bulk_delete(ids).await?;

  tracing::info!(deleted = outcome.deleted_count, "bulk delete");
  Ok(success(outcome))
}

// ─── Guards ───────────────────────────────────────────────────────────────────

/// POST only, with admin credentials. Missing credentials are a 403 here,
/// not a challenge: these endpoints are called from script.
fn admin_guard<S>(state: &AppState<S>, req: &Request) -> Result<String, ApiError>
where
  S: SubmissionStore + Clone + 'static,
{
  if req.method() != Method::POST {
    return Err(ApiError::MethodNotAllowed);
  }
  verify_auth(req.headers(), &state.auth).map_err(|_| ApiError::Forbidden(INSUFFICIENT_PERMISSIONS))
}

fn check_delete_token<S>(state: &AppState<S>, username: &str, token: Option<&str>) -> Result<(), ApiError>
where
  S: SubmissionStore + Clone + 'static,
{
  if state.tokens.verify(TokenScope::Delete, username, token.unwrap_or_default()) {
    Ok(())
  } else {
    tracing::warn!(scope = TokenScope::Delete.action(), "rejected anti-forgery token");
    Err(ApiError::Forbidden(SECURITY_CHECK_FAILED))
  }
}
