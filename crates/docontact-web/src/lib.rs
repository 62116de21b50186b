//! HTTP layer for DoContact.
//!
//! Exposes an axum [`Router`] serving the public contact form, the intake
//! endpoint and the admin moderation pages, backed by any
//! [`SubmissionStore`].

pub mod auth;
pub mod error;
pub mod handlers;
pub mod render;
pub mod session;
pub mod token;

pub use error::ApiError;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::{any, get},
};
use docontact_core::{service::SubmissionService, store::SubmissionStore};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use auth::AuthConfig;
use handlers::{admin, assets, form, intake};
use token::TokenIssuer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `DOCONTACT_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:                String,
  #[serde(default = "default_port")]
  pub port:                u16,
  #[serde(default = "default_store_path")]
  pub store_path:          PathBuf,
  /// Needed to serve, not to migrate.
  #[serde(default)]
  pub auth_username:       String,
  #[serde(default)]
  pub auth_password_hash:  String,
  /// Empty means a random secret per process.
  #[serde(default)]
  pub token_secret:        String,
  #[serde(default = "default_token_lifetime")]
  pub token_lifetime_secs: u64,
  /// Where the form redirects after a successful submission.
  #[serde(default = "default_home_url")]
  pub home_url:            String,
}

impl ServerConfig {
  /// Admin credentials, or `None` when either field is unset.
  pub fn auth_config(&self) -> Option<AuthConfig> {
    if self.auth_username.is_empty() || self.auth_password_hash.is_empty() {
      return None;
    }
    Some(AuthConfig {
      username:      self.auth_username.clone(),
      password_hash: self.auth_password_hash.clone(),
    })
  }
}

fn default_host() -> String { "127.0.0.1".to_owned() }
fn default_port() -> u16 { 8080 }
fn default_store_path() -> PathBuf { PathBuf::from("docontact.db") }
fn default_token_lifetime() -> u64 { 86_400 }
fn default_home_url() -> String { "/".to_owned() }

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S: SubmissionStore> {
  pub service: SubmissionService<S>,
  pub config:  Arc<ServerConfig>,
  pub auth:    Arc<AuthConfig>,
  pub tokens:  Arc<TokenIssuer>,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the DoContact [`Router`].
///
/// The JSON endpoints accept any method and answer 405 themselves, so the
/// body stays in the `{"success": false, ...}` envelope.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: SubmissionStore + Clone + 'static,
{
  Router::new()
    .route("/",                               get(form::page::<S>))
    .route("/contact",                        any(intake::handler::<S>))
    .route("/admin/submissions",              get(admin::list::<S>))
    .route("/admin/submissions/delete",       any(admin::delete::<S>))
    .route("/admin/submissions/bulk-delete",  any(admin::bulk_delete::<S>))
    .route("/assets/form.js",                 get(assets::form_js))
    .route("/assets/admin.js",                get(assets::admin_js))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use argon2::{Argon2, PasswordHasher, password_hash::SaltString};
  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
  };
  use base64::Engine as _;
  use base64::engine::general_purpose::STANDARD as B64;
  use chrono::{Duration, TimeZone, Utc};
  use docontact_core::submission::NewSubmission;
  use docontact_store_sqlite::SqliteStore;
  use rand_core::OsRng;
  use serde_json::Value;
  use tower::ServiceExt as _;

  use crate::token::TokenScope;

  const SESSION: &str = "test-session";

  async fn make_state(password: &str) -> AppState<SqliteStore> {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let salt  = SaltString::generate(&mut OsRng);
    let hash  = Argon2::default()
      .hash_password(password.as_bytes(), &salt)
      .unwrap()
      .to_string();

    AppState {
      service: SubmissionService::new(Arc::new(store)),
      config:  Arc::new(ServerConfig {
        host:                "127.0.0.1".to_string(),
        port:                8080,
        store_path:          PathBuf::from(":memory:"),
        auth_username:       "admin".to_string(),
        auth_password_hash:  hash.clone(),
        token_secret:        "test-secret".to_string(),
        token_lifetime_secs: 86_400,
        home_url:            "/thanks".to_string(),
      }),
      auth:    Arc::new(AuthConfig {
        username:      "admin".to_string(),
        password_hash: hash,
      }),
      tokens:  Arc::new(TokenIssuer::new(b"test-secret".to_vec(), 86_400)),
    }
  }

  fn auth_header(user: &str, pass: &str) -> String {
    format!("Basic {}", B64.encode(format!("{user}:{pass}")))
  }

  async fn oneshot_raw(
    state:   AppState<SqliteStore>,
    method:  &str,
    uri:     &str,
    headers: Vec<(header::HeaderName, &str)>,
    body:    &str,
  ) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    for (k, v) in headers {
      builder = builder.header(k, v);
    }
    let req = builder.body(Body::from(body.to_string())).unwrap();
    router(state).oneshot(req).await.unwrap()
  }

  async fn body_text(resp: Response) -> String {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
  }

  async fn body_json(resp: Response) -> Value {
    serde_json::from_str(&body_text(resp).await).unwrap()
  }

  fn record(name: &str, minutes: i64) -> NewSubmission {
    NewSubmission {
      full_name:  name.into(),
      email:      "jane@example.com".into(),
      phone:      "5551234567".into(),
      service:    None,
      message:    None,
      ip_address: None,
      created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::minutes(minutes),
    }
  }

  async fn seed(state: &AppState<SqliteStore>, n: i64) {
    for i in 0..n {
      state.service.store().insert(record(&format!("Person {i}"), i)).await.unwrap();
    }
  }

  // ── Config ──────────────────────────────────────────────────────────────────

  #[test]
  fn config_without_credentials_still_loads() {
    let cfg: ServerConfig = serde_json::from_str(r#"{"store_path": "/tmp/x.db"}"#).unwrap();
    assert_eq!(cfg.store_path, PathBuf::from("/tmp/x.db"));
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.home_url, "/");
    assert!(cfg.auth_config().is_none());
  }

  #[test]
  fn config_with_credentials_yields_auth() {
    let cfg: ServerConfig =
      serde_json::from_str(r#"{"auth_username": "admin", "auth_password_hash": "$argon2id$x"}"#).unwrap();
    let auth = cfg.auth_config().unwrap();
    assert_eq!(auth.username, "admin");
    assert_eq!(auth.password_hash, "$argon2id$x");
  }

  // ── Form ────────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn form_sets_session_cookie_and_embeds_token() {
    let state = make_state("secret").await;
    let resp  = oneshot_raw(state.clone(), "GET", "/", vec![], "").await;
    assert_eq!(resp.status(), StatusCode::OK);

    let cookie = resp.headers().get(header::SET_COOKIE).unwrap().to_str().unwrap().to_string();
    let session = cookie
      .split(';')
      .next()
      .and_then(|pair| pair.strip_prefix("docontact_session="))
      .unwrap()
      .to_string();

    let html = body_text(resp).await;
    let token = state.tokens.issue(TokenScope::Submit, &session);
    assert!(html.contains(&format!(r#"name="docontact_nonce" value="{token}""#)));
    assert!(html.contains(r#"data-home-url="/thanks""#));
  }

  #[tokio::test]
  async fn form_keeps_existing_session() {
    let state  = make_state("secret").await;
    let cookie = format!("docontact_session={SESSION}");
    let resp   = oneshot_raw(state, "GET", "/", vec![(header::COOKIE, cookie.as_str())], "").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(!resp.headers().contains_key(header::SET_COOKIE));
  }

  #[tokio::test]
  async fn assets_are_served_as_javascript() {
    let state = make_state("secret").await;
    for path in ["/assets/form.js", "/assets/admin.js"] {
      let resp = oneshot_raw(state.clone(), "GET", path, vec![], "").await;
      assert_eq!(resp.status(), StatusCode::OK);
      let ct = resp.headers().get(header::CONTENT_TYPE).unwrap().to_str().unwrap();
      assert!(ct.starts_with("application/javascript"), "Content-Type: {ct}");
    }
  }

  // ── Intake ──────────────────────────────────────────────────────────────────

  async fn submit(state: AppState<SqliteStore>, body: &str, extra: Vec<(header::HeaderName, &str)>) -> Response {
    let cookie = format!("docontact_session={SESSION}");
    let mut headers = vec![
      (header::COOKIE, cookie.as_str()),
      (header::CONTENT_TYPE, "application/x-www-form-urlencoded"),
    ];
    headers.extend(extra);
    oneshot_raw(state, "POST", "/contact", headers, body).await
  }

  #[tokio::test]
  async fn intake_rejects_other_methods() {
    let state = make_state("secret").await;
    let resp  = oneshot_raw(state, "GET", "/contact", vec![], "").await;
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    let json = body_json(resp).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["data"]["message"], "Invalid request method.");
  }

  #[tokio::test]
  async fn intake_rejects_missing_or_foreign_tokens() {
    let state = make_state("secret").await;
    let body  = "full_name=Jane+Doe&email=jane%40example.com&phone=5551234567";

    let resp = submit(state.clone(), body, vec![]).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(resp).await["data"]["message"], "Security check failed.");

    let delete_token = state.tokens.issue(TokenScope::Delete, SESSION);
    let resp = submit(state.clone(), &format!("{body}&docontact_nonce={delete_token}"), vec![]).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    assert_eq!(state.service.store().count().await.unwrap(), 0);
  }

  #[tokio::test]
  async fn intake_without_a_form_body_fails_the_token_check() {
    let state  = make_state("secret").await;
    let cookie = format!("docontact_session={SESSION}");

    let resp = oneshot_raw(state.clone(), "POST", "/contact", vec![(header::COOKIE, cookie.as_str())], "").await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(resp).await["data"]["message"], "Security check failed.");

    let resp = oneshot_raw(
      state.clone(),
      "POST",
      "/contact",
      vec![(header::COOKIE, cookie.as_str()), (header::CONTENT_TYPE, "application/json")],
      r#"{"full_name": "Jane Doe"}"#,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert_eq!(state.service.store().count().await.unwrap(), 0);
  }

  #[tokio::test]
  async fn intake_reports_every_validation_error() {
    let state = make_state("secret").await;
    let token = state.tokens.issue(TokenScope::Submit, SESSION);
    let body  = format!("full_name=J4ne&email=bad&phone=123&docontact_nonce={token}");

    let resp = submit(state.clone(), &body, vec![]).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
      body_json(resp).await["data"]["message"],
      "Full name can only contain letters and spaces. Email format is invalid. \
       Phone number must be exactly 10 digits."
    );
    assert_eq!(state.service.store().count().await.unwrap(), 0);
  }

  #[tokio::test]
  async fn intake_persists_a_valid_submission() {
    let state = make_state("secret").await;
    let token = state.tokens.issue(TokenScope::Submit, SESSION);
    let body  = format!(
      "full_name=Jane+Doe&email=jane%40example.com&phone=5551234567\
       &service=web_dev&message=%3Cb%3EHello%3C%2Fb%3E&docontact_nonce={token}"
    );

    let resp = submit(
      state.clone(),
      &body,
      vec![(header::HeaderName::from_static("x-forwarded-for"), "203.0.113.9, 10.0.0.1")],
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["message"], "Thank you — your message has been received.");

    let rows = state.service.store().list(25, 0).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].full_name, "Jane Doe");
    assert_eq!(rows[0].service.as_deref(), Some("web_dev"));
    assert_eq!(rows[0].message.as_deref(), Some("Hello"));
    assert_eq!(rows[0].ip_address.as_deref(), Some("203.0.113.9"));
  }

  // ── Admin list ──────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn admin_list_challenges_without_credentials() {
    let state = make_state("secret").await;
    let resp  = oneshot_raw(state.clone(), "GET", "/admin/submissions", vec![], "").await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(resp.headers().contains_key(header::WWW_AUTHENTICATE));

    let bad  = auth_header("admin", "wrong");
    let resp = oneshot_raw(state, "GET", "/admin/submissions", vec![(header::AUTHORIZATION, bad.as_str())], "").await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
  }

  #[tokio::test]
  async fn admin_list_paginates_newest_first() {
    let state = make_state("secret").await;
    seed(&state, 26).await;
    let auth = auth_header("admin", "secret");

    let resp = oneshot_raw(state.clone(), "GET", "/admin/submissions", vec![(header::AUTHORIZATION, auth.as_str())], "").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(resp).await;
    assert!(html.contains("Total submissions: 26"));
    assert!(html.contains("Person 25"));
    assert!(!html.contains("Person 0<"));
    assert!(html.contains(r#"href="?paged=2""#));

    let resp = oneshot_raw(state.clone(), "GET", "/admin/submissions?paged=2", vec![(header::AUTHORIZATION, auth.as_str())], "").await;
    let html = body_text(resp).await;
    assert!(html.contains("Person 0<"));
    assert_eq!(html.matches("docontact-delete-btn").count(), 1);

    let token = state.tokens.issue(TokenScope::Delete, "admin");
    assert!(html.contains(&format!(r#"data-nonce="{token}""#)));
  }

  #[tokio::test]
  async fn admin_list_treats_bad_page_as_first() {
    let state = make_state("secret").await;
    let auth  = auth_header("admin", "secret");
    let resp  = oneshot_raw(state, "GET", "/admin/submissions?paged=abc", vec![(header::AUTHORIZATION, auth.as_str())], "").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(resp).await;
    assert!(html.contains("No submissions found."));
    assert!(!html.contains("page-numbers"));
  }

  // ── Delete ──────────────────────────────────────────────────────────────────

  async fn admin_post(state: AppState<SqliteStore>, uri: &str, auth: Option<&str>, body: &str) -> Response {
    let mut headers = vec![(header::CONTENT_TYPE, "application/json")];
    if let Some(a) = auth {
      headers.push((header::AUTHORIZATION, a));
    }
    oneshot_raw(state, "POST", uri, headers, body).await
  }

  #[tokio::test]
  async fn delete_requires_privilege_and_delete_token() {
    let state = make_state("secret").await;
    seed(&state, 1).await;
    let auth  = auth_header("admin", "secret");
    let token = state.tokens.issue(TokenScope::Delete, "admin");
    let body  = format!(r#"{{"submission_id": 1, "docontact_delete_nonce": "{token}"}}"#);

    let resp = admin_post(state.clone(), "/admin/submissions/delete", None, &body).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(resp).await["data"]["message"], "Insufficient permissions.");

    let submit_token = state.tokens.issue(TokenScope::Submit, "admin");
    let wrong = format!(r#"{{"submission_id": 1, "docontact_delete_nonce": "{submit_token}"}}"#);
    let resp = admin_post(state.clone(), "/admin/submissions/delete", Some(&auth), &wrong).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(resp).await["data"]["message"], "Security check failed.");

    let resp = oneshot_raw(state.clone(), "GET", "/admin/submissions/delete", vec![(header::AUTHORIZATION, auth.as_str())], "").await;
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);

    assert_eq!(state.service.store().count().await.unwrap(), 1);
  }

  #[tokio::test]
  async fn delete_removes_a_row_once() {
    let state = make_state("secret").await;
    seed(&state, 1).await;
    let auth  = auth_header("admin", "secret");
    let token = state.tokens.issue(TokenScope::Delete, "admin");
    let body  = format!(r#"{{"submission_id": "1", "docontact_delete_nonce": "{token}"}}"#);

    let resp = admin_post(state.clone(), "/admin/submissions/delete", Some(&auth), &body).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["message"], "Submission deleted successfully.");

    let resp = admin_post(state.clone(), "/admin/submissions/delete", Some(&auth), &body).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(resp).await["data"]["message"], "Failed to delete submission.");
  }

  #[tokio::test]
  async fn delete_rejects_invalid_ids() {
    let state = make_state("secret").await;
    let auth  = auth_header("admin", "secret");
    let token = state.tokens.issue(TokenScope::Delete, "admin");

    for id in ["0", "-3", r#""abc""#, "null"] {
      let body = format!(r#"{{"submission_id": {id}, "docontact_delete_nonce": "{token}"}}"#);
      let resp = admin_post(state.clone(), "/admin/submissions/delete", Some(&auth), &body).await;
      assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "id: {id}");
      assert_eq!(body_json(resp).await["data"]["message"], "Invalid submission ID.");
    }
  }

  #[tokio::test]
  async fn bulk_delete_counts_rows_actually_removed() {
    let state = make_state("secret").await;
    seed(&state, 2).await;
    let auth  = auth_header("admin", "secret");
    let token = state.tokens.issue(TokenScope::Delete, "admin");
    let body  = format!(r#"{{"submission_ids": [1, 2, 3], "docontact_delete_nonce": "{token}"}}"#);

    let resp = admin_post(state.clone(), "/admin/submissions/bulk-delete", Some(&auth), &body).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json["data"]["deleted_count"], 2);
    assert_eq!(json["data"]["message"], "2 submission(s) deleted successfully.");

    let resp = admin_post(state.clone(), "/admin/submissions/bulk-delete", Some(&auth), &body).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["data"]["deleted_count"], 0);
  }

  #[tokio::test]
  async fn bulk_delete_needs_at_least_one_valid_id() {
    let state = make_state("secret").await;
    let auth  = auth_header("admin", "secret");
    let token = state.tokens.issue(TokenScope::Delete, "admin");
    let body  = format!(r#"{{"submission_ids": [0, "x"], "docontact_delete_nonce": "{token}"}}"#);

    let resp = admin_post(state, "/admin/submissions/bulk-delete", Some(&auth), &body).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["data"]["message"], "No valid submission IDs provided.");
  }
}
