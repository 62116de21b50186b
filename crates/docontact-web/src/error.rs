//! API error type and the JSON envelope it renders to.
//!
//! Every JSON endpoint answers `{"success": bool, "data": {...}}`. Failures
//! carry a `message` only; store causes are logged, never returned.

use axum::{
  Json,
  http::{HeaderValue, StatusCode, header},
  response::{IntoResponse, Response},
};
use docontact_core::Error as CoreError;
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

pub const SECURITY_CHECK_FAILED: &str = "Security check failed.";
pub const INSUFFICIENT_PERMISSIONS: &str = "Insufficient permissions.";

#[derive(Debug, Error)]
pub enum ApiError {
  #[error("Invalid request method.")]
  MethodNotAllowed,

  /// Missing privilege or a rejected anti-forgery token.
  #[error("{0}")]
  Forbidden(&'static str),

  /// HTML pages answer with a Basic-auth challenge instead of a 403.
  #[error("unauthorized")]
  Unauthorized,

  #[error("{0}")]
  BadRequest(String),

  #[error(transparent)]
  Service(#[from] CoreError),
}

impl ApiError {
  pub fn status(&self) -> StatusCode {
    match self {
      Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
      Self::Forbidden(_) => StatusCode::FORBIDDEN,
      Self::Unauthorized => StatusCode::UNAUTHORIZED,
      Self::BadRequest(_) => StatusCode::BAD_REQUEST,
      Self::Service(CoreError::Invalid(_)) => StatusCode::UNPROCESSABLE_ENTITY,
      Self::Service(e) if e.is_input_error() => StatusCode::BAD_REQUEST,
      Self::Service(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();

    if matches!(self, Self::Unauthorized) {
      let mut res = (status, "Unauthorized").into_response();
      res.headers_mut().insert(
        header::WWW_AUTHENTICATE,
        HeaderValue::from_static("Basic realm=\"docontact\""),
      );
      return res;
    }

    if status.is_server_error() {
      let cause = std::error::Error::source(&self)
        .map(ToString::to_string)
        .unwrap_or_default();
      tracing::error!(error = %self, %cause, "request failed");
    }

    (
      status,
      Json(json!({ "success": false, "data": { "message": self.to_string() } })),
    )
      .into_response()
  }
}

/// `200 {"success": true, "data": data}`
pub fn success<T: Serialize>(data: T) -> Response {
  Json(json!({ "success": true, "data": data })).into_response()
}
