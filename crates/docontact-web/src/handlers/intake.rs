//! `POST /contact`: the public intake endpoint.
//!
//! Steps run in order and the first failure answers the request:
//! method (405), anti-forgery token (403, also for an unreadable body),
//! sanitisation, validation (422), persistence (500). Nothing is written
//! unless every earlier step passed.

use axum::{
  Form,
  extract::{FromRequest, Request, State},
  http::Method,
  response::Response,
};
use docontact_core::{
  sanitize::{RawFields, sanitize},
  store::SubmissionStore,
};
use serde::Deserialize;
use serde_json::json;

use crate::{
  AppState,
  error::{ApiError, SECURITY_CHECK_FAILED, success},
  handlers::request_origin,
  session::session_from_headers,
  token::TokenScope,
};

/// URL-encoded body posted by the contact form.
#[derive(Debug, Default, Deserialize)]
pub struct IntakeForm {
  pub full_name:       Option<String>,
  pub email:           Option<String>,
  pub phone:           Option<String>,
  pub service:         Option<String>,
  pub message:         Option<String>,
  pub docontact_nonce: Option<String>,
}

impl IntakeForm {
  fn into_fields(self) -> RawFields {
    RawFields {
      full_name: self.full_name,
      email:     self.email,
      phone:     self.phone,
      service:   self.service,
      message:   self.message,
    }
  }
}

pub async fn handler<S>(State(state): State<AppState<S>>, req: Request) -> Result<Response, ApiError>
where
  S: SubmissionStore + Clone + 'static,
{
  if req.method() != Method::POST {
    return Err(ApiError::MethodNotAllowed);
  }

  let origin  = request_origin(&req);
  let session = session_from_headers(req.headers()).unwrap_or_default();

  // An unreadable body carries no token, so it fails the token check below.
  let mut form = match Form::<IntakeForm>::from_request(req, &state).await {
    Ok(Form(form)) => form,
    Err(e) => {
      tracing::debug!(error = %e, "unreadable intake body");
      IntakeForm::default()
    }
  };

  let token = form.docontact_nonce.take().unwrap_or_default();
  if !state.tokens.verify(TokenScope::Submit, &session, &token) {
    tracing::warn!(scope = TokenScope::Submit.action(), "rejected anti-forgery token");
    return Err(ApiError::Forbidden(SECURITY_CHECK_FAILED));
  }

  let input = sanitize(form.into_fields());
  let submitted = state.service.submit(input, &origin).await?;

  tracing::info!(id = submitted.id, "submission received");
  Ok(success(json!({ "message": submitted.message })))
}
