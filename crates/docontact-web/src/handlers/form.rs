//! `GET /`: the public contact form.

use axum::{
  extract::State,
  http::{HeaderMap, header},
  response::{Html, IntoResponse, Response},
};
use docontact_core::store::SubmissionStore;

use crate::{
  AppState, render,
  session::{new_session, session_cookie, session_from_headers},
  token::TokenScope,
};

/// Render the form with a submit token bound to the visitor's session,
/// starting a session if the browser has none.
pub async fn page<S>(State(state): State<AppState<S>>, headers: HeaderMap) -> Response
where
  S: SubmissionStore + Clone + 'static,
{
  let (session, fresh) = match session_from_headers(&headers) {
    Some(existing) => (existing, false),
    None => (new_session(), true),
  };

  let token = state.tokens.issue(TokenScope::Submit, &session);
  let mut res = Html(render::form_page(&token, &state.config.home_url)).into_response();

  if fresh && let Some(cookie) = session_cookie(&session) {
    res.headers_mut().insert(header::SET_COOKIE, cookie);
  }
  res
}
