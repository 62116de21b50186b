pub mod admin;
pub mod assets;
pub mod form;
pub mod intake;

use std::net::SocketAddr;

use axum::{
  extract::{ConnectInfo, Request},
  http::HeaderMap,
};
use docontact_core::origin::RequestOrigin;

/// Capture the address headers and the TCP peer of a request.
pub(crate) fn request_origin(req: &Request) -> RequestOrigin {
  let headers = req.headers();
  RequestOrigin {
    client_ip:     header_string(headers, "client-ip"),
    forwarded_for: header_string(headers, "x-forwarded-for"),
    remote_addr:   req
      .extensions()
      .get::<ConnectInfo<SocketAddr>>()
      .map(|ConnectInfo(addr)| addr.ip().to_string()),
  }
}

fn header_string(headers: &HeaderMap, name: &str) -> Option<String> {
  headers
    .get(name)
    .and_then(|v| v.to_str().ok())
    .map(str::to_owned)
}

/// First value of `key` in a raw query string, undecoded.
pub(crate) fn query_value<'a>(raw_query: Option<&'a str>, key: &str) -> Option<&'a str> {
  raw_query?
    .split('&')
    .filter_map(|pair| pair.split_once('=').or(Some((pair, ""))))
    .find(|(k, _)| *k == key)
    .map(|(_, v)| v)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn reads_query_values() {
    assert_eq!(query_value(Some("a=1&paged=3"), "paged"), Some("3"));
    assert_eq!(query_value(Some("paged"), "paged"), Some(""));
    assert_eq!(query_value(Some("a=1"), "paged"), None);
    assert_eq!(query_value(None, "paged"), None);
  }
}
