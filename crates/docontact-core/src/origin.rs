//! Where a request came from, as seen by the endpoint.

/// Address information captured at the HTTP boundary.
///
/// The service resolves the stored IP from this; it never reads headers
/// itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOrigin {
  /// `Client-IP` header, if present.
  pub client_ip:     Option<String>,
  /// `X-Forwarded-For` header, possibly a comma-separated chain.
  pub forwarded_for: Option<String>,
  /// Address of the TCP peer.
  pub remote_addr:   Option<String>,
}

impl RequestOrigin {
  /// Pick the client address: explicit client-IP header first, then the
  /// first hop of the forwarded-for chain, then the peer address.
  pub fn resolve_ip(&self) -> Option<String> {
    let client_ip = non_empty(self.client_ip.as_deref());
    let forwarded = non_empty(self.forwarded_for.as_deref())
      .and_then(|chain| non_empty(chain.split(',').next()));
    let remote = non_empty(self.remote_addr.as_deref());

    client_ip.or(forwarded).or(remote).map(str::to_owned)
  }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
  value.map(str::trim).filter(|v| !v.is_empty())
}
