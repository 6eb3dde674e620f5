//! Client origin resolution for rate limiting.

use axum::http::HeaderMap;
use std::net::SocketAddr;

pub const X_FORWARDED_FOR: &str = "x-forwarded-for";

/// Shared bucket for requests with no identifiable origin.
pub const UNKNOWN_ORIGIN: &str = "unknown";

/// Resolve the origin identifier for a request.
///
/// Order: first `X-Forwarded-For` hop (when trusted), then the peer address,
/// then the shared [`UNKNOWN_ORIGIN`] bucket.
pub fn resolve_origin(
    headers: &HeaderMap,
    peer: Option<SocketAddr>,
    trust_forwarded_for: bool,
) -> String {
    if trust_forwarded_for {
        let forwarded = headers
            .get(X_FORWARDED_FOR)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty());
        if let Some(hop) = forwarded {
            return hop.to_string();
        }
    }

    match peer {
        Some(addr) => addr.ip().to_string(),
        None => UNKNOWN_ORIGIN.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(xff: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(X_FORWARDED_FOR, HeaderValue::from_str(xff).unwrap());
        headers
    }

    #[test]
    fn uses_first_forwarded_hop() {
        let peer = "10.0.0.1:5000".parse().ok();
        assert_eq!(resolve_origin(&headers("1.2.3.4, 10.0.0.2"), peer, true), "1.2.3.4");
        assert_eq!(resolve_origin(&headers("  1.2.3.4 "), None, true), "1.2.3.4");
    }

    #[test]
    fn falls_back_to_peer_address() {
        let peer = "10.0.0.1:5000".parse().ok();
        assert_eq!(resolve_origin(&HeaderMap::new(), peer, true), "10.0.0.1");
        assert_eq!(resolve_origin(&headers(""), peer, true), "10.0.0.1");
    }

    #[test]
    fn ignores_forwarded_header_when_untrusted() {
        let peer = "10.0.0.1:5000".parse().ok();
        assert_eq!(resolve_origin(&headers("1.2.3.4"), peer, false), "10.0.0.1");
    }

    #[test]
    fn unknown_without_header_or_peer() {
        assert_eq!(resolve_origin(&HeaderMap::new(), None, true), UNKNOWN_ORIGIN);
    }
}
