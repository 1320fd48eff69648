//! The `Transport` trait, the HTTP exchange primitive the client is built on.
//!
//! Implemented by `skyacct-client` over reqwest and by in-memory doubles in
//! tests. Connection pooling, TLS and timeouts are the implementor's concern.

use std::future::Future;

use bytes::Bytes;
use strum::{Display, IntoStaticStr};

// ─── Request / response ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Method {
  Get,
  Post,
  Put,
  Patch,
  Delete,
}

/// A fully-formed outbound exchange.
#[derive(Debug, Clone)]
pub struct HttpRequest {
  pub method:  Method,
  /// Absolute URL, query string included.
  pub url:     String,
  pub headers: Vec<(String, String)>,
  pub body:    Option<Bytes>,
}

impl HttpRequest {
  /// First header value matching `name`, compared case-insensitively.
  pub fn header(&self, name: &str) -> Option<&str> {
    self
      .headers
      .iter()
      .find(|(k, _)| k.eq_ignore_ascii_case(name))
      .map(|(_, v)| v.as_str())
  }
}

#[derive(Debug, Clone)]
pub struct HttpResponse {
  pub status:  u16,
  pub headers: Vec<(String, String)>,
  pub body:    Bytes,
}

impl HttpResponse {
  /// The body as text, replacing invalid UTF-8.
  pub fn text(&self) -> String { String::from_utf8_lossy(&self.body).into_owned() }
}

// ─── Status contract ─────────────────────────────────────────────────────────

/// The status an operation treats as success. Anything else is an error
/// carrying the response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expect {
  Status(u16),
  /// Any 2xx.
  Success,
}

impl Expect {
  pub const OK: Self = Self::Status(200);
  pub const CREATED: Self = Self::Status(201);
  pub const NO_CONTENT: Self = Self::Status(204);

  pub fn accepts(self, status: u16) -> bool {
    match self {
      Self::Status(expected) => status == expected,
      Self::Success => (200..300).contains(&status),
    }
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// A single request/response exchange with the account service.
///
/// Implementations must not retry; every call maps to at most one exchange
/// on the wire. Returned futures are `Send` so clients can be driven from a
/// multi-threaded runtime.
pub trait Transport: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  fn send(
    &self,
    request: HttpRequest,
  ) -> impl Future<Output = Result<HttpResponse, Self::Error>> + Send + '_;
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn expect_matches_statuses() {
    assert!(Expect::CREATED.accepts(201));
    assert!(!Expect::CREATED.accepts(200));
    assert!(Expect::Success.accepts(204));
    assert!(!Expect::Success.accepts(404));
  }

  #[test]
  fn methods_render_uppercase() {
    assert_eq!(Method::Patch.to_string(), "PATCH");
    let s: &'static str = Method::Delete.into();
    assert_eq!(s, "DELETE");
  }

  #[test]
  fn header_lookup_ignores_case() {
    let request = HttpRequest {
      method:  Method::Get,
      url:     "http://localhost/user".into(),
      headers: vec![("X-Api-Key".into(), "k".into())],
      body:    None,
    };
    assert_eq!(request.header("x-api-key"), Some("k"));
    assert_eq!(request.header("authorization"), None);
  }
}
