//! The account transport: request assembly, auth headers, status checks and
//! decoding shared by every operation.

use bytes::Bytes;
use serde::{Serialize, de::DeserializeOwned};
use skyacct_core::{
  Error,
  Result,
  transport::{Expect, HttpRequest, HttpResponse, Method, Transport},
};

use crate::ApiClient;

/// One logical request, before headers and the base URL are applied.
#[derive(Debug, Clone)]
pub(crate) struct Call {
  method:   Method,
  path:     String,
  /// Logged in place of `path` when the path embeds a credential.
  log_path: Option<String>,
  query:    Vec<(&'static str, String)>,
  body:     Option<Bytes>,
  expect:   Expect,
}

impl Call {
  fn new(method: Method, path: impl Into<String>) -> Self {
    Self {
      method,
      path: path.into(),
      log_path: None,
      query: Vec::new(),
      body: None,
      expect: Expect::OK,
    }
  }

  pub fn get(path: impl Into<String>) -> Self { Self::new(Method::Get, path) }
  pub fn post(path: impl Into<String>) -> Self { Self::new(Method::Post, path) }
  pub fn put(path: impl Into<String>) -> Self { Self::new(Method::Put, path) }
  pub fn patch(path: impl Into<String>) -> Self { Self::new(Method::Patch, path) }
  pub fn delete(path: impl Into<String>) -> Self { Self::new(Method::Delete, path) }

  pub fn query(mut self, pairs: Vec<(&'static str, String)>) -> Self {
    self.query.extend(pairs);
    self
  }

  pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
    let bytes = serde_json::to_vec(body).map_err(Error::Encode)?;
    self.body = Some(Bytes::from(bytes));
    Ok(self)
  }

  pub fn expect(mut self, expect: Expect) -> Self {
    self.expect = expect;
    self
  }

  /// Log `shown` instead of the real path.
  pub fn log_as(mut self, shown: impl Into<String>) -> Self {
    self.log_path = Some(shown.into());
    self
  }

  fn logged_path(&self) -> &str { self.log_path.as_deref().unwrap_or(&self.path) }
}

impl<T: Transport> ApiClient<T> {
  fn request(&self, call: &Call) -> HttpRequest {
    let mut url = self.config.url(&call.path);
    if !call.query.is_empty() {
      let query = call
        .query
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");
      url.push('?');
      url.push_str(&query);
    }

    let mut headers = vec![("Accept".to_owned(), "application/json".to_owned())];
    if !self.config.bearer_token.is_empty() {
      headers.push((
        "Authorization".to_owned(),
        format!("Bearer {}", self.config.bearer_token),
      ));
    }
    if !self.config.api_key.is_empty() {
      headers.push(("X-Api-Key".to_owned(), self.config.api_key.clone()));
    }
    if call.body.is_some() {
      headers.push(("Content-Type".to_owned(), "application/json".to_owned()));
    }

    HttpRequest {
      method: call.method,
      url,
      headers,
      body: call.body.clone(),
    }
  }

  /// Send without checking the status. Used where several statuses carry
  /// meaning (fan-out lookups, existence checks).
  pub(crate) async fn send_raw(&self, call: &Call) -> Result<HttpResponse> {
    let request = self.request(call);
    let response = self
      .transport
      .send(request)
      .await
      .map_err(Error::transport)?;
    tracing::debug!(
      method = %call.method,
      path = call.logged_path(),
      status = response.status,
      "account service exchange"
    );
    Ok(response)
  }

  /// Send and require the call's expected status.
  pub(crate) async fn send(&self, call: Call) -> Result<HttpResponse> {
    let response = self.send_raw(&call).await?;
    if !call.expect.accepts(response.status) {
      tracing::warn!(
        method = %call.method,
        path = call.logged_path(),
        status = response.status,
        expected = ?call.expect,
        "unexpected status from account service"
      );
      return Err(unexpected(&response));
    }
    Ok(response)
  }

  /// Send, require the expected status and decode the JSON body.
  pub(crate) async fn fetch<R: DeserializeOwned>(&self, call: Call) -> Result<R> {
    let response = self.send(call).await?;
    decode(&response)
  }

  /// Send and require the expected status, discarding the body.
  pub(crate) async fn execute(&self, call: Call) -> Result<()> {
    self.send(call).await.map(drop)
  }
}

pub(crate) fn unexpected(response: &HttpResponse) -> Error {
  Error::UnexpectedStatus {
    status: response.status,
    body:   response.text(),
  }
}

pub(crate) fn decode<R: DeserializeOwned>(response: &HttpResponse) -> Result<R> {
  serde_json::from_slice(&response.body).map_err(Error::Decode)
}
