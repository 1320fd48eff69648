//! [`Transport`] over reqwest.

use std::time::Duration;

use reqwest::Client;
use skyacct_core::transport::{HttpRequest, HttpResponse, Method, Transport};

/// The production transport. Cheap to clone: the inner [`reqwest::Client`]
/// is `Arc`-based.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
  client: Client,
}

impl ReqwestTransport {
  pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
    let client = Client::builder().timeout(timeout).build()?;
    Ok(Self { client })
  }

  /// Wrap a preconfigured client.
  pub fn from_client(client: Client) -> Self { Self { client } }
}

fn method(method: Method) -> reqwest::Method {
  match method {
    Method::Get => reqwest::Method::GET,
    Method::Post => reqwest::Method::POST,
    Method::Put => reqwest::Method::PUT,
    Method::Patch => reqwest::Method::PATCH,
    Method::Delete => reqwest::Method::DELETE,
  }
}

impl Transport for ReqwestTransport {
  type Error = reqwest::Error;

  fn send(
    &self,
    request: HttpRequest,
  ) -> impl Future<Output = Result<HttpResponse, Self::Error>> + Send + '_ {
    async move {
      let mut builder = self.client.request(method(request.method), &request.url);
      for (name, value) in &request.headers {
        builder = builder.header(name.as_str(), value.as_str());
      }
      if let Some(body) = request.body {
        builder = builder.body(body);
      }

      let resp = builder.send().await?;
      let status = resp.status().as_u16();
      let headers = resp
        .headers()
        .iter()
        .filter_map(|(name, value)| {
          value
            .to_str()
            .ok()
            .map(|v| (name.as_str().to_owned(), v.to_owned()))
        })
        .collect();
      let body = resp.bytes().await?;

      Ok(HttpResponse { status, headers, body })
    }
  }
}
