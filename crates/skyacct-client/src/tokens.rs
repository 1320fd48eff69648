//! Token issuance, lookup and revocation.
//!
//! The only client-side rules are the ones [`NewToken`] validates: a non-nil
//! user, a scope, and an expiry strictly in the future. They are checked
//! before any request is built.

use chrono::Utc;
use skyacct_core::{
  Result,
  path::segment,
  token::{IssuedToken, NewToken, Token, VerifyToken},
  transport::{Expect, Transport},
  validate::{Validate, require_id, require_text},
};
use uuid::Uuid;

use crate::{ApiClient, exchange::Call};

pub struct Tokens<'a, T> {
  api: &'a ApiClient<T>,
}

impl<'a, T: Transport> Tokens<'a, T> {
  pub(crate) fn new(api: &'a ApiClient<T>) -> Self { Self { api } }

  /// Issue a token for `user_id` expiring after the configured TTL.
  pub async fn create(&self, user_id: Uuid, scope: &str) -> Result<IssuedToken> {
    let ttl = self.api.config.token_ttl()?;
    let input = NewToken::with_ttl(user_id, scope, Utc::now(), ttl)?;
    self.issue(&input).await
  }

  /// `POST /tokens`. The plaintext in the response is not retrievable later.
  pub async fn issue(&self, input: &NewToken) -> Result<IssuedToken> {
    input.validate(Utc::now())?;
    self
      .api
      .fetch(Call::post("/tokens").json(input)?.expect(Expect::CREATED))
      .await
  }

  /// `GET /tokens/{plaintext}`
  pub async fn get(&self, plaintext: &str) -> Result<Token> {
    require_text(plaintext, "token")?;
    let path = format!("/tokens/{}", segment(plaintext));
    self
      .api
      .fetch(Call::get(path).log_as("/tokens/<redacted>"))
      .await
  }

  pub async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Token>> {
    self
      .api
      .fetch(Call::get(format!("/users/{user_id}/tokens")))
      .await
  }

  /// `GET /tokens/scope/{scope}`
  pub async fn list_by_scope(&self, scope: &str) -> Result<Vec<Token>> {
    require_text(scope, "scope")?;
    let path = format!("/tokens/scope/{}", segment(scope));
    self.api.fetch(Call::get(path)).await
  }

  /// `DELETE /users/{user}/tokens/{token}`, answered with `204`.
  pub async fn delete(&self, user_id: Uuid, token_id: Uuid) -> Result<()> {
    require_id(user_id, "user_id")?;
    require_id(token_id, "token_id")?;
    let path = format!("/users/{user_id}/tokens/{token_id}");
    self
      .api
      .execute(Call::delete(path).expect(Expect::NO_CONTENT))
      .await
  }

  /// Revoke every token held by `user_id`.
  pub async fn delete_all_for_user(&self, user_id: Uuid) -> Result<()> {
    require_id(user_id, "user_id")?;
    self
      .api
      .execute(Call::delete(format!("/users/{user_id}/tokens")))
      .await
  }

  pub async fn delete_expired(&self) -> Result<()> {
    self.api.execute(Call::delete("/tokens/expired")).await
  }

  /// `POST /tokens/verify`. Returns the stored token when `plaintext` is
  /// valid; the server answers non-`200` otherwise.
  pub async fn verify(&self, plaintext: &str) -> Result<Token> {
    require_text(plaintext, "token")?;
    let body = VerifyToken { token: plaintext };
    self
      .api
      .fetch(Call::post("/tokens/verify").json(&body)?)
      .await
  }
}
