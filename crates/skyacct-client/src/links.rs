//! Account links.

use chrono::Utc;
use skyacct_core::{
  Result,
  link::{AccountLink, LinkQuery, NewAccountLink},
  transport::{Expect, Transport},
  validate::Validate,
};
use uuid::Uuid;

use crate::{
  ApiClient,
  exchange::{Call, decode, unexpected},
};

pub struct Links<'a, T> {
  api: &'a ApiClient<T>,
}

impl<'a, T: Transport> Links<'a, T> {
  pub(crate) fn new(api: &'a ApiClient<T>) -> Self { Self { api } }

  /// `POST /account-links`
  pub async fn create(&self, input: &NewAccountLink) -> Result<AccountLink> {
    input.validate(Utc::now())?;
    self
      .api
      .fetch(Call::post("/account-links").json(input)?.expect(Expect::CREATED))
      .await
  }

  /// `GET /account-links/{user}/{account}`
  pub async fn get(&self, user_id: Uuid, account_id: Uuid) -> Result<AccountLink> {
    self
      .api
      .fetch(Call::get(format!("/account-links/{user_id}/{account_id}")))
      .await
  }

  pub async fn list(&self, query: LinkQuery) -> Result<Vec<AccountLink>> {
    self
      .api
      .fetch(Call::get("/account-links").query(query.pairs()))
      .await
  }

  /// `PUT /account-links/{user}`. Replaces the user's link.
  pub async fn update(&self, input: &NewAccountLink) -> Result<()> {
    input.validate(Utc::now())?;
    let path = format!("/account-links/{}", input.user_id);
    self.api.execute(Call::put(path).json(input)?).await
  }

  /// `DELETE /account-links/{user}/{account}?account_type=...`
  pub async fn delete(&self, input: &NewAccountLink) -> Result<()> {
    input.validate(Utc::now())?;
    let path = format!("/account-links/{}/{}", input.user_id, input.account_id);
    let query = vec![("account_type", input.account_type.to_string())];
    self.api.execute(Call::delete(path).query(query)).await
  }

  /// Whether a link between `user_id` and `account_id` exists. A missing link
  /// (`404`) is `false`, not an error.
  pub async fn is_user_linked_to_account(
    &self,
    user_id: Uuid,
    account_id: Uuid,
  ) -> Result<bool> {
    let call = Call::get(format!("/account-links/{user_id}/{account_id}"));
    let response = self.api.send_raw(&call).await?;
    match response.status {
      200 => {
        let link: AccountLink = decode(&response)?;
        Ok(link.user_id == user_id && link.account_id == account_id)
      }
      404 => Ok(false),
      _ => Err(unexpected(&response)),
    }
  }

  /// `GET /users/{user}/linked-accounts`
  pub async fn linked_accounts_for_user(&self, user_id: Uuid) -> Result<Vec<AccountLink>> {
    self
      .api
      .fetch(Call::get(format!("/users/{user_id}/linked-accounts")))
      .await
  }
}
