//! The membership model shared by every account kind.

use chrono::Utc;
use skyacct_core::{
  Result,
  membership::{
    AccountMembership,
    IsMember,
    MembershipKey,
    MembershipPatch,
    MembershipQuery,
    NewMembership,
  },
  role::Role,
  transport::{Expect, Transport},
  validate::Validate,
};
use uuid::Uuid;

use crate::{ApiClient, exchange::Call};

pub struct Memberships<'a, T> {
  api: &'a ApiClient<T>,
}

impl<'a, T: Transport> Memberships<'a, T> {
  pub(crate) fn new(api: &'a ApiClient<T>) -> Self { Self { api } }

  /// `POST /account-memberships`. The server answers `409` when a membership
  /// with the same key already exists.
  pub async fn create(&self, input: &NewMembership) -> Result<AccountMembership> {
    input.validate(Utc::now())?;
    self
      .api
      .fetch(
        Call::post("/account-memberships")
          .json(input)?
          .expect(Expect::CREATED),
      )
      .await
  }

  pub async fn get(&self, key: MembershipKey) -> Result<AccountMembership> {
    key.validate(Utc::now())?;
    self.api.fetch(Call::get(key.path())).await
  }

  /// `GET /account-memberships/{id}`
  pub async fn get_by_id(&self, id: Uuid) -> Result<AccountMembership> {
    self
      .api
      .fetch(Call::get(format!("/account-memberships/{id}")))
      .await
  }

  /// `GET /account-memberships?...`
  pub async fn list(&self, query: MembershipQuery) -> Result<Vec<AccountMembership>> {
    self
      .api
      .fetch(Call::get("/account-memberships").query(query.pairs()))
      .await
  }

  /// `PATCH`: only the fields set on `patch` are sent.
  pub async fn update(
    &self,
    key: MembershipKey,
    patch: &MembershipPatch,
  ) -> Result<AccountMembership> {
    let now = Utc::now();
    key.validate(now)?;
    patch.validate(now)?;
    self.api.fetch(Call::patch(key.path()).json(patch)?).await
  }

  pub async fn delete(&self, key: MembershipKey) -> Result<()> {
    key.validate(Utc::now())?;
    self.api.execute(Call::delete(key.path())).await
  }

  /// `GET /accounts/{account}/members/{user}`
  pub async fn is_user_a_member_of_account(
    &self,
    user_id: Uuid,
    account_id: Uuid,
  ) -> Result<bool> {
    let path = format!("/accounts/{account_id}/members/{user_id}");
    let answer: IsMember = self.api.fetch(Call::get(path)).await?;
    Ok(answer.is_member)
  }

  /// User ids of every member of `account_id`.
  pub async fn members_of_account(&self, account_id: Uuid) -> Result<Vec<Uuid>> {
    let path = format!("/accounts/{account_id}/members");
    self.api.fetch(Call::get(path)).await
  }

  /// `GET /accounts/{account}/users/{user}/roles`
  pub async fn roles_for_user_in_account(
    &self,
    user_id: Uuid,
    account_id: Uuid,
  ) -> Result<Vec<Role>> {
    let path = format!("/accounts/{account_id}/users/{user_id}/roles");
    self.api.fetch(Call::get(path)).await
  }
}
