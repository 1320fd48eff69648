//! Kind-specific sub-clients.
//!
//! One generic [`KindClient`] serves every kind collection. The kind's
//! [`KindSpec`] supplies the path segment, payload types and expected
//! statuses; behaviour is otherwise identical across kinds.

use std::marker::PhantomData;

use chrono::Utc;
use skyacct_core::{
  Error,
  Result,
  kinds::{KindSpec, MemberKind},
  membership::{AccountMembership, MembershipKey, MembershipPatch, MembershipQuery, NewMembership},
  path::{Operation, collection_path, segment},
  role::Role,
  service_account::{RoleAssigned, RoleAssignment, ServiceAccount, ServiceAccounts},
  transport::Transport,
  validate::{Validate, require_id},
};
use uuid::Uuid;

use crate::{ApiClient, exchange::Call};

pub struct KindClient<'a, K, T> {
  api:  &'a ApiClient<T>,
  kind: PhantomData<fn() -> K>,
}

impl<'a, K: KindSpec, T: Transport> KindClient<'a, K, T> {
  pub(crate) fn new(api: &'a ApiClient<T>) -> Self {
    Self { api, kind: PhantomData }
  }

  fn path(&self, operation: Operation, id: Option<Uuid>) -> Result<String> {
    collection_path(K::KIND, operation, id)
  }

  /// `POST /{collection}`
  pub async fn create(&self, input: &K::New) -> Result<K::Record> {
    input.validate(Utc::now())?;
    let path = self.path(Operation::Create, None)?;
    self
      .api
      .fetch(Call::post(path).json(input)?.expect(K::CREATED))
      .await
  }

  /// `GET /{collection}/{id}`
  pub async fn get(&self, id: Uuid) -> Result<K::Record> {
    let path = self.path(Operation::Read, Some(id))?;
    self.api.fetch(Call::get(path)).await
  }

  /// `GET /users/{user}/{collection}`: every record owned by `user_id`.
  pub async fn get_by_user(&self, user_id: Uuid) -> Result<Vec<K::Record>> {
    let path = self.path(Operation::ListByUser, Some(user_id))?;
    self.api.fetch(Call::get(path)).await
  }

  /// `PUT /{collection}/{id}`. Full replace. A body naming its own id must
  /// name `id`.
  pub async fn update(&self, id: Uuid, input: &K::Update) -> Result<K::Record> {
    input.validate(Utc::now())?;
    if let Some(target) = K::update_target(input)
      && target != id
    {
      return Err(Error::Validation(format!(
        "update body is for {target} but was addressed to {id}"
      )));
    }
    let path = self.path(Operation::Update, Some(id))?;
    self.api.fetch(Call::put(path).json(input)?).await
  }

  /// `DELETE /{collection}/{id}`
  pub async fn delete(&self, id: Uuid) -> Result<()> {
    let path = self.path(Operation::Delete, Some(id))?;
    self.api.execute(Call::delete(path).expect(K::DELETED)).await
  }

  /// `GET /{collection}`
  pub async fn list(&self) -> Result<Vec<K::Record>> {
    let path = self.path(Operation::List, None)?;
    self.api.fetch(Call::get(path)).await
  }
}

// ─── Membership ──────────────────────────────────────────────────────────────

impl<K: MemberKind, T: Transport> KindClient<'_, K, T> {
  fn key(&self, account_id: Uuid, user_id: Uuid) -> MembershipKey {
    MembershipKey::new(K::KIND, account_id, user_id)
  }

  pub async fn add_member(
    &self,
    account_id: Uuid,
    user_id: Uuid,
    role: &str,
  ) -> Result<AccountMembership> {
    let input = NewMembership::new(self.key(account_id, user_id), role);
    self.api.memberships().create(&input).await
  }

  pub async fn remove_member(&self, account_id: Uuid, user_id: Uuid) -> Result<()> {
    self.api.memberships().delete(self.key(account_id, user_id)).await
  }

  /// Memberships of one account of this kind.
  pub async fn members(&self, account_id: Uuid) -> Result<Vec<AccountMembership>> {
    let query = MembershipQuery {
      account_type: Some(K::KIND),
      ..MembershipQuery::by_account(account_id)
    };
    self.api.memberships().list(query).await
  }

  /// Change only the role; every other field of the membership is left as is.
  pub async fn update_member_role(
    &self,
    account_id: Uuid,
    user_id: Uuid,
    role: &str,
  ) -> Result<AccountMembership> {
    self
      .api
      .memberships()
      .update(self.key(account_id, user_id), &MembershipPatch::role(role))
      .await
  }
}

// ─── Service accounts ────────────────────────────────────────────────────────

impl<T: Transport> KindClient<'_, ServiceAccounts, T> {
  /// `GET /service-accounts/by-name/{name}`
  pub async fn get_by_name(&self, name: &str) -> Result<ServiceAccount> {
    let path = format!("/service-accounts/by-name/{}", segment(name));
    self.api.fetch(Call::get(path)).await
  }

  /// `POST /service-accounts/{id}/roles`
  pub async fn assign_role(&self, id: Uuid, role_id: Uuid) -> Result<()> {
    require_id(id, "service_account_id")?;
    require_id(role_id, "role_id")?;
    let body = RoleAssignment { service_account_id: id, role_id };
    let path = format!("/service-accounts/{id}/roles");
    self.api.execute(Call::post(path).json(&body)?).await
  }

  /// `DELETE /service-accounts/{id}/roles/{role}`
  pub async fn remove_role(&self, id: Uuid, role_id: Uuid) -> Result<()> {
    let path = format!("/service-accounts/{id}/roles/{role_id}");
    self.api.execute(Call::delete(path)).await
  }

  /// `GET /service-accounts/{id}/roles`
  pub async fn roles(&self, id: Uuid) -> Result<Vec<Role>> {
    let path = format!("/service-accounts/{id}/roles");
    self.api.fetch(Call::get(path)).await
  }

  /// `GET /roles/{role}/service-accounts`
  pub async fn by_role(&self, role_id: Uuid) -> Result<Vec<ServiceAccount>> {
    let path = format!("/roles/{role_id}/service-accounts");
    self.api.fetch(Call::get(path)).await
  }

  /// `GET /service-accounts/{id}/roles/{role}`
  pub async fn is_role_assigned(&self, id: Uuid, role_id: Uuid) -> Result<bool> {
    let path = format!("/service-accounts/{id}/roles/{role_id}");
    let answer: RoleAssigned = self.api.fetch(Call::get(path)).await?;
    Ok(answer.is_role_assigned)
  }
}
