//! The generic account service.
//!
//! Operations that take a sparse [`AccountIdentifiers`] payload resolve its
//! kind first and send nothing when resolution fails. Operations on an
//! existing id whose kind is unknown fan out over
//! [`AccountKind::RESOLUTION_ORDER`], one request at a time.

use skyacct_core::{
  Error,
  Result,
  account::{Account, AccountIdentifiers, AccountList, VerifyAccountInput},
  kind::AccountKind,
  path::{Operation, account_path, by_field_path},
  transport::{Expect, Transport},
};
use uuid::Uuid;

use crate::{
  ApiClient,
  exchange::{Call, unexpected},
};

pub struct Accounts<'a, T> {
  api: &'a ApiClient<T>,
}

impl<'a, T: Transport> Accounts<'a, T> {
  pub(crate) fn new(api: &'a ApiClient<T>) -> Self { Self { api } }

  /// `POST /{kind}`. Accepts an [`AccountInput`](skyacct_core::account::AccountInput)
  /// or raw identifiers.
  pub async fn create(&self, input: impl Into<AccountIdentifiers>) -> Result<Account> {
    let ids = input.into();
    let kind = ids.resolve()?;
    let path = account_path(kind, Operation::Create, None)?;
    self
      .api
      .fetch(Call::post(path).json(&ids)?.expect(Expect::OK))
      .await
  }

  /// `PUT /{kind}/{id}`. Full replacement of the kind-specific fields.
  pub async fn update(
    &self,
    id: Uuid,
    input: impl Into<AccountIdentifiers>,
  ) -> Result<Account> {
    let ids = input.into();
    let kind = ids.resolve()?;
    let path = account_path(kind, Operation::Update, Some(id))?;
    self.api.fetch(Call::put(path).json(&ids)?).await
  }

  /// `GET /{kind}/{id}`.
  pub async fn get(&self, kind: AccountKind, id: Uuid) -> Result<Account> {
    let path = account_path(kind, Operation::Read, Some(id))?;
    self.api.fetch(Call::get(path)).await
  }

  /// Delete `id` without knowing its kind.
  ///
  /// Probes `DELETE /{kind}/{id}` for each account kind in resolution order.
  /// `200` ends the search and returns the kind that held the account; `404`
  /// moves on to the next kind; any other status aborts. Prefer
  /// [`Accounts::delete_of_kind`] when the kind is known.
  pub async fn delete(&self, id: Uuid) -> Result<AccountKind> {
    for kind in AccountKind::RESOLUTION_ORDER {
      let path = account_path(kind, Operation::Delete, Some(id))?;
      let response = self.api.send_raw(&Call::delete(path)).await?;
      match response.status {
        200 => return Ok(kind),
        404 => tracing::debug!(%id, %kind, "account not held by kind"),
        _ => return Err(unexpected(&response)),
      }
    }
    Err(Error::AccountNotFound(id))
  }

  /// `DELETE /{kind}/{id}`: a single request when the kind is known.
  pub async fn delete_of_kind(&self, kind: AccountKind, id: Uuid) -> Result<()> {
    let path = account_path(kind, Operation::Delete, Some(id))?;
    self.api.execute(Call::delete(path)).await
  }

  /// Every account of every kind, concatenated in resolution order. Stops at
  /// the first failing kind.
  pub async fn list(&self) -> Result<Vec<Account>> {
    let mut accounts = Vec::new();
    for kind in AccountKind::RESOLUTION_ORDER {
      let path = account_path(kind, Operation::List, None)?;
      let page: AccountList = self.api.fetch(Call::get(path)).await?;
      tracing::debug!(%kind, count = page.accounts.len(), "listed accounts");
      accounts.extend(page.accounts);
    }
    Ok(accounts)
  }

  /// `GET /{kind}/search?{kind}_id=...`
  pub async fn search(&self, input: impl Into<AccountIdentifiers>) -> Result<Vec<Account>> {
    let ids = input.into();
    let kind = ids.resolve()?;
    let path = account_path(kind, Operation::Search, None)?;
    let query = ids
      .populated()
      .map(|(kind, id)| (kind.query_key(), id.to_string()))
      .collect();
    self.api.fetch(Call::get(path).query(query)).await
  }

  /// `GET /{kind}/{id}/verify`
  pub async fn verify(&self, input: VerifyAccountInput) -> Result<Account> {
    let path =
      account_path(input.account_type, Operation::Verify, Some(input.account_id))?;
    self.api.fetch(Call::get(path)).await
  }

  /// `GET /accounts/{field}/{value}`: direct lookup, no kind resolution.
  pub async fn get_by_field(&self, field: &str, value: Uuid) -> Result<Account> {
    if field.trim().is_empty() {
      return Err(Error::Validation("field name is required".into()));
    }
    self.api.fetch(Call::get(by_field_path(field, value))).await
  }
}
