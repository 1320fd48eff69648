//! Generic account records and the inputs that address them.
//!
//! On the wire a generic account carries one optional identifier per kind, of
//! which exactly one is meant to be set. [`AccountIdentifiers`] mirrors that
//! shape; [`AccountInput`] is the typed form that cannot be built with zero or
//! several identifiers.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result, kind::AccountKind, resolve};

// ─── Sparse identifiers ──────────────────────────────────────────────────────

/// The sparse "oneof" payload accepted by the generic account endpoints.
///
/// Field names follow the server contract, which mixes `user_id` with
/// camel-cased ids for the other kinds.
#[derive(
  Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize,
)]
pub struct AccountIdentifiers {
  #[serde(rename = "user_id", default)]
  pub user_id:       Option<Uuid>,
  #[serde(rename = "agencyId", default, skip_serializing_if = "Option::is_none")]
  pub agency_id:     Option<Uuid>,
  #[serde(rename = "celebrityId", default, skip_serializing_if = "Option::is_none")]
  pub celebrity_id:  Option<Uuid>,
  #[serde(rename = "businessId", default, skip_serializing_if = "Option::is_none")]
  pub business_id:   Option<Uuid>,
  #[serde(rename = "enterpriseId", default, skip_serializing_if = "Option::is_none")]
  pub enterprise_id: Option<Uuid>,
  #[serde(rename = "governmentId", default, skip_serializing_if = "Option::is_none")]
  pub government_id: Option<Uuid>,
}

impl AccountIdentifiers {
  /// The identifier stored for `kind`. Always `None` for service accounts.
  pub fn get(&self, kind: AccountKind) -> Option<Uuid> {
    match kind {
      AccountKind::User => self.user_id,
      AccountKind::Agency => self.agency_id,
      AccountKind::Celebrity => self.celebrity_id,
      AccountKind::Business => self.business_id,
      AccountKind::Enterprise => self.enterprise_id,
      AccountKind::Government => self.government_id,
      AccountKind::Service => None,
    }
  }

  /// Every populated identifier, in resolution order.
  pub fn populated(&self) -> impl Iterator<Item = (AccountKind, Uuid)> + '_ {
    AccountKind::RESOLUTION_ORDER
      .into_iter()
      .filter_map(|kind| self.get(kind).map(|id| (kind, id)))
  }

  /// Resolve the single kind these identifiers address. See
  /// [`resolve::resolve`].
  pub fn resolve(&self) -> Result<AccountKind> { resolve::resolve(self) }

  /// Resolve by first match in [`AccountKind::RESOLUTION_ORDER`], ignoring any
  /// further populated identifiers.
  pub fn resolve_by_priority(&self) -> Result<AccountKind> {
    resolve::resolve_by_priority(self)
  }
}

// ─── Typed input ─────────────────────────────────────────────────────────────

/// A reference to exactly one account of one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "AccountIdentifiers", try_from = "AccountIdentifiers")]
pub enum AccountInput {
  User(Uuid),
  Agency(Uuid),
  Celebrity(Uuid),
  Business(Uuid),
  Enterprise(Uuid),
  Government(Uuid),
}

impl AccountInput {
  /// Build from a kind tag and id. Service accounts are not addressable
  /// through the generic account endpoints.
  pub fn new(kind: AccountKind, id: Uuid) -> Result<Self> {
    Ok(match kind {
      AccountKind::User => Self::User(id),
      AccountKind::Agency => Self::Agency(id),
      AccountKind::Celebrity => Self::Celebrity(id),
      AccountKind::Business => Self::Business(id),
      AccountKind::Enterprise => Self::Enterprise(id),
      AccountKind::Government => Self::Government(id),
      AccountKind::Service => {
        return Err(Error::Validation(
          "service accounts have no generic account identifier".into(),
        ));
      }
    })
  }

  pub fn kind(&self) -> AccountKind {
    match self {
      Self::User(_) => AccountKind::User,
      Self::Agency(_) => AccountKind::Agency,
      Self::Celebrity(_) => AccountKind::Celebrity,
      Self::Business(_) => AccountKind::Business,
      Self::Enterprise(_) => AccountKind::Enterprise,
      Self::Government(_) => AccountKind::Government,
    }
  }

  pub fn id(&self) -> Uuid {
    match *self {
      Self::User(id)
      | Self::Agency(id)
      | Self::Celebrity(id)
      | Self::Business(id)
      | Self::Enterprise(id)
      | Self::Government(id) => id,
    }
  }
}

impl From<AccountInput> for AccountIdentifiers {
  fn from(input: AccountInput) -> Self {
    let mut ids = AccountIdentifiers::default();
    match input {
      AccountInput::User(id) => ids.user_id = Some(id),
      AccountInput::Agency(id) => ids.agency_id = Some(id),
      AccountInput::Celebrity(id) => ids.celebrity_id = Some(id),
      AccountInput::Business(id) => ids.business_id = Some(id),
      AccountInput::Enterprise(id) => ids.enterprise_id = Some(id),
      AccountInput::Government(id) => ids.government_id = Some(id),
    }
    ids
  }
}

impl TryFrom<AccountIdentifiers> for AccountInput {
  type Error = Error;

  fn try_from(ids: AccountIdentifiers) -> Result<Self> {
    let kind = ids.resolve()?;
    // `resolve` only returns a kind whose identifier is populated.
    let id = ids.get(kind).ok_or(Error::KindUndetermined)?;
    Self::new(kind, id)
  }
}

// ─── Records ─────────────────────────────────────────────────────────────────

/// A generic account as returned by the account endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
  pub id:          Uuid,
  #[serde(flatten)]
  pub identifiers: AccountIdentifiers,
}

impl Account {
  /// The kind this record specializes into.
  pub fn kind(&self) -> Result<AccountKind> { self.identifiers.resolve() }
}

/// Envelope returned by `GET /{kind}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountList {
  #[serde(default)]
  pub accounts: Vec<Account>,
}

/// Body of a verification request: an explicit kind and id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyAccountInput {
  pub account_id:   Uuid,
  pub account_type: AccountKind,
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn input_serializes_as_sparse_identifiers() {
    let id = Uuid::new_v4();
    let value = serde_json::to_value(AccountInput::Business(id)).unwrap();
    assert_eq!(value, json!({ "user_id": null, "businessId": id }));
  }

  #[test]
  fn input_deserializes_through_the_resolver() {
    let id = Uuid::new_v4();
    let input: AccountInput =
      serde_json::from_value(json!({ "celebrityId": id })).unwrap();
    assert_eq!(input, AccountInput::Celebrity(id));

    let empty = serde_json::from_value::<AccountInput>(json!({}));
    assert!(empty.is_err());
  }

  #[test]
  fn account_decodes_and_reports_its_kind() {
    let id = Uuid::new_v4();
    let gov = Uuid::new_v4();
    let account: Account = serde_json::from_value(json!({
      "id": id,
      "user_id": null,
      "governmentId": gov,
    }))
    .unwrap();
    assert_eq!(account.id, id);
    assert_eq!(account.kind().unwrap(), AccountKind::Government);
  }

  #[test]
  fn account_round_trips_through_json() {
    let account = Account {
      id:          Uuid::new_v4(),
      identifiers: AccountIdentifiers {
        business_id: Some(Uuid::new_v4()),
        ..Default::default()
      },
    };
    let encoded = serde_json::to_string(&account).unwrap();
    let value: serde_json::Value = serde_json::from_str(&encoded).unwrap();
    assert_eq!(value["user_id"], serde_json::Value::Null);
    assert!(value.get("agencyId").is_none());

    let decoded: Account = serde_json::from_str(&encoded).unwrap();
    assert_eq!(decoded, account);
    assert_eq!(decoded.kind().unwrap(), AccountKind::Business);
  }

  #[test]
  fn service_kind_has_no_generic_input() {
    let err = AccountInput::new(AccountKind::Service, Uuid::new_v4());
    assert!(matches!(err, Err(Error::Validation(_))));
  }
}
