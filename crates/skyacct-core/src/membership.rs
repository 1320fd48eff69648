//! Account memberships: which users belong to which account, and in what
//! role.
//!
//! A membership is addressed by its [`MembershipKey`]; the server keeps at
//! most one active membership per key and rejects a second create for the
//! same key with `409 Conflict`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  Error,
  Result,
  kind::AccountKind,
  validate::{Validate, require_id, require_text},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountMembership {
  pub id:           Uuid,
  pub account_type: AccountKind,
  pub account_id:   Uuid,
  pub user_id:      Uuid,
  pub role:         String,
  pub joined_at:    DateTime<Utc>,
}

impl AccountMembership {
  pub fn key(&self) -> MembershipKey {
    MembershipKey {
      account_type: self.account_type,
      account_id:   self.account_id,
      user_id:      self.user_id,
    }
  }
}

/// The `(account type, account, user)` triple that identifies a membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MembershipKey {
  pub account_type: AccountKind,
  pub account_id:   Uuid,
  pub user_id:      Uuid,
}

impl MembershipKey {
  pub fn new(account_type: AccountKind, account_id: Uuid, user_id: Uuid) -> Self {
    Self { account_type, account_id, user_id }
  }

  /// `/account-memberships/{type}/{account}/users/{user}`
  pub fn path(&self) -> String {
    format!(
      "/account-memberships/{}/{}/users/{}",
      self.account_type, self.account_id, self.user_id
    )
  }

  fn check(&self) -> Result<()> {
    if !self.account_type.is_account() {
      return Err(Error::Validation(format!(
        "{} accounts do not have members",
        self.account_type
      )));
    }
    require_id(self.account_id, "account_id")?;
    require_id(self.user_id, "user_id")
  }
}

impl Validate for MembershipKey {
  fn validate(&self, _now: DateTime<Utc>) -> Result<()> { self.check() }
}

/// Body of a create request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMembership {
  #[serde(flatten)]
  pub key:  MembershipKey,
  pub role: String,
}

impl NewMembership {
  pub fn new(key: MembershipKey, role: impl Into<String>) -> Self {
    Self { key, role: role.into() }
  }
}

impl Validate for NewMembership {
  fn validate(&self, _now: DateTime<Utc>) -> Result<()> {
    self.key.check()?;
    require_text(&self.role, "role")
  }
}

/// Partial update. Only the fields that are set are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipPatch {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub account_type: Option<AccountKind>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub account_id:   Option<Uuid>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub user_id:      Option<Uuid>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub role:         Option<String>,
}

impl MembershipPatch {
  pub fn role(role: impl Into<String>) -> Self {
    Self { role: Some(role.into()), ..Self::default() }
  }

  pub fn is_empty(&self) -> bool {
    self.account_type.is_none()
      && self.account_id.is_none()
      && self.user_id.is_none()
      && self.role.is_none()
  }
}

impl Validate for MembershipPatch {
  fn validate(&self, _now: DateTime<Utc>) -> Result<()> {
    if self.is_empty() {
      return Err(Error::Validation("membership patch has no fields".into()));
    }
    if let Some(id) = self.account_id {
      require_id(id, "account_id")?;
    }
    if let Some(id) = self.user_id {
      require_id(id, "user_id")?;
    }
    if let Some(role) = &self.role {
      require_text(role, "role")?;
    }
    Ok(())
  }
}

/// Filters for listing memberships. An empty query lists everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MembershipQuery {
  pub user_id:      Option<Uuid>,
  pub account_id:   Option<Uuid>,
  pub account_type: Option<AccountKind>,
}

impl MembershipQuery {
  pub fn by_user(user_id: Uuid) -> Self {
    Self { user_id: Some(user_id), ..Self::default() }
  }

  pub fn by_account(account_id: Uuid) -> Self {
    Self { account_id: Some(account_id), ..Self::default() }
  }

  pub fn by_account_type(account_type: AccountKind) -> Self {
    Self { account_type: Some(account_type), ..Self::default() }
  }

  /// Query-string pairs for the populated filters.
  pub fn pairs(&self) -> Vec<(&'static str, String)> {
    let mut pairs = Vec::new();
    if let Some(id) = self.user_id {
      pairs.push(("user_id", id.to_string()));
    }
    if let Some(id) = self.account_id {
      pairs.push(("account_id", id.to_string()));
    }
    if let Some(kind) = self.account_type {
      pairs.push(("account_type", kind.to_string()));
    }
    pairs
  }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct IsMember {
  pub is_member: bool,
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  fn key() -> MembershipKey {
    MembershipKey::new(AccountKind::Business, Uuid::new_v4(), Uuid::new_v4())
  }

  #[test]
  fn key_path_names_every_component() {
    let k = key();
    assert_eq!(
      k.path(),
      format!(
        "/account-memberships/business/{}/users/{}",
        k.account_id, k.user_id
      )
    );
  }

  #[test]
  fn new_membership_flattens_the_key() {
    let k = key();
    let body = serde_json::to_value(NewMembership::new(k, "admin")).unwrap();
    assert_eq!(
      body,
      json!({
        "account_type": "business",
        "account_id": k.account_id,
        "user_id": k.user_id,
        "role": "admin",
      })
    );
  }

  #[test]
  fn new_membership_validation() {
    let now = Utc::now();
    assert!(NewMembership::new(key(), "admin").validate(now).is_ok());
    assert!(NewMembership::new(key(), " ").validate(now).is_err());

    let service =
      MembershipKey::new(AccountKind::Service, Uuid::new_v4(), Uuid::new_v4());
    assert!(NewMembership::new(service, "admin").validate(now).is_err());

    let nil = MembershipKey { user_id: Uuid::nil(), ..key() };
    assert!(NewMembership::new(nil, "admin").validate(now).is_err());
  }

  #[test]
  fn patch_sends_only_set_fields() {
    let body = serde_json::to_value(MembershipPatch::role("viewer")).unwrap();
    assert_eq!(body, json!({ "role": "viewer" }));
    assert!(MembershipPatch::default().validate(Utc::now()).is_err());
  }

  #[test]
  fn query_pairs_follow_the_set_filters() {
    assert!(MembershipQuery::default().pairs().is_empty());
    let q = MembershipQuery::by_account_type(AccountKind::Agency);
    assert_eq!(q.pairs(), vec![("account_type", "agency".to_owned())]);
  }
}
