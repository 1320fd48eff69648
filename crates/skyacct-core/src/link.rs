//! Account links: a coarser user-to-account binding kept separately from
//! memberships. A link carries no role and is not derived from, or kept in
//! step with, any membership.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  Result,
  kind::AccountKind,
  validate::{Validate, require_id},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountLink {
  pub user_id:      Uuid,
  pub account_type: AccountKind,
  pub account_id:   Uuid,
  pub created_at:   DateTime<Utc>,
}

/// Body of create, update and delete requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAccountLink {
  pub user_id:      Uuid,
  pub account_type: AccountKind,
  pub account_id:   Uuid,
}

impl NewAccountLink {
  pub fn new(user_id: Uuid, account_type: AccountKind, account_id: Uuid) -> Self {
    Self { user_id, account_type, account_id }
  }
}

impl Validate for NewAccountLink {
  fn validate(&self, _now: DateTime<Utc>) -> Result<()> {
    require_id(self.user_id, "user_id")?;
    require_id(self.account_id, "account_id")
  }
}

/// Filters for listing links. An empty query lists everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkQuery {
  pub user_id:      Option<Uuid>,
  pub account_id:   Option<Uuid>,
  pub account_type: Option<AccountKind>,
}

impl LinkQuery {
  pub fn by_user(user_id: Uuid) -> Self {
    Self { user_id: Some(user_id), ..Self::default() }
  }

  pub fn by_account(account_id: Uuid) -> Self {
    Self { account_id: Some(account_id), ..Self::default() }
  }

  pub fn by_account_type(account_type: AccountKind) -> Self {
    Self { account_type: Some(account_type), ..Self::default() }
  }

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

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn links_need_both_ids() {
    let now = Utc::now();
    let ok = NewAccountLink::new(Uuid::new_v4(), AccountKind::Agency, Uuid::new_v4());
    assert!(ok.validate(now).is_ok());
    let bad = NewAccountLink { account_id: Uuid::nil(), ..ok };
    assert!(bad.validate(now).is_err());
  }

  #[test]
  fn query_pairs_are_ordered() {
    let user = Uuid::new_v4();
    let q = LinkQuery {
      account_type: Some(AccountKind::Government),
      ..LinkQuery::by_user(user)
    };
    assert_eq!(
      q.pairs(),
      vec![
        ("user_id", user.to_string()),
        ("account_type", "government".to_owned()),
      ]
    );
  }
}
