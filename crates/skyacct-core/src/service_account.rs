//! Service accounts: machine principals that hold roles directly.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  Result,
  kind::AccountKind,
  kinds::KindSpec,
  transport::Expect,
  validate::{Validate, require_future, require_id, require_text},
};

/// A service account as returned by the server. The secret is write-only and
/// never appears here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceAccount {
  pub id:           Uuid,
  pub service_name: String,
  #[serde(default)]
  pub roles:        Vec<String>,
  pub created_at:   DateTime<Utc>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub expires_at:   Option<DateTime<Utc>>,
}

/// Body of a create request.
#[derive(Clone, Serialize)]
pub struct NewServiceAccount {
  pub service_name: String,
  pub roles:        Vec<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub expires_at:   Option<DateTime<Utc>>,
  /// Caller-chosen secret; the server generates one when absent.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub secret:       Option<String>,
}

impl NewServiceAccount {
  pub fn new(service_name: impl Into<String>, roles: Vec<String>) -> Self {
    Self {
      service_name: service_name.into(),
      roles,
      expires_at: None,
      secret: None,
    }
  }

  pub fn expiring_at(mut self, at: DateTime<Utc>) -> Self {
    self.expires_at = Some(at);
    self
  }

  pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
    self.secret = Some(secret.into());
    self
  }
}

impl fmt::Debug for NewServiceAccount {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("NewServiceAccount")
      .field("service_name", &self.service_name)
      .field("roles", &self.roles)
      .field("expires_at", &self.expires_at)
      .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
      .finish()
  }
}

fn require_roles(roles: &[String]) -> Result<()> {
  if roles.iter().all(|r| r.trim().is_empty()) {
    return Err(crate::Error::Validation(
      "at least one role is required".into(),
    ));
  }
  Ok(())
}

impl Validate for NewServiceAccount {
  fn validate(&self, now: DateTime<Utc>) -> Result<()> {
    require_text(&self.service_name, "service_name")?;
    require_roles(&self.roles)?;
    if let Some(at) = self.expires_at {
      require_future(at, now, "expires_at")?;
    }
    Ok(())
  }
}

/// Full-replace body of an update request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceAccountUpdate {
  pub id:           Uuid,
  pub service_name: String,
  pub roles:        Vec<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub expires_at:   Option<DateTime<Utc>>,
}

impl From<ServiceAccount> for ServiceAccountUpdate {
  fn from(account: ServiceAccount) -> Self {
    Self {
      id:           account.id,
      service_name: account.service_name,
      roles:        account.roles,
      expires_at:   account.expires_at,
    }
  }
}

impl Validate for ServiceAccountUpdate {
  fn validate(&self, _now: DateTime<Utc>) -> Result<()> {
    require_id(self.id, "id")?;
    require_text(&self.service_name, "service_name")?;
    require_roles(&self.roles)
  }
}

/// Body of a role assignment.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RoleAssignment {
  pub service_account_id: Uuid,
  pub role_id:            Uuid,
}

#[derive(Debug, Deserialize)]
pub struct RoleAssigned {
  pub is_role_assigned: bool,
}

/// Marker for the `/service-accounts` collection.
pub enum ServiceAccounts {}

impl KindSpec for ServiceAccounts {
  const KIND: AccountKind = AccountKind::Service;
  const CREATED: Expect = Expect::CREATED;
  const DELETED: Expect = Expect::OK;

  type Record = ServiceAccount;
  type New = NewServiceAccount;
  type Update = ServiceAccountUpdate;

  fn update_target(update: &ServiceAccountUpdate) -> Option<Uuid> {
    Some(update.id)
  }
}
