//! Kind metadata for the kind-specific endpoints.
//!
//! A [`KindSpec`] names everything that differs between the per-kind
//! collections: the kind tag (and through it the path segment), the payload
//! types, and the status codes the server answers creates and deletes with.
//! A single generic client in `skyacct-client` is parameterized by it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use uuid::Uuid;

use crate::{
  Result,
  kind::AccountKind,
  transport::Expect,
  validate::{Validate, require_id, require_text},
};

// ─── Traits ──────────────────────────────────────────────────────────────────

pub trait KindSpec: Send + Sync + 'static {
  const KIND: AccountKind;
  /// Status the create endpoint answers with on success.
  const CREATED: Expect;
  /// Status the delete endpoint answers with on success.
  const DELETED: Expect;

  type Record: DeserializeOwned + Send + 'static;
  type New: Serialize + Validate + Sync;
  type Update: Serialize + Validate + Sync;

  /// The record id an update body names for itself, if it carries one. An
  /// update is only sent to the path of that same id.
  fn update_target(_update: &Self::Update) -> Option<Uuid> { None }
}

/// Kinds whose accounts have members. Membership operations on these kinds
/// go through the shared membership endpoints.
pub trait MemberKind: KindSpec {}

// ─── Record ──────────────────────────────────────────────────────────────────

/// An agency, business, celebrity, enterprise or government account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindAccount {
  pub id:              Uuid,
  /// The owning user; references a user managed outside this service.
  pub user_account_id: Uuid,
  pub created_at:      DateTime<Utc>,
  pub updated_at:      DateTime<Utc>,
}

pub type AgencyAccount = KindAccount;
pub type BusinessAccount = KindAccount;
pub type CelebrityAccount = KindAccount;
pub type EnterpriseAccount = KindAccount;
pub type GovernmentAccount = KindAccount;

// ─── Per-kind payloads ───────────────────────────────────────────────────────

macro_rules! owned_kind {
  (
    $(#[$meta:meta])*
    $marker:ident => $kind:ident {
      new:     $new:ident,
      update:  $update:ident,
      name:    $name:ident,
      created: $created:expr,
      deleted: $deleted:expr $(,)?
    }
  ) => {
    $(#[$meta])*
    pub enum $marker {}

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct $new {
      pub user_id: Uuid,
      pub $name:   String,
    }

    impl $new {
      pub fn new(user_id: Uuid, name: impl Into<String>) -> Self {
        Self { user_id, $name: name.into() }
      }
    }

    impl Validate for $new {
      fn validate(&self, _now: DateTime<Utc>) -> Result<()> {
        require_id(self.user_id, "user_id")?;
        require_text(&self.$name, stringify!($name))
      }
    }

    /// Full replacement of the kind-specific fields.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct $update {
      pub user_account_id: Uuid,
      pub $name:           String,
    }

    impl $update {
      pub fn new(user_account_id: Uuid, name: impl Into<String>) -> Self {
        Self { user_account_id, $name: name.into() }
      }
    }

    impl Validate for $update {
      fn validate(&self, _now: DateTime<Utc>) -> Result<()> {
        require_id(self.user_account_id, "user_account_id")?;
        require_text(&self.$name, stringify!($name))
      }
    }

    impl KindSpec for $marker {
      const KIND: AccountKind = AccountKind::$kind;
      const CREATED: Expect = $created;
      const DELETED: Expect = $deleted;

      type Record = KindAccount;
      type New = $new;
      type Update = $update;
    }

    impl MemberKind for $marker {}
  };
}

owned_kind! {
  /// `/agencies`. Deletes answer with any 2xx.
  Agency => Agency {
    new:     NewAgency,
    update:  AgencyUpdate,
    name:    agency_name,
    created: Expect::CREATED,
    deleted: Expect::Success,
  }
}

owned_kind! {
  /// `/businesses`.
  Business => Business {
    new:     NewBusiness,
    update:  BusinessUpdate,
    name:    business_name,
    created: Expect::CREATED,
    deleted: Expect::OK,
  }
}

owned_kind! {
  /// `/celebrities`.
  Celebrity => Celebrity {
    new:     NewCelebrity,
    update:  CelebrityUpdate,
    name:    celebrity_name,
    created: Expect::CREATED,
    deleted: Expect::OK,
  }
}

owned_kind! {
  /// `/enterprises`. Creates answer 200, not 201.
  Enterprise => Enterprise {
    new:     NewEnterprise,
    update:  EnterpriseUpdate,
    name:    enterprise_name,
    created: Expect::OK,
    deleted: Expect::OK,
  }
}

owned_kind! {
  /// `/governments`. Creates answer 200, not 201.
  Government => Government {
    new:     NewGovernment,
    update:  GovernmentUpdate,
    name:    government_name,
    created: Expect::OK,
    deleted: Expect::OK,
  }
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;
  use serde_json::json;

  use super::*;

  #[test]
  fn payloads_carry_the_kind_specific_name_field() {
    let user = Uuid::new_v4();
    let body = serde_json::to_value(NewAgency::new(user, "Northwind")).unwrap();
    assert_eq!(body, json!({ "user_id": user, "agency_name": "Northwind" }));

    let body =
      serde_json::to_value(GovernmentUpdate::new(user, "Parks Dept")).unwrap();
    assert_eq!(
      body,
      json!({ "user_account_id": user, "government_name": "Parks Dept" })
    );
  }

  #[test]
  fn payload_validation() {
    let now = Utc::now();
    assert!(NewBusiness::new(Uuid::new_v4(), "Acme").validate(now).is_ok());
    assert!(NewBusiness::new(Uuid::nil(), "Acme").validate(now).is_err());
    assert!(
      CelebrityUpdate::new(Uuid::new_v4(), " ")
        .validate(now)
        .is_err()
    );
  }

  #[test]
  fn kind_metadata() {
    assert_eq!(<Agency as KindSpec>::KIND, AccountKind::Agency);
    assert_eq!(<Enterprise as KindSpec>::CREATED, Expect::OK);
    assert_eq!(<Celebrity as KindSpec>::CREATED, Expect::CREATED);
    assert_eq!(<Agency as KindSpec>::DELETED, Expect::Success);
  }

  #[test]
  fn record_round_trips_through_json() {
    let record = KindAccount {
      id:              Uuid::new_v4(),
      user_account_id: Uuid::new_v4(),
      created_at:      Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap(),
      updated_at:      Utc.with_ymd_and_hms(2024, 3, 2, 10, 0, 0).unwrap(),
    };
    let json = serde_json::to_string(&record).unwrap();
    assert!(json.contains("\"created_at\":\"2024-03-01T09:30:00Z\""));
    let back: KindAccount = serde_json::from_str(&json).unwrap();
    assert_eq!(back, record);
  }
}
