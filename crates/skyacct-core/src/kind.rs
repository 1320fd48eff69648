//! Account kinds: the discriminant every generic account operation routes on.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

use crate::{Error, Result};

/// The mutually exclusive specializations an account can take, plus the
/// service-account principal that lives alongside them.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  EnumIter,
  IntoStaticStr,
  AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AccountKind {
  User,
  Agency,
  Celebrity,
  Business,
  Enterprise,
  Government,
  Service,
}

impl AccountKind {
  /// The six account kinds in resolution order. Fan-out operations walk this
  /// list front to back.
  pub const RESOLUTION_ORDER: [AccountKind; 6] = [
    AccountKind::User,
    AccountKind::Agency,
    AccountKind::Celebrity,
    AccountKind::Business,
    AccountKind::Enterprise,
    AccountKind::Government,
  ];

  /// Parse a kind tag (`"agency"`, `"service"`, ...).
  pub fn parse(tag: &str) -> Result<Self> {
    tag
      .parse()
      .map_err(|_| Error::UnknownKind(tag.to_owned()))
  }

  /// The singular tag used on the wire and in generic account paths.
  pub fn tag(self) -> &'static str { self.into() }

  /// Plural collection segment served by the kind-specific endpoints.
  /// Users are managed elsewhere and have no collection here.
  pub fn collection(self) -> Option<&'static str> {
    match self {
      Self::User => None,
      Self::Agency => Some("agencies"),
      Self::Celebrity => Some("celebrities"),
      Self::Business => Some("businesses"),
      Self::Enterprise => Some("enterprises"),
      Self::Government => Some("governments"),
      Self::Service => Some("service-accounts"),
    }
  }

  /// Query-string key naming this kind's identifier in search requests.
  pub fn query_key(self) -> &'static str {
    match self {
      Self::User => "user_id",
      Self::Agency => "agency_id",
      Self::Celebrity => "celebrity_id",
      Self::Business => "business_id",
      Self::Enterprise => "enterprise_id",
      Self::Government => "government_id",
      Self::Service => "service_account_id",
    }
  }

  /// `false` only for [`AccountKind::Service`], which is a parallel principal
  /// rather than an account specialization.
  pub fn is_account(self) -> bool { !matches!(self, Self::Service) }
}
