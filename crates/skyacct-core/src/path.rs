//! Resource path builder.
//!
//! Two endpoint families route on [`AccountKind`]:
//!
//! | Family | Paths |
//! |--------|-------|
//! | generic account | `/{tag}`, `/{tag}/{id}`, `/{tag}/search`, `/{tag}/{id}/verify` |
//! | kind collection | `/{collection}`, `/{collection}/{id}`, `/users/{user}/{collection}` |
//!
//! Both builders are pure and total over every kind: a combination the server
//! does not serve yields [`Error::UnsupportedOperation`].

use std::borrow::Cow;

use strum::{Display, IntoStaticStr};
use uuid::Uuid;

use crate::{Error, Result, kind::AccountKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Operation {
  Create,
  Read,
  Update,
  Delete,
  List,
  Search,
  Verify,
  /// Every record of a kind owned by one user; the id is the user's.
  ListByUser,
}

impl Operation {
  /// Whether the operation addresses a single resource and so needs an id.
  pub fn needs_id(self) -> bool {
    matches!(
      self,
      Self::Read | Self::Update | Self::Delete | Self::Verify | Self::ListByUser
    )
  }
}

fn unsupported(kind: AccountKind, operation: Operation) -> Error {
  Error::UnsupportedOperation { kind, operation }
}

fn required(operation: Operation, id: Option<Uuid>) -> Result<Uuid> {
  id.ok_or(Error::MissingIdentifier(operation))
}

/// Path for a generic account operation.
pub fn account_path(
  kind: AccountKind,
  operation: Operation,
  id: Option<Uuid>,
) -> Result<String> {
  if !kind.is_account() {
    return Err(unsupported(kind, operation));
  }
  let tag = kind.tag();
  Ok(match operation {
    Operation::Create | Operation::List => format!("/{tag}"),
    Operation::Read | Operation::Update | Operation::Delete => {
      format!("/{tag}/{}", required(operation, id)?)
    }
    Operation::Search => format!("/{tag}/search"),
    Operation::Verify => {
      format!("/{tag}/{}/verify", required(operation, id)?)
    }
    Operation::ListByUser => return Err(unsupported(kind, operation)),
  })
}

/// Path for a kind-specific collection operation.
pub fn collection_path(
  kind: AccountKind,
  operation: Operation,
  id: Option<Uuid>,
) -> Result<String> {
  let collection = kind
    .collection()
    .ok_or_else(|| unsupported(kind, operation))?;
  Ok(match operation {
    Operation::Create | Operation::List => format!("/{collection}"),
    Operation::Read | Operation::Update | Operation::Delete => {
      format!("/{collection}/{}", required(operation, id)?)
    }
    Operation::ListByUser if kind.is_account() => {
      format!("/users/{}/{collection}", required(operation, id)?)
    }
    Operation::ListByUser | Operation::Search | Operation::Verify => {
      return Err(unsupported(kind, operation));
    }
  })
}

/// `/accounts/{field}/{value}` — direct lookup that bypasses kind resolution.
pub fn by_field_path(field: &str, value: Uuid) -> String {
  format!("/accounts/{}/{value}", segment(field))
}

/// Percent-encode a free-text path segment (names, token plaintexts).
pub fn segment(raw: &str) -> Cow<'_, str> { urlencoding::encode(raw) }

#[cfg(test)]
mod tests {
  use strum::IntoEnumIterator;

  use super::*;

  const ALL_OPS: [Operation; 8] = [
    Operation::Create,
    Operation::Read,
    Operation::Update,
    Operation::Delete,
    Operation::List,
    Operation::Search,
    Operation::Verify,
    Operation::ListByUser,
  ];

  #[test]
  fn account_paths_use_the_singular_tag() {
    let id = Uuid::new_v4();
    let k = AccountKind::Business;
    assert_eq!(account_path(k, Operation::Create, None).unwrap(), "/business");
    assert_eq!(account_path(k, Operation::List, None).unwrap(), "/business");
    assert_eq!(
      account_path(k, Operation::Update, Some(id)).unwrap(),
      format!("/business/{id}")
    );
    assert_eq!(
      account_path(k, Operation::Search, None).unwrap(),
      "/business/search"
    );
    assert_eq!(
      account_path(k, Operation::Verify, Some(id)).unwrap(),
      format!("/business/{id}/verify")
    );
  }

  #[test]
  fn collection_paths_use_the_plural_segment() {
    let id = Uuid::new_v4();
    let user = Uuid::new_v4();
    let k = AccountKind::Celebrity;
    assert_eq!(
      collection_path(k, Operation::Read, Some(id)).unwrap(),
      format!("/celebrities/{id}")
    );
    assert_eq!(
      collection_path(k, Operation::ListByUser, Some(user)).unwrap(),
      format!("/users/{user}/celebrities")
    );
    assert_eq!(
      collection_path(AccountKind::Service, Operation::Create, None).unwrap(),
      "/service-accounts"
    );
  }

  #[test]
  fn builders_are_deterministic_and_total() {
    let id = Uuid::new_v4();
    for kind in AccountKind::iter() {
      for op in ALL_OPS {
        let a = account_path(kind, op, Some(id));
        let b = account_path(kind, op, Some(id));
        assert_eq!(a.ok(), b.ok(), "{kind} {op}");
        let a = collection_path(kind, op, Some(id));
        let b = collection_path(kind, op, Some(id));
        assert_eq!(a.ok(), b.ok(), "{kind} {op}");
      }
    }
  }

  #[test]
  fn unsupported_combinations_are_rejected() {
    let id = Some(Uuid::new_v4());
    let cases = [
      account_path(AccountKind::Service, Operation::Search, None),
      account_path(AccountKind::Service, Operation::Create, None),
      account_path(AccountKind::Agency, Operation::ListByUser, id),
      collection_path(AccountKind::User, Operation::List, None),
      collection_path(AccountKind::Agency, Operation::Search, None),
      collection_path(AccountKind::Service, Operation::ListByUser, id),
    ];
    for case in cases {
      assert!(
        matches!(case, Err(Error::UnsupportedOperation { .. })),
        "{case:?}"
      );
    }
  }

  #[test]
  fn single_resource_operations_need_an_id() {
    for op in ALL_OPS.into_iter().filter(|op| op.needs_id()) {
      if op == Operation::ListByUser {
        continue;
      }
      let err = account_path(AccountKind::Agency, op, None).unwrap_err();
      assert!(matches!(err, Error::MissingIdentifier(o) if o == op));
    }
  }

  #[test]
  fn field_lookup_escapes_the_field() {
    let id = Uuid::new_v4();
    assert_eq!(
      by_field_path("user id", id),
      format!("/accounts/user%20id/{id}")
    );
  }
}
