//! The account-kind resolver.
//!
//! Maps a sparse [`AccountIdentifiers`] payload to the one kind it addresses.
//! Pure and deterministic; performs no I/O.

use crate::{Error, Result, account::AccountIdentifiers, kind::AccountKind};

/// Resolve the kind addressed by `ids`.
///
/// Exactly one identifier must be populated. None is
/// [`Error::KindUndetermined`]; more than one is [`Error::AmbiguousKind`],
/// listing the populated kinds in resolution order.
pub fn resolve(ids: &AccountIdentifiers) -> Result<AccountKind> {
  let kinds: Vec<_> = ids.populated().map(|(kind, _)| kind).collect();
  match kinds.len() {
    0 => Err(Error::KindUndetermined),
    1 => Ok(kinds[0]),
    _ => Err(Error::AmbiguousKind(kinds)),
  }
}

/// Resolve by the first populated identifier in
/// [`AccountKind::RESOLUTION_ORDER`]
/// (user > agency > celebrity > business > enterprise > government).
/// Further populated identifiers are ignored.
pub fn resolve_by_priority(ids: &AccountIdentifiers) -> Result<AccountKind> {
  ids
    .populated()
    .map(|(kind, _)| kind)
    .next()
    .ok_or(Error::KindUndetermined)
}

#[cfg(test)]
mod tests {
  use uuid::Uuid;

  use super::*;
  use crate::account::AccountInput;

  #[test]
  fn single_identifier_resolves_to_its_kind() {
    for kind in AccountKind::RESOLUTION_ORDER {
      let input = AccountInput::new(kind, Uuid::new_v4()).unwrap();
      let ids = AccountIdentifiers::from(input);
      assert_eq!(resolve(&ids).unwrap(), kind);
      assert_eq!(resolve_by_priority(&ids).unwrap(), kind);
    }
  }

  #[test]
  fn empty_input_is_undetermined() {
    let ids = AccountIdentifiers::default();
    assert!(matches!(resolve(&ids), Err(Error::KindUndetermined)));
    assert!(matches!(resolve_by_priority(&ids), Err(Error::KindUndetermined)));
  }

  #[test]
  fn several_identifiers_are_ambiguous() {
    let ids = AccountIdentifiers {
      business_id: Some(Uuid::new_v4()),
      agency_id: Some(Uuid::new_v4()),
      ..Default::default()
    };
    match resolve(&ids) {
      Err(Error::AmbiguousKind(kinds)) => {
        assert_eq!(kinds, vec![AccountKind::Agency, AccountKind::Business]);
      }
      other => panic!("expected AmbiguousKind, got {other:?}"),
    }
  }

  #[test]
  fn priority_resolution_takes_the_first_in_order() {
    let ids = AccountIdentifiers {
      user_id: Some(Uuid::new_v4()),
      government_id: Some(Uuid::new_v4()),
      celebrity_id: Some(Uuid::new_v4()),
      ..Default::default()
    };
    assert_eq!(resolve_by_priority(&ids).unwrap(), AccountKind::User);

    let ids = AccountIdentifiers {
      enterprise_id: Some(Uuid::new_v4()),
      celebrity_id: Some(Uuid::new_v4()),
      ..Default::default()
    };
    assert_eq!(resolve_by_priority(&ids).unwrap(), AccountKind::Celebrity);
  }
}
