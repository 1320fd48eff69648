//! Named capabilities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  Result,
  validate::{Validate, require_id, require_text},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
  pub id:          Uuid,
  /// Unique across the service.
  pub name:        String,
  #[serde(default)]
  pub description: String,
}

/// Body of a create request; the server assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPermission {
  pub name:        String,
  #[serde(default)]
  pub description: String,
}

impl NewPermission {
  pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
    Self { name: name.into(), description: description.into() }
  }
}

impl Validate for NewPermission {
  fn validate(&self, _now: DateTime<Utc>) -> Result<()> {
    require_text(&self.name, "name")
  }
}

/// An existing permission is valid only with both its identity and name.
impl Validate for Permission {
  fn validate(&self, _now: DateTime<Utc>) -> Result<()> {
    require_id(self.id, "id")?;
    require_text(&self.name, "name")
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn name_and_id_are_required() {
    let now = Utc::now();
    assert!(NewPermission::new("", "nothing").validate(now).is_err());
    assert!(NewPermission::new("billing:read", "").validate(now).is_ok());

    let existing = Permission {
      id:          Uuid::nil(),
      name:        "billing:read".into(),
      description: String::new(),
    };
    assert!(existing.validate(now).is_err());
    let existing = Permission { id: Uuid::new_v4(), ..existing };
    assert!(existing.validate(now).is_ok());
  }

  #[test]
  fn missing_description_decodes_as_empty() {
    let id = Uuid::new_v4();
    let p: Permission = serde_json::from_value(
      serde_json::json!({ "id": id, "name": "billing:read" }),
    )
    .unwrap();
    assert_eq!(p.description, "");
  }
}
