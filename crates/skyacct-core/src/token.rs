//! Bearer tokens scoped to a user.
//!
//! The plaintext is visible exactly once, in the issuance response
//! ([`IssuedToken`]); every later read returns a [`Token`] carrying only the
//! hash. Field names on the wire are capitalized (`UserID`, `Expiry`, ...) and
//! the hash travels as standard base64.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  Error,
  Result,
  validate::{Validate, require_future, require_id, require_text},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
  #[serde(rename = "ID", default, skip_serializing_if = "Option::is_none")]
  pub id:      Option<Uuid>,
  #[serde(rename = "Hash", with = "base64_bytes", default)]
  pub hash:    Vec<u8>,
  #[serde(rename = "UserID")]
  pub user_id: Uuid,
  #[serde(rename = "Expiry")]
  pub expiry:  DateTime<Utc>,
  #[serde(rename = "Scope")]
  pub scope:   String,
}

impl Token {
  pub fn is_expired(&self, now: DateTime<Utc>) -> bool { self.expiry <= now }
}

/// The issuance response: the stored token plus its plaintext.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedToken {
  #[serde(rename = "Plaintext")]
  pub plaintext: String,
  #[serde(flatten)]
  pub token:     Token,
}

impl std::fmt::Debug for IssuedToken {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("IssuedToken")
      .field("plaintext", &"<redacted>")
      .field("token", &self.token)
      .finish()
  }
}

/// Body of an issuance request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewToken {
  #[serde(rename = "UserID")]
  pub user_id: Uuid,
  #[serde(rename = "Scope")]
  pub scope:   String,
  #[serde(rename = "Expiry")]
  pub expiry:  DateTime<Utc>,
}

impl NewToken {
  pub fn new(user_id: Uuid, scope: impl Into<String>, expiry: DateTime<Utc>) -> Self {
    Self { user_id, scope: scope.into(), expiry }
  }

  /// A token expiring `ttl` after `now`. Fails when the expiry falls outside
  /// the representable range.
  pub fn with_ttl(
    user_id: Uuid,
    scope: impl Into<String>,
    now: DateTime<Utc>,
    ttl: Duration,
  ) -> Result<Self> {
    let expiry = now.checked_add_signed(ttl).ok_or_else(|| {
      Error::Validation(format!("token lifetime {ttl} overflows the expiry"))
    })?;
    Ok(Self::new(user_id, scope, expiry))
  }
}

impl Validate for NewToken {
  fn validate(&self, now: DateTime<Utc>) -> Result<()> {
    require_id(self.user_id, "user_id")?;
    require_text(&self.scope, "scope")?;
    require_future(self.expiry, now, "expiry")
  }
}

/// Body of a verification request.
#[derive(Debug, Clone, Serialize)]
pub struct VerifyToken<'a> {
  pub token: &'a str,
}

mod base64_bytes {
  use base64::{Engine, engine::general_purpose::STANDARD};
  use serde::{Deserialize, Deserializer, Serializer, de::Error as _};

  pub fn serialize<S: Serializer>(bytes: &[u8], s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&STANDARD.encode(bytes))
  }

  pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<u8>, D::Error> {
    let encoded = Option::<String>::deserialize(d)?.unwrap_or_default();
    STANDARD.decode(encoded).map_err(D::Error::custom)
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn past_or_present_expiry_is_rejected() {
    let now = Utc::now();
    let user = Uuid::new_v4();
    assert!(NewToken::new(user, "read", now).validate(now).is_err());
    assert!(
      NewToken::new(user, "read", now - Duration::hours(1))
        .validate(now)
        .is_err()
    );
    assert!(
      NewToken::with_ttl(user, "read", now, Duration::hours(24))
        .unwrap()
        .validate(now)
        .is_ok()
    );
  }

  #[test]
  fn overflowing_ttl_is_an_error() {
    let now = Utc::now();
    let user = Uuid::new_v4();
    let err = NewToken::with_ttl(user, "read", now, Duration::MAX).unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    let latest = DateTime::<Utc>::MAX_UTC;
    assert!(NewToken::with_ttl(user, "read", latest, Duration::hours(1)).is_err());
  }

  #[test]
  fn scope_and_user_are_required() {
    let now = Utc::now();
    let later = now + Duration::hours(1);
    assert!(NewToken::new(Uuid::new_v4(), "", later).validate(now).is_err());
    assert!(NewToken::new(Uuid::nil(), "read", later).validate(now).is_err());
  }

  #[test]
  fn issued_token_decodes_with_base64_hash() {
    let user = Uuid::new_v4();
    let issued: IssuedToken = serde_json::from_value(json!({
      "Plaintext": "Y3RBLSOTP7PZ4JHUCK2ZQSKYPQ",
      "Hash": "3q2+7w==",
      "UserID": user,
      "Expiry": "2030-01-01T00:00:00Z",
      "Scope": "authentication",
    }))
    .unwrap();
    assert_eq!(issued.token.hash, vec![0xde, 0xad, 0xbe, 0xef]);
    assert_eq!(issued.token.user_id, user);
    assert_eq!(issued.token.id, None);

    let back = serde_json::to_value(&issued.token).unwrap();
    assert_eq!(back["Hash"], "3q2+7w==");
    assert!(back.get("Plaintext").is_none());
  }

  #[test]
  fn debug_hides_the_plaintext() {
    let issued = IssuedToken {
      plaintext: "SECRETPLAINTEXT".into(),
      token:     Token {
        id:      None,
        hash:    vec![1, 2, 3],
        user_id: Uuid::new_v4(),
        expiry:  Utc::now(),
        scope:   "read".into(),
      },
    };
    assert!(!format!("{issued:?}").contains("SECRETPLAINTEXT"));
  }
}
