//! Client-side preconditions checked before a request is built.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{Error, Result};

/// A payload that can be checked locally before it is sent.
///
/// `now` is passed in rather than read so expiry checks are testable.
pub trait Validate {
  fn validate(&self, now: DateTime<Utc>) -> Result<()>;
}

pub fn require_id(id: Uuid, field: &str) -> Result<()> {
  if id.is_nil() {
    return Err(Error::Validation(format!("{field} must be a non-nil UUID")));
  }
  Ok(())
}

pub fn require_text(value: &str, field: &str) -> Result<()> {
  if value.trim().is_empty() {
    return Err(Error::Validation(format!("{field} is required")));
  }
  Ok(())
}

/// `at` must lie strictly after `now`.
pub fn require_future(
  at: DateTime<Utc>,
  now: DateTime<Utc>,
  field: &str,
) -> Result<()> {
  if at <= now {
    return Err(Error::Validation(format!("{field} must be in the future")));
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use chrono::Duration;

  use super::*;

  #[test]
  fn nil_ids_and_blank_text_fail() {
    assert!(require_id(Uuid::nil(), "user_id").is_err());
    assert!(require_id(Uuid::new_v4(), "user_id").is_ok());
    assert!(require_text("   ", "name").is_err());
    assert!(require_text("ops", "name").is_ok());
  }

  #[test]
  fn future_is_strict() {
    let now = Utc::now();
    assert!(require_future(now, now, "expiry").is_err());
    assert!(require_future(now - Duration::seconds(1), now, "expiry").is_err());
    assert!(require_future(now + Duration::seconds(1), now, "expiry").is_ok());
  }
}
