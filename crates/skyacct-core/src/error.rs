//! Error types for `skyacct-core`.

use thiserror::Error;
use uuid::Uuid;

use crate::{kind::AccountKind, path::Operation};

#[derive(Debug, Error)]
pub enum Error {
  /// The exchange could not be completed (connect, TLS, timeout, I/O).
  #[error("transport error: {0}")]
  Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

  /// The server answered with a status other than the one the operation
  /// expects. `body` is the raw response text.
  #[error("unexpected status {status}: {body}")]
  UnexpectedStatus { status: u16, body: String },

  #[error("failed to decode response body: {0}")]
  Decode(#[source] serde_json::Error),

  #[error("failed to encode request body: {0}")]
  Encode(#[source] serde_json::Error),

  /// A client-side precondition failed; no request was sent.
  #[error("validation failed: {0}")]
  Validation(String),

  #[error("could not determine the account kind: no identifier is set")]
  KindUndetermined,

  #[error("ambiguous account kind: identifiers for {0:?} are all set")]
  AmbiguousKind(Vec<AccountKind>),

  #[error("account not found: {0}")]
  AccountNotFound(Uuid),

  #[error("operation {operation} is not supported for {kind} accounts")]
  UnsupportedOperation {
    kind:      AccountKind,
    operation: Operation,
  },

  #[error("operation {0} requires a resource id")]
  MissingIdentifier(Operation),

  #[error("unknown account kind: {0:?}")]
  UnknownKind(String),

  #[error("invalid client configuration: {0}")]
  InvalidConfig(String),
}

impl Error {
  /// Wrap a collaborator's transport failure.
  pub fn transport<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Transport(Box::new(err))
  }

  /// The HTTP status carried by [`Error::UnexpectedStatus`], if any.
  pub fn status(&self) -> Option<u16> {
    match self {
      Self::UnexpectedStatus { status, .. } => Some(*status),
      _ => None,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
