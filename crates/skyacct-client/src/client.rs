//! The client façade.

use skyacct_core::{
  Error,
  Result,
  kinds::{Agency, Business, Celebrity, Enterprise, Government, KindSpec},
  service_account::ServiceAccounts,
  transport::Transport,
};

use crate::{
  accounts::Accounts,
  config::ClientConfig,
  http::ReqwestTransport,
  kinds::KindClient,
  links::Links,
  memberships::Memberships,
  permissions::Permissions,
  tokens::Tokens,
};

/// Entry point to the account service.
///
/// Holds the immutable configuration and the transport; every sub-client is a
/// cheap borrow of it. Stateless between calls.
#[derive(Debug, Clone)]
pub struct ApiClient<T = ReqwestTransport> {
  pub(crate) transport: T,
  pub(crate) config:    ClientConfig,
}

impl ApiClient<ReqwestTransport> {
  /// Build a client over reqwest using the configured timeout.
  pub fn new(config: ClientConfig) -> Result<Self> {
    config.validate()?;
    let transport =
      ReqwestTransport::new(config.timeout()).map_err(Error::transport)?;
    Ok(Self { transport, config })
  }
}

impl<T: Transport> ApiClient<T> {
  pub fn with_transport(config: ClientConfig, transport: T) -> Result<Self> {
    config.validate()?;
    Ok(Self { transport, config })
  }

  pub fn config(&self) -> &ClientConfig { &self.config }

  pub fn transport(&self) -> &T { &self.transport }

  // ── Generic accounts ────────────────────────────────────────────────────

  pub fn accounts(&self) -> Accounts<'_, T> { Accounts::new(self) }

  // ── Kind-specific accounts ──────────────────────────────────────────────

  /// A sub-client for any kind collection.
  pub fn kind<K: KindSpec>(&self) -> KindClient<'_, K, T> { KindClient::new(self) }

  pub fn agencies(&self) -> KindClient<'_, Agency, T> { self.kind() }

  pub fn businesses(&self) -> KindClient<'_, Business, T> { self.kind() }

  pub fn celebrities(&self) -> KindClient<'_, Celebrity, T> { self.kind() }

  pub fn enterprises(&self) -> KindClient<'_, Enterprise, T> { self.kind() }

  pub fn governments(&self) -> KindClient<'_, Government, T> { self.kind() }

  pub fn service_accounts(&self) -> KindClient<'_, ServiceAccounts, T> {
    self.kind()
  }

  // ── Relations ───────────────────────────────────────────────────────────

  pub fn memberships(&self) -> Memberships<'_, T> { Memberships::new(self) }

  pub fn links(&self) -> Links<'_, T> { Links::new(self) }

  pub fn permissions(&self) -> Permissions<'_, T> { Permissions::new(self) }

  pub fn tokens(&self) -> Tokens<'_, T> { Tokens::new(self) }
}
