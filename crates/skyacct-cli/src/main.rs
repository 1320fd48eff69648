//! `skyacct`: command-line access to the Sky account service.
//!
//! # Usage
//!
//! ```
//! skyacct --url https://accounts.example.com/api --token $TOKEN accounts list
//! skyacct members add --kind business --account <id> --user <id> --role editor
//! skyacct tokens create --user <id> --scope activation
//! ```
//!
//! Settings are read from `skyacct.toml` (or `--config`), then `SKYACCT_*`
//! environment variables, then flags.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use serde::Serialize;
use skyacct_client::{ApiClient, ClientConfig};
use skyacct_core::{
  account::{AccountInput, VerifyAccountInput},
  kind::AccountKind,
  membership::{MembershipKey, MembershipPatch, MembershipQuery, NewMembership},
};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

// ─── CLI args ────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "skyacct", version, about = "Sky account service client")]
struct Cli {
  /// Path to a TOML config file (base_url, bearer_token, api_key, ...).
  #[arg(short, long, value_name = "FILE", default_value = "skyacct.toml")]
  config: PathBuf,

  /// Base URL of the account service.
  #[arg(long)]
  url: Option<String>,

  /// Bearer token sent with every request.
  #[arg(long)]
  token: Option<String>,

  /// API key sent with every request.
  #[arg(long)]
  api_key: Option<String>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Generic accounts of every kind.
  #[command(subcommand)]
  Accounts(AccountsCmd),
  /// Account memberships.
  #[command(subcommand)]
  Members(MembersCmd),
  #[command(subcommand)]
  Tokens(TokensCmd),
  #[command(subcommand)]
  Permissions(PermissionsCmd),
}

#[derive(Subcommand, Debug)]
enum AccountsCmd {
  /// List accounts of every kind.
  List,
  /// Delete an account, probing each kind unless `--kind` is given.
  Delete {
    id:   Uuid,
    #[arg(long)]
    kind: Option<AccountKind>,
  },
  Create {
    #[arg(long)]
    kind: AccountKind,
    #[arg(long)]
    id:   Uuid,
  },
  Verify {
    #[arg(long)]
    kind: AccountKind,
    #[arg(long)]
    id:   Uuid,
  },
  Search {
    #[arg(long)]
    kind: AccountKind,
    #[arg(long)]
    id:   Uuid,
  },
}

#[derive(Subcommand, Debug)]
enum MembersCmd {
  List {
    #[arg(long)]
    kind:    AccountKind,
    #[arg(long)]
    account: Uuid,
  },
  Add {
    #[arg(long)]
    kind:    AccountKind,
    #[arg(long)]
    account: Uuid,
    #[arg(long)]
    user:    Uuid,
    #[arg(long)]
    role:    String,
  },
  Remove {
    #[arg(long)]
    kind:    AccountKind,
    #[arg(long)]
    account: Uuid,
    #[arg(long)]
    user:    Uuid,
  },
  /// Change a member's role.
  Role {
    #[arg(long)]
    kind:    AccountKind,
    #[arg(long)]
    account: Uuid,
    #[arg(long)]
    user:    Uuid,
    #[arg(long)]
    role:    String,
  },
  /// Print whether a user is a member of an account.
  Check {
    #[arg(long)]
    account: Uuid,
    #[arg(long)]
    user:    Uuid,
  },
}

#[derive(Subcommand, Debug)]
enum TokensCmd {
  /// Issue a token; the plaintext is printed once.
  Create {
    #[arg(long)]
    user:  Uuid,
    #[arg(long)]
    scope: String,
  },
  Verify { plaintext: String },
  Revoke {
    #[arg(long)]
    user:  Uuid,
    #[arg(long)]
    token: Uuid,
  },
  PurgeExpired,
}

#[derive(Subcommand, Debug)]
enum PermissionsCmd {
  List,
  Exists { id: Uuid },
}

// ─── Entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();
  let config = load_config(&cli)?;
  tracing::debug!(?config, "loaded configuration");

  let api = ApiClient::new(config).context("failed to build client")?;
  run(&api, cli.command).await
}

fn load_config(cli: &Cli) -> anyhow::Result<ClientConfig> {
  let settings = config::Config::builder()
    .set_default("base_url", "http://localhost:8080")?
    .add_source(config::File::from(cli.config.clone()).required(false))
    .add_source(config::Environment::with_prefix("SKYACCT").try_parsing(true))
    .set_override_option("base_url", cli.url.clone())?
    .set_override_option("bearer_token", cli.token.clone())?
    .set_override_option("api_key", cli.api_key.clone())?
    .build()
    .context("failed to read configuration")?;

  settings
    .try_deserialize()
    .context("failed to deserialise ClientConfig")
}

fn print<T: Serialize>(value: &T) -> anyhow::Result<()> {
  let out = serde_json::to_string_pretty(value).context("serialising output")?;
  println!("{out}");
  Ok(())
}

async fn run(api: &ApiClient, command: Command) -> anyhow::Result<()> {
  match command {
    Command::Accounts(cmd) => accounts(api, cmd).await,
    Command::Members(cmd) => members(api, cmd).await,
    Command::Tokens(cmd) => tokens(api, cmd).await,
    Command::Permissions(cmd) => permissions(api, cmd).await,
  }
}

async fn accounts(api: &ApiClient, cmd: AccountsCmd) -> anyhow::Result<()> {
  let accounts = api.accounts();
  match cmd {
    AccountsCmd::List => print(&accounts.list().await.context("listing accounts")?),
    AccountsCmd::Delete { id, kind: Some(kind) } => {
      accounts
        .delete_of_kind(kind, id)
        .await
        .with_context(|| format!("deleting {kind} account {id}"))?;
      tracing::info!(%id, %kind, "deleted account");
      Ok(())
    }
    AccountsCmd::Delete { id, kind: None } => {
      let kind = accounts
        .delete(id)
        .await
        .with_context(|| format!("deleting account {id}"))?;
      tracing::info!(%id, %kind, "deleted account");
      Ok(())
    }
    AccountsCmd::Create { kind, id } => {
      let input = AccountInput::new(kind, id)?;
      print(&accounts.create(input).await.context("creating account")?)
    }
    AccountsCmd::Verify { kind, id } => {
      let input = VerifyAccountInput { account_id: id, account_type: kind };
      print(&accounts.verify(input).await.context("verifying account")?)
    }
    AccountsCmd::Search { kind, id } => {
      let input = AccountInput::new(kind, id)?;
      print(&accounts.search(input).await.context("searching accounts")?)
    }
  }
}

async fn members(api: &ApiClient, cmd: MembersCmd) -> anyhow::Result<()> {
  let memberships = api.memberships();
  match cmd {
    MembersCmd::List { kind, account } => {
      let query = MembershipQuery {
        account_type: Some(kind),
        ..MembershipQuery::by_account(account)
      };
      print(&memberships.list(query).await.context("listing members")?)
    }
    MembersCmd::Add { kind, account, user, role } => {
      let input = NewMembership::new(MembershipKey::new(kind, account, user), role);
      print(&memberships.create(&input).await.context("adding member")?)
    }
    MembersCmd::Remove { kind, account, user } => {
      memberships
        .delete(MembershipKey::new(kind, account, user))
        .await
        .context("removing member")?;
      tracing::info!(%account, %user, "removed member");
      Ok(())
    }
    MembersCmd::Role { kind, account, user, role } => {
      let key = MembershipKey::new(kind, account, user);
      let updated = memberships
        .update(key, &MembershipPatch::role(role))
        .await
        .context("updating member role")?;
      print(&updated)
    }
    MembersCmd::Check { account, user } => {
      let is_member = memberships
        .is_user_a_member_of_account(user, account)
        .await
        .context("checking membership")?;
      print(&serde_json::json!({ "is_member": is_member }))
    }
  }
}

async fn tokens(api: &ApiClient, cmd: TokensCmd) -> anyhow::Result<()> {
  let tokens = api.tokens();
  match cmd {
    TokensCmd::Create { user, scope } => {
      print(&tokens.create(user, &scope).await.context("issuing token")?)
    }
    TokensCmd::Verify { plaintext } => {
      print(&tokens.verify(&plaintext).await.context("verifying token")?)
    }
    TokensCmd::Revoke { user, token } => {
      tokens.delete(user, token).await.context("revoking token")?;
      tracing::info!(%user, %token, "revoked token");
      Ok(())
    }
    TokensCmd::PurgeExpired => {
      tokens.delete_expired().await.context("purging expired tokens")?;
      tracing::info!("purged expired tokens");
      Ok(())
    }
  }
}

async fn permissions(api: &ApiClient, cmd: PermissionsCmd) -> anyhow::Result<()> {
  let permissions = api.permissions();
  match cmd {
    PermissionsCmd::List => {
      print(&permissions.list().await.context("listing permissions")?)
    }
    PermissionsCmd::Exists { id } => {
      let exists = permissions.exists(id).await.context("checking permission")?;
      print(&serde_json::json!({ "id": id, "exists": exists }))
    }
  }
}
