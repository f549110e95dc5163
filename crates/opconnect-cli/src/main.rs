mod settings;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use opconnect::{
    ClientConfig, ConnectClient, ConnectError, Filter, ItemCategory, filter_by_category,
    filter_by_tags, filter_by_title, with_tags,
};
use serde::Serialize;

use settings::{Overrides, Settings, SettingsError, VaultSelector};

#[derive(Debug, Parser)]
#[command(name = "opc", version, about = "Browse and create items in a 1Password Connect vault")]
struct Cli {
    /// Connect server URL (e.g. http://localhost:8080).
    #[arg(long, env = "OPCONNECT_URL", global = true)]
    endpoint: Option<String>,

    /// Environment variable holding the access token.
    #[arg(long, global = true)]
    token_env: Option<String>,

    /// Config file (otherwise uses OPCONNECT_CONFIG / ~/.opconnect/config.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Debug, Subcommand)]
enum Cmd {
    /// List vaults.
    Vaults,
    /// List detailed items, optionally filtered.
    Items {
        #[command(flatten)]
        vault: VaultArgs,

        /// Keep items carrying this tag (repeatable, all must match).
        #[arg(long = "tag", short = 't')]
        tags: Vec<String>,

        /// Keep items with exactly this title.
        #[arg(long)]
        title: Option<String>,

        /// Keep items of this category (e.g. PASSWORD, SECURE_NOTE).
        #[arg(long, value_parser = parse_category)]
        category: Option<ItemCategory>,
    },
    /// Fetch one item by id.
    Item {
        #[command(flatten)]
        vault: VaultArgs,

        id: String,
    },
    /// Manage secure notes.
    Note {
        #[command(subcommand)]
        action: NoteAction,
    },
    /// Manage password items.
    Password {
        #[command(subcommand)]
        action: PasswordAction,
    },
}

#[derive(Debug, Args)]
struct VaultArgs {
    /// Vault name to resolve.
    #[arg(long, env = "OPCONNECT_VAULT")]
    vault: Option<String>,

    /// Vault id, skipping name resolution. Takes precedence over --vault.
    #[arg(long)]
    vault_id: Option<String>,
}

#[derive(Debug, Subcommand)]
enum NoteAction {
    /// Create a secure note.
    Create {
        #[command(flatten)]
        vault: VaultArgs,

        #[arg(long)]
        title: String,

        #[arg(long)]
        content: String,

        #[arg(long = "tag", short = 't')]
        tags: Vec<String>,
    },
}

#[derive(Debug, Subcommand)]
enum PasswordAction {
    /// Create a password item.
    Create {
        #[command(flatten)]
        vault: VaultArgs,

        #[arg(long)]
        title: String,

        #[arg(long)]
        secret: String,

        #[arg(long = "tag", short = 't')]
        tags: Vec<String>,
    },
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Connect(#[from] ConnectError),

    #[error("failed to encode output: {0}")]
    Output(#[from] serde_json::Error),
}

fn parse_category(s: &str) -> Result<ItemCategory, String> {
    if s.trim().is_empty() {
        return Err("category must be non-empty".into());
    }
    Ok(ItemCategory::from(s.trim().to_ascii_uppercase().as_str()))
}

#[derive(Debug, Serialize)]
struct VaultRow<'a> {
    id: &'a str,
    name: &'a str,
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("opc: {e}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let path = cli.config.unwrap_or_else(settings::config_path);
    let file = settings::load_file(&path)?;
    let cfg = Settings::resolve(
        Overrides {
            endpoint: cli.endpoint,
            token_env: cli.token_env,
        },
        file,
    )?;

    let config = ClientConfig::from_env(&cfg.endpoint).with_token_env(&cfg.token_env);
    let mut client = ConnectClient::new(config)?;

    match cli.cmd {
        Cmd::Vaults => {
            let vaults = client.list_vaults().await?;
            let rows: Vec<_> = vaults
                .iter()
                .map(|v| VaultRow {
                    id: v.id(),
                    name: v.name(),
                })
                .collect();
            print_json(&rows)
        }
        Cmd::Items {
            vault,
            tags,
            title,
            category,
        } => {
            select_vault(&mut client, &cfg, vault).await?;
            let filters = build_filters(tags, title, category);
            let items = client.items()?.get(&filters).await?;
            print_json(&items)
        }
        Cmd::Item { vault, id } => {
            select_vault(&mut client, &cfg, vault).await?;
            let item = client.items()?.get_details(&id).await?;
            print_json(&item)
        }
        Cmd::Note {
            action:
                NoteAction::Create {
                    vault,
                    title,
                    content,
                    tags,
                },
        } => {
            select_vault(&mut client, &cfg, vault).await?;
            let created = client
                .items()?
                .notes()
                .create(title, content, [with_tags(tags)])
                .await?;
            print_json(&created)
        }
        Cmd::Password {
            action:
                PasswordAction::Create {
                    vault,
                    title,
                    secret,
                    tags,
                },
        } => {
            select_vault(&mut client, &cfg, vault).await?;
            let created = client
                .items()?
                .passwords()
                .create(title, secret, [with_tags(tags)])
                .await?;
            print_json(&created)
        }
    }
}

async fn select_vault(
    client: &mut ConnectClient,
    settings: &Settings,
    args: VaultArgs,
) -> Result<(), CliError> {
    match settings.vault_selector(args.vault, args.vault_id)? {
        VaultSelector::Id(id) => client.set_vault_id(id)?,
        VaultSelector::Name(name) => {
            client.resolve_vault(&name).await?;
        }
    }
    Ok(())
}

fn build_filters(
    tags: Vec<String>,
    title: Option<String>,
    category: Option<ItemCategory>,
) -> Vec<Filter> {
    let mut filters = Vec::new();
    if !tags.is_empty() {
        filters.push(filter_by_tags(tags));
    }
    if let Some(title) = title {
        filters.push(filter_by_title(title));
    }
    if let Some(category) = category {
        filters.push(filter_by_category(category));
    }
    filters
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
