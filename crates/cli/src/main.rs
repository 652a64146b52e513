//! Merch Desk CLI - compose and manage designs and products from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Print every vocabulary the product form chooses from
//! merchdesk vocab
//!
//! # Colors offered for a category
//! merchdesk colors --category Shirts
//!
//! # Submit a design draft (JSON); a draft with an `id` updates that design
//! merchdesk designs submit drafts/wave.json
//!
//! # Delete a product
//! merchdesk products delete 42
//!
//! # Try a product draft against an in-memory service seeded with vocabularies
//! merchdesk --offline --seed vocab.json products submit drafts/hoodie.json
//! ```
//!
//! # Commands
//!
//! - `vocab` - Print categories, subcategories, factories, colors and sizes
//! - `colors` - Print the colors available for a category
//! - `designs list|delete|submit` - Manage designs
//! - `products list|delete|submit` - Manage products

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use merchdesk_admin::{DeskConfig, HttpGateway, PersistenceGateway};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::CliError;

#[derive(Parser)]
#[command(name = "merchdesk")]
#[command(author, version, about = "Merch Desk back-office tools")]
struct Cli {
    /// Use an in-memory service instead of `MERCHDESK_API_URL`
    #[arg(long, global = true)]
    offline: bool,

    /// Vocabularies JSON to serve in offline mode
    #[arg(long, global = true, requires = "offline")]
    seed: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print all vocabularies
    Vocab,
    /// Print the colors available for a category
    Colors {
        /// Category name
        #[arg(short, long)]
        category: String,
    },
    /// Manage designs
    Designs {
        #[command(subcommand)]
        action: DesignAction,
    },
    /// Manage products
    Products {
        #[command(subcommand)]
        action: ProductAction,
    },
}

#[derive(Subcommand)]
enum DesignAction {
    /// List persisted designs
    List,
    /// Delete a design
    Delete {
        /// Design id
        id: String,
    },
    /// Submit a design draft file
    Submit {
        /// Path to the draft JSON
        draft: PathBuf,
    },
}

#[derive(Subcommand)]
enum ProductAction {
    /// List persisted products
    List,
    /// Delete a product
    Delete {
        /// Product id
        id: String,
    },
    /// Submit a product draft file
    Submit {
        /// Path to the draft JSON
        draft: PathBuf,
    },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &DeskConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            sample_rate: config.sentry_sample_rate,
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR => sentry_tracing::EventFilter::Event,
        tracing::Level::WARN | tracing::Level::INFO => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

fn init_tracing(json: bool) {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "merchdesk_admin=info,merchdesk_cli=info".into());

    // Logs go to stderr; stdout carries command output
    let json_layer = json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer = (!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Offline runs never touch the environment configuration
    let config = if cli.offline {
        Ok(None)
    } else {
        DeskConfig::from_env().map(Some)
    };
    let loaded = config.as_ref().ok().and_then(Option::as_ref);

    // Sentry must be initialized before the tracing subscriber
    let _sentry_guard = loaded.and_then(init_sentry);
    init_tracing(loaded.is_some_and(|c| c.log_json));

    let result = match config {
        Ok(config) => run(cli, config).await,
        Err(e) => Err(e.into()),
    };

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

async fn run(cli: Cli, config: Option<DeskConfig>) -> Result<(), CliError> {
    match config {
        Some(config) => {
            tracing::debug!(?config, "Using persistence service");
            dispatch(HttpGateway::new(&config)?, cli.command).await
        }
        None => {
            let gateway = commands::offline_gateway(cli.seed.as_deref())?;
            dispatch(gateway, cli.command).await
        }
    }
}

async fn dispatch<G: PersistenceGateway>(gateway: G, command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Vocab => commands::catalog::vocab(&gateway).await?,
        Commands::Colors { category } => commands::catalog::colors(&gateway, &category).await?,
        Commands::Designs { action } => match action {
            DesignAction::List => commands::designs::list(gateway).await?,
            DesignAction::Delete { id } => commands::designs::delete(gateway, &id).await?,
            DesignAction::Submit { draft } => commands::designs::submit(gateway, &draft).await?,
        },
        Commands::Products { action } => match action {
            ProductAction::List => commands::products::list(gateway).await?,
            ProductAction::Delete { id } => commands::products::delete(gateway, &id).await?,
            ProductAction::Submit { draft } => commands::products::submit(gateway, &draft).await?,
        },
    }
    Ok(())
}
