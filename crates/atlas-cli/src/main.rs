//! CLI entry point for Atlas.
//!
//! This binary provides the `atlas` command with subcommands for
//! previewing plans, managing the application and workflow registries,
//! and running the interactive command console.

mod cli;
mod config;
mod console;
mod render;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use atlas_intent::{ApplicationDraft, synthesize};
use atlas_store::{Database, RegistryStore};

use crate::cli::{AppAction, Cli, Commands, WorkflowAction};
use crate::config::{AtlasConfig, CONFIG_PATH, env_non_empty};

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // `.env` is optional.
    dotenvy::dotenv().ok();

    let loaded = AtlasConfig::load(CONFIG_PATH);
    let mut config = loaded.config;
    config.apply_overrides(env_non_empty);

    init_tracing(&config.log_level);
    if let Some(reason) = loaded.fallback_reason {
        warn!(%reason, "using default configuration");
    }

    let store = open_store(&config).await?;

    match cli.command {
        Commands::Plan { text } => cmd_plan(&store, &text.join(" ")).await,
        Commands::Apps { action } => match action {
            AppAction::List => cmd_apps_list(&store).await,
            AppAction::Add {
                name,
                category,
                launch,
                description,
            } => {
                let draft = ApplicationDraft {
                    name,
                    category,
                    launch_command: launch,
                    description,
                };
                cmd_apps_add(&store, draft).await
            }
        },
        Commands::Workflows { action } => match action {
            WorkflowAction::List => cmd_workflows_list(&store).await,
        },
        Commands::Console => console::cmd_console(store).await,
    }
}

// ---------------------------------------------------------------------------
// Subcommands
// ---------------------------------------------------------------------------

async fn cmd_plan(store: &RegistryStore, text: &str) -> Result<()> {
    let applications = store
        .load_applications()
        .await
        .context("failed to load applications")?;
    let workflows = store
        .load_workflows()
        .await
        .context("failed to load workflows")?;

    let steps = synthesize(text, &applications, &workflows);
    print!("{}", render::plan(&steps, &applications));
    Ok(())
}

async fn cmd_apps_list(store: &RegistryStore) -> Result<()> {
    let applications = store
        .load_applications()
        .await
        .context("failed to load applications")?;
    print!("{}", render::applications(&applications));
    Ok(())
}

async fn cmd_apps_add(store: &RegistryStore, draft: ApplicationDraft) -> Result<()> {
    let application = store
        .add_application(draft)
        .await
        .context("failed to save application")?;
    println!("  Saved {} [{}]", application.name, application.id);
    Ok(())
}

async fn cmd_workflows_list(store: &RegistryStore) -> Result<()> {
    let workflows = store
        .load_workflows()
        .await
        .context("failed to load workflows")?;
    print!("{}", render::workflows(&workflows));
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn open_store(config: &AtlasConfig) -> Result<RegistryStore> {
    if !config.data_dir.exists() {
        std::fs::create_dir_all(&config.data_dir).with_context(|| {
            format!("failed to create data directory {}", config.data_dir.display())
        })?;
    }

    let db_path = config.database_path();
    let db = Database::open(db_path.clone())
        .await
        .context("failed to open database")?;
    info!(path = %db_path.display(), "store initialized");

    Ok(RegistryStore::new(db))
}

/// Initialize the tracing subscriber with the given default log level.
fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
