//! Command line interface for one-off maintenance and sync runs.

use anyhow::Context;
use async_trait::async_trait;
use chrono::Utc;
use ratesync_core::rates::RatesResponse;
use ratesync_storage_sqlite::db;

use crate::{
    config::Config,
    main_lib::{build_state, init_tracing},
};

// -----------------------------------------------------------------------------
// Cmd
// -----------------------------------------------------------------------------
#[async_trait]
pub trait Cmd {
    async fn run(&self, config: &Config) -> anyhow::Result<()>;
}

// -----------------------------------------------------------------------------
// Cli
// -----------------------------------------------------------------------------
#[derive(Debug, clap::Parser)]
#[command(name = "ratesync-cli", about = "Exchange rates command line tools")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

// -----------------------------------------------------------------------------
// Commands
// -----------------------------------------------------------------------------
#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Fetch the current rates and store them.
    SyncRates,
    /// Create the database and apply migrations.
    InitDb,
    /// Print the CLI version.
    Version,
}

#[async_trait]
impl Cmd for Commands {
    async fn run(&self, config: &Config) -> anyhow::Result<()> {
        match self {
            Commands::SyncRates => sync_rates(config).await,
            Commands::InitDb => init_db(config),
            Commands::Version => {
                println!("{}", version_line());
                Ok(())
            }
        }
    }
}

/// Runs `command`, loading the configuration only for commands that use it.
///
/// `version` never touches the environment, so it succeeds even when the
/// configuration is broken.
pub async fn dispatch<F>(command: &Commands, load_config: F) -> anyhow::Result<()>
where
    F: FnOnce() -> anyhow::Result<Config>,
{
    if let Commands::Version = command {
        println!("{}", version_line());
        return Ok(());
    }

    let config = load_config()?;
    init_tracing(&config.log_format);
    command.run(&config).await
}

pub fn version_line() -> String {
    format!("Exchange Rates CLI - v{}", env!("CARGO_PKG_VERSION"))
}

async fn sync_rates(config: &Config) -> anyhow::Result<()> {
    let state = build_state(config).await?;
    let response = state.rates_service.run(true).await?;
    println!("{}", render_sync_report(&response)?);
    Ok(())
}

fn init_db(config: &Config) -> anyhow::Result<()> {
    let db_path = db::init(&config.db_path)?;
    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool).context("Failed to apply migrations")?;
    println!("Database ready at {}", db_path);
    Ok(())
}

/// Human readable summary of a sync run followed by the full JSON response.
pub fn render_sync_report(response: &RatesResponse) -> anyhow::Result<String> {
    let json = serde_json::to_string_pretty(response)?;
    Ok(format!(
        "Rates synced: {}\nAverage buy: {}\nAverage sell: {}\n{}\nTimestamp: {}",
        response.rates.len(),
        response.average.buy,
        response.average.sell,
        json,
        Utc::now().to_rfc3339()
    ))
}
