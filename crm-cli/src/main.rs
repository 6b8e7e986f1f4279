//! crm CLI - CRM records and supermarket analytics from the terminal
//!
//! Thin front end over `crm-core`:
//! - Table bootstrap (`init-db`)
//! - Record listing, lookup, search and mutation per entity
//! - Dashboard counters and the fixed analytics catalogue
//!
//! Every command prints pretty JSON on stdout; logs go to stderr.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crm_core::{CrmConfig, PoolManager};

mod commands;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "crm",
    author,
    version,
    about = "CRM records and supermarket analytics over PostgreSQL",
    long_about = "Manage clients, follow-ups, tasks and interactions, and run sales, \
                  inventory and traffic reports against a PostgreSQL store."
)]
struct Cli {
    /// Config file (default: ~/.crm/config.toml)
    #[arg(long, global = true, env = "CRM_CONFIG", value_name = "PATH")]
    config: Option<PathBuf>,

    /// Database connection string (overrides config and DATABASE_URL)
    #[arg(long, global = true, value_name = "URL")]
    database_url: Option<String>,

    /// Minimum pooled connections
    #[arg(long, global = true, value_name = "N")]
    min_connections: Option<u32>,

    /// Maximum pooled connections
    #[arg(long, global = true, value_name = "N")]
    max_connections: Option<u32>,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create any missing tables (safe to re-run)
    InitDb,
    /// Dashboard counters: clients, pending / overdue follow-ups, active tasks
    Stats,
    /// Run one report from the analytics catalogue
    Analytics(commands::analytics::AnalyticsArgs),
    /// Resolve a loose (kind, group-by, filter) analytics request
    Custom(commands::analytics::CustomArgs),
    /// List records of an entity
    List(commands::records::ListArgs),
    /// Fetch one record by id
    Get(commands::records::GetArgs),
    /// Case-insensitive client search over name, email and company
    Search(commands::records::SearchArgs),
    /// Insert a record from a JSON object
    Create(commands::records::CreateArgs),
    /// Change the supplied fields of a record
    Update(commands::records::UpdateArgs),
    /// Mark a follow-up or task as completed
    Complete(commands::records::CompleteArgs),
    /// Delete a record by id
    Delete(commands::records::DeleteArgs),
}

impl Cli {
    /// File / env config with command-line flags applied on top.
    fn resolve_config(&self) -> Result<CrmConfig> {
        let mut config = CrmConfig::load(self.config.as_deref()).context("failed to load config")?;

        if let Some(url) = &self.database_url {
            config.database.url = url.clone();
        }
        if let Some(min) = self.min_connections {
            config.database.min_connections = min;
        }
        if let Some(max) = self.max_connections {
            config.database.max_connections = max;
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug }).ok();

    let config = cli.resolve_config()?;
    let pool = PoolManager::new(config.database);

    let result = run(cli.command, &pool).await;
    pool.shutdown().await;
    result
}

async fn run(command: Commands, pool: &PoolManager) -> Result<()> {
    match command {
        Commands::InitDb => commands::run_init_db(pool).await,
        Commands::Stats => commands::run_stats(pool).await,
        Commands::Analytics(args) => commands::run_analytics(args, pool).await,
        Commands::Custom(args) => commands::run_custom(args, pool).await,
        Commands::List(args) => commands::run_list(args, pool).await,
        Commands::Get(args) => commands::run_get(args, pool).await,
        Commands::Search(args) => commands::run_search(args, pool).await,
        Commands::Create(args) => commands::run_create(args, pool).await,
        Commands::Update(args) => commands::run_update(args, pool).await,
        Commands::Complete(args) => commands::run_complete(args, pool).await,
        Commands::Delete(args) => commands::run_delete(args, pool).await,
    }
}
