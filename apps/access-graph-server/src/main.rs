//! Access Graph Server - developer to cloud resource access graph over HTTP

use std::path::PathBuf;

use access_graph::AccessGraphModule;
use anyhow::Context;
use clap::{Parser, Subcommand};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

mod config;
mod logging;

use config::{AppConfig, DatabaseConfig};

#[derive(Parser, Debug)]
#[command(name = "access-graph-server", version, about, long_about = None)]
struct Cli {
    /// Path to a YAML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum Commands {
    /// Apply migrations and serve the REST API (default)
    Run,
    /// Apply migrations and exit
    Migrate,
    /// Print the effective configuration as JSON and exit
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = AppConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    logging::init(&cfg.logging)?;

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run(cfg).await,
        Commands::Migrate => migrate(&cfg).await,
        Commands::Check => check(&cfg),
    }
}

async fn connect(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let mut opts = ConnectOptions::new(cfg.url.clone());
    opts.max_connections(cfg.max_connections).sqlx_logging(false);
    Database::connect(opts)
        .await
        .with_context(|| format!("failed to connect to {}", cfg.url))
}

async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let db = connect(&cfg.database).await?;
    let module = AccessGraphModule::init(db, cfg.access_graph).await?;
    let app = module.router().layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&cfg.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", cfg.bind_addr))?;
    info!(addr = %cfg.bind_addr, "access-graph-server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("access-graph-server stopped");
    Ok(())
}

async fn migrate(cfg: &AppConfig) -> anyhow::Result<()> {
    let db = connect(&cfg.database).await?;
    AccessGraphModule::migrate(&db).await?;
    info!("Migrations applied");
    Ok(())
}

fn check(cfg: &AppConfig) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(cfg)?);
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
