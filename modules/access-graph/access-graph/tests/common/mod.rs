#![allow(clippy::unwrap_used, clippy::expect_used, dead_code)]

use access_graph::{AccessGraphConfig, AccessGraphModule};
use sea_orm::{ConnectOptions, Database};

/// Module over a fresh in-memory database with migrations applied.
pub async fn module_with(cfg: AccessGraphConfig) -> AccessGraphModule {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let db = Database::connect(opts)
        .await
        .expect("Failed to connect to in-memory database");
    AccessGraphModule::init(db, cfg)
        .await
        .expect("Failed to init access_graph module")
}

pub async fn module() -> AccessGraphModule {
    module_with(AccessGraphConfig::default()).await
}
