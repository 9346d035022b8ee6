use std::sync::Arc;

use access_graph_sdk::AccessGraphClientV1;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::{debug, info};

use crate::api::rest::routes;
use crate::config::AccessGraphConfig;
use crate::domain::local_client::AccessGraphLocalClient;
use crate::domain::service::{AppServices, ServiceConfig};
use crate::infra::storage::migrations::Migrator;
use crate::infra::storage::{
    OrmDevelopersRepository, OrmPermissionsRepository, OrmResourcesRepository,
};

/// Type alias for the concrete `AppServices` type used with ORM repositories.
/// This lives in the composition root (module.rs) to avoid infra dependencies in domain.
pub(crate) type ConcreteAppServices =
    AppServices<OrmDevelopersRepository, OrmResourcesRepository, OrmPermissionsRepository>;

/// Composition root of the access graph: owns the services and hands out the
/// in-process client and the REST router built over them.
#[derive(Clone)]
pub struct AccessGraphModule {
    services: Arc<ConcreteAppServices>,
    config: AccessGraphConfig,
}

impl AccessGraphModule {
    /// Applies pending migrations and wires repositories into services.
    ///
    /// # Errors
    /// Returns an error if the migrations fail or the configuration is
    /// inconsistent.
    pub async fn init(db: DatabaseConnection, cfg: AccessGraphConfig) -> anyhow::Result<Self> {
        info!("Initializing access_graph module");
        debug!(
            delete_policy = ?cfg.delete_policy,
            default_page_size = cfg.default_page_size,
            max_page_size = cfg.max_page_size,
            "Loaded access_graph config"
        );

        if cfg.default_page_size == 0 || cfg.default_page_size > cfg.max_page_size {
            anyhow::bail!(
                "invalid paging config: default_page_size={} must be in 1..={}",
                cfg.default_page_size,
                cfg.max_page_size
            );
        }

        Self::migrate(&db).await?;

        let services = Arc::new(AppServices::new(
            OrmDevelopersRepository::new(),
            OrmResourcesRepository::new(),
            OrmPermissionsRepository::new(),
            Arc::new(db),
            ServiceConfig::from(&cfg),
        ));

        Ok(Self {
            services,
            config: cfg,
        })
    }

    /// Runs the module's schema migrations against `db`.
    ///
    /// # Errors
    /// Returns an error if a migration fails.
    pub async fn migrate(db: &DatabaseConnection) -> anyhow::Result<()> {
        info!("Applying access_graph database migrations");
        Migrator::up(db, None)
            .await
            .map_err(|e| anyhow::anyhow!("access_graph migrations failed: {e}"))
    }

    /// Object-safe client over the local services.
    #[must_use]
    pub fn client(&self) -> Arc<dyn AccessGraphClientV1> {
        Arc::new(AccessGraphLocalClient::new(Arc::clone(&self.services)))
    }

    /// REST routes of the module.
    #[must_use]
    pub fn router(&self) -> axum::Router {
        info!("Registering access_graph REST routes");
        routes::register_routes(
            axum::Router::new(),
            Arc::clone(&self.services),
            &self.config,
        )
    }

    #[must_use]
    pub fn config(&self) -> &AccessGraphConfig {
        &self.config
    }
}
