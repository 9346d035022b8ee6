//! Domain service layer - business logic and rules.
//!
//! ## Architecture
//!
//! Per-concern submodules:
//! - `developers` - Developer CRUD, name/email validation, deletion policy
//! - `resources` - Cloud resource CRUD and deletion policy
//! - `permissions` - Permission edges and the one-edge-per-pair invariant
//! - `queries` - Read-side graph queries (by developer, by resource, by cloud)
//! - `analytics` - Reports composed from repeated query calls
//!
//! ## Layering Rules
//!
//! The domain layer:
//! - **MAY** import: `access_graph_sdk` (contract types), `infra` (data access)
//! - **MUST NOT** import: `api::*` (one-way dependency: API → Domain)
//!
//! ## Connection Management
//!
//! Services hold the shared connection pool and pass a connection (or an open
//! transaction) to repository calls. Handlers only call service methods with
//! business parameters.

use std::sync::Arc;

use crate::config::{AccessGraphConfig, DeletePolicy};
use crate::domain::repos::{DevelopersRepository, PermissionsRepository, ResourcesRepository};

mod analytics;
mod developers;
mod permissions;
mod queries;
mod resources;
mod validation;

pub(crate) use analytics::AnalyticsService;
pub(crate) use developers::DevelopersService;
pub(crate) use permissions::PermissionsService;
pub(crate) use queries::QueryService;
pub(crate) use resources::ResourcesService;

pub(crate) type DbProvider = sea_orm::DatabaseConnection;

/// Configuration for the domain services
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub delete_policy: DeletePolicy,
    pub max_name_length: usize,
    pub write_audit_threshold: usize,
    pub high_privilege_minimum_resources: usize,
    pub footprint_top_resources: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self::from(&AccessGraphConfig::default())
    }
}

impl From<&AccessGraphConfig> for ServiceConfig {
    fn from(cfg: &AccessGraphConfig) -> Self {
        Self {
            delete_policy: cfg.delete_policy,
            max_name_length: cfg.max_name_length,
            write_audit_threshold: cfg.write_audit_threshold,
            high_privilege_minimum_resources: cfg.high_privilege_minimum_resources,
            footprint_top_resources: cfg.footprint_top_resources,
        }
    }
}

// DI Container - aggregates all domain services
//
// Repositories are shared between services through `Arc`; every service
// draws connections from the same pool.
pub(crate) struct AppServices<DR, RR, PR>
where
    DR: DevelopersRepository + 'static,
    RR: ResourcesRepository + 'static,
    PR: PermissionsRepository + 'static,
{
    pub(crate) developers: Arc<DevelopersService<DR, PR>>,
    pub(crate) resources: Arc<ResourcesService<RR, PR>>,
    pub(crate) permissions: Arc<PermissionsService<PR, DR, RR>>,
    pub(crate) queries: Arc<QueryService<DR, RR, PR>>,
    pub(crate) analytics: AnalyticsService<DR, RR, PR>,
}

#[cfg(test)]
mod tests_analytics;

#[cfg(test)]
mod tests_entities;

#[cfg(test)]
mod tests_graph;

#[cfg(test)]
mod tests_queries;

impl<DR, RR, PR> AppServices<DR, RR, PR>
where
    DR: DevelopersRepository + 'static,
    RR: ResourcesRepository + 'static,
    PR: PermissionsRepository + 'static,
{
    pub fn new(
        developers_repo: DR,
        resources_repo: RR,
        permissions_repo: PR,
        db: Arc<DbProvider>,
        config: ServiceConfig,
    ) -> Self {
        let developers_repo = Arc::new(developers_repo);
        let resources_repo = Arc::new(resources_repo);
        let permissions_repo = Arc::new(permissions_repo);

        let developers = Arc::new(DevelopersService::new(
            Arc::clone(&db),
            Arc::clone(&developers_repo),
            Arc::clone(&permissions_repo),
            config.clone(),
        ));
        let resources = Arc::new(ResourcesService::new(
            Arc::clone(&db),
            Arc::clone(&resources_repo),
            Arc::clone(&permissions_repo),
            config.clone(),
        ));
        let permissions = Arc::new(PermissionsService::new(
            Arc::clone(&db),
            Arc::clone(&permissions_repo),
            Arc::clone(&developers_repo),
            Arc::clone(&resources_repo),
        ));
        let queries = Arc::new(QueryService::new(
            db,
            developers_repo,
            resources_repo,
            permissions_repo,
        ));

        Self {
            developers,
            resources,
            permissions,
            analytics: AnalyticsService::new(Arc::clone(&queries), config),
            queries,
        }
    }
}
