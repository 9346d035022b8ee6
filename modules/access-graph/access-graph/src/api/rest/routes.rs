//! REST API route definitions.
//!
//! - `developers` - CRUD, detailed view, reachable resources
//! - `cloud_resources` - CRUD with cloud filter, detailed view
//! - `permissions` - CRUD with developer/resource filters, by-developer and
//!   by-resource joins
//! - `reports` - write access audit, cloud footprint, high-privilege review

use std::sync::Arc;

use axum::Router;
use axum::routing::get;

use crate::api::rest::dto::PageLimits;
use crate::api::rest::handlers;
use crate::config::AccessGraphConfig;
use crate::module::ConcreteAppServices;

/// Register all routes for the `access_graph` module
#[allow(clippy::needless_pass_by_value)]
pub(crate) fn register_routes(
    router: Router,
    services: Arc<ConcreteAppServices>,
    cfg: &AccessGraphConfig,
) -> Router {
    router
        .route(
            "/developers",
            get(handlers::list_developers).post(handlers::create_developer),
        )
        .route(
            "/developers/{id}",
            get(handlers::get_developer)
                .put(handlers::update_developer)
                .delete(handlers::delete_developer),
        )
        .route("/developers/{id}/detailed", get(handlers::developer_detailed))
        .route(
            "/developers/{id}/resources",
            get(handlers::resources_for_developer),
        )
        .route(
            "/cloud_resources",
            get(handlers::list_resources).post(handlers::create_resource),
        )
        .route(
            "/cloud_resources/{id}",
            get(handlers::get_resource)
                .put(handlers::update_resource)
                .delete(handlers::delete_resource),
        )
        .route(
            "/cloud_resources/{id}/detailed",
            get(handlers::resource_detailed),
        )
        .route(
            "/permissions",
            get(handlers::list_permissions).post(handlers::create_permission),
        )
        .route(
            "/permissions/by-developer/{id}",
            get(handlers::permissions_by_developer),
        )
        .route(
            "/permissions/by-resource/{id}",
            get(handlers::permissions_by_resource),
        )
        .route(
            "/permissions/{id}",
            get(handlers::get_permission)
                .put(handlers::update_permission)
                .delete(handlers::delete_permission),
        )
        .route("/reports/write-access", get(handlers::write_access_report))
        .route(
            "/reports/footprint/{cloud_type}",
            get(handlers::footprint_report),
        )
        .route(
            "/reports/high-privilege",
            get(handlers::high_privilege_report),
        )
        .layer(axum::Extension(PageLimits::from(cfg)))
        .layer(axum::Extension(services))
}
