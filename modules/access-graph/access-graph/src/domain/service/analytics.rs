//! Audit reports composed from repeated [`QueryService`] calls.
//!
//! Reports hold no state and never fail on an empty graph. An entity that is
//! deleted between the listing call and its per-entity query is skipped.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use access_graph_sdk::{
    CloudFootprint, CloudType, HighPrivilegeReview, LevelDistribution, ListQuery,
    PrivilegedDeveloper, ResourceAccessCount, ResourceWriteAccess, WriteAccessAudit, WriteGrant,
};
use tracing::instrument;

use crate::domain::error::DomainError;
use crate::domain::repos::{DevelopersRepository, PermissionsRepository, ResourcesRepository};
use crate::domain::service::{QueryService, ServiceConfig};

const UNKNOWN_SUBTYPE: &str = "Unknown";

/// Subtype guessed from a resource name: its first two whitespace-separated
/// tokens (`"AWS S3 Bucket"` → `"AWS S3"`), or `"Unknown"` for shorter names.
///
/// This is a naming convention only. Nothing guarantees that two resources
/// sharing a prefix are of the same kind.
pub(crate) fn resource_subtype(name: &str) -> String {
    let mut tokens = name.split_whitespace();
    match (tokens.next(), tokens.next()) {
        (Some(first), Some(second)) => format!("{first} {second}"),
        _ => UNKNOWN_SUBTYPE.to_owned(),
    }
}

#[allow(clippy::cast_precision_loss)]
fn average(total: usize, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        total as f64 / count as f64
    }
}

/// Keeps `NotFound` as "skip this entity", propagates every other error.
fn skip_vanished<T>(result: Result<T, DomainError>) -> Result<Option<T>, DomainError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_not_found() => {
            tracing::debug!(error = %e, "Entity vanished while building report, skipping");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

pub struct AnalyticsService<DR, RR, PR>
where
    DR: DevelopersRepository,
    RR: ResourcesRepository,
    PR: PermissionsRepository,
{
    queries: Arc<QueryService<DR, RR, PR>>,
    config: ServiceConfig,
}

impl<DR, RR, PR> AnalyticsService<DR, RR, PR>
where
    DR: DevelopersRepository,
    RR: ResourcesRepository,
    PR: PermissionsRepository,
{
    pub fn new(queries: Arc<QueryService<DR, RR, PR>>, config: ServiceConfig) -> Self {
        Self { queries, config }
    }

    /// Write-capable grants (`WRITE` or `RW`) per resource. A resource is
    /// high risk when its write grant count reaches `threshold`.
    #[instrument(skip(self))]
    pub async fn write_access_audit(
        &self,
        cloud_type: Option<CloudType>,
        threshold: Option<usize>,
    ) -> Result<WriteAccessAudit, DomainError> {
        let threshold = threshold.unwrap_or(self.config.write_audit_threshold);
        let resources = self
            .queries
            .list_resources(cloud_type, ListQuery::all())
            .await?;

        let mut report = WriteAccessAudit {
            cloud_type,
            threshold,
            resources: Vec::with_capacity(resources.len()),
            total_write_grants: 0,
            high_risk_count: 0,
        };

        for resource in resources {
            let Some(grants) =
                skip_vanished(self.queries.permissions_for_resource(resource.id).await)?
            else {
                continue;
            };

            let write_grants: Vec<WriteGrant> = grants
                .into_iter()
                .filter(|g| g.permission.permission.allows_write())
                .map(|g| WriteGrant {
                    permission_id: g.permission.id,
                    developer: g.developer,
                    permission: g.permission.permission,
                })
                .collect();
            let write_count = write_grants.len();
            let high_risk = write_count >= threshold;

            report.total_write_grants += write_count;
            if high_risk {
                report.high_risk_count += 1;
            }
            report.resources.push(ResourceWriteAccess {
                resource,
                write_grants,
                write_count,
                high_risk,
            });
        }

        tracing::debug!(
            resources = report.resources.len(),
            high_risk = report.high_risk_count,
            "Write access audit complete"
        );
        Ok(report)
    }

    /// Size and shape of one cloud: resources, edges, subtypes and the most
    /// accessed resources.
    #[instrument(skip(self))]
    pub async fn cloud_footprint(&self, cloud_type: CloudType) -> Result<CloudFootprint, DomainError> {
        let resources = self
            .queries
            .list_resources(Some(cloud_type), ListQuery::all())
            .await?;

        let mut subtypes: BTreeMap<String, usize> = BTreeMap::new();
        let mut developers = BTreeSet::new();
        let mut levels = LevelDistribution::default();
        let mut counts = Vec::with_capacity(resources.len());

        for resource in resources {
            let Some(grants) =
                skip_vanished(self.queries.permissions_for_resource(resource.id).await)?
            else {
                continue;
            };

            *subtypes.entry(resource_subtype(&resource.name)).or_default() += 1;
            for grant in &grants {
                developers.insert(grant.developer.id);
                levels.record(grant.permission.permission);
            }
            counts.push(ResourceAccessCount {
                resource,
                permission_count: grants.len(),
            });
        }

        let resource_count = counts.len();
        let total_permissions: usize = counts.iter().map(|c| c.permission_count).sum();

        counts.sort_by(|a, b| {
            b.permission_count
                .cmp(&a.permission_count)
                .then(a.resource.id.cmp(&b.resource.id))
        });
        counts.truncate(self.config.footprint_top_resources);

        Ok(CloudFootprint {
            cloud_type,
            resource_count,
            total_permissions,
            average_permissions_per_resource: average(total_permissions, resource_count),
            subtypes,
            developer_count: developers.len(),
            level_distribution: levels,
            most_accessed: counts,
        })
    }

    /// Developers holding at least `minimum_resources` edges, most
    /// privileged first. The average is taken over every developer.
    #[instrument(skip(self))]
    pub async fn high_privilege_review(
        &self,
        minimum_resources: Option<usize>,
    ) -> Result<HighPrivilegeReview, DomainError> {
        let minimum_resources =
            minimum_resources.unwrap_or(self.config.high_privilege_minimum_resources);
        let all_developers = self.queries.list_developers(ListQuery::all()).await?;

        let mut reviewed = 0usize;
        let mut total_edges = 0usize;
        let mut flagged = Vec::new();

        for developer in all_developers {
            let Some(grants) =
                skip_vanished(self.queries.permissions_for_developer(developer.id).await)?
            else {
                continue;
            };

            reviewed += 1;
            total_edges += grants.len();
            if grants.len() < minimum_resources {
                continue;
            }

            let mut by_cloud: BTreeMap<CloudType, usize> = BTreeMap::new();
            for grant in &grants {
                *by_cloud.entry(grant.cloud_resource.cloud_type).or_default() += 1;
            }
            flagged.push(PrivilegedDeveloper {
                developer,
                total_resources: grants.len(),
                write_resources: grants
                    .iter()
                    .filter(|g| g.permission.permission.allows_write())
                    .count(),
                by_cloud,
            });
        }

        flagged.sort_by(|a, b| {
            b.total_resources
                .cmp(&a.total_resources)
                .then(a.developer.id.cmp(&b.developer.id))
        });

        Ok(HighPrivilegeReview {
            minimum_resources,
            developer_count: flagged.len(),
            developers: flagged,
            average_resources_per_developer: average(total_edges, reviewed),
        })
    }
}
