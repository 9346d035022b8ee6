//! Derived, read-only reports over the access graph.
//!
//! Every report is recomputed on request from the current records and is
//! zero-valued (not an error) when the graph is empty.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{CloudResource, CloudType, Developer, PermissionLevel};

/// One write-capable grant (`WRITE` or `RW`) on a resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteGrant {
    pub permission_id: i64,
    pub developer: Developer,
    pub permission: PermissionLevel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceWriteAccess {
    pub resource: CloudResource,
    pub write_grants: Vec<WriteGrant>,
    pub write_count: usize,
    /// `write_count >= threshold`.
    pub high_risk: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteAccessAudit {
    pub cloud_type: Option<CloudType>,
    pub threshold: usize,
    pub resources: Vec<ResourceWriteAccess>,
    pub total_write_grants: usize,
    pub high_risk_count: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelDistribution {
    pub read: usize,
    pub write: usize,
    pub rw: usize,
}

impl LevelDistribution {
    pub fn record(&mut self, level: PermissionLevel) {
        match level {
            PermissionLevel::Read => self.read += 1,
            PermissionLevel::Write => self.write += 1,
            PermissionLevel::Rw => self.rw += 1,
        }
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.read + self.write + self.rw
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceAccessCount {
    pub resource: CloudResource,
    pub permission_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloudFootprint {
    pub cloud_type: CloudType,
    pub resource_count: usize,
    pub total_permissions: usize,
    pub average_permissions_per_resource: f64,
    /// Resource count per name-derived subtype (first two name tokens, or
    /// `"Unknown"`). A naming convention, not a schema relation.
    pub subtypes: BTreeMap<String, usize>,
    pub developer_count: usize,
    pub level_distribution: LevelDistribution,
    pub most_accessed: Vec<ResourceAccessCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivilegedDeveloper {
    pub developer: Developer,
    pub total_resources: usize,
    pub write_resources: usize,
    pub by_cloud: BTreeMap<CloudType, usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighPrivilegeReview {
    pub minimum_resources: usize,
    pub developers: Vec<PrivilegedDeveloper>,
    pub developer_count: usize,
    pub average_resources_per_developer: f64,
}
