use serde::{Deserialize, Serialize};

/// What happens to permission edges when one of their endpoints is deleted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeletePolicy {
    /// Refuse to delete a developer or resource that still has edges.
    #[default]
    Reject,
    /// Delete the dependent edges together with the entity, atomically.
    Cascade,
}

/// Configuration for the `access_graph` module
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccessGraphConfig {
    #[serde(default)]
    pub delete_policy: DeletePolicy,
    #[serde(default = "default_write_audit_threshold")]
    pub write_audit_threshold: usize,
    #[serde(default = "default_high_privilege_minimum_resources")]
    pub high_privilege_minimum_resources: usize,
    #[serde(default = "default_footprint_top_resources")]
    pub footprint_top_resources: usize,
    #[serde(default = "default_page_size")]
    pub default_page_size: u64,
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u64,
    #[serde(default = "default_max_name_length")]
    pub max_name_length: usize,
}

impl Default for AccessGraphConfig {
    fn default() -> Self {
        Self {
            delete_policy: DeletePolicy::default(),
            write_audit_threshold: default_write_audit_threshold(),
            high_privilege_minimum_resources: default_high_privilege_minimum_resources(),
            footprint_top_resources: default_footprint_top_resources(),
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
            max_name_length: default_max_name_length(),
        }
    }
}

fn default_write_audit_threshold() -> usize {
    2
}

fn default_high_privilege_minimum_resources() -> usize {
    5
}

fn default_footprint_top_resources() -> usize {
    5
}

fn default_page_size() -> u64 {
    100
}

fn default_max_page_size() -> u64 {
    1000
}

fn default_max_name_length() -> usize {
    255
}
