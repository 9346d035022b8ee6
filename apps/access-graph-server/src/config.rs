//! Server configuration: built-in defaults, then an optional YAML file, then
//! `ACCESS_GRAPH__*` environment variables (`__` separates nesting levels,
//! e.g. `ACCESS_GRAPH__DATABASE__URL`).

use std::path::Path;

use access_graph::AccessGraphConfig;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};

pub const ENV_PREFIX: &str = "ACCESS_GRAPH__";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub access_graph: AccessGraphConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Any URL `sea-orm` accepts. `?mode=rwc` creates the SQLite file on
    /// first start.
    #[serde(default = "default_database_url")]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// One JSON object per line instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            database: DatabaseConfig::default(),
            logging: LoggingConfig::default(),
            access_graph: AccessGraphConfig::default(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: default_max_connections(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_bind_addr() -> String {
    "127.0.0.1:8087".to_owned()
}

fn default_database_url() -> String {
    "sqlite://access_graph.db?mode=rwc".to_owned()
}

fn default_max_connections() -> u32 {
    8
}

fn default_log_level() -> String {
    "info".to_owned()
}

impl AppConfig {
    /// Layers defaults, the YAML file at `path` (which must exist when
    /// given) and the environment.
    ///
    /// # Errors
    /// Returns an error if the file is missing or a value fails to parse.
    pub fn load(path: Option<&Path>) -> Result<Self, figment::Error> {
        Self::figment(path)?
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
    }

    fn figment(path: Option<&Path>) -> Result<Figment, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            if !path.is_file() {
                return Err(figment::Error::from(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            figment = figment.merge(Yaml::file(path));
        }
        Ok(figment)
    }
}
