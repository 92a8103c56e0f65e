//! Configuration for the Model Mapper module.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default time between two discovery round-trips.
pub const DEFAULT_DISCOVERY_REFRESH_INTERVAL: Duration = Duration::from_secs(30 * 60);

/// Configuration error for the model mapper section.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("invalid model-mapper config: {source}")]
    InvalidConfig {
        #[source]
        source: serde_json::Error,
    },
}

/// An additional model-name prefix to API group mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiGroupPrefix {
    /// Prefix of the generated model type name, e.g. `Monitoring`.
    pub prefix: String,
    /// API group it stands for, e.g. `monitoring.coreos.com`.
    pub group: String,
}

/// Configuration for the Model Mapper module.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModelMapperConfig {
    /// Minimum time between two discovery round-trips, in humantime form (`"30m"`).
    /// Default: 30 minutes
    #[serde(
        default = "default_discovery_refresh_interval",
        with = "humantime_serde"
    )]
    pub discovery_refresh_interval: Duration,

    /// Lock stripes per available CPU for each direction of the bidirectional maps.
    /// Default: 4
    #[serde(default = "default_lock_stripes_per_cpu")]
    pub lock_stripes_per_cpu: usize,

    /// Group prefixes consulted after the built-in table, in order.
    /// Default: empty
    pub extra_api_groups: Vec<ApiGroupPrefix>,
}

fn default_discovery_refresh_interval() -> Duration {
    DEFAULT_DISCOVERY_REFRESH_INTERVAL
}

fn default_lock_stripes_per_cpu() -> usize {
    4
}

impl Default for ModelMapperConfig {
    fn default() -> Self {
        Self {
            discovery_refresh_interval: default_discovery_refresh_interval(),
            lock_stripes_per_cpu: default_lock_stripes_per_cpu(),
            extra_api_groups: Vec::new(),
        }
    }
}

impl ModelMapperConfig {
    /// Loads the configuration from a raw config section.
    ///
    /// A missing section yields the defaults; a present section must be valid.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidConfig` if the section cannot be deserialized.
    pub fn from_section(section: Option<&serde_json::Value>) -> Result<Self, ConfigError> {
        let Some(section) = section else {
            return Ok(Self::default());
        };
        Self::deserialize(section).map_err(|source| ConfigError::InvalidConfig { source })
    }

    /// Total number of lock stripes per map direction.
    #[must_use]
    pub fn lock_stripes(&self) -> usize {
        let cpus = std::thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get);
        cpus.saturating_mul(self.lock_stripes_per_cpu).max(1)
    }
}
