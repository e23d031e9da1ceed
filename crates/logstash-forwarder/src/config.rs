// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use std::env;

use logstash_adapter::{Route, SetupError};

const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_QUEUE_CAPACITY: usize = 1000;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("LOGSTASH_ROUTE environment variable is not set")]
    MissingRoute,

    #[error(transparent)]
    InvalidRoute(#[from] SetupError),

    #[error("LOGSTASH_QUEUE_CAPACITY must be a positive integer, got '{0}'")]
    InvalidQueueCapacity(String),
}

/// Forwarder configuration
#[derive(Debug, Clone)]
pub struct ForwarderConfig {
    /// Where to ship records, e.g. `logstash+tcp://collector:5000`
    pub route: Route,
    /// Capacity of the queue between stdin and the adapter
    pub queue_capacity: usize,
}

impl ForwarderConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let route = lookup("LOGSTASH_ROUTE").ok_or(ConfigError::MissingRoute)?;
        let route = Route::parse(&route)?;
        let queue_capacity = match lookup("LOGSTASH_QUEUE_CAPACITY") {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|capacity| *capacity > 0)
                .ok_or(ConfigError::InvalidQueueCapacity(raw))?,
            None => DEFAULT_QUEUE_CAPACITY,
        };

        Ok(Self {
            route,
            queue_capacity,
        })
    }
}

/// Lower-cased log level, `info` when unset. Read before the rest of the configuration so
/// configuration errors are logged.
pub fn log_level(raw: Option<String>) -> String {
    raw.map(|val| val.to_lowercase())
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string())
}
