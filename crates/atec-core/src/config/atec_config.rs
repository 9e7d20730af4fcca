//! Top-level ATEC configuration with layered resolution.

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::defaults::MAX_READ_POOL_SIZE;
use super::{ObservabilityConfig, RecommendConfig, StorageConfig};
use crate::errors::ConfigError;

/// Prefix shared by every environment override.
pub const ENV_PREFIX: &str = "ATEC_";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`ATEC_*`)
/// 2. Config file (`atec.toml` or an explicit path)
/// 3. Compiled defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AtecConfig {
    pub recommend: RecommendConfig,
    pub storage: StorageConfig,
    pub observability: ObservabilityConfig,
}

impl AtecConfig {
    /// Load configuration: file (if it exists) → environment → validation.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            let content =
                std::fs::read_to_string(path).map_err(|e| ConfigError::FileUnreadable {
                    path: path.display().to_string(),
                    message: e.to_string(),
                })?;
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?
        } else {
            tracing::debug!(path = %path.display(), "config file absent, using defaults");
            Self::default()
        };

        config.apply_env_overrides_from(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }

    /// Apply `ATEC_*` overrides read through `lookup`.
    /// Pattern: `ATEC_NEIGHBOR_COUNT`, `ATEC_SCOPE`, `ATEC_DB_PATH`, etc.
    /// Unparseable values are logged and ignored.
    pub fn apply_env_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let rec = &mut self.recommend;
        override_parsed(&lookup, "NEIGHBOR_COUNT", &mut rec.neighbor_count);
        override_parsed(&lookup, "SCOPE", &mut rec.scope);
        override_parsed(&lookup, "MODE", &mut rec.mode);
        override_parsed(&lookup, "ORDER", &mut rec.order);
        override_parsed(&lookup, "RESULT_COUNT", &mut rec.result_count);
        override_parsed(&lookup, "FILL_VALUE", &mut rec.fill_value);
        override_parsed(&lookup, "SUBSEQUENT_LIMIT", &mut rec.subsequent_limit);
        override_parsed(&lookup, "CACHE_QUESTIONS", &mut rec.cache_questions);

        let storage = &mut self.storage;
        override_parsed(&lookup, "DB_PATH", &mut storage.db_path);
        override_parsed(&lookup, "BUSY_TIMEOUT_MS", &mut storage.busy_timeout_ms);
        override_parsed(&lookup, "READ_POOL_SIZE", &mut storage.read_pool_size);

        let obs = &mut self.observability;
        override_parsed(&lookup, "LOG_LEVEL", &mut obs.log_level);
        override_parsed(&lookup, "JSON_LOGS", &mut obs.json_logs);
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.recommend.validate()?;

        if self.storage.busy_timeout_ms == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "storage.busy_timeout_ms".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if !(1..=MAX_READ_POOL_SIZE).contains(&self.storage.read_pool_size) {
            return Err(ConfigError::ValidationFailed {
                field: "storage.read_pool_size".to_string(),
                message: format!("must be between 1 and {MAX_READ_POOL_SIZE}"),
            });
        }
        if self.storage.db_path.trim().is_empty() {
            return Err(ConfigError::ValidationFailed {
                field: "storage.db_path".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

impl RecommendConfig {
    /// Validate the per-request parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("recommend.neighbor_count", self.neighbor_count),
            ("recommend.result_count", self.result_count),
            ("recommend.subsequent_limit", self.subsequent_limit),
        ];
        for (field, value) in positive {
            if value == 0 {
                return Err(ConfigError::ValidationFailed {
                    field: field.to_string(),
                    message: "must be greater than 0".to_string(),
                });
            }
        }
        if !self.fill_value.is_finite() {
            return Err(ConfigError::ValidationFailed {
                field: "recommend.fill_value".to_string(),
                message: "must be a finite number".to_string(),
            });
        }
        Ok(())
    }
}

fn override_parsed<T, F>(lookup: &F, suffix: &str, target: &mut T)
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    let key = format!("{ENV_PREFIX}{suffix}");
    let Some(raw) = lookup(&key) else {
        return;
    };
    match raw.parse::<T>() {
        Ok(value) => *target = value,
        Err(e) => tracing::warn!(key = %key, value = %raw, error = %e, "ignoring invalid env override"),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::config::{AggregationScope, RankingMode, SortOrder};

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn env_overrides_replace_file_values() {
        let mut config = AtecConfig::default();
        config.apply_env_overrides_from(lookup_from(&[
            ("ATEC_NEIGHBOR_COUNT", "3"),
            ("ATEC_SCOPE", "full"),
            ("ATEC_MODE", "Unanswered"),
            ("ATEC_ORDER", "asc"),
            ("ATEC_DB_PATH", "/tmp/answers.db"),
            ("ATEC_JSON_LOGS", "true"),
        ]));

        assert_eq!(config.recommend.neighbor_count, 3);
        assert_eq!(config.recommend.scope, AggregationScope::Full);
        assert_eq!(config.recommend.mode, RankingMode::Unanswered);
        assert_eq!(config.recommend.order, SortOrder::Asc);
        assert_eq!(config.storage.db_path, "/tmp/answers.db");
        assert!(config.observability.json_logs);
    }

    #[test]
    fn invalid_env_values_are_ignored() {
        let mut config = AtecConfig::default();
        config.apply_env_overrides_from(lookup_from(&[
            ("ATEC_NEIGHBOR_COUNT", "many"),
            ("ATEC_SCOPE", "sideways"),
        ]));
        assert_eq!(config, AtecConfig::default());
    }
}
