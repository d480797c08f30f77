//! Top-level configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{GroupingConfig, ObservabilityConfig};
use crate::errors::ConfigError;
use crate::models::GroupingMode;

/// Project config file looked up in the root passed to [`ClashConfig::load`].
pub const CONFIG_FILENAME: &str = "clash.toml";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Explicit overrides (applied via [`ConfigOverrides`])
/// 2. Environment variables (`CLASH_*`)
/// 3. Project config (`clash.toml` in the given root)
/// 4. Compiled defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ClashConfig {
    pub grouping: GroupingConfig,
    pub observability: ObservabilityConfig,
}

/// Caller-supplied overrides, usually coming from a front-end's own settings.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub group_by: Option<GroupingMode>,
    pub then_by: Option<GroupingMode>,
    pub keep_existing_groups: Option<bool>,
    pub parallel_threshold: Option<usize>,
}

impl ClashConfig {
    /// Load configuration with layered resolution.
    pub fn load(root: &Path, overrides: Option<&ConfigOverrides>) -> Result<Self, ConfigError> {
        let path = root.join(CONFIG_FILENAME);
        let mut config = if path.exists() {
            debug!(path = %path.display(), "loading project config");
            Self::from_file(&path)?
        } else {
            Self::default()
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());

        if let Some(overrides) = overrides {
            config.apply_overrides(overrides);
        }

        config.validate()?;
        Ok(config)
    }

    /// Parse a config file. Missing keys fall back to defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }

    /// Apply environment overrides read through `lookup`.
    ///
    /// Recognised keys: `CLASH_GROUP_BY`, `CLASH_THEN_BY`, `CLASH_KEEP_EXISTING_GROUPS`,
    /// `CLASH_MAX_HIERARCHY_DEPTH`, `CLASH_PARALLEL_THRESHOLD`, `CLASH_LOG_JSON`.
    /// Unparseable values are ignored.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(mode) = lookup("CLASH_GROUP_BY").and_then(|v| v.parse().ok()) {
            self.grouping.default_group_by = mode;
        }
        if let Some(mode) = lookup("CLASH_THEN_BY").and_then(|v| v.parse().ok()) {
            self.grouping.default_then_by = mode;
        }
        if let Some(v) = lookup("CLASH_KEEP_EXISTING_GROUPS").and_then(|v| v.parse().ok()) {
            self.grouping.keep_existing_groups = v;
        }
        if let Some(v) = lookup("CLASH_MAX_HIERARCHY_DEPTH").and_then(|v| v.parse().ok()) {
            self.grouping.max_hierarchy_depth = v;
        }
        if let Some(v) = lookup("CLASH_PARALLEL_THRESHOLD").and_then(|v| v.parse().ok()) {
            self.grouping.parallel_threshold = v;
        }
        if let Some(v) = lookup("CLASH_LOG_JSON").and_then(|v| v.parse().ok()) {
            self.observability.json = v;
        }
    }

    /// Apply explicit overrides (highest priority).
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(mode) = overrides.group_by {
            self.grouping.default_group_by = mode;
        }
        if let Some(mode) = overrides.then_by {
            self.grouping.default_then_by = mode;
        }
        if let Some(v) = overrides.keep_existing_groups {
            self.grouping.keep_existing_groups = v;
        }
        if let Some(v) = overrides.parallel_threshold {
            self.grouping.parallel_threshold = v;
        }
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grouping.max_hierarchy_depth == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "grouping.max_hierarchy_depth".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if self.grouping.parallel_threshold == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "grouping.parallel_threshold".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if self.grouping.transaction_label.trim().is_empty() {
            return Err(ConfigError::ValidationFailed {
                field: "grouping.transaction_label".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if self.grouping.progress_title.trim().is_empty() {
            return Err(ConfigError::ValidationFailed {
                field: "grouping.progress_title".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if let Err(e) = tracing_subscriber::EnvFilter::try_new(&self.observability.log_filter) {
            return Err(ConfigError::ValidationFailed {
                field: "observability.log_filter".to_string(),
                message: e.to_string(),
            });
        }
        Ok(())
    }
}
