//! Top-level SLRIC configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::propagation_config::KNOWN_MODELS;
use super::{ExportConfig, InfluenceConfig, PropagationConfig, SimilarityConfig};
use crate::errors::ConfigError;

/// Name of the project config file looked up in the root directory.
pub const CONFIG_FILE_NAME: &str = "slric.toml";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Programmatic overrides (applied via `apply_overrides`)
/// 2. Environment variables (`SLRIC_*`)
/// 3. Project config (`slric.toml` in the root directory)
/// 4. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SlricConfig {
    pub influence: InfluenceConfig,
    pub propagation: PropagationConfig,
    pub similarity: SimilarityConfig,
    pub export: ExportConfig,
}

/// Caller-supplied overrides, applied on top of every other layer.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub quota_percent: Option<f64>,
    pub fixed_quota: Option<f64>,
    pub group_size: Option<usize>,
    pub path_limit: Option<usize>,
    pub models: Option<Vec<String>>,
    pub interdependence_model: Option<u8>,
    pub parallel: Option<bool>,
}

impl SlricConfig {
    /// Load configuration with layered resolution.
    pub fn load(root: &Path, overrides: Option<&ConfigOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let project_config_path = root.join(CONFIG_FILE_NAME);
        let from_file = project_config_path.exists();
        if from_file {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config);

        if let Some(overrides) = overrides {
            Self::apply_overrides(&mut config, overrides);
        }

        Self::validate(&config)?;

        tracing::debug!(
            root = %root.display(),
            from_file,
            overrides = overrides.is_some(),
            "configuration resolved"
        );
        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &SlricConfig) -> Result<(), ConfigError> {
        let influence = &config.influence;
        if let Some(q) = influence.quota_percent {
            non_negative("influence.quota_percent", q)?;
        }
        if let Some(q) = influence.fixed_quota {
            non_negative("influence.fixed_quota", q)?;
        }
        if influence.group_size == Some(0) {
            return Err(failed("influence.group_size", "must be at least 1"));
        }
        if influence.oracle_node_budget == Some(0) {
            return Err(failed("influence.oracle_node_budget", "must be greater than 0"));
        }

        let propagation = &config.propagation;
        if propagation.path_limit == Some(0) {
            return Err(failed("propagation.path_limit", "must be at least 1"));
        }
        for model in &propagation.models {
            if !KNOWN_MODELS.contains(&model.as_str()) {
                return Err(ConfigError::InvalidValue {
                    field: "propagation.models".to_string(),
                    message: format!(
                        "unknown model '{model}', expected one of {}",
                        KNOWN_MODELS.join(", ")
                    ),
                });
            }
        }
        if let Some(m) = propagation.interdependence_model {
            if !(1..=3).contains(&m) {
                return Err(ConfigError::InvalidValue {
                    field: "propagation.interdependence_model".to_string(),
                    message: format!("{m} is not one of 1 (product), 2 (min), 3 (sum)"),
                });
            }
        }
        if let Some(d) = propagation.damping {
            if !(d > 0.0 && d < 1.0) {
                return Err(failed("propagation.damping", "must be strictly between 0 and 1"));
            }
        }
        if propagation.max_iterations == Some(0) {
            return Err(failed("propagation.max_iterations", "must be at least 1"));
        }
        if let Some(t) = propagation.tolerance {
            if !(t.is_finite() && t > 0.0) {
                return Err(failed("propagation.tolerance", "must be greater than 0"));
            }
        }

        if let Some(eps) = config.similarity.epsilon {
            non_negative("similarity.epsilon", eps)?;
        }

        if let Some(ref sep) = config.export.separator {
            if sep.is_empty() {
                return Err(failed("export.separator", "must not be empty"));
            }
        }
        if config.export.batch_size == Some(0) {
            return Err(failed("export.batch_size", "must be at least 1"));
        }
        Ok(())
    }

    /// Merge a TOML file into the existing config.
    fn merge_toml_file(config: &mut SlricConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: SlricConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins wherever it has a value.
    pub fn merge(base: &mut SlricConfig, other: &SlricConfig) {
        // Influence
        let (b, o) = (&mut base.influence, &other.influence);
        if o.quota_percent.is_some() {
            b.quota_percent = o.quota_percent;
        }
        if o.fixed_quota.is_some() {
            b.fixed_quota = o.fixed_quota;
        }
        if o.group_size.is_some() {
            b.group_size = o.group_size;
        }
        if o.unbounded_groups.is_some() {
            b.unbounded_groups = o.unbounded_groups;
        }
        if o.oracle_node_budget.is_some() {
            b.oracle_node_budget = o.oracle_node_budget;
        }
        if o.parallel.is_some() {
            b.parallel = o.parallel;
        }

        // Propagation
        let (b, o) = (&mut base.propagation, &other.propagation);
        if o.path_limit.is_some() {
            b.path_limit = o.path_limit;
        }
        if !o.models.is_empty() {
            b.models = o.models.clone();
        }
        if o.interdependence_model.is_some() {
            b.interdependence_model = o.interdependence_model;
        }
        if o.damping.is_some() {
            b.damping = o.damping;
        }
        if o.max_iterations.is_some() {
            b.max_iterations = o.max_iterations;
        }
        if o.tolerance.is_some() {
            b.tolerance = o.tolerance;
        }

        // Similarity
        let (b, o) = (&mut base.similarity, &other.similarity);
        if o.epsilon.is_some() {
            b.epsilon = o.epsilon;
        }
        if o.interval_method.is_some() {
            b.interval_method = o.interval_method;
        }
        if o.topology_normalization.is_some() {
            b.topology_normalization = o.topology_normalization;
        }

        // Export
        let (b, o) = (&mut base.export, &other.export);
        if o.separator.is_some() {
            b.separator = o.separator.clone();
        }
        if o.batch_size.is_some() {
            b.batch_size = o.batch_size;
        }
        if o.append.is_some() {
            b.append = o.append;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `SLRIC_QUOTA_PERCENT`, `SLRIC_GROUP_SIZE`, etc. Unparseable values are ignored.
    fn apply_env_overrides(config: &mut SlricConfig) {
        if let Some(v) = env_parse::<f64>("SLRIC_QUOTA_PERCENT") {
            config.influence.quota_percent = Some(v);
        }
        if let Some(v) = env_parse::<f64>("SLRIC_FIXED_QUOTA") {
            config.influence.fixed_quota = Some(v);
        }
        if let Some(v) = env_parse::<usize>("SLRIC_GROUP_SIZE") {
            config.influence.group_size = Some(v);
        }
        if let Some(v) = env_parse::<bool>("SLRIC_PARALLEL") {
            config.influence.parallel = Some(v);
        }
        if let Some(v) = env_parse::<usize>("SLRIC_PATH_LIMIT") {
            config.propagation.path_limit = Some(v);
        }
        if let Ok(val) = std::env::var("SLRIC_MODELS") {
            let models: Vec<String> = val
                .split(',')
                .map(|m| m.trim().to_string())
                .filter(|m| !m.is_empty())
                .collect();
            if !models.is_empty() {
                config.propagation.models = models;
            }
        }
        if let Some(v) = env_parse::<u8>("SLRIC_INTERDEPENDENCE_MODEL") {
            config.propagation.interdependence_model = Some(v);
        }
        if let Some(v) = env_parse::<f64>("SLRIC_EPSILON") {
            config.similarity.epsilon = Some(v);
        }
    }

    /// Apply programmatic overrides (highest priority).
    pub fn apply_overrides(config: &mut SlricConfig, overrides: &ConfigOverrides) {
        if let Some(v) = overrides.quota_percent {
            config.influence.quota_percent = Some(v);
        }
        if let Some(v) = overrides.fixed_quota {
            config.influence.fixed_quota = Some(v);
        }
        if let Some(v) = overrides.group_size {
            config.influence.group_size = Some(v);
        }
        if let Some(v) = overrides.parallel {
            config.influence.parallel = Some(v);
        }
        if let Some(v) = overrides.path_limit {
            config.propagation.path_limit = Some(v);
        }
        if let Some(ref v) = overrides.models {
            config.propagation.models = v.clone();
        }
        if let Some(v) = overrides.interdependence_model {
            config.propagation.interdependence_model = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

fn failed(field: &str, message: &str) -> ConfigError {
    ConfigError::ValidationFailed {
        field: field.to_string(),
        message: message.to_string(),
    }
}

fn non_negative(field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(failed(field, "must be a finite value >= 0"))
    }
}
