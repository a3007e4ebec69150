//! CLI configuration management
//!
//! Loads settings from an optional TOML file, then applies environment
//! variable overrides.
//!
//! ```toml
//! log_level = "info"
//! weight_policy = "strict"
//! weight_tolerance = 0.001
//!
//! [sweep]
//! start = 20
//! end = 44
//!
//! [baseline]
//! base_price = 4000.0
//! reference_multiple = 18.0
//!
//! [[baseline.sectors]]
//! name = "Growth"
//! weight = 0.6
//! current_multiple = 25.0
//! ```

use index_core::registry::{BaselineRegistry, WeightPolicy};
use index_core::types::{ConfigurationError, IndexBaseline, SectorRecord};
use index_scenarios::DEFAULT_SWEEP_RANGE;
use serde::Deserialize;
use std::ops::Range;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_PATH: &str = "index_target.toml";

const ENV_LOG_LEVEL: &str = "INDEX_TARGET_LOG_LEVEL";
const ENV_SWEEP_START: &str = "INDEX_TARGET_SWEEP_START";
const ENV_SWEEP_END: &str = "INDEX_TARGET_SWEEP_END";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid weight policy: {0}. Must be one of: unchecked, strict, normalise")]
    InvalidWeightPolicy(String),

    #[error("Configuration file error: {0}")]
    FileError(String),

    #[error("Environment variable error: {0}")]
    EnvError(String),

    #[error("Invalid configuration: {}", .0.join("; "))]
    Validation(Vec<String>),
}

/// Log levels supported by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// Weight-sum handling selected in the config file.
///
/// The tolerance for `Strict` lives in `CliConfig::weight_tolerance`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WeightPolicyKind {
    #[default]
    Unchecked,
    Strict,
    Normalise,
}

impl FromStr for WeightPolicyKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "unchecked" => Ok(WeightPolicyKind::Unchecked),
            "strict" => Ok(WeightPolicyKind::Strict),
            "normalise" | "normalize" => Ok(WeightPolicyKind::Normalise),
            _ => Err(ConfigError::InvalidWeightPolicy(s.to_string())),
        }
    }
}

impl std::fmt::Display for WeightPolicyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WeightPolicyKind::Unchecked => write!(f, "unchecked"),
            WeightPolicyKind::Strict => write!(f, "strict"),
            WeightPolicyKind::Normalise => write!(f, "normalise"),
        }
    }
}

/// Default sweep bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    /// First multiple (inclusive)
    pub start: u32,
    /// Last multiple (exclusive)
    pub end: u32,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            start: DEFAULT_SWEEP_RANGE.start,
            end: DEFAULT_SWEEP_RANGE.end,
        }
    }
}

/// Config-supplied replacement for the reference baseline.
///
/// Sector rows are read straight into [`SectorRecord`]; the registry
/// validates each one on construction.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BaselineConfig {
    pub base_price: f64,
    pub reference_multiple: f64,
    #[serde(default)]
    pub sectors: Vec<SectorRecord>,
}

/// CLI configuration structure
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Default log level; `RUST_LOG` takes precedence
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
    /// Weight-sum policy for the registry
    #[serde(deserialize_with = "deserialize_weight_policy")]
    pub weight_policy: WeightPolicyKind,
    /// Allowed |Σw − 1| under the strict policy
    pub weight_tolerance: f64,
    /// Default sweep bounds
    pub sweep: SweepConfig,
    /// Replacement baseline; the reference deployment is used when absent
    pub baseline: Option<BaselineConfig>,
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<LogLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    LogLevel::from_str(&s).map_err(serde::de::Error::custom)
}

fn deserialize_weight_policy<'de, D>(deserializer: D) -> Result<WeightPolicyKind, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    WeightPolicyKind::from_str(&s).map_err(serde::de::Error::custom)
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            weight_policy: WeightPolicyKind::Unchecked,
            weight_tolerance: 1e-6,
            sweep: SweepConfig::default(),
            baseline: None,
        }
    }
}

impl CliConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::FileError(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Load configuration for a CLI invocation.
    ///
    /// An explicit path must exist. Without one, [`DEFAULT_CONFIG_PATH`] is
    /// read if present and defaults are used otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let path = Path::new(DEFAULT_CONFIG_PATH);
                if path.exists() {
                    Self::from_file(path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Apply environment variable overrides.
    pub fn with_env_override(mut self) -> Result<Self, ConfigError> {
        if let Ok(level) = std::env::var(ENV_LOG_LEVEL) {
            self.log_level = LogLevel::from_str(&level)?;
        }
        if let Ok(start) = std::env::var(ENV_SWEEP_START) {
            self.sweep.start = parse_env_u32(ENV_SWEEP_START, &start)?;
        }
        if let Ok(end) = std::env::var(ENV_SWEEP_END) {
            self.sweep.end = parse_env_u32(ENV_SWEEP_END, &end)?;
        }
        Ok(self)
    }

    /// Validate the configuration, collecting every problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if !self.weight_tolerance.is_finite() || self.weight_tolerance < 0.0 {
            errors.push(format!(
                "weight_tolerance must be a non-negative number, got {}",
                self.weight_tolerance
            ));
        }

        if self.sweep.start == 0 {
            errors.push("sweep.start must be at least 1".to_string());
        }
        if self.sweep.start >= self.sweep.end {
            errors.push(format!(
                "sweep.start ({}) must be less than sweep.end ({})",
                self.sweep.start, self.sweep.end
            ));
        }

        if let Some(baseline) = &self.baseline {
            if baseline.sectors.is_empty() {
                errors.push("baseline.sectors must list at least one sector".to_string());
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Registry weight policy implied by the config.
    pub fn weight_policy(&self) -> WeightPolicy {
        match self.weight_policy {
            WeightPolicyKind::Unchecked => WeightPolicy::Unchecked,
            WeightPolicyKind::Strict => WeightPolicy::Strict {
                tolerance: self.weight_tolerance,
            },
            WeightPolicyKind::Normalise => WeightPolicy::Normalise,
        }
    }

    /// Default sweep range.
    pub fn sweep_range(&self) -> Range<u32> {
        self.sweep.start..self.sweep.end
    }

    /// Build the baseline registry: the config-supplied one if present,
    /// the reference deployment otherwise.
    pub fn registry(&self) -> Result<BaselineRegistry, ConfigurationError> {
        let policy = self.weight_policy();
        match &self.baseline {
            None if policy == WeightPolicy::Unchecked => Ok(BaselineRegistry::reference()),
            None => {
                let reference = BaselineRegistry::reference();
                BaselineRegistry::with_policy(
                    *reference.baseline(),
                    reference.sectors().to_vec(),
                    policy,
                )
            }
            Some(baseline) => {
                let index = IndexBaseline::new(baseline.base_price, baseline.reference_multiple)?;
                BaselineRegistry::with_policy(index, baseline.sectors.clone(), policy)
            }
        }
    }
}

fn parse_env_u32(var: &str, value: &str) -> Result<u32, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::EnvError(format!("{} must be an integer, got {:?}", var, value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.weight_policy, WeightPolicyKind::Unchecked);
        assert_eq!(config.sweep_range(), 20..44);
        assert!(config.baseline.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str("trace").unwrap(), LogLevel::Trace);
        assert_eq!(LogLevel::from_str("DEBUG").unwrap(), LogLevel::Debug);
        assert_eq!(LogLevel::from_str("Info").unwrap(), LogLevel::Info);
        assert_eq!(LogLevel::from_str("WARN").unwrap(), LogLevel::Warn);
        assert_eq!(LogLevel::from_str("error").unwrap(), LogLevel::Error);

        assert!(LogLevel::from_str("loud").is_err());
    }

    #[test]
    fn test_weight_policy_parsing() {
        assert_eq!(
            WeightPolicyKind::from_str("strict").unwrap(),
            WeightPolicyKind::Strict
        );
        assert_eq!(
            WeightPolicyKind::from_str("normalize").unwrap(),
            WeightPolicyKind::Normalise
        );
        assert_eq!(WeightPolicyKind::Normalise.to_string(), "normalise");
        assert!(WeightPolicyKind::from_str("rescale").is_err());
    }

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config = CliConfig::from_toml_str("").unwrap();
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.sweep, SweepConfig::default());
    }

    #[test]
    fn test_full_toml() {
        let config = CliConfig::from_toml_str(
            r#"
            log_level = "debug"
            weight_policy = "strict"
            weight_tolerance = 0.01

            [sweep]
            start = 10

            [baseline]
            base_price = 4000.0
            reference_multiple = 16.0

            [[baseline.sectors]]
            name = "Cyclicals"
            weight = 0.5
            current_multiple = 10.0

            [[baseline.sectors]]
            name = "Defensives"
            weight = 0.5
            current_multiple = 20.0
            "#,
        )
        .unwrap();

        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(
            config.weight_policy(),
            WeightPolicy::Strict { tolerance: 0.01 }
        );
        assert_eq!(config.sweep_range(), 10..44);
        assert!(config.validate().is_ok());

        let registry = config.registry().unwrap();
        assert_eq!(registry.len(), 2);
        assert_relative_eq!(registry.baseline().base_eps(), 250.0, epsilon = 1e-12);
        assert_relative_eq!(
            registry.current_index_multiple(),
            40.0 / 3.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_invalid_log_level_in_toml() {
        let err = CliConfig::from_toml_str(r#"log_level = "loud""#).unwrap_err();
        assert!(matches!(err, ConfigError::FileError(_)));
    }

    #[test]
    fn test_validation_collects_all_errors() {
        let config = CliConfig {
            weight_tolerance: -1.0,
            sweep: SweepConfig { start: 0, end: 0 },
            ..Default::default()
        };
        match config.validate() {
            Err(ConfigError::Validation(errors)) => assert_eq!(errors.len(), 3),
            other => panic!("expected validation errors, got {:?}", other),
        }
    }

    #[test]
    fn test_reference_registry_under_each_policy() {
        let unchecked = CliConfig::default().registry().unwrap();
        assert_eq!(unchecked, BaselineRegistry::reference());

        let strict = CliConfig {
            weight_policy: WeightPolicyKind::Strict,
            ..Default::default()
        };
        assert_eq!(strict.registry().unwrap().len(), 11);

        let normalise = CliConfig {
            weight_policy: WeightPolicyKind::Normalise,
            ..Default::default()
        };
        assert_relative_eq!(
            normalise.registry().unwrap().weight_sum(),
            1.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_strict_policy_rejects_drifting_baseline() {
        let config = CliConfig {
            weight_policy: WeightPolicyKind::Strict,
            weight_tolerance: 1e-6,
            baseline: Some(BaselineConfig {
                base_price: 1000.0,
                reference_multiple: 20.0,
                sectors: vec![SectorRecord::new("Only", 0.9, 20.0).unwrap()],
            }),
            ..Default::default()
        };
        assert!(matches!(
            config.registry(),
            Err(ConfigurationError::WeightSum { .. })
        ));
    }

    #[test]
    fn test_malformed_sector_in_baseline() {
        let config = CliConfig::from_toml_str(
            r#"
            [baseline]
            base_price = 1000.0
            reference_multiple = 20.0

            [[baseline.sectors]]
            name = "Broken"
            weight = 1.0
            current_multiple = 0.0
            "#,
        )
        .unwrap();
        assert!(matches!(
            config.registry(),
            Err(ConfigurationError::NonPositiveMultiple { .. })
        ));
    }

    #[test]
    fn test_blank_sector_name_in_baseline() {
        let config = CliConfig::from_toml_str(
            r#"
            [baseline]
            base_price = 1000.0
            reference_multiple = 20.0

            [[baseline.sectors]]
            name = "  "
            weight = 1.0
            current_multiple = 15.0
            "#,
        )
        .unwrap();
        assert_eq!(
            config.registry().unwrap_err(),
            ConfigurationError::EmptySectorName
        );
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let path = Path::new("/nonexistent/index_target.toml");
        assert!(matches!(
            CliConfig::load(Some(path)),
            Err(ConfigError::FileError(_))
        ));
    }

    #[test]
    fn test_env_override() {
        std::env::set_var(ENV_SWEEP_START, "15");
        std::env::set_var(ENV_SWEEP_END, "30");
        let config = CliConfig::default().with_env_override();
        std::env::remove_var(ENV_SWEEP_START);
        std::env::remove_var(ENV_SWEEP_END);

        assert_eq!(config.unwrap().sweep_range(), 15..30);
    }

    #[test]
    fn test_parse_env_u32_rejects_garbage() {
        assert_eq!(parse_env_u32(ENV_SWEEP_END, " 44 ").unwrap(), 44);
        assert!(matches!(
            parse_env_u32(ENV_SWEEP_END, "forty"),
            Err(ConfigError::EnvError(_))
        ));
    }
}
