// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::consts::{
    DEFAULT_BARRIER_CAPACITY, DEFAULT_DATA_BUFFER, DEFAULT_ERROR_BUFFER, DEFAULT_PRODUCER_TOPIC,
};
use crate::errors::ConfigError;
use crate::observability::messages::config::{ConfigLoaded, ConfigValidationFailed};
use crate::observability::messages::StructuredLog;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Main configuration structure for a pipeline runtime.
///
/// Replaces any process-wide settings: every runner and stage receives the
/// pieces it needs from this value at construction time.
///
/// # Fields
/// * `strategy` - How the streaming stages are wired
/// * `channels` - Channel capacities (optional, defaults to 64/64)
/// * `barrier` - Barrier runner options (optional)
/// * `producer` - Message producer options (optional)
/// * `stages` - Ordered streaming stage names
/// * `short_circuit` - Ordered function stage names (optional)
///
/// # Example
/// ```yaml
/// strategy: barrier
/// channels:
///   data_buffer: 64
///   error_buffer: 64
/// barrier:
///   buffer_capacity: 16
///   cancel_policy: discard_all
/// producer:
///   topic: users
/// stages: [validate_email, store, produce]
/// short_circuit: [validate, transform, sink]
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub strategy: Strategy,
    #[serde(default)]
    pub channels: ChannelConfig,
    #[serde(default)]
    pub barrier: BarrierConfig,
    #[serde(default)]
    pub producer: ProducerConfig,
    pub stages: Vec<String>,
    #[serde(default)]
    pub short_circuit: Vec<String>,
}

/// Wiring strategy for streaming stages.
///
/// # Variants
/// * `Chain` - All stages run concurrently, items pipelined through
/// * `Barrier` - Each stage fully drains before the next one starts
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Chain,
    Barrier,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Chain => "chain",
            Strategy::Barrier => "barrier",
        }
    }
}

/// Channel capacities used when wiring a run.
///
/// Bounded channels are the only backpressure mechanism: a stage blocks when
/// its downstream channel is full.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ChannelConfig {
    pub data_buffer: usize,
    pub error_buffer: usize,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            data_buffer: DEFAULT_DATA_BUFFER,
            error_buffer: DEFAULT_ERROR_BUFFER,
        }
    }
}

/// Barrier runner options.
///
/// `buffer_capacity` is a sizing hint for each phase's buffer, not a limit.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BarrierConfig {
    pub buffer_capacity: usize,
    pub cancel_policy: CancelPolicy,
}

impl Default for BarrierConfig {
    fn default() -> Self {
        Self {
            buffer_capacity: DEFAULT_BARRIER_CAPACITY,
            cancel_policy: CancelPolicy::default(),
        }
    }
}

/// What a barrier run hands back when cancelled mid-phase.
///
/// # Variants
/// * `DiscardAll` - Empty, closed output and error streams for the whole run
/// * `ReturnPartial` - The snapshot of the last fully completed phase (empty
///   when the first phase is interrupted), plus the errors of every completed
///   phase and those the interrupted phase recorded before the cancel
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CancelPolicy {
    #[default]
    DiscardAll,
    ReturnPartial,
}

impl CancelPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            CancelPolicy::DiscardAll => "discard_all",
            CancelPolicy::ReturnPartial => "return_partial",
        }
    }
}

/// Message producer options.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ProducerConfig {
    pub topic: String,
}

impl Default for ProducerConfig {
    fn default() -> Self {
        Self {
            topic: DEFAULT_PRODUCER_TOPIC.to_string(),
        }
    }
}

/// Load a config from a YAML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let cfg: Config = serde_yaml::from_str(&content)?;
    Ok(cfg)
}

/// Load and validate a config from a YAML file
///
/// Every validation problem is reported at once.
pub fn load_and_validate_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path_display = path.as_ref().display().to_string();
    let cfg = load_config(&path)?;

    if let Err(problems) = crate::config::validate_config(&cfg) {
        ConfigValidationFailed {
            path: &path_display,
            problem_count: problems.len(),
        }
        .log();
        return Err(ConfigError::Invalid(problems));
    }

    ConfigLoaded {
        path: &path_display,
        strategy: cfg.strategy.as_str(),
        stage_count: cfg.stages.len(),
    }
    .log();

    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(yaml: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();
        file
    }

    #[test]
    fn parse_basic_config() {
        let yaml = r#"
strategy: chain
stages: [validate_email, store, produce]
"#;

        let cfg: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.strategy, Strategy::Chain);
        assert_eq!(cfg.stages, vec!["validate_email", "store", "produce"]);
        assert!(cfg.short_circuit.is_empty());
    }

    #[test]
    fn test_defaults_match_constants() {
        let cfg: Config = serde_yaml::from_str("strategy: barrier\nstages: [store]\n").unwrap();

        assert_eq!(cfg.channels.data_buffer, 64);
        assert_eq!(cfg.channels.error_buffer, 64);
        assert_eq!(cfg.barrier.buffer_capacity, 16);
        assert_eq!(cfg.barrier.cancel_policy, CancelPolicy::DiscardAll);
        assert_eq!(cfg.producer.topic, "users");
    }

    #[test]
    fn test_partial_override_keeps_other_defaults() {
        let yaml = r#"
strategy: barrier
channels:
  data_buffer: 8
barrier:
  cancel_policy: return_partial
stages: [store]
"#;

        let cfg: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.channels.data_buffer, 8);
        assert_eq!(cfg.channels.error_buffer, 64);
        assert_eq!(cfg.barrier.buffer_capacity, 16);
        assert_eq!(cfg.barrier.cancel_policy, CancelPolicy::ReturnPartial);
    }

    #[test]
    fn test_unknown_strategy_is_a_parse_error() {
        let result: Result<Config, _> = serde_yaml::from_str("strategy: hybrid\nstages: []\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_and_validate_valid_config() {
        let file = write_config(
            r#"
strategy: chain
producer:
  topic: signups
stages: [validate_email, store, produce]
short_circuit: [validate, transform, sink]
"#,
        );

        let cfg = load_and_validate_config(file.path()).unwrap();
        assert_eq!(cfg.producer.topic, "signups");
        assert_eq!(cfg.short_circuit.len(), 3);
    }

    #[test]
    fn test_load_and_validate_reports_every_problem() {
        let file = write_config(
            r#"
strategy: chain
channels:
  data_buffer: 0
stages: [validate_email, teleport]
"#,
        );

        let err = load_and_validate_config(file.path()).unwrap_err();
        match err {
            ConfigError::Invalid(problems) => assert_eq!(problems.len(), 2),
            other => panic!("expected validation failure, got {other}"),
        }
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_config("does/not/exist.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("does/not/exist.yaml"));
    }
}
