// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// A single problem found while validating a pipeline configuration
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A channel or buffer capacity was configured as zero
    ZeroCapacity {
        /// Dotted path of the offending field
        field: &'static str,
    },
    /// A stage list that must not be empty was empty
    EmptyStageList {
        /// The config section holding the list
        section: &'static str,
    },
    /// A stage list references a stage the registry cannot build
    UnknownStage {
        /// The config section holding the list
        section: &'static str,
        /// The unknown stage name
        name: String,
    },
    /// The producer topic was blank
    EmptyTopic,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::ZeroCapacity { field } => {
                write!(f, "'{}' must be greater than zero", field)
            }
            ValidationError::EmptyStageList { section } => {
                write!(f, "'{}' must list at least one stage", section)
            }
            ValidationError::UnknownStage { section, name } => {
                write!(f, "'{}' references unknown stage '{}'", section, name)
            }
            ValidationError::EmptyTopic => write!(f, "'producer.topic' must not be empty"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Errors raised while loading a configuration or building a runtime from it.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("configuration validation failed:\n{}", join_problems(.0))]
    Invalid(Vec<ValidationError>),

    #[error("unknown stage '{name}' (available: {available})")]
    UnknownStage { name: String, available: String },
}

fn join_problems(problems: &[ValidationError]) -> String {
    problems
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
