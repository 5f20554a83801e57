// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Configuration validation.
//!
//! Checks run in a fixed order and all problems are collected rather than
//! stopping at the first one:
//!
//! 1. **Capacities**: every channel capacity and the barrier buffer hint are non-zero
//! 2. **Stage lists**: the streaming list is non-empty and every name is known
//! 3. **Producer**: the topic is not blank
//!
//! Duplicate stage names are legal; names exist for diagnostics only.

use crate::config::registry::StageRegistry;
use crate::config::Config;
use crate::errors::ValidationError;

/// Validate a configuration, returning every problem found.
pub fn validate_config(cfg: &Config) -> Result<(), Vec<ValidationError>> {
    let mut problems = Vec::new();

    validate_capacities(cfg, &mut problems);
    validate_stage_names(cfg, &mut problems);

    if cfg.producer.topic.trim().is_empty() {
        problems.push(ValidationError::EmptyTopic);
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(problems)
    }
}

fn validate_capacities(cfg: &Config, problems: &mut Vec<ValidationError>) {
    let capacities = [
        ("channels.data_buffer", cfg.channels.data_buffer),
        ("channels.error_buffer", cfg.channels.error_buffer),
        ("barrier.buffer_capacity", cfg.barrier.buffer_capacity),
    ];

    for (field, value) in capacities {
        if value == 0 {
            problems.push(ValidationError::ZeroCapacity { field });
        }
    }
}

fn validate_stage_names(cfg: &Config, problems: &mut Vec<ValidationError>) {
    if cfg.stages.is_empty() {
        problems.push(ValidationError::EmptyStageList { section: "stages" });
    }

    for name in &cfg.stages {
        if !StageRegistry::is_stage_available(name) {
            problems.push(ValidationError::UnknownStage {
                section: "stages",
                name: name.clone(),
            });
        }
    }

    for name in &cfg.short_circuit {
        if !StageRegistry::is_fn_stage_available(name) {
            problems.push(ValidationError::UnknownStage {
                section: "short_circuit",
                name: name.clone(),
            });
        }
    }
}
