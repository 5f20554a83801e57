// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::config::registry::StageRegistry;
use crate::config::Config;
use crate::engine::{PipelineFactory, ShortCircuitRunner};
use crate::errors::ConfigError;
use crate::stages::{MessageProducer, UserData, UserStore};
use crate::traits::Pipeline;

/// A ready-to-run registration runtime.
pub struct Runtime {
    /// Streaming pipeline wired by the configured strategy
    pub pipeline: Box<dyn Pipeline<UserData>>,
    /// Function stages run one item at a time, stopping at the first failure
    pub short_circuit: ShortCircuitRunner<UserData>,
}

/// Runtime builder: resolves stage names and picks the pipeline strategy.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use stagewise::config::{Config, RuntimeBuilder};
/// use stagewise::stages::{InMemoryProducer, InMemoryUserStore};
///
/// let cfg: Config = serde_yaml::from_str(
///     "strategy: chain\nstages: [validate_email, store]\nshort_circuit: [validate]\n",
/// ).unwrap();
///
/// let runtime = RuntimeBuilder::from_config(
///     &cfg,
///     Arc::new(InMemoryProducer::new()),
///     Arc::new(InMemoryUserStore::new()),
/// ).unwrap();
///
/// assert_eq!(runtime.pipeline.strategy(), "chain");
/// assert_eq!(runtime.pipeline.stage_names(), vec!["validate_email", "store"]);
/// ```
pub struct RuntimeBuilder;

impl RuntimeBuilder {
    /// Build a runtime from configuration and the external collaborators.
    ///
    /// Fails with [`ConfigError::UnknownStage`] when a name cannot be resolved.
    pub fn from_config(
        cfg: &Config,
        producer: Arc<dyn MessageProducer>,
        store: Arc<dyn UserStore>,
    ) -> Result<Runtime, ConfigError> {
        let registry = StageRegistry::new(
            cfg.channels.clone(),
            cfg.producer.topic.clone(),
            producer,
            store,
        );

        let stages = registry.build_stages(&cfg.stages)?;
        let fn_stages = registry.build_fn_stages(&cfg.short_circuit)?;

        Ok(Runtime {
            pipeline: PipelineFactory::from_config(cfg, stages),
            short_circuit: ShortCircuitRunner::new(fn_stages),
        })
    }
}
