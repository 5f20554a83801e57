// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::config::{Config, Strategy};
use crate::engine::barrier::BarrierRunner;
use crate::engine::chain::ChainRunner;
use crate::traits::{Pipeline, Stage};

/// Factory for creating stream pipelines from configuration
pub struct PipelineFactory;

impl PipelineFactory {
    /// Wire `stages` with the runner selected by the configuration strategy
    pub fn from_config<T: Clone + Send + 'static>(
        cfg: &Config,
        stages: Vec<Arc<dyn Stage<T>>>,
    ) -> Box<dyn Pipeline<T>> {
        match cfg.strategy {
            Strategy::Chain => Box::new(ChainRunner::new(cfg.channels.clone(), stages)),
            Strategy::Barrier => Box::new(BarrierRunner::new(
                cfg.barrier.clone(),
                cfg.channels.clone(),
                stages,
            )),
        }
    }
}
