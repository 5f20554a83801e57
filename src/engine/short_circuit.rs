// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::engine::RunContext;
use crate::errors::ShortCircuitError;
use crate::observability::messages::engine::ShortCircuitStopped;
use crate::observability::messages::StructuredLog;
use crate::traits::FnStage;

/// Fail-fast sequential chain of function stages over a single item.
///
/// Each stage receives the value produced by the previous one. The first
/// error stops the chain: later stages are never invoked and the caller gets
/// the last successfully produced value back with the error. No tasks are
/// spawned; honoring cancellation is up to each stage.
pub struct ShortCircuitRunner<T: Send + 'static> {
    stages: Vec<Arc<dyn FnStage<T>>>,
}

impl<T: Clone + Send + 'static> ShortCircuitRunner<T> {
    pub fn new(stages: Vec<Arc<dyn FnStage<T>>>) -> Self {
        Self { stages }
    }

    pub fn stage_names(&self) -> Vec<String> {
        self.stages.iter().map(|s| s.name().to_string()).collect()
    }

    pub async fn run(&self, ctx: &RunContext, item: T) -> Result<T, ShortCircuitError<T>> {
        let mut current = item;

        for (position, stage) in self.stages.iter().enumerate() {
            // the stage takes ownership, so keep the last good value for the error path
            match stage.run(ctx, current.clone()).await {
                Ok(next) => current = next,
                Err(error) => {
                    ShortCircuitStopped {
                        stage: stage.name(),
                        position,
                        skipped: self.stages.len() - position - 1,
                        error: &error,
                    }
                    .log();
                    return Err(ShortCircuitError {
                        last_good: current,
                        error,
                    });
                }
            }
        }

        Ok(current)
    }
}
