// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use tracing::Instrument;

use crate::config::{BarrierConfig, CancelPolicy, ChannelConfig};
use crate::engine::{materialize, merge_errors, RunContext};
use crate::errors::StageError;
use crate::observability::messages::engine::{
    BarrierCancelled, BarrierCompleted, BarrierPhaseCompleted, PipelineStarted, StageWired,
};
use crate::observability::messages::StructuredLog;
use crate::traits::{Pipeline, Stage, StageStreams};

pub const BARRIER_STRATEGY: &str = "barrier";

/// Barrier pipeline: a full-drain synchronization point between every pair
/// of adjacent stages.
///
/// Stage `i + 1` sees no item until stage `i` has closed both its output and
/// its error stream. Each phase:
///
/// 1. runs the stage over the current input
/// 2. drains output into a buffer and records errors, until both streams close
/// 3. materializes the buffer into a closed stream that feeds the next stage,
///    and the recorded errors into a closed error stream for the final merge
///
/// The buffer starts at `buffer_capacity` and grows as needed. Nothing is
/// spilled, so a phase holds its whole output in memory.
///
/// If the context is cancelled mid-phase the configured [`CancelPolicy`]
/// decides what the caller gets back. Under `ReturnPartial` that is the
/// snapshot of the last fully completed phase (empty if none completed) plus
/// every error recorded so far, including the interrupted phase's.
pub struct BarrierRunner<T> {
    stages: Vec<Arc<dyn Stage<T>>>,
    config: BarrierConfig,
    channels: ChannelConfig,
}

enum Phase<T> {
    Drained {
        items: Vec<T>,
        errors: Vec<StageError>,
    },
    Cancelled {
        items: Vec<T>,
        errors: Vec<StageError>,
    },
}

impl<T: Clone + Send + 'static> BarrierRunner<T> {
    pub fn new(
        config: BarrierConfig,
        channels: ChannelConfig,
        stages: Vec<Arc<dyn Stage<T>>>,
    ) -> Self {
        Self {
            stages,
            config,
            channels,
        }
    }

    /// Run every phase to completion and return the last phase's snapshot
    /// along with the merged errors of all phases.
    pub async fn run(&self, ctx: &RunContext, input: mpsc::Receiver<T>) -> StageStreams<T> {
        let start_msg = PipelineStarted {
            strategy: BARRIER_STRATEGY,
            trace_id: ctx.trace_id(),
            stage_count: self.stages.len(),
        };
        let span = start_msg.span("pipeline_run");
        span.in_scope(|| start_msg.log());

        self.run_phases(ctx, input).instrument(span).await
    }

    async fn run_phases(&self, ctx: &RunContext, input: mpsc::Receiver<T>) -> StageStreams<T> {
        let started = Instant::now();
        let keep_snapshots = self.config.cancel_policy == CancelPolicy::ReturnPartial;

        let mut current = input;
        let mut phase_errors = Vec::with_capacity(self.stages.len());
        let mut final_items = 0usize;
        let mut last_snapshot: Vec<T> = Vec::new();

        for (phase, stage) in self.stages.iter().enumerate() {
            let phase_started = Instant::now();
            StageWired {
                strategy: BARRIER_STRATEGY,
                stage: stage.name(),
                position: phase,
            }
            .log();

            let streams = stage.run(ctx, current);
            match self.drain_phase(ctx, streams).await {
                Phase::Drained { items, errors } => {
                    BarrierPhaseCompleted {
                        stage: stage.name(),
                        phase,
                        items: items.len(),
                        errors: errors.len(),
                        duration: phase_started.elapsed(),
                    }
                    .log();

                    final_items = items.len();
                    if keep_snapshots && phase + 1 < self.stages.len() {
                        last_snapshot = items.clone();
                    }
                    current = materialize(items);
                    phase_errors.push(materialize(errors));
                }
                Phase::Cancelled { items, errors } => {
                    BarrierCancelled {
                        stage: stage.name(),
                        phase,
                        policy: self.config.cancel_policy.as_str(),
                        buffered_items: items.len(),
                        buffered_errors: errors.len(),
                    }
                    .log();

                    return match self.config.cancel_policy {
                        CancelPolicy::DiscardAll => StageStreams::closed(),
                        CancelPolicy::ReturnPartial => {
                            phase_errors.push(materialize(errors));
                            StageStreams {
                                output: materialize(last_snapshot),
                                errors: merge_errors(phase_errors, self.channels.error_buffer),
                            }
                        }
                    };
                }
            }
        }

        BarrierCompleted {
            stage_count: self.stages.len(),
            items: final_items,
            duration: started.elapsed(),
        }
        .log();

        StageStreams {
            output: current,
            errors: merge_errors(phase_errors, self.channels.error_buffer),
        }
    }

    async fn drain_phase(&self, ctx: &RunContext, streams: StageStreams<T>) -> Phase<T> {
        let StageStreams {
            mut output,
            errors: mut error_stream,
        } = streams;

        let mut items = Vec::with_capacity(self.config.buffer_capacity);
        let mut errors = Vec::new();
        let mut output_open = true;
        let mut errors_open = true;

        while output_open || errors_open {
            tokio::select! {
                biased;
                _ = ctx.cancelled() => return Phase::Cancelled { items, errors },
                item = output.recv(), if output_open => match item {
                    Some(item) => items.push(item),
                    None => output_open = false,
                },
                error = error_stream.recv(), if errors_open => match error {
                    Some(error) => errors.push(error),
                    None => errors_open = false,
                },
            }
        }

        Phase::Drained { items, errors }
    }
}

#[async_trait]
impl<T: Clone + Send + 'static> Pipeline<T> for BarrierRunner<T> {
    fn strategy(&self) -> &'static str {
        BARRIER_STRATEGY
    }

    fn stage_names(&self) -> Vec<String> {
        self.stages.iter().map(|s| s.name().to_string()).collect()
    }

    async fn execute(&self, ctx: &RunContext, input: mpsc::Receiver<T>) -> StageStreams<T> {
        self.run(ctx, input).await
    }
}
