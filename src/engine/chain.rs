// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::config::ChannelConfig;
use crate::engine::{merge_errors, RunContext};
use crate::observability::messages::engine::{PipelineStarted, StageWired};
use crate::observability::messages::StructuredLog;
use crate::traits::{Pipeline, Stage, StageStreams};

pub const CHAIN_STRATEGY: &str = "chain";

/// Streaming pipeline: every stage runs concurrently and items flow through
/// as soon as the previous stage emits them.
///
/// Wiring is non-blocking; all work happens in the stage workers. Each
/// stage's output becomes the next stage's input, and every stage's error
/// stream is fed to [`merge_errors`]. Cancelling the context stops every
/// worker; the caller then sees streams that close early without an error,
/// which is a valid partial completion.
pub struct ChainRunner<T> {
    stages: Vec<Arc<dyn Stage<T>>>,
    channels: ChannelConfig,
}

impl<T: Send + 'static> ChainRunner<T> {
    pub fn new(channels: ChannelConfig, stages: Vec<Arc<dyn Stage<T>>>) -> Self {
        Self { stages, channels }
    }

    /// Wire the stages over `input` and return the final output and merged errors.
    ///
    /// With no stages the input stream is handed back unchanged. Workers and
    /// error forwarders run inside the run's `pipeline` span.
    pub fn chain(&self, ctx: &RunContext, input: mpsc::Receiver<T>) -> StageStreams<T> {
        let start_msg = PipelineStarted {
            strategy: CHAIN_STRATEGY,
            trace_id: ctx.trace_id(),
            stage_count: self.stages.len(),
        };
        let span = start_msg.span("pipeline_run");
        let _guard = span.enter();
        start_msg.log();

        let mut current = input;
        let mut errors = Vec::with_capacity(self.stages.len());

        for (position, stage) in self.stages.iter().enumerate() {
            let StageStreams {
                output,
                errors: stage_errors,
            } = stage.run(ctx, current);
            StageWired {
                strategy: CHAIN_STRATEGY,
                stage: stage.name(),
                position,
            }
            .log();

            current = output;
            errors.push(stage_errors);
        }

        StageStreams {
            output: current,
            errors: merge_errors(errors, self.channels.error_buffer),
        }
    }
}

#[async_trait]
impl<T: Send + 'static> Pipeline<T> for ChainRunner<T> {
    fn strategy(&self) -> &'static str {
        CHAIN_STRATEGY
    }

    fn stage_names(&self) -> Vec<String> {
        self.stages.iter().map(|s| s.name().to_string()).collect()
    }

    async fn execute(&self, ctx: &RunContext, input: mpsc::Receiver<T>) -> StageStreams<T> {
        self.chain(ctx, input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{drain, materialize, StreamingStage};
    use crate::stages::stub::{enable_spans, PassThrough, RejectOver, SeenSpans, SpanRecorder};
    use std::time::Duration;
    use tokio::time::timeout;

    fn pass_through(name: &str) -> Arc<dyn Stage<u32>> {
        Arc::new(StreamingStage::new(
            PassThrough::new(name),
            ChannelConfig::default(),
        ))
    }

    #[tokio::test]
    async fn test_pass_through_chain_keeps_every_item() {
        let runner = ChainRunner::new(
            ChannelConfig::default(),
            vec![pass_through("a"), pass_through("b"), pass_through("c")],
        );
        let ctx = RunContext::new();
        let items: Vec<u32> = (0..500).collect();

        let drained = drain(&ctx, runner.chain(&ctx, materialize(items))).await;

        assert_eq!(drained.items.len(), 500);
        assert!(drained.errors.is_empty());
        assert!(!drained.cancelled);
    }

    #[tokio::test]
    async fn test_errors_from_every_stage_are_merged() {
        let runner = ChainRunner::new(
            ChannelConfig::default(),
            vec![
                Arc::new(StreamingStage::new(
                    RejectOver::new("first", 10),
                    ChannelConfig::default(),
                )) as Arc<dyn Stage<u32>>,
                Arc::new(StreamingStage::new(
                    RejectOver::new("second", 5),
                    ChannelConfig::default(),
                )) as Arc<dyn Stage<u32>>,
            ],
        );
        let ctx = RunContext::new();

        let drained = drain(&ctx, runner.chain(&ctx, materialize(vec![1, 7, 20, 3]))).await;

        let mut items = drained.items;
        items.sort();
        assert_eq!(items, vec![1, 3]);
        let mut stages: Vec<_> = drained.errors.iter().map(|e| e.stage().to_string()).collect();
        stages.sort();
        assert_eq!(stages, vec!["first", "second"]);
    }

    #[tokio::test]
    async fn test_cancel_before_input_closes_everything_empty() {
        let runner = ChainRunner::new(
            ChannelConfig::default(),
            vec![pass_through("a"), pass_through("b")],
        );
        let ctx = RunContext::new();
        let (tx, rx) = mpsc::channel::<u32>(8);
        ctx.cancel();

        let StageStreams {
            mut output,
            mut errors,
        } = runner.chain(&ctx, rx);

        let out = timeout(Duration::from_secs(1), output.recv()).await.unwrap();
        let err = timeout(Duration::from_secs(1), errors.recv()).await.unwrap();
        assert_eq!(out, None);
        assert!(err.is_none());
        drop(tx);
    }

    #[tokio::test]
    async fn test_empty_chain_returns_input() {
        let runner: ChainRunner<u32> = ChainRunner::new(ChannelConfig::default(), Vec::new());
        let ctx = RunContext::new();

        let drained = drain(&ctx, runner.chain(&ctx, materialize(vec![4, 5]))).await;

        assert_eq!(drained.items, vec![4, 5]);
        assert!(drained.errors.is_empty());
    }

    #[tokio::test]
    async fn test_items_flow_before_input_closes() {
        let runner = ChainRunner::new(
            ChannelConfig::default(),
            vec![pass_through("a"), pass_through("b")],
        );
        let ctx = RunContext::new();
        let (tx, rx) = mpsc::channel(4);

        let mut streams = runner.chain(&ctx, rx);
        tx.send(42u32).await.unwrap();

        // the input is still open, yet the item already reached the end
        let first = timeout(Duration::from_secs(1), streams.output.recv())
            .await
            .unwrap();
        assert_eq!(first, Some(42));
        drop(tx);
        assert_eq!(streams.output.recv().await, None);
    }

    #[tokio::test]
    async fn test_stage_workers_run_in_pipeline_span() {
        let _spans = enable_spans();
        let seen = Arc::new(SeenSpans::default());
        let runner = ChainRunner::new(
            ChannelConfig::default(),
            vec![
                pass_through("a"),
                Arc::new(StreamingStage::new(
                    SpanRecorder::new("recorder", Arc::clone(&seen)),
                    ChannelConfig::default(),
                )) as Arc<dyn Stage<u32>>,
            ],
        );
        let ctx = RunContext::new();

        let drained = drain(&ctx, runner.chain(&ctx, materialize(vec![1, 2]))).await;

        assert_eq!(drained.items.len(), 2);
        assert_eq!(seen.names(), vec![Some("pipeline"), Some("pipeline")]);
    }
}
