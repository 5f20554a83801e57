// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::Instrument;

use crate::config::ChannelConfig;
use crate::engine::RunContext;
use crate::errors::StageError;
use crate::observability::messages::stage::{ItemRejected, StageWorkerStopped, StopReason};
use crate::observability::messages::StructuredLog;
use crate::traits::{ItemProcessor, Stage, StageStreams};

/// Streaming stage built from an [`ItemProcessor`].
///
/// Each call to `run` spawns one worker task that owns the output and error
/// senders. The worker:
///
/// - waits on cancellation and the next input item in the same `select!`
/// - races each `process` call against cancellation
/// - forwards `Ok(Some(item))` downstream, skips `Ok(None)`
/// - reports `Err` on the error stream and keeps consuming
/// - waits on cancellation while a downstream send is blocked
///
/// When the input closes or the run is cancelled the task ends, dropping both
/// senders, which closes the two streams exactly once. Items are processed in
/// arrival order. The task runs inside the caller's current span, so worker
/// events carry the pipeline's trace id.
pub struct StreamingStage<P> {
    processor: Arc<P>,
    channels: ChannelConfig,
}

impl<P> StreamingStage<P> {
    pub fn new(processor: P, channels: ChannelConfig) -> Self {
        Self {
            processor: Arc::new(processor),
            channels,
        }
    }
}

impl<T, P> Stage<T> for StreamingStage<P>
where
    T: Send + 'static,
    P: ItemProcessor<T>,
{
    fn name(&self) -> &str {
        self.processor.name()
    }

    fn run(&self, ctx: &RunContext, input: mpsc::Receiver<T>) -> StageStreams<T> {
        let (out_tx, output) = mpsc::channel(self.channels.data_buffer.max(1));
        let (err_tx, errors) = mpsc::channel(self.channels.error_buffer.max(1));

        tokio::spawn(run_worker(
            Arc::clone(&self.processor),
            ctx.clone(),
            input,
            out_tx,
            err_tx,
        )
        .instrument(tracing::Span::current()));

        StageStreams { output, errors }
    }
}

async fn run_worker<T, P>(
    processor: Arc<P>,
    ctx: RunContext,
    mut input: mpsc::Receiver<T>,
    out_tx: mpsc::Sender<T>,
    err_tx: mpsc::Sender<StageError>,
) where
    T: Send + 'static,
    P: ItemProcessor<T>,
{
    let mut forwarded = 0usize;
    let mut rejected = 0usize;

    let reason = loop {
        let item = tokio::select! {
            biased;
            _ = ctx.cancelled() => break StopReason::Cancelled,
            next = input.recv() => match next {
                Some(item) => item,
                None => break StopReason::InputExhausted,
            },
        };

        let result = tokio::select! {
            biased;
            _ = ctx.cancelled() => break StopReason::Cancelled,
            result = processor.process(&ctx, item) => result,
        };

        match result {
            Ok(Some(out)) => {
                tokio::select! {
                    biased;
                    _ = ctx.cancelled() => break StopReason::Cancelled,
                    sent = out_tx.send(out) => {
                        if sent.is_err() {
                            break StopReason::DownstreamClosed;
                        }
                        forwarded += 1;
                    }
                }
            }
            Ok(None) => {}
            Err(error) => {
                rejected += 1;
                ItemRejected {
                    stage: processor.name(),
                    error: &error,
                }
                .log();

                tokio::select! {
                    biased;
                    _ = ctx.cancelled() => break StopReason::Cancelled,
                    // a dropped error consumer loses the report but not the item stream
                    _ = err_tx.send(error) => {}
                }
            }
        }
    };

    StageWorkerStopped {
        stage: processor.name(),
        trace_id: ctx.trace_id(),
        reason,
        forwarded,
        rejected,
    }
    .log();
}
