// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::engine::RunContext;
use crate::traits::stage::StageStreams;

/// A stream pipeline: wires a fixed list of streaming stages over an input stream.
///
/// Implemented by both the chain and the barrier runner so callers can pick a
/// strategy from configuration and drain the result the same way.
#[async_trait]
pub trait Pipeline<T: Send + 'static>: Send + Sync {
    /// Short name of the wiring strategy, used in logs.
    fn strategy(&self) -> &'static str;

    /// Names of the wired stages in order.
    fn stage_names(&self) -> Vec<String>;

    /// Run the pipeline over `input`.
    ///
    /// The caller must drain both returned streams to completion, or abandon
    /// them after cancelling `ctx`.
    async fn execute(&self, ctx: &RunContext, input: mpsc::Receiver<T>) -> StageStreams<T>;
}
