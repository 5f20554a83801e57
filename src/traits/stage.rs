// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The stage contract consumed by every runner.
//!
//! Two flavours coexist:
//!
//! * [`Stage`] is a streaming stage. `run` returns immediately with an output
//!   stream and an error stream; a dedicated worker task owns both senders and
//!   drops them (closing the streams) once its input is exhausted or the run is
//!   cancelled. Closure is the only completion signal.
//! * [`FnStage`] transforms exactly one item and is only used by the
//!   short-circuit runner.
//!
//! Most streaming stages are per-item transforms, so [`ItemProcessor`] lets a
//! collaborator write just the per-item logic and have
//! [`StreamingStage`](crate::engine::StreamingStage) supply the worker loop.

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::engine::RunContext;
use crate::errors::StageError;

/// The pair of streams handed back by a streaming stage or a pipeline.
#[derive(Debug)]
pub struct StageStreams<T> {
    pub output: mpsc::Receiver<T>,
    pub errors: mpsc::Receiver<StageError>,
}

impl<T> StageStreams<T> {
    /// Both streams already closed and empty.
    pub fn closed() -> Self {
        Self {
            output: crate::engine::closed_stream(),
            errors: crate::engine::closed_stream(),
        }
    }

    pub fn into_parts(self) -> (mpsc::Receiver<T>, mpsc::Receiver<StageError>) {
        (self.output, self.errors)
    }
}

/// A streaming stage.
///
/// Implementations must not block in `run`: spawn the worker and return.
/// The worker is the sole writer of both returned streams.
pub trait Stage<T>: Send + Sync {
    fn name(&self) -> &str;

    fn run(&self, ctx: &RunContext, input: mpsc::Receiver<T>) -> StageStreams<T>;
}

/// Per-item logic for a streaming stage.
///
/// `Ok(Some(item))` forwards the item downstream, `Ok(None)` drops it silently
/// and `Err` reports it on the error stream without stopping the worker.
#[async_trait]
pub trait ItemProcessor<T: Send + 'static>: Send + Sync + 'static {
    fn name(&self) -> &str;

    async fn process(&self, ctx: &RunContext, item: T) -> Result<Option<T>, StageError>;
}

/// A single-item function stage used by the short-circuit runner.
#[async_trait]
pub trait FnStage<T: Send + 'static>: Send + Sync {
    fn name(&self) -> &str;

    async fn run(&self, ctx: &RunContext, item: T) -> Result<T, StageError>;
}

/// Adapts a plain closure into a [`FnStage`].
pub struct FnAdapter<F> {
    name: String,
    f: F,
}

/// Build a function stage from a closure.
///
/// ```
/// use stagewise::traits::{from_fn, FnStage};
/// use stagewise::errors::StageError;
///
/// let double = from_fn("double", |_ctx, n: u32| Ok::<_, StageError>(n * 2));
/// assert_eq!(FnStage::<u32>::name(&double), "double");
/// ```
pub fn from_fn<T, F>(name: impl Into<String>, f: F) -> FnAdapter<F>
where
    F: Fn(&RunContext, T) -> Result<T, StageError> + Send + Sync,
{
    FnAdapter {
        name: name.into(),
        f,
    }
}

#[async_trait]
impl<T, F> FnStage<T> for FnAdapter<F>
where
    T: Send + 'static,
    F: Fn(&RunContext, T) -> Result<T, StageError> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn run(&self, ctx: &RunContext, item: T) -> Result<T, StageError> {
        (self.f)(ctx, item)
    }
}
