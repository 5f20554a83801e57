// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;
use tokio_util::sync::{CancellationToken, WaitForCancellationFuture};
use uuid::Uuid;

/// Execution context shared by every task of one pipeline run.
///
/// Carries the single cancellation signal for the run and the trace id that
/// ends up on log events and produced messages. Cloning is cheap and every
/// clone observes the same cancellation.
#[derive(Debug, Clone)]
pub struct RunContext {
    token: CancellationToken,
    trace_id: Arc<str>,
}

impl RunContext {
    /// New root context with a fresh trace id.
    pub fn new() -> Self {
        Self::with_trace_id(Uuid::new_v4().to_string())
    }

    pub fn with_trace_id(trace_id: impl Into<String>) -> Self {
        Self {
            token: CancellationToken::new(),
            trace_id: Arc::from(trace_id.into()),
        }
    }

    /// Derive a context that is cancelled with this one but can also be
    /// cancelled on its own, e.g. to bound a single run with a timeout.
    pub fn child(&self) -> Self {
        Self {
            token: self.token.child_token(),
            trace_id: Arc::clone(&self.trace_id),
        }
    }

    pub fn trace_id(&self) -> &str {
        &self.trace_id
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Resolves once the run is cancelled.
    pub fn cancelled(&self) -> WaitForCancellationFuture<'_> {
        self.token.cancelled()
    }
}

impl Default for RunContext {
    fn default() -> Self {
        Self::new()
    }
}
