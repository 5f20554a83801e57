// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for runner lifecycle events.
//!
//! This module contains message types for logging events related to:
//! * Pipeline wiring (chain and barrier)
//! * Barrier phase materialization and cancellation
//! * Error fan-in completion
//! * Short-circuit stops

use crate::errors::StageError;
use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use std::time::Duration;
use tracing::Span;

/// Pipeline run started.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use stagewise::observability::messages::engine::PipelineStarted;
///
/// let msg = PipelineStarted {
///     strategy: "chain",
///     trace_id: "3f1c",
///     stage_count: 3,
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct PipelineStarted<'a> {
    pub strategy: &'a str,
    pub trace_id: &'a str,
    pub stage_count: usize,
}

impl Display for PipelineStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Starting {} pipeline with {} stages",
            self.strategy, self.stage_count
        )
    }
}

impl StructuredLog for PipelineStarted<'_> {
    fn log(&self) {
        tracing::info!(
            strategy = self.strategy,
            trace_id = self.trace_id,
            stage_count = self.stage_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "pipeline",
            span_name = name,
            strategy = self.strategy,
            trace_id = self.trace_id,
            stage_count = self.stage_count,
        )
    }
}

/// A stage was wired into a pipeline.
///
/// # Log Level
/// `debug!` - Diagnostic information
pub struct StageWired<'a> {
    pub strategy: &'a str,
    pub stage: &'a str,
    pub position: usize,
}

impl Display for StageWired<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Wired stage '{}' at position {} of {} pipeline",
            self.stage, self.position, self.strategy
        )
    }
}

impl StructuredLog for StageWired<'_> {
    fn log(&self) {
        tracing::debug!(
            strategy = self.strategy,
            stage = self.stage,
            position = self.position,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "stage_wired",
            span_name = name,
            strategy = self.strategy,
            stage = self.stage,
            position = self.position,
        )
    }
}

/// A barrier phase drained completely and its output was materialized.
///
/// # Log Level
/// `debug!` - Diagnostic information
pub struct BarrierPhaseCompleted<'a> {
    pub stage: &'a str,
    pub phase: usize,
    pub items: usize,
    pub errors: usize,
    pub duration: Duration,
}

impl Display for BarrierPhaseCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Barrier phase {} ('{}') drained: {} items, {} errors in {:?}",
            self.phase, self.stage, self.items, self.errors, self.duration
        )
    }
}

impl StructuredLog for BarrierPhaseCompleted<'_> {
    fn log(&self) {
        tracing::debug!(
            stage = self.stage,
            phase = self.phase,
            items = self.items,
            errors = self.errors,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "barrier_phase",
            span_name = name,
            stage = self.stage,
            phase = self.phase,
        )
    }
}

/// A barrier run was cancelled while draining a phase.
///
/// # Log Level
/// `warn!` - Run abandoned before completion
pub struct BarrierCancelled<'a> {
    pub stage: &'a str,
    pub phase: usize,
    pub policy: &'a str,
    pub buffered_items: usize,
    pub buffered_errors: usize,
}

impl Display for BarrierCancelled<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Barrier run cancelled during phase {} ('{}'), applying {} to {} buffered items and {} errors",
            self.phase, self.stage, self.policy, self.buffered_items, self.buffered_errors
        )
    }
}

impl StructuredLog for BarrierCancelled<'_> {
    fn log(&self) {
        tracing::warn!(
            stage = self.stage,
            phase = self.phase,
            policy = self.policy,
            buffered_items = self.buffered_items,
            buffered_errors = self.buffered_errors,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "barrier_cancelled",
            span_name = name,
            stage = self.stage,
            phase = self.phase,
        )
    }
}

/// Barrier run finished every phase.
///
/// # Log Level
/// `info!` - Important operational event
pub struct BarrierCompleted {
    pub stage_count: usize,
    pub items: usize,
    pub duration: Duration,
}

impl Display for BarrierCompleted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Barrier pipeline completed {} phases with {} items in {:?}",
            self.stage_count, self.items, self.duration
        )
    }
}

impl StructuredLog for BarrierCompleted {
    fn log(&self) {
        tracing::info!(
            stage_count = self.stage_count,
            items = self.items,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "barrier_completed",
            span_name = name,
            stage_count = self.stage_count,
            items = self.items,
        )
    }
}

/// All error forwarders finished and the merged stream was closed.
///
/// # Log Level
/// `debug!` - Diagnostic information
pub struct ErrorStreamsMerged {
    pub sources: usize,
    pub forwarded: usize,
}

impl Display for ErrorStreamsMerged {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Merged error stream closed: {} errors from {} sources",
            self.forwarded, self.sources
        )
    }
}

impl StructuredLog for ErrorStreamsMerged {
    fn log(&self) {
        tracing::debug!(
            sources = self.sources,
            forwarded = self.forwarded,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "errors_merged",
            span_name = name,
            sources = self.sources,
        )
    }
}

/// An error forwarding task ended abnormally; its source's remaining errors are lost.
///
/// # Log Level
/// `error!` - A reported error never reached the merged stream
///
/// # Example
/// ```
/// use stagewise::observability::messages::engine::ForwarderFailed;
///
/// let cause = std::io::Error::other("task panicked");
/// let msg = ForwarderFailed {
///     sources: 3,
///     error: &cause,
/// };
///
/// assert_eq!(
///     msg.to_string(),
///     "Error forwarder failed (1 of 3 sources lost): task panicked"
/// );
/// ```
pub struct ForwarderFailed<'a> {
    pub sources: usize,
    pub error: &'a dyn std::error::Error,
}

impl Display for ForwarderFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Error forwarder failed (1 of {} sources lost): {}",
            self.sources, self.error
        )
    }
}

impl StructuredLog for ForwarderFailed<'_> {
    fn log(&self) {
        tracing::error!(
            sources = self.sources,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "forwarder_failed",
            span_name = name,
            sources = self.sources,
        )
    }
}

/// A short-circuit chain stopped at a failing stage.
///
/// # Log Level
/// `warn!` - Item rejected, remaining stages skipped
pub struct ShortCircuitStopped<'a> {
    pub stage: &'a str,
    pub position: usize,
    pub skipped: usize,
    pub error: &'a StageError,
}

impl Display for ShortCircuitStopped<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Short-circuit stopped at stage '{}' (position {}), skipping {} stages: {}",
            self.stage, self.position, self.skipped, self.error
        )
    }
}

impl StructuredLog for ShortCircuitStopped<'_> {
    fn log(&self) {
        tracing::warn!(
            stage = self.stage,
            position = self.position,
            skipped = self.skipped,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "short_circuit_stopped",
            span_name = name,
            stage = self.stage,
            error = %self.error,
        )
    }
}
