// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for stage worker events.

use crate::errors::StageError;
use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A stage reported an item on its error stream.
///
/// # Log Level
/// `debug!` - the error itself reaches the caller through the merged stream
pub struct ItemRejected<'a> {
    pub stage: &'a str,
    pub error: &'a StageError,
}

impl Display for ItemRejected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Stage '{}' rejected item: {}", self.stage, self.error)
    }
}

impl StructuredLog for ItemRejected<'_> {
    fn log(&self) {
        tracing::debug!(
            stage = self.stage,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "item_rejected",
            span_name = name,
            stage = self.stage,
            error = %self.error,
        )
    }
}

/// Why a stage worker stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Input stream closed; every item was consumed.
    InputExhausted,
    /// The run context was cancelled.
    Cancelled,
    /// The downstream consumer dropped the output stream.
    DownstreamClosed,
}

impl Display for StopReason {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let text = match self {
            StopReason::InputExhausted => "input exhausted",
            StopReason::Cancelled => "cancelled",
            StopReason::DownstreamClosed => "downstream closed",
        };
        f.write_str(text)
    }
}

/// A stage worker stopped and closed its streams.
///
/// # Log Level
/// `debug!` - Diagnostic information
pub struct StageWorkerStopped<'a> {
    pub stage: &'a str,
    pub trace_id: &'a str,
    pub reason: StopReason,
    pub forwarded: usize,
    pub rejected: usize,
}

impl Display for StageWorkerStopped<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Stage '{}' worker stopped ({}): forwarded={}, rejected={}",
            self.stage, self.reason, self.forwarded, self.rejected
        )
    }
}

impl StructuredLog for StageWorkerStopped<'_> {
    fn log(&self) {
        tracing::debug!(
            stage = self.stage,
            trace_id = self.trace_id,
            reason = %self.reason,
            forwarded = self.forwarded,
            rejected = self.rejected,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "stage_worker",
            span_name = name,
            stage = self.stage,
            trace_id = self.trace_id,
        )
    }
}

/// A user record was stored.
///
/// # Log Level
/// `info!` - Side effect performed
pub struct UserStored<'a> {
    pub stage: &'a str,
    pub email: &'a str,
}

impl Display for UserStored<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Stage '{}' stored user <{}>", self.stage, self.email)
    }
}

impl StructuredLog for UserStored<'_> {
    fn log(&self) {
        tracing::info!(stage = self.stage, email = self.email, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!("user_stored", span_name = name, stage = self.stage)
    }
}

/// A message was handed to the broker.
///
/// # Log Level
/// `info!` - Side effect performed
pub struct MessageProduced<'a> {
    pub stage: &'a str,
    pub topic: &'a str,
    pub trace_id: &'a str,
    pub bytes: usize,
}

impl Display for MessageProduced<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Stage '{}' produced {} bytes to topic '{}'",
            self.stage, self.bytes, self.topic
        )
    }
}

impl StructuredLog for MessageProduced<'_> {
    fn log(&self) {
        tracing::info!(
            stage = self.stage,
            topic = self.topic,
            trace_id = self.trace_id,
            bytes = self.bytes,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "message_produced",
            span_name = name,
            stage = self.stage,
            topic = self.topic,
        )
    }
}
