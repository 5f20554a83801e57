// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Error types that travel on pipeline error streams.
//!
//! `StageError` is the value written to a stage's error stream and forwarded
//! through the merged stream. It is `Clone + PartialEq` so callers can collect,
//! compare and re-emit errors without caring which task produced them.

use std::fmt;
use thiserror::Error;

/// Failure reported by a message broker collaborator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProduceError {
    /// The broker could not accept the message.
    #[error("broker unavailable: {0}")]
    Unavailable(String),

    /// The item could not be encoded into a message payload.
    #[error("failed to encode payload: {0}")]
    Encode(String),

    /// The run was cancelled before the message was handed to the broker.
    #[error("produce cancelled")]
    Cancelled,
}

/// Failure reported by a storage collaborator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("duplicate entry: {0}")]
    Duplicate(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// An error emitted by a stage, tagged with the stage's name.
///
/// Per-item variants (`Validation`, `Storage`, `Produce`) are non-fatal: the
/// stage keeps consuming after emitting them. `ChannelClosed` and `Cancelled`
/// are terminal for the execution that observed them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StageError {
    /// The item was rejected by a validation stage.
    #[error("{message}")]
    Validation { stage: String, message: String },

    /// The item could not be persisted.
    #[error("{stage}: storage failed: {source}")]
    Storage {
        stage: String,
        #[source]
        source: StoreError,
    },

    /// The item could not be handed to the message broker.
    #[error("{stage}: produce failed: {source}")]
    Produce {
        stage: String,
        #[source]
        source: ProduceError,
    },

    /// A stream the stage depended on closed before it was expected to.
    #[error("{stage}: channel closed unexpectedly")]
    ChannelClosed { stage: String },

    /// The stage gave up because the run was cancelled.
    #[error("{stage}: cancelled")]
    Cancelled { stage: String },
}

impl StageError {
    pub fn validation(stage: impl Into<String>, message: impl Into<String>) -> Self {
        StageError::Validation {
            stage: stage.into(),
            message: message.into(),
        }
    }

    pub fn cancelled(stage: impl Into<String>) -> Self {
        StageError::Cancelled {
            stage: stage.into(),
        }
    }

    /// Name of the stage that produced this error.
    pub fn stage(&self) -> &str {
        match self {
            StageError::Validation { stage, .. }
            | StageError::Storage { stage, .. }
            | StageError::Produce { stage, .. }
            | StageError::ChannelClosed { stage }
            | StageError::Cancelled { stage } => stage,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(
            self,
            StageError::Cancelled { .. }
                | StageError::Produce {
                    source: ProduceError::Cancelled,
                    ..
                }
        )
    }

    /// Whether the error ends the execution that observed it rather than a single item.
    pub fn is_terminal(&self) -> bool {
        matches!(self, StageError::ChannelClosed { .. }) || self.is_cancelled()
    }
}

/// Returned by the short-circuit runner when a function stage fails.
///
/// `last_good` is the value produced by the last stage that succeeded (or the
/// original input when the first stage fails).
#[derive(Debug)]
pub struct ShortCircuitError<T> {
    pub last_good: T,
    pub error: StageError,
}

impl<T> ShortCircuitError<T> {
    pub fn into_parts(self) -> (T, StageError) {
        (self.last_good, self.error)
    }
}

impl<T> fmt::Display for ShortCircuitError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pipeline stopped at stage '{}': {}",
            self.error.stage(),
            self.error
        )
    }
}

impl<T: fmt::Debug> std::error::Error for ShortCircuitError<T> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}
