// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! # Organization
//!
//! * `engine` - runner lifecycle: wiring, barrier phases, cancellation, fan-in
//! * `stage` - stage worker events: rejected items, worker shutdown, side effects
//! * `config` - configuration loading and validation

use tracing::Span;

pub mod config;
pub mod engine;
pub mod stage;

/// A log message that knows how to emit itself with structured fields.
pub trait StructuredLog {
    /// Emit the message as a `tracing` event at its documented level.
    fn log(&self);

    /// Build a span carrying the message's fields.
    fn span(&self, name: &str) -> Span;
}
