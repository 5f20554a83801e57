// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! Every log line emitted by the engine, the stages and the config layer is
//! produced by a message struct from [`messages`]. Each message implements
//! `Display` for the human-readable line and [`messages::StructuredLog`] for
//! the structured `tracing` event and span, so field names stay consistent
//! across the crate and no log text is scattered through the code.
//!
//! # Usage
//!
//! ```rust
//! use stagewise::observability::messages::stage::ItemRejected;
//! use stagewise::observability::messages::StructuredLog;
//! use stagewise::errors::StageError;
//!
//! let error = StageError::validation("validate_email", "email address is invalid");
//! let msg = ItemRejected {
//!     stage: "validate_email",
//!     error: &error,
//! };
//!
//! msg.log();
//! ```
//!
//! Binaries install a `tracing-subscriber` `fmt` subscriber; see `src/main.rs`.

pub mod messages;
