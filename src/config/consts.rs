// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

/// Default capacity of item channels between streaming stages
pub const DEFAULT_DATA_BUFFER: usize = 64;
/// Default capacity of per-stage error channels and the merged error stream
pub const DEFAULT_ERROR_BUFFER: usize = 64;
/// Default initial capacity of a barrier phase's materialization buffer
pub const DEFAULT_BARRIER_CAPACITY: usize = 16;
/// Default topic for the produce stage
pub const DEFAULT_PRODUCER_TOPIC: &str = "users";

/// Streaming stage names understood by the stage registry
pub const STAGE_VALIDATE_EMAIL: &str = "validate_email";
pub const STAGE_STORE: &str = "store";
pub const STAGE_PRODUCE: &str = "produce";

/// Function stage names understood by the stage registry
pub const FN_VALIDATE: &str = "validate";
pub const FN_TRANSFORM: &str = "transform";
pub const FN_SINK: &str = "sink";
