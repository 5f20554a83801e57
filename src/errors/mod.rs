// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod config;
mod stage;

pub use config::{ConfigError, ValidationError};
pub use stage::{ProduceError, ShortCircuitError, StageError, StoreError};
