// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod config;        // config + stage registry
pub mod engine;        // stream runners
pub mod errors;        // error handling
pub mod observability;
pub mod stages;        // user registration stages
pub mod traits;        // stage + pipeline abstractions
