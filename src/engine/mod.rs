// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod barrier;
pub mod chain;
pub mod context;
pub mod drain;
pub mod factory;
pub mod merger;
pub mod short_circuit;
mod streams;
pub mod worker;

pub use barrier::BarrierRunner;
pub use chain::ChainRunner;
pub use context::RunContext;
pub use drain::{drain, Drained};
pub use factory::PipelineFactory;
pub use merger::merge_errors;
pub use short_circuit::ShortCircuitRunner;
pub use streams::{closed_stream, materialize};
pub use worker::StreamingStage;
