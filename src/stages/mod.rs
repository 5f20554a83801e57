// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! User registration stages.
//!
//! Streaming stages (`ValidateEmailStage`, `StoreStage`, `ProduceStage`) are
//! [`ItemProcessor`](crate::traits::ItemProcessor) implementations wrapped in
//! [`StreamingStage`](crate::engine::StreamingStage) by the stage registry.
//! The function stages in [`functions`] serve the short-circuit runner.

mod functions;
mod model;
mod produce;
mod producer;
mod store;
mod validate_email;

#[cfg(test)]
pub mod stub;

pub use functions::{SinkFn, TransformFn, ValidationFn};
pub use model::UserData;
pub use produce::ProduceStage;
pub use producer::{InMemoryProducer, MessageProducer, ProducedMessage};
pub use store::{InMemoryUserStore, StoreStage, UserStore};
pub use validate_email::ValidateEmailStage;
