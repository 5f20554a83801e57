// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Function stages for the short-circuit runner.

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::consts::{FN_SINK, FN_TRANSFORM, FN_VALIDATE};
use crate::engine::RunContext;
use crate::errors::StageError;
use crate::stages::produce::encode_user;
use crate::stages::{MessageProducer, UserData};
use crate::traits::FnStage;

/// Fails users without a usable email address.
#[derive(Debug, Default, Clone, Copy)]
pub struct ValidationFn;

impl ValidationFn {
    pub const INVALID_EMAIL: &'static str = "validation: invalid email";
}

#[async_trait]
impl FnStage<UserData> for ValidationFn {
    fn name(&self) -> &str {
        FN_VALIDATE
    }

    async fn run(&self, _ctx: &RunContext, user: UserData) -> Result<UserData, StageError> {
        if user.has_valid_email() {
            Ok(user)
        } else {
            Err(StageError::validation(FN_VALIDATE, Self::INVALID_EMAIL))
        }
    }
}

/// Fills in a placeholder for users who left their name empty.
#[derive(Debug, Default, Clone, Copy)]
pub struct TransformFn;

impl TransformFn {
    pub const ANONYMOUS: &'static str = "anonymous";
}

#[async_trait]
impl FnStage<UserData> for TransformFn {
    fn name(&self) -> &str {
        FN_TRANSFORM
    }

    async fn run(&self, _ctx: &RunContext, mut user: UserData) -> Result<UserData, StageError> {
        if user.name.is_empty() {
            user.name = Self::ANONYMOUS.to_string();
        }
        Ok(user)
    }
}

/// Publishes the user and returns it unchanged.
pub struct SinkFn {
    producer: Arc<dyn MessageProducer>,
    topic: String,
}

impl SinkFn {
    pub fn new(producer: Arc<dyn MessageProducer>, topic: impl Into<String>) -> Self {
        Self {
            producer,
            topic: topic.into(),
        }
    }
}

#[async_trait]
impl FnStage<UserData> for SinkFn {
    fn name(&self) -> &str {
        FN_SINK
    }

    async fn run(&self, ctx: &RunContext, user: UserData) -> Result<UserData, StageError> {
        let to_stage_error = |source| StageError::Produce {
            stage: FN_SINK.to_string(),
            source,
        };

        let payload = encode_user(&user).map_err(to_stage_error)?;
        self.producer
            .produce(ctx, &self.topic, payload)
            .await
            .map_err(to_stage_error)?;
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stages::InMemoryProducer;

    #[tokio::test]
    async fn test_validation_fn_message() {
        let err = ValidationFn
            .run(&RunContext::new(), UserData::new("ada", "nope"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "validation: invalid email");
        assert_eq!(err.stage(), "validate");
    }

    #[tokio::test]
    async fn test_transform_fn_names_only_empty_names_anonymous() {
        let ctx = RunContext::new();

        let blank = TransformFn.run(&ctx, UserData::new("", "x@y")).await.unwrap();
        let named = TransformFn.run(&ctx, UserData::new("ada", "x@y")).await.unwrap();

        let spaced = TransformFn.run(&ctx, UserData::new("  ", "x@y")).await.unwrap();

        assert_eq!(blank.name, "anonymous");
        assert_eq!(named.name, "ada");
        assert_eq!(spaced.name, "  ");
    }

    #[tokio::test]
    async fn test_sink_fn_publishes() {
        let producer = Arc::new(InMemoryProducer::new());
        let sink = SinkFn::new(producer.clone(), "users");
        let user = UserData::new("ada", "ada@example.com");

        let out = sink.run(&RunContext::new(), user.clone()).await.unwrap();

        assert_eq!(out, user);
        assert_eq!(producer.messages().await.len(), 1);
    }
}
