// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::consts::STAGE_PRODUCE;
use crate::engine::RunContext;
use crate::errors::{ProduceError, StageError};
use crate::observability::messages::stage::MessageProduced;
use crate::observability::messages::StructuredLog;
use crate::stages::{MessageProducer, UserData};
use crate::traits::ItemProcessor;

/// Encode a user as the JSON payload published to the broker.
pub(crate) fn encode_user(user: &UserData) -> Result<Vec<u8>, ProduceError> {
    serde_json::to_vec(user).map_err(|e| ProduceError::Encode(e.to_string()))
}

/// Publishes each user as JSON on a topic and forwards it unchanged.
pub struct ProduceStage {
    producer: Arc<dyn MessageProducer>,
    topic: String,
}

impl ProduceStage {
    pub fn new(producer: Arc<dyn MessageProducer>, topic: impl Into<String>) -> Self {
        Self {
            producer,
            topic: topic.into(),
        }
    }
}

#[async_trait]
impl ItemProcessor<UserData> for ProduceStage {
    fn name(&self) -> &str {
        STAGE_PRODUCE
    }

    async fn process(
        &self,
        ctx: &RunContext,
        user: UserData,
    ) -> Result<Option<UserData>, StageError> {
        let to_stage_error = |source| StageError::Produce {
            stage: STAGE_PRODUCE.to_string(),
            source,
        };

        let payload = encode_user(&user).map_err(to_stage_error)?;
        let bytes = payload.len();
        self.producer
            .produce(ctx, &self.topic, payload)
            .await
            .map_err(to_stage_error)?;

        MessageProduced {
            stage: STAGE_PRODUCE,
            topic: &self.topic,
            trace_id: ctx.trace_id(),
            bytes,
        }
        .log();

        Ok(Some(user))
    }
}
