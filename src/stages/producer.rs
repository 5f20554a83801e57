// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::engine::RunContext;
use crate::errors::ProduceError;

/// Message broker capability.
///
/// Implementations should return [`ProduceError::Cancelled`] rather than
/// publishing once the run context is cancelled.
#[async_trait]
pub trait MessageProducer: Send + Sync {
    async fn produce(
        &self,
        ctx: &RunContext,
        topic: &str,
        payload: Vec<u8>,
    ) -> Result<(), ProduceError>;
}

/// A message accepted by [`InMemoryProducer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProducedMessage {
    pub topic: String,
    pub trace_id: String,
    pub payload: Vec<u8>,
}

/// Records messages in memory instead of talking to a broker.
#[derive(Debug, Default)]
pub struct InMemoryProducer {
    messages: Mutex<Vec<ProducedMessage>>,
    unavailable: Option<String>,
}

impl InMemoryProducer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A producer that refuses every message with the given reason.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            messages: Mutex::new(Vec::new()),
            unavailable: Some(reason.into()),
        }
    }

    pub async fn messages(&self) -> Vec<ProducedMessage> {
        self.messages.lock().await.clone()
    }
}

#[async_trait]
impl MessageProducer for InMemoryProducer {
    async fn produce(
        &self,
        ctx: &RunContext,
        topic: &str,
        payload: Vec<u8>,
    ) -> Result<(), ProduceError> {
        if ctx.is_cancelled() {
            return Err(ProduceError::Cancelled);
        }
        if let Some(reason) = &self.unavailable {
            return Err(ProduceError::Unavailable(reason.clone()));
        }

        self.messages.lock().await.push(ProducedMessage {
            topic: topic.to_string(),
            trace_id: ctx.trace_id().to_string(),
            payload,
        });
        Ok(())
    }
}
