// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::config::consts::{
    FN_SINK, FN_TRANSFORM, FN_VALIDATE, STAGE_PRODUCE, STAGE_STORE, STAGE_VALIDATE_EMAIL,
};
use crate::config::ChannelConfig;
use crate::engine::StreamingStage;
use crate::errors::ConfigError;
use crate::stages::{
    MessageProducer, ProduceStage, SinkFn, StoreStage, TransformFn, UserData, UserStore,
    ValidateEmailStage, ValidationFn,
};
use crate::traits::{FnStage, Stage};

/// Builds registration stages by name.
///
/// Streaming stages:
/// - "validate_email" -> `ValidateEmailStage`
/// - "store" -> `StoreStage` backed by the registry's `UserStore`
/// - "produce" -> `ProduceStage` publishing to the configured topic
///
/// Function stages:
/// - "validate" -> `ValidationFn`
/// - "transform" -> `TransformFn`
/// - "sink" -> `SinkFn` publishing to the configured topic
pub struct StageRegistry {
    channels: ChannelConfig,
    topic: String,
    producer: Arc<dyn MessageProducer>,
    store: Arc<dyn UserStore>,
}

impl StageRegistry {
    pub fn new(
        channels: ChannelConfig,
        topic: impl Into<String>,
        producer: Arc<dyn MessageProducer>,
        store: Arc<dyn UserStore>,
    ) -> Self {
        Self {
            channels,
            topic: topic.into(),
            producer,
            store,
        }
    }

    /// Create a streaming stage wrapped in its worker.
    pub fn build_stage(&self, name: &str) -> Result<Arc<dyn Stage<UserData>>, ConfigError> {
        let channels = self.channels.clone();
        let stage: Arc<dyn Stage<UserData>> = match name {
            STAGE_VALIDATE_EMAIL => Arc::new(StreamingStage::new(ValidateEmailStage, channels)),
            STAGE_STORE => Arc::new(StreamingStage::new(
                StoreStage::new(Arc::clone(&self.store)),
                channels,
            )),
            STAGE_PRODUCE => Arc::new(StreamingStage::new(
                ProduceStage::new(Arc::clone(&self.producer), self.topic.clone()),
                channels,
            )),
            _ => {
                return Err(ConfigError::UnknownStage {
                    name: name.to_string(),
                    available: Self::list_available_stages().join(", "),
                })
            }
        };
        Ok(stage)
    }

    /// Create a function stage for the short-circuit runner.
    pub fn build_fn_stage(&self, name: &str) -> Result<Arc<dyn FnStage<UserData>>, ConfigError> {
        let stage: Arc<dyn FnStage<UserData>> = match name {
            FN_VALIDATE => Arc::new(ValidationFn),
            FN_TRANSFORM => Arc::new(TransformFn),
            FN_SINK => Arc::new(SinkFn::new(Arc::clone(&self.producer), self.topic.clone())),
            _ => {
                return Err(ConfigError::UnknownStage {
                    name: name.to_string(),
                    available: Self::list_available_fn_stages().join(", "),
                })
            }
        };
        Ok(stage)
    }

    pub fn build_stages(&self, names: &[String]) -> Result<Vec<Arc<dyn Stage<UserData>>>, ConfigError> {
        names.iter().map(|name| self.build_stage(name)).collect()
    }

    pub fn build_fn_stages(
        &self,
        names: &[String],
    ) -> Result<Vec<Arc<dyn FnStage<UserData>>>, ConfigError> {
        names.iter().map(|name| self.build_fn_stage(name)).collect()
    }

    pub fn list_available_stages() -> Vec<&'static str> {
        vec![STAGE_VALIDATE_EMAIL, STAGE_STORE, STAGE_PRODUCE]
    }

    pub fn list_available_fn_stages() -> Vec<&'static str> {
        vec![FN_VALIDATE, FN_TRANSFORM, FN_SINK]
    }

    pub fn is_stage_available(name: &str) -> bool {
        Self::list_available_stages().contains(&name)
    }

    pub fn is_fn_stage_available(name: &str) -> bool {
        Self::list_available_fn_stages().contains(&name)
    }
}
