// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::config::consts::STAGE_STORE;
use crate::engine::RunContext;
use crate::errors::{StageError, StoreError};
use crate::observability::messages::stage::UserStored;
use crate::observability::messages::StructuredLog;
use crate::stages::UserData;
use crate::traits::ItemProcessor;

/// Storage capability used by [`StoreStage`].
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn save(&self, user: &UserData) -> Result<(), StoreError>;
}

/// Keeps users in memory, keyed by email. A second save for the same email is
/// a [`StoreError::Duplicate`].
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: Mutex<Vec<UserData>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn users(&self) -> Vec<UserData> {
        self.users.lock().await.clone()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn save(&self, user: &UserData) -> Result<(), StoreError> {
        let mut users = self.users.lock().await;
        if users.iter().any(|u| u.email == user.email) {
            return Err(StoreError::Duplicate(user.email.clone()));
        }
        users.push(user.clone());
        Ok(())
    }
}

/// Persists each user and forwards it unchanged.
pub struct StoreStage {
    store: Arc<dyn UserStore>,
}

impl StoreStage {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ItemProcessor<UserData> for StoreStage {
    fn name(&self) -> &str {
        STAGE_STORE
    }

    async fn process(
        &self,
        _ctx: &RunContext,
        user: UserData,
    ) -> Result<Option<UserData>, StageError> {
        self.store
            .save(&user)
            .await
            .map_err(|source| StageError::Storage {
                stage: STAGE_STORE.to_string(),
                source,
            })?;

        UserStored {
            stage: STAGE_STORE,
            email: &user.email,
        }
        .log();

        Ok(Some(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_stores_and_forwards() {
        let store = Arc::new(InMemoryUserStore::new());
        let stage = StoreStage::new(store.clone());
        let user = UserData::new("ada", "ada@example.com");

        let out = stage.process(&RunContext::new(), user.clone()).await.unwrap();

        assert_eq!(out, Some(user.clone()));
        assert_eq!(store.users().await, vec![user]);
    }

    #[tokio::test]
    async fn test_duplicate_email_is_a_storage_error() {
        let store = Arc::new(InMemoryUserStore::new());
        let stage = StoreStage::new(store.clone());
        let ctx = RunContext::new();

        stage
            .process(&ctx, UserData::new("ada", "ada@example.com"))
            .await
            .unwrap();
        let err = stage
            .process(&ctx, UserData::new("ada again", "ada@example.com"))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            StageError::Storage {
                stage: "store".to_string(),
                source: StoreError::Duplicate("ada@example.com".to_string()),
            }
        );
        assert_eq!(store.users().await.len(), 1);
    }
}
