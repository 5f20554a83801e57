// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use crate::config::consts::STAGE_VALIDATE_EMAIL;
use crate::engine::RunContext;
use crate::errors::StageError;
use crate::stages::UserData;
use crate::traits::ItemProcessor;

/// Rejects users whose email is empty or lacks an `@`.
///
/// Rejected users are reported on the error stream and not forwarded.
#[derive(Debug, Default, Clone, Copy)]
pub struct ValidateEmailStage;

impl ValidateEmailStage {
    pub const INVALID_EMAIL: &'static str = "email address is invalid";
}

#[async_trait]
impl ItemProcessor<UserData> for ValidateEmailStage {
    fn name(&self) -> &str {
        STAGE_VALIDATE_EMAIL
    }

    async fn process(
        &self,
        _ctx: &RunContext,
        user: UserData,
    ) -> Result<Option<UserData>, StageError> {
        if user.has_valid_email() {
            Ok(Some(user))
        } else {
            Err(StageError::validation(STAGE_VALIDATE_EMAIL, Self::INVALID_EMAIL))
        }
    }
}
