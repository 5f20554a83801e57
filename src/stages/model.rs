// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};

/// A user registration request flowing through the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserData {
    pub name: String,
    #[serde(default)]
    pub age: u32,
    pub email: String,
}

impl UserData {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            age: 0,
            email: email.into(),
        }
    }

    pub fn with_age(mut self, age: u32) -> Self {
        self.age = age;
        self
    }

    /// Minimal syntactic check shared by the streaming and function validators.
    pub fn has_valid_email(&self) -> bool {
        !self.email.is_empty() && self.email.contains('@')
    }
}
