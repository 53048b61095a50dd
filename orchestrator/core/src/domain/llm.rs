// Copyright (c) 2026 Lattice Labs
// SPDX-License-Identifier: AGPL-3.0
//! Llm
//!
//! Minimal domain contract for language-model clients.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** Isolate the core from vendor model APIs
//!
//! Implementations live in `infrastructure/llm.rs`. The core never
//! performs a vendor API call itself; it only requires "prompt in,
//! text out, or an error".

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Options for a generation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationOptions {
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            max_tokens: Some(4096),
            temperature: Some(0.3),
        }
    }
}

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("network error: {0}")]
    Network(String),

    #[error("provider error: {0}")]
    Provider(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn generate(&self, prompt: &str, options: &GenerationOptions)
        -> Result<String, LlmError>;
}
