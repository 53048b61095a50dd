// Copyright (c) 2026 Lattice Labs
// SPDX-License-Identifier: AGPL-3.0
//! Capability contract (anti-corruption layer).
//!
//! A capability is the opaque unit a node wraps: it accepts one text
//! query and returns one text result or fails. The core never talks
//! to a model vendor directly; it requires only this interface.
//! Implementations live in `infrastructure/`.

use crate::domain::llm::LlmError;
use crate::domain::tool::AgentTool;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

/// Errors surfaced by a capability invocation.
///
/// How a failure travels depends on the caller: a tool wrapper
/// contains it as a textual answer, the message router re-raises it.
#[derive(Debug, Error)]
pub enum CapabilityError {
    #[error("language model error: {0}")]
    Model(#[from] LlmError),

    #[error("invocation failed: {0}")]
    Invocation(String),
}

/// Result of a capability invocation: either plain text or a
/// structured value exposing a primary text field.
#[derive(Debug, Clone)]
pub enum CapabilityOutput {
    Text(String),
    Structured(Value),
}

impl CapabilityOutput {
    /// Normalize to a plain string.
    ///
    /// Structured results yield their pre-established primary text
    /// field (`message`, falling back to `content`); anything else
    /// degrades to a string conversion.
    pub fn into_text(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Structured(value) => {
                for field in ["message", "content"] {
                    if let Some(text) = value.get(field).and_then(Value::as_str) {
                        return text.to_string();
                    }
                }
                value.to_string()
            }
        }
    }

    /// Normalize and substitute a placeholder when the trimmed result
    /// is empty.
    pub fn text_or(self, placeholder: impl FnOnce() -> String) -> String {
        let text = self.into_text();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            placeholder()
        } else {
            trimmed.to_string()
        }
    }
}

impl From<String> for CapabilityOutput {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Value> for CapabilityOutput {
    fn from(value: Value) -> Self {
        Self::Structured(value)
    }
}

/// Hook notified with the final response of a capability invocation.
///
/// Attached to a capability at construction time and preserved across
/// rebinds, mirroring streaming/callback handlers of the hosting
/// shell.
#[async_trait]
pub trait ResponseObserver: Send + Sync {
    async fn on_response(&self, response: &str);
}

/// A complete replacement binding for a node's capability.
///
/// Topology builders construct the whole binding first and publish it
/// in one step, so no reader ever sees augmented instructions without
/// the matching tool set.
pub struct CapabilityBinding {
    /// Augmented instruction set (original instructions preserved).
    pub instructions: String,
    /// Tools wrapping the node's subordinates.
    pub tools: Vec<Arc<AgentTool>>,
    /// Response-observation hook carried over from the old binding.
    pub observer: Option<Arc<dyn ResponseObserver>>,
}

/// The unit of work a node wraps.
#[async_trait]
pub trait Capability: Send + Sync {
    /// Process one text query to completion.
    async fn invoke(&self, query: &str) -> Result<CapabilityOutput, CapabilityError>;

    /// The capability's current instruction set (system prompt).
    fn instructions(&self) -> String;

    /// The response-observation hook, if one is attached.
    fn observer(&self) -> Option<Arc<dyn ResponseObserver>> {
        None
    }

    /// Produce a new capability carrying the given binding.
    ///
    /// Rebinding never mutates the receiver; the caller publishes the
    /// returned capability onto the node as an atomic swap.
    fn rebind(&self, binding: CapabilityBinding) -> Arc<dyn Capability>;
}
