// Copyright (c) 2026 Lattice Labs
// SPDX-License-Identifier: AGPL-3.0
//! Session Interceptor - confirmation gate for tool calls.
//!
//! Implements [`ToolPolicy`] with the full veto path: per-call
//! confirmation, blanket session approval, and per-tool-type session
//! approval. The actual question is delegated to a
//! [`ConfirmationPrompt`] seam so the core stays independent of the
//! interactive surface. Disabled, it approves everything and asks
//! nothing.

use crate::domain::policy::{Approval, ToolPolicy};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

/// Input previews shown to the human are truncated to this many
/// characters.
const PREVIEW_LIMIT: usize = 50;

/// Answer collected from the human for one tool call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationAnswer {
    /// Approve this call only.
    Yes,
    /// Decline this call.
    No,
    /// Approve every tool for the rest of the session.
    AllSession,
    /// Approve this tool type for the rest of the session.
    ThisToolSession,
}

/// Seam to whatever surface collects the confirmation.
#[async_trait]
pub trait ConfirmationPrompt: Send + Sync {
    async fn confirm(
        &self,
        tool_name: &str,
        description: &str,
        input_preview: &str,
    ) -> ConfirmationAnswer;
}

pub struct SessionInterceptor {
    enabled: AtomicBool,
    approve_all: AtomicBool,
    session_approvals: Mutex<HashSet<String>>,
    descriptions: HashMap<String, String>,
    prompt: Arc<dyn ConfirmationPrompt>,
}

impl SessionInterceptor {
    pub fn new(prompt: Arc<dyn ConfirmationPrompt>) -> Self {
        Self {
            enabled: AtomicBool::new(true),
            approve_all: AtomicBool::new(false),
            session_approvals: Mutex::new(HashSet::new()),
            descriptions: HashMap::new(),
            prompt,
        }
    }

    /// Register a friendly description shown instead of the raw tool
    /// name.
    pub fn with_description(
        mut self,
        tool_name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        self.descriptions.insert(tool_name.into(), description.into());
        self
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
        info!(enabled, "tool interception toggled");
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    fn should_intercept(&self, tool_name: &str) -> bool {
        if !self.is_enabled() || self.approve_all.load(Ordering::SeqCst) {
            return false;
        }
        !self.session_approvals.lock().contains(tool_name)
    }

    fn description_for(&self, tool_name: &str) -> String {
        self.descriptions
            .get(tool_name)
            .cloned()
            .unwrap_or_else(|| format!("use {tool_name}"))
    }

    fn preview(input: &str) -> String {
        if input.chars().count() > PREVIEW_LIMIT {
            let truncated: String = input.chars().take(PREVIEW_LIMIT).collect();
            format!("{truncated}...")
        } else {
            input.to_string()
        }
    }
}

#[async_trait]
impl ToolPolicy for SessionInterceptor {
    async fn approve(&self, tool_name: &str, tool_input: &str) -> Approval {
        if !self.should_intercept(tool_name) {
            return Approval::Approved;
        }

        let answer = self
            .prompt
            .confirm(
                tool_name,
                &self.description_for(tool_name),
                &Self::preview(tool_input),
            )
            .await;

        match answer {
            ConfirmationAnswer::Yes => Approval::Approved,
            ConfirmationAnswer::No => {
                info!(tool = tool_name, "tool call declined by user");
                Approval::Denied
            }
            ConfirmationAnswer::AllSession => {
                self.approve_all.store(true, Ordering::SeqCst);
                info!("all tools approved for this session");
                Approval::Approved
            }
            ConfirmationAnswer::ThisToolSession => {
                self.session_approvals.lock().insert(tool_name.to_string());
                info!(tool = tool_name, "tool approved for this session");
                Approval::Approved
            }
        }
    }
}
