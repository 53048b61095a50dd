// Copyright (c) 2026 Lattice Labs
// SPDX-License-Identifier: AGPL-3.0
//! Tool confirmation policy.
//!
//! Before a tool executes, the policy may be consulted with the tool
//! name and its input. A denial skips the call without an error; the
//! supervisor receives a textual note that the tool was not used.
//! The policy is an explicit object injected into the tool factory,
//! not process-global state.

use async_trait::async_trait;

/// Outcome of a confirmation check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Approval {
    Approved,
    Denied,
}

#[async_trait]
pub trait ToolPolicy: Send + Sync {
    async fn approve(&self, tool_name: &str, tool_input: &str) -> Approval;
}

/// Default-open policy: the veto gate exists but is disabled.
///
/// Interactive shells that want the gate swap in
/// `infrastructure::interceptor::SessionInterceptor`.
pub struct AlwaysApprove;

#[async_trait]
impl ToolPolicy for AlwaysApprove {
    async fn approve(&self, _tool_name: &str, _tool_input: &str) -> Approval {
        Approval::Approved
    }
}
