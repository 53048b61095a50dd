// Copyright (c) 2026 Lattice Labs
// SPDX-License-Identifier: AGPL-3.0
//! Graph nodes and their per-node message queues.
//!
//! A node pairs a stable identifier and display role with an
//! invocable [`Capability`], the tools wired to it by a topology
//! builder, and an append-only message log. The queue is an audit
//! trail: messages are appended at send time and mutated exactly once
//! afterwards (`processed = true` on success, `error` set on failure),
//! never removed.

use crate::domain::capability::Capability;
use crate::domain::tool::AgentTool;
use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Stable identifier of a node within a graph (e.g. `"coordinator"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Opaque unique token identifying one queued message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(Uuid);

impl MessageId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One entry in a node's append-only message log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub content: String,
    pub processed: bool,
    pub error: Option<String>,
    pub enqueued_at: DateTime<Utc>,
}

impl Message {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            id: MessageId::new(),
            content: content.into(),
            processed: false,
            error: None,
            enqueued_at: Utc::now(),
        }
    }
}

/// A node in the agent graph.
///
/// Owned by the graph and shared (`Arc`) with every tool that wraps
/// it. The capability binding and tool list are replaced as a unit by
/// topology builders (see [`AgentNode::publish_binding`]); the message
/// queue is only touched by whichever component is actively servicing
/// the node.
pub struct AgentNode {
    id: NodeId,
    role: String,
    capability: RwLock<Arc<dyn Capability>>,
    tools: RwLock<Vec<Arc<AgentTool>>>,
    message_queue: Mutex<Vec<Message>>,
}

impl AgentNode {
    pub fn new(id: NodeId, role: impl Into<String>, capability: Arc<dyn Capability>) -> Self {
        Self {
            id,
            role: role.into(),
            capability: RwLock::new(capability),
            tools: RwLock::new(Vec::new()),
            message_queue: Mutex::new(Vec::new()),
        }
    }

    pub fn id(&self) -> &NodeId {
        &self.id
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    /// Current capability binding.
    pub fn capability(&self) -> Arc<dyn Capability> {
        Arc::clone(&self.capability.read())
    }

    /// Tools currently wired to this node by a topology builder.
    pub fn tools(&self) -> Vec<Arc<AgentTool>> {
        self.tools.read().clone()
    }

    pub fn tool_count(&self) -> usize {
        self.tools.read().len()
    }

    pub fn queue_depth(&self) -> usize {
        self.message_queue.lock().len()
    }

    /// Snapshot of the message log, oldest first.
    pub fn messages(&self) -> Vec<Message> {
        self.message_queue.lock().clone()
    }

    /// Append a message before the capability is invoked.
    pub fn enqueue(&self, content: &str) -> MessageId {
        let message = Message::new(content);
        let id = message.id;
        self.message_queue.lock().push(message);
        id
    }

    /// Mark a message as successfully processed.
    pub fn mark_processed(&self, id: MessageId) {
        let mut queue = self.message_queue.lock();
        if let Some(message) = queue.iter_mut().find(|m| m.id == id) {
            message.processed = true;
        }
    }

    /// Annotate a message with a capability failure. The message stays
    /// `processed = false`.
    pub fn mark_failed(&self, id: MessageId, error: impl Into<String>) {
        let mut queue = self.message_queue.lock();
        if let Some(message) = queue.iter_mut().find(|m| m.id == id) {
            message.error = Some(error.into());
        }
    }

    /// Atomically publish a rebuilt capability binding and tool list.
    ///
    /// Both fields are swapped under their write locks in one critical
    /// section so a reader never observes a half-updated node. The new
    /// tool list replaces the old one outright; stale subordinate
    /// bindings do not survive a rebuild.
    pub fn publish_binding(&self, capability: Arc<dyn Capability>, tools: Vec<Arc<AgentTool>>) {
        let mut bound = self.capability.write();
        let mut wired = self.tools.write();
        *bound = capability;
        *wired = tools;
    }
}

impl fmt::Debug for AgentNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AgentNode")
            .field("id", &self.id)
            .field("role", &self.role)
            .field("tools", &self.tool_count())
            .field("queue_depth", &self.queue_depth())
            .finish()
    }
}
