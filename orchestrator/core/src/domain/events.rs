// Copyright (c) 2026 Lattice Labs
// SPDX-License-Identifier: AGPL-3.0
//! Domain events emitted while wiring and routing.
//!
//! Events are diagnostics only: nothing in the core makes a control
//! flow decision based on them. The concrete bus lives in
//! `infrastructure::event_bus`; the domain publishes through the
//! [`EventSink`] port.

use crate::domain::node::{MessageId, NodeId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GraphEvent {
    /// Graph activation flag flipped.
    Lifecycle { graph_id: String, active: bool },

    /// The router delivered a query to a node.
    MessageRouted { node: NodeId, message_id: MessageId },

    /// A supervisor invoked a subordinate through its tool.
    ToolInvoked {
        tool: String,
        node: NodeId,
        message_id: MessageId,
    },

    /// A tool call finished with a usable result.
    ToolCompleted { tool: String, node: NodeId },

    /// The wrapped capability failed; the failure was contained.
    ToolFailed {
        tool: String,
        node: NodeId,
        error: String,
    },

    /// The confirmation policy declined the call.
    ToolDenied { tool: String, node: NodeId },
}

/// Port through which domain components publish events.
pub trait EventSink: Send + Sync {
    fn publish(&self, event: GraphEvent);
}

/// Sink that drops every event; the default when nothing subscribes.
pub struct NullSink;

impl EventSink for NullSink {
    fn publish(&self, _event: GraphEvent) {}
}
