// Copyright (c) 2026 Lattice Labs
// SPDX-License-Identifier: AGPL-3.0
//! Message router (Application Service).
//!
//! Delivers a query to a target node, normalizes the result and
//! manages the node's message log. Unlike the tool wrapper, the
//! router re-raises capability failures to its caller after logging
//! and annotating the message: only failures reached through tool
//! wrapping are contained.

use crate::domain::capability::CapabilityError;
use crate::domain::events::{EventSink, GraphEvent, NullSink};
use crate::domain::graph::AgentGraph;
use crate::domain::node::NodeId;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};

/// Fixed reply for empty/whitespace queries. Not an error; the
/// capability is never invoked and the queue stays untouched.
pub const EMPTY_MESSAGE_REPLY: &str = "Cannot process an empty message.";

#[derive(Debug, Error)]
pub enum RouteError {
    #[error("node '{0}' not found in graph")]
    UnknownNode(NodeId),

    #[error("capability of node '{node}' failed: {source}")]
    Capability {
        node: NodeId,
        #[source]
        source: CapabilityError,
    },
}

pub struct MessageRouter {
    events: Arc<dyn EventSink>,
}

impl MessageRouter {
    pub fn new() -> Self {
        Self {
            events: Arc::new(NullSink),
        }
    }

    pub fn with_events(events: Arc<dyn EventSink>) -> Self {
        Self { events }
    }

    /// Deliver `query` to the node identified by `target_id` and wait
    /// for its capability to complete.
    pub async fn send(
        &self,
        graph: &AgentGraph,
        target_id: &str,
        query: &str,
    ) -> Result<String, RouteError> {
        let target_id = NodeId::from(target_id);
        let node = graph
            .node(&target_id)
            .cloned()
            .ok_or_else(|| RouteError::UnknownNode(target_id.clone()))?;

        if query.trim().is_empty() {
            warn!(node = %target_id, "empty message sent to node");
            return Ok(EMPTY_MESSAGE_REPLY.to_string());
        }

        info!(node = %target_id, role = node.role(), "delivering message");
        let message_id = node.enqueue(query);
        self.events.publish(GraphEvent::MessageRouted {
            node: target_id.clone(),
            message_id,
        });

        let capability = node.capability();
        match capability.invoke(query).await {
            Ok(output) => {
                let result = output.text_or(|| {
                    format!("Node '{target_id}' processed the message but produced no visible response.")
                });
                node.mark_processed(message_id);
                Ok(result)
            }
            Err(err) => {
                error!(node = %target_id, error = %err, "message processing failed");
                node.mark_failed(message_id, err.to_string());
                Err(RouteError::Capability {
                    node: target_id,
                    source: err,
                })
            }
        }
    }
}

impl Default for MessageRouter {
    fn default() -> Self {
        Self::new()
    }
}
