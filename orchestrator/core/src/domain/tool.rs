// Copyright (c) 2026 Lattice Labs
// SPDX-License-Identifier: AGPL-3.0
//! Tool adapter exposing a node to another node's capability.
//!
//! Created by the dynamic tool factory and owned by whichever node's
//! tool list it is appended to. A single node may be wrapped into
//! several tools when it serves more than one supervisor.
//!
//! The tool is the containment boundary of the system: a failing
//! subordinate degrades to a textual answer attributed to the failing
//! node and never aborts the supervisor's own reasoning.

use crate::domain::events::{EventSink, GraphEvent};
use crate::domain::node::{AgentNode, NodeId};
use crate::domain::policy::{Approval, ToolPolicy};
use std::sync::Arc;
use tracing::{error, info, warn};

pub struct AgentTool {
    name: String,
    description: String,
    node: Arc<AgentNode>,
    policy: Arc<dyn ToolPolicy>,
    events: Arc<dyn EventSink>,
}

impl AgentTool {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        node: Arc<AgentNode>,
        policy: Arc<dyn ToolPolicy>,
        events: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            node,
            policy,
            events,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Identifier of the wrapped node.
    pub fn bound_node(&self) -> &NodeId {
        self.node.id()
    }

    /// Invoke the wrapped node's capability with `query`.
    ///
    /// Always returns a string; capability failures are contained,
    /// not propagated. The wrapped node's queue records the attempt
    /// before the invocation starts.
    pub async fn call(&self, query: &str) -> String {
        info!(tool = %self.name, node = %self.node.id(), "processing tool query");

        if query.trim().is_empty() {
            warn!(tool = %self.name, "empty query received");
            return format!("No valid query was provided for the {}.", self.node.role());
        }

        if self.policy.approve(&self.name, query).await == Approval::Denied {
            info!(tool = %self.name, "tool call declined by policy");
            self.events.publish(GraphEvent::ToolDenied {
                tool: self.name.clone(),
                node: self.node.id().clone(),
            });
            return format!("The {} tool was not used: the call was declined.", self.name);
        }

        let message_id = self.node.enqueue(query);
        self.events.publish(GraphEvent::ToolInvoked {
            tool: self.name.clone(),
            node: self.node.id().clone(),
            message_id,
        });

        let capability = self.node.capability();
        match capability.invoke(query).await {
            Ok(output) => {
                let role = self.node.role().to_string();
                let result = output.text_or(|| {
                    format!("The {role} processed the query but produced no visible response.")
                });
                self.node.mark_processed(message_id);
                self.events.publish(GraphEvent::ToolCompleted {
                    tool: self.name.clone(),
                    node: self.node.id().clone(),
                });
                info!(tool = %self.name, node = %self.node.id(), "tool query completed");
                result
            }
            Err(err) => {
                error!(tool = %self.name, node = %self.node.id(), error = %err, "capability failed");
                self.node.mark_failed(message_id, err.to_string());
                self.events.publish(GraphEvent::ToolFailed {
                    tool: self.name.clone(),
                    node: self.node.id().clone(),
                    error: err.to_string(),
                });
                format!(
                    "Error while consulting the {} ({}): {}",
                    self.node.role(),
                    self.node.id(),
                    err
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::capability::{
        Capability, CapabilityBinding, CapabilityError, CapabilityOutput,
    };
    use crate::domain::events::NullSink;
    use crate::domain::policy::AlwaysApprove;
    use async_trait::async_trait;

    struct StaticCapability(&'static str);

    #[async_trait]
    impl Capability for StaticCapability {
        async fn invoke(&self, _query: &str) -> Result<CapabilityOutput, CapabilityError> {
            Ok(CapabilityOutput::Text(self.0.to_string()))
        }

        fn instructions(&self) -> String {
            String::new()
        }

        fn rebind(&self, _binding: CapabilityBinding) -> Arc<dyn Capability> {
            Arc::new(StaticCapability(self.0))
        }
    }

    struct DenyAll;

    #[async_trait]
    impl ToolPolicy for DenyAll {
        async fn approve(&self, _tool_name: &str, _tool_input: &str) -> Approval {
            Approval::Denied
        }
    }

    fn tool_for(node: Arc<AgentNode>, policy: Arc<dyn ToolPolicy>) -> AgentTool {
        let name = format!("{}_tool", node.id());
        AgentTool::new(name, "test tool", node, policy, Arc::new(NullSink))
    }

    #[tokio::test]
    async fn empty_query_short_circuits_without_queueing() {
        let node = Arc::new(AgentNode::new(
            NodeId::from("aws"),
            "AWS Expert",
            Arc::new(StaticCapability("unused")),
        ));
        let tool = tool_for(Arc::clone(&node), Arc::new(AlwaysApprove));

        let reply = tool.call("   ").await;
        assert!(reply.contains("No valid query"));
        assert_eq!(node.queue_depth(), 0);
    }

    #[tokio::test]
    async fn denied_call_is_skipped_without_queueing() {
        let node = Arc::new(AgentNode::new(
            NodeId::from("aws"),
            "AWS Expert",
            Arc::new(StaticCapability("unused")),
        ));
        let tool = tool_for(Arc::clone(&node), Arc::new(DenyAll));

        let reply = tool.call("design a VPC").await;
        assert!(reply.contains("was not used"));
        assert_eq!(node.queue_depth(), 0);
    }

    #[tokio::test]
    async fn successful_call_marks_message_processed() {
        let node = Arc::new(AgentNode::new(
            NodeId::from("aws"),
            "AWS Expert",
            Arc::new(StaticCapability("Use three availability zones.")),
        ));
        let tool = tool_for(Arc::clone(&node), Arc::new(AlwaysApprove));

        let reply = tool.call("design a VPC").await;
        assert_eq!(reply, "Use three availability zones.");

        let messages = node.messages();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].processed);
        assert!(messages[0].error.is_none());
    }
}
