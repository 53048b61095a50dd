// Copyright (c) 2026 Lattice Labs
// SPDX-License-Identifier: AGPL-3.0
//! Dynamic tool factory.
//!
//! Adapts a registered node into an [`AgentTool`] usable by another
//! node's capability. The confirmation policy and event sink are
//! injected here once and shared by every tool the factory produces.

use crate::domain::events::{EventSink, NullSink};
use crate::domain::node::AgentNode;
use crate::domain::policy::{AlwaysApprove, ToolPolicy};
use crate::domain::tool::AgentTool;
use std::sync::Arc;

pub struct ToolFactory {
    policy: Arc<dyn ToolPolicy>,
    events: Arc<dyn EventSink>,
}

impl ToolFactory {
    /// Factory with the default-open confirmation policy and no event
    /// subscribers.
    pub fn new() -> Self {
        Self {
            policy: Arc::new(AlwaysApprove),
            events: Arc::new(NullSink),
        }
    }

    pub fn with_policy(mut self, policy: Arc<dyn ToolPolicy>) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_events(mut self, events: Arc<dyn EventSink>) -> Self {
        self.events = events;
        self
    }

    /// Wrap a node for use by a supervisor.
    ///
    /// The tool is named `{id}_tool`; its description states the
    /// node's role and feeds the supervisor's prompt augmentation.
    pub fn wrap(&self, node: &Arc<AgentNode>) -> Arc<AgentTool> {
        Arc::new(AgentTool::new(
            format!("{}_tool", node.id()),
            format!("Consult the {} for tasks related to {}.", node.role(), node.id()),
            Arc::clone(node),
            Arc::clone(&self.policy),
            Arc::clone(&self.events),
        ))
    }
}

impl Default for ToolFactory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::capability::{
        Capability, CapabilityBinding, CapabilityError, CapabilityOutput,
    };
    use crate::domain::node::NodeId;
    use async_trait::async_trait;

    struct Idle;

    #[async_trait]
    impl Capability for Idle {
        async fn invoke(&self, _query: &str) -> Result<CapabilityOutput, CapabilityError> {
            Ok(CapabilityOutput::Text("idle".to_string()))
        }

        fn instructions(&self) -> String {
            String::new()
        }

        fn rebind(&self, _binding: CapabilityBinding) -> Arc<dyn Capability> {
            Arc::new(Idle)
        }
    }

    #[test]
    fn tool_naming_follows_node_id() {
        let node = Arc::new(AgentNode::new(
            NodeId::from("aws_expert"),
            "AWS Expert",
            Arc::new(Idle),
        ));
        let tool = ToolFactory::new().wrap(&node);
        assert_eq!(tool.name(), "aws_expert_tool");
        assert!(tool.description().contains("AWS Expert"));
        assert_eq!(tool.bound_node().as_str(), "aws_expert");
    }
}
