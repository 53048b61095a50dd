// Copyright (c) 2026 Lattice Labs
// SPDX-License-Identifier: AGPL-3.0

pub mod capability;
pub mod edge;
pub mod events;
pub mod graph;
pub mod hierarchy;
pub mod llm;
pub mod node;
pub mod policy;
pub mod tool;

pub use capability::{
    Capability, CapabilityBinding, CapabilityError, CapabilityOutput, ResponseObserver,
};
pub use edge::{Edge, Relationship};
pub use events::{EventSink, GraphEvent, NullSink};
pub use graph::{AgentGraph, GraphError, GraphStatus, NodeStatus, Topology};
pub use hierarchy::{HierarchyConfig, HierarchyLevel, HierarchyNodeSpec};
pub use llm::{GenerationOptions, LlmClient, LlmError};
pub use node::{AgentNode, Message, MessageId, NodeId};
pub use policy::{AlwaysApprove, Approval, ToolPolicy};
pub use tool::AgentTool;
