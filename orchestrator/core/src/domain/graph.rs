// Copyright (c) 2026 Lattice Labs
// SPDX-License-Identifier: AGPL-3.0
//! The agent graph aggregate.
//!
//! Holds the node registry, the directed edge list, the topology
//! marker and the activation flag. Created empty, populated by
//! registering nodes and running exactly one topology builder, and
//! destroyed with the owning process. Nothing here persists across
//! runs.

use crate::domain::capability::Capability;
use crate::domain::edge::{Edge, Relationship};
use crate::domain::events::{EventSink, GraphEvent, NullSink};
use crate::domain::node::{AgentNode, NodeId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Wiring pattern of a graph. Set at most once per graph instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Topology {
    Unset,
    Star,
    Hierarchical,
    /// Declared fallback label; no wiring logic is specified for it.
    Mesh,
}

/// Configuration errors: fatal to the requested operation, surfaced
/// immediately, never retried.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("node '{0}' is already registered")]
    DuplicateNode(NodeId),

    #[error("node '{0}' not found in graph")]
    UnknownNode(NodeId),

    #[error("graph '{0}' already has a topology ({1:?}); rebuilding is not supported")]
    TopologyAlreadyBuilt(String, Topology),

    #[error("graph '{0}' is not active")]
    GraphInactive(String),
}

/// Diagnostic snapshot of a graph. Never used for control flow.
#[derive(Debug, Clone, Serialize)]
pub struct GraphStatus {
    pub graph_id: String,
    pub topology: Topology,
    pub active: bool,
    pub node_count: usize,
    pub edge_count: usize,
    pub nodes: BTreeMap<String, NodeStatus>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NodeStatus {
    pub role: String,
    pub queue_depth: usize,
    pub tool_count: usize,
}

pub struct AgentGraph {
    id: String,
    nodes: HashMap<NodeId, Arc<AgentNode>>,
    edges: Vec<Edge>,
    topology: Topology,
    active: AtomicBool,
    events: Arc<dyn EventSink>,
}

impl AgentGraph {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            nodes: HashMap::new(),
            edges: Vec::new(),
            topology: Topology::Unset,
            active: AtomicBool::new(false),
            events: Arc::new(NullSink),
        }
    }

    /// Attach an event sink; lifecycle transitions are published to it.
    pub fn with_events(mut self, events: Arc<dyn EventSink>) -> Self {
        self.events = events;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Register an existing capability as a graph node.
    ///
    /// The returned handle is shared with the registry; the registry
    /// remains the owner and the only lookup path.
    pub fn register(
        &mut self,
        id: impl Into<NodeId>,
        role: impl Into<String>,
        capability: Arc<dyn Capability>,
    ) -> Result<Arc<AgentNode>, GraphError> {
        let id = id.into();
        if self.nodes.contains_key(&id) {
            return Err(GraphError::DuplicateNode(id));
        }

        let node = Arc::new(AgentNode::new(id.clone(), role, capability));
        self.nodes.insert(id.clone(), Arc::clone(&node));
        info!(graph = %self.id, node = %id, "node registered");
        Ok(node)
    }

    /// O(1) lookup by id.
    pub fn node(&self, id: &NodeId) -> Option<&Arc<AgentNode>> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Add a directed edge; a bidirectional link adds the reverse
    /// directed edge as well (edge count 2).
    pub fn add_edge(
        &mut self,
        from: &NodeId,
        to: &NodeId,
        relationship: Relationship,
        bidirectional: bool,
    ) -> Result<(), GraphError> {
        if !self.nodes.contains_key(from) {
            return Err(GraphError::UnknownNode(from.clone()));
        }
        if !self.nodes.contains_key(to) {
            return Err(GraphError::UnknownNode(to.clone()));
        }

        let edge = Edge::new(from.clone(), to.clone(), relationship, bidirectional);
        if bidirectional {
            let reverse = edge.reversed();
            self.edges.push(edge);
            self.edges.push(reverse);
        } else {
            self.edges.push(edge);
        }
        Ok(())
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    /// Claim the graph's topology. Fails once a topology is set;
    /// rebuilding an already-built graph is rejected rather than left
    /// half-rewired.
    pub fn set_topology(&mut self, topology: Topology) -> Result<(), GraphError> {
        if self.topology != Topology::Unset {
            return Err(GraphError::TopologyAlreadyBuilt(self.id.clone(), self.topology));
        }
        self.topology = topology;
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    pub fn activate(&self) {
        self.active.store(true, Ordering::SeqCst);
        info!(graph = %self.id, "agent graph activated");
        self.events.publish(GraphEvent::Lifecycle {
            graph_id: self.id.clone(),
            active: true,
        });
    }

    pub fn deactivate(&self) {
        self.active.store(false, Ordering::SeqCst);
        info!(graph = %self.id, "agent graph deactivated");
        self.events.publish(GraphEvent::Lifecycle {
            graph_id: self.id.clone(),
            active: false,
        });
    }

    pub fn status(&self) -> GraphStatus {
        let nodes = self
            .nodes
            .values()
            .map(|node| {
                (
                    node.id().to_string(),
                    NodeStatus {
                        role: node.role().to_string(),
                        queue_depth: node.queue_depth(),
                        tool_count: node.tool_count(),
                    },
                )
            })
            .collect();

        GraphStatus {
            graph_id: self.id.clone(),
            topology: self.topology,
            active: self.is_active(),
            node_count: self.nodes.len(),
            edge_count: self.edges.len(),
            nodes,
        }
    }
}
