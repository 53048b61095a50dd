// Copyright (c) 2026 Lattice Labs
// SPDX-License-Identifier: AGPL-3.0
//! Topology builders (Application Service).
//!
//! Wires registered nodes into a star or hierarchical arrangement:
//! creates the supervisor edges, wraps every subordinate through the
//! tool factory, and rebinds each supervisor's capability with
//! augmented instructions and the new tool set in one atomic publish.
//!
//! Ids missing from the registry degrade to a skip with a warning;
//! the resulting topology is partial but usable. An unknown
//! coordinator, by contrast, is a configuration error.

use crate::application::tool_factory::ToolFactory;
use crate::domain::capability::CapabilityBinding;
use crate::domain::edge::Relationship;
use crate::domain::graph::{AgentGraph, GraphError, Topology};
use crate::domain::hierarchy::HierarchyConfig;
use crate::domain::node::{AgentNode, NodeId};
use crate::domain::tool::AgentTool;
use crate::infrastructure::prompt_composer::{PromptComposer, SpecialistEntry};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum TopologyError {
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error("failed to compose augmented instructions: {0}")]
    Prompt(#[from] handlebars::RenderError),
}

pub struct TopologyService {
    factory: ToolFactory,
    prompts: Arc<PromptComposer>,
}

impl TopologyService {
    pub fn new(factory: ToolFactory, prompts: Arc<PromptComposer>) -> Self {
        Self { factory, prompts }
    }

    /// Build a star: one coordinator supervising N specialists.
    ///
    /// Every wrapped specialist gets a bidirectional supervisor edge
    /// (stored as two directed edges). Specialists keep their own
    /// bindings untouched; a star is single-level.
    pub fn build_star(
        &self,
        graph: &mut AgentGraph,
        coordinator_id: &str,
        specialist_ids: &[&str],
    ) -> Result<(), TopologyError> {
        graph.set_topology(Topology::Star)?;

        let coordinator_id = NodeId::from(coordinator_id);
        let coordinator = graph
            .node(&coordinator_id)
            .cloned()
            .ok_or_else(|| GraphError::UnknownNode(coordinator_id.clone()))?;

        let mut tools = Vec::new();
        let mut directory = Vec::new();
        for spec_id in specialist_ids {
            let spec_id = NodeId::from(*spec_id);
            let Some(specialist) = graph.node(&spec_id).cloned() else {
                warn!(graph = graph.id(), node = %spec_id, "specialist not found, skipping");
                continue;
            };

            let tool = self.factory.wrap(&specialist);
            directory.push(SpecialistEntry {
                id: spec_id.to_string(),
                role: specialist.role().to_string(),
                tool_name: tool.name().to_string(),
            });
            tools.push(tool);
            graph.add_edge(&coordinator_id, &spec_id, Relationship::Supervisor, true)?;
        }

        let wrapped = tools.len();
        self.rebind_supervisor(&coordinator, tools, |original| {
            self.prompts.coordinator_instructions(original, &directory)
        })?;

        info!(
            graph = graph.id(),
            coordinator = %coordinator_id,
            specialists = wrapped,
            "star topology created"
        );
        Ok(())
    }

    /// Build a leveled hierarchy, deepest level first.
    ///
    /// Processing bottom-up guarantees a node's subordinate tools
    /// already exist by the time the node itself is wrapped for its
    /// own supervisor. Hierarchy edges are unidirectional.
    pub fn build_hierarchy(
        &self,
        graph: &mut AgentGraph,
        config: &HierarchyConfig,
    ) -> Result<(), TopologyError> {
        graph.set_topology(Topology::Hierarchical)?;

        for level in config.levels_bottom_up() {
            for spec in &level.nodes {
                let node_id = NodeId::from(spec.id.as_str());
                let Some(node) = graph.node(&node_id).cloned() else {
                    warn!(
                        graph = graph.id(),
                        node = %node_id,
                        level = level.level,
                        "node not found at this level, skipping"
                    );
                    continue;
                };

                if spec.subordinates.is_empty() {
                    continue;
                }

                let mut tools = Vec::new();
                let mut directory = Vec::new();
                for sub_id in &spec.subordinates {
                    let sub_id = NodeId::from(sub_id.as_str());
                    let Some(subordinate) = graph.node(&sub_id).cloned() else {
                        warn!(graph = graph.id(), node = %sub_id, "subordinate not found, skipping");
                        continue;
                    };

                    let tool = self.factory.wrap(&subordinate);
                    directory.push(SpecialistEntry {
                        id: sub_id.to_string(),
                        role: subordinate.role().to_string(),
                        tool_name: tool.name().to_string(),
                    });
                    tools.push(tool);
                    graph.add_edge(&node_id, &sub_id, Relationship::Supervisor, false)?;
                }

                if tools.is_empty() {
                    continue;
                }

                self.rebind_supervisor(&node, tools, |original| {
                    self.prompts.manager_instructions(original, &directory)
                })?;
            }
        }

        info!(graph = graph.id(), nodes = graph.node_count(), "hierarchical topology created");
        Ok(())
    }

    /// Rebuild a supervisor's binding: augmented instructions plus the
    /// freshly wrapped tools, preserving baseline tools and the
    /// response-observation hook, published in one swap.
    fn rebind_supervisor(
        &self,
        node: &Arc<AgentNode>,
        mut tools: Vec<Arc<AgentTool>>,
        compose: impl FnOnce(&str) -> Result<String, handlebars::RenderError>,
    ) -> Result<(), TopologyError> {
        let capability = node.capability();
        let instructions = compose(&capability.instructions())?;

        // Baseline tools attached outside topology building survive a
        // rebuild; stale subordinate wrappings do not.
        let subordinate_ids: Vec<NodeId> =
            tools.iter().map(|t| t.bound_node().clone()).collect();
        tools.extend(
            node.tools()
                .into_iter()
                .filter(|t| !subordinate_ids.contains(t.bound_node())),
        );

        let rebound = capability.rebind(CapabilityBinding {
            instructions,
            tools: tools.clone(),
            observer: capability.observer(),
        });
        node.publish_binding(rebound, tools);
        Ok(())
    }
}
