// Copyright (c) 2026 Lattice Labs
// SPDX-License-Identifier: AGPL-3.0

//! Integration tests for topology building
//!
//! These tests verify the full wiring pipeline:
//! 1. Register nodes in a graph
//! 2. Run a topology builder (star or hierarchy)
//! 3. Validate edges, tool bindings and augmented instructions

use async_trait::async_trait;
use lattice_core::application::tool_factory::ToolFactory;
use lattice_core::application::topology::{TopologyError, TopologyService};
use lattice_core::domain::capability::{
    Capability, CapabilityBinding, CapabilityError, CapabilityOutput,
};
use lattice_core::domain::graph::{AgentGraph, GraphError, Topology};
use lattice_core::domain::hierarchy::HierarchyConfig;
use lattice_core::infrastructure::prompt_composer::PromptComposer;
use std::sync::Arc;

/// Capability that answers with a fixed reply and faithfully carries
/// rebound instructions.
struct Scripted {
    reply: String,
    instructions: String,
}

impl Scripted {
    fn new(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: reply.to_string(),
            instructions: "base instructions".to_string(),
        })
    }
}

#[async_trait]
impl Capability for Scripted {
    async fn invoke(&self, _query: &str) -> Result<CapabilityOutput, CapabilityError> {
        Ok(CapabilityOutput::Text(self.reply.clone()))
    }

    fn instructions(&self) -> String {
        self.instructions.clone()
    }

    fn rebind(&self, binding: CapabilityBinding) -> Arc<dyn Capability> {
        Arc::new(Self {
            reply: self.reply.clone(),
            instructions: binding.instructions,
        })
    }
}

fn service() -> TopologyService {
    TopologyService::new(
        ToolFactory::new(),
        Arc::new(PromptComposer::new().expect("templates must register")),
    )
}

fn graph_with(ids: &[&str]) -> AgentGraph {
    let mut graph = AgentGraph::new("topology-test");
    for id in ids {
        graph
            .register(*id, format!("{id} role"), Scripted::new("ok"))
            .expect("registration must succeed");
    }
    graph
}

#[tokio::test]
async fn test_star_creates_two_directed_edges_per_specialist() {
    let mut graph = graph_with(&["coordinator", "aws", "networking", "cicd"]);
    service()
        .build_star(&mut graph, "coordinator", &["aws", "networking", "cicd"])
        .expect("star build must succeed");

    assert_eq!(graph.topology(), Topology::Star);
    assert_eq!(graph.edge_count(), 6);

    for spec in ["aws", "networking", "cicd"] {
        let forward = graph
            .edges()
            .iter()
            .find(|e| e.from.as_str() == "coordinator" && e.to.as_str() == spec)
            .expect("forward edge must exist");
        assert!(forward.bidirectional);

        let reverse = graph
            .edges()
            .iter()
            .find(|e| e.from.as_str() == spec && e.to.as_str() == "coordinator")
            .expect("reverse edge must exist");
        assert!(!reverse.bidirectional);
    }

    let coordinator = graph
        .node(&"coordinator".into())
        .expect("coordinator must exist");
    assert_eq!(coordinator.tool_count(), 3);

    let instructions = coordinator.capability().instructions();
    assert!(instructions.starts_with("base instructions"));
    assert!(instructions.contains("AVAILABLE SPECIALIST TOOLS"));
    assert!(instructions.contains("aws_tool"));
    assert!(instructions.contains("networking_tool"));
    assert!(instructions.contains("cicd_tool"));
}

#[tokio::test]
async fn test_star_skips_unknown_specialists() {
    let mut graph = graph_with(&["coordinator", "aws"]);
    service()
        .build_star(&mut graph, "coordinator", &["aws", "ghost"])
        .expect("partial star must still build");

    assert_eq!(graph.edge_count(), 2);
    let coordinator = graph
        .node(&"coordinator".into())
        .expect("coordinator must exist");
    assert_eq!(coordinator.tool_count(), 1);
    assert!(!coordinator.capability().instructions().contains("ghost"));
}

#[tokio::test]
async fn test_star_with_unknown_coordinator_fails() {
    let mut graph = graph_with(&["aws"]);
    let err = service()
        .build_star(&mut graph, "ghost", &["aws"])
        .expect_err("unknown coordinator must fail");
    assert!(matches!(
        err,
        TopologyError::Graph(GraphError::UnknownNode(id)) if id.as_str() == "ghost"
    ));
}

#[tokio::test]
async fn test_topology_cannot_be_rebuilt() {
    let mut graph = graph_with(&["coordinator", "aws"]);
    let svc = service();
    svc.build_star(&mut graph, "coordinator", &["aws"])
        .expect("first build must succeed");

    let err = svc
        .build_star(&mut graph, "coordinator", &["aws"])
        .expect_err("second build must be rejected");
    assert!(matches!(
        err,
        TopologyError::Graph(GraphError::TopologyAlreadyBuilt(_, Topology::Star))
    ));

    let config = HierarchyConfig::from_yaml("levels: []").unwrap();
    let err = svc
        .build_hierarchy(&mut graph, &config)
        .expect_err("switching topology must be rejected");
    assert!(matches!(
        err,
        TopologyError::Graph(GraphError::TopologyAlreadyBuilt(_, Topology::Star))
    ));
}

#[tokio::test]
async fn test_hierarchy_wires_subordinates_bottom_up() {
    let mut graph = graph_with(&["coordinator", "mid", "leaf"]);
    let config = HierarchyConfig::from_yaml(
        r#"
levels:
  - level: 1
    nodes:
      - id: coordinator
        subordinates: [mid]
  - level: 2
    nodes:
      - id: mid
        subordinates: [leaf]
  - level: 3
    nodes:
      - id: leaf
"#,
    )
    .expect("manifest must parse");

    service()
        .build_hierarchy(&mut graph, &config)
        .expect("hierarchy build must succeed");

    assert_eq!(graph.topology(), Topology::Hierarchical);
    // Hierarchy edges are unidirectional: one per supervision link.
    assert_eq!(graph.edge_count(), 2);

    let leaf = graph.node(&"leaf".into()).unwrap();
    let mid = graph.node(&"mid".into()).unwrap();
    let coordinator = graph.node(&"coordinator".into()).unwrap();
    assert_eq!(leaf.tool_count(), 0);
    assert_eq!(mid.tool_count(), 1);
    assert_eq!(coordinator.tool_count(), 1);

    // The mid-level manager was rebound before its own supervisor
    // wrapped it, so its instructions already advertise the leaf.
    let mid_instructions = mid.capability().instructions();
    assert!(mid_instructions.contains("AVAILABLE TEAM"));
    assert!(mid_instructions.contains("leaf_tool"));
}

#[tokio::test]
async fn test_hierarchy_scenario_single_manager_three_leaves() {
    let mut graph = graph_with(&["coordinator", "cicd", "kubernetes", "iac"]);
    let config = HierarchyConfig::from_yaml(
        r#"
levels:
  - level: 1
    nodes:
      - id: coordinator
        subordinates: [cicd, kubernetes, iac]
  - level: 2
    nodes:
      - id: cicd
      - id: kubernetes
      - id: iac
"#,
    )
    .expect("manifest must parse");

    service()
        .build_hierarchy(&mut graph, &config)
        .expect("hierarchy build must succeed");

    assert_eq!(graph.edge_count(), 3);
    let coordinator = graph.node(&"coordinator".into()).unwrap();
    assert_eq!(coordinator.tool_count(), 3);
    for leaf in ["cicd", "kubernetes", "iac"] {
        assert_eq!(graph.node(&leaf.into()).unwrap().tool_count(), 0);
    }
}

#[tokio::test]
async fn test_star_rebuild_preserves_baseline_tools() {
    let mut graph = graph_with(&["coordinator", "aws", "helper"]);

    // Attach a baseline tool to the coordinator before wiring.
    let factory = ToolFactory::new();
    let coordinator = graph.node(&"coordinator".into()).unwrap().clone();
    let helper = graph.node(&"helper".into()).unwrap();
    let baseline = factory.wrap(helper);
    let capability = coordinator.capability();
    let rebound = capability.rebind(CapabilityBinding {
        instructions: capability.instructions(),
        tools: vec![Arc::clone(&baseline)],
        observer: None,
    });
    coordinator.publish_binding(rebound, vec![baseline]);

    service()
        .build_star(&mut graph, "coordinator", &["aws"])
        .expect("star build must succeed");

    let names: Vec<String> = coordinator
        .tools()
        .iter()
        .map(|t| t.name().to_string())
        .collect();
    assert_eq!(coordinator.tool_count(), 2);
    assert!(names.contains(&"aws_tool".to_string()));
    assert!(names.contains(&"helper_tool".to_string()));
}
