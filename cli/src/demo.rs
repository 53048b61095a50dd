// Copyright (c) 2026 Lattice Labs
// SPDX-License-Identifier: AGPL-3.0
//! Demonstration graph assembly.
//!
//! Builds a DevOps-flavored agent graph out of scripted capabilities
//! so the shell works offline: a coordinator delegating to five
//! specialists, wired either as a star or as a three-level hierarchy.

use anyhow::{Context, Result};
use lattice_core::application::router::MessageRouter;
use lattice_core::application::tool_factory::ToolFactory;
use lattice_core::application::topology::TopologyService;
use lattice_core::domain::capability::Capability;
use lattice_core::domain::graph::AgentGraph;
use lattice_core::domain::hierarchy::HierarchyConfig;
use lattice_core::domain::policy::ToolPolicy;
use lattice_core::infrastructure::event_bus::EventBus;
use lattice_core::infrastructure::interceptor::{ConfirmationPrompt, SessionInterceptor};
use lattice_core::infrastructure::llm::{LlmAgent, ScriptedClient};
use lattice_core::infrastructure::prompt_composer::PromptComposer;
use std::sync::Arc;

pub const SPECIALISTS: &[(&str, &str)] = &[
    ("aws", "AWS Expert"),
    ("networking", "Networking Expert"),
    ("cicd", "CI/CD Expert"),
    ("iac", "Infrastructure-as-Code Expert"),
    ("kubernetes", "Kubernetes Expert"),
];

const HIERARCHY_MANIFEST: &str = r#"
levels:
  - level: 1
    nodes:
      - id: coordinator
        subordinates: [aws, kubernetes]
  - level: 2
    nodes:
      - id: aws
        subordinates: [networking, iac]
      - id: kubernetes
        subordinates: [cicd]
  - level: 3
    nodes:
      - id: networking
      - id: iac
      - id: cicd
"#;

pub struct DemoGraph {
    pub graph: AgentGraph,
    pub router: MessageRouter,
    pub events: EventBus,
    pub interceptor: Arc<SessionInterceptor>,
}

pub fn build(
    hierarchical: bool,
    intercept: bool,
    prompt: Arc<dyn ConfirmationPrompt>,
) -> Result<DemoGraph> {
    let events = EventBus::with_default_capacity();

    let mut interceptor = SessionInterceptor::new(prompt);
    for (id, role) in SPECIALISTS {
        interceptor =
            interceptor.with_description(format!("{id}_tool"), format!("consult the {role}"));
    }
    let interceptor = Arc::new(interceptor);
    interceptor.set_enabled(intercept);

    let factory = ToolFactory::new()
        .with_policy(Arc::clone(&interceptor) as Arc<dyn ToolPolicy>)
        .with_events(Arc::new(events.clone()));
    let composer = Arc::new(PromptComposer::new().context("failed to register prompt templates")?);
    let topology = TopologyService::new(factory, composer);

    let mut graph = AgentGraph::new("lattice-demo").with_events(Arc::new(events.clone()));
    graph.register("coordinator", "Coordinator", coordinator())?;
    for (id, role) in SPECIALISTS {
        graph.register(*id, *role, specialist(*id))?;
    }

    if hierarchical {
        let config = HierarchyConfig::from_yaml(HIERARCHY_MANIFEST)
            .context("invalid hierarchy manifest")?;
        topology.build_hierarchy(&mut graph, &config)?;
    } else {
        let ids: Vec<&str> = SPECIALISTS.iter().map(|(id, _)| *id).collect();
        topology.build_star(&mut graph, "coordinator", &ids)?;
    }

    // Left inactive: the shell activates once its event subscriber is
    // in place, so the first lifecycle event is not lost.
    let router = MessageRouter::with_events(Arc::new(events.clone()));
    Ok(DemoGraph {
        graph,
        router,
        events,
        interceptor,
    })
}

/// Scripted coordinator.
///
/// Keyword rules are matched against the whole transcript, which
/// includes the augmented instructions listing every specialist. The
/// trigger words are therefore chosen so they only occur in user
/// queries and specialist replies, and the synthesis rules come first
/// so they win once a tool result is present.
fn coordinator() -> Arc<dyn Capability> {
    let client = ScriptedClient::new(
        "I can help with cloud architecture, networking, Kubernetes, delivery pipelines and \
         provisioning. Ask about one of those areas.",
    )
    .rule(
        "result from aws_tool",
        "Per the AWS specialist: spread the workload across three availability zones and keep \
         stateful services in private subnets.",
    )
    .rule(
        "result from networking_tool",
        "Per the networking specialist: carve a /20 per zone and deny east-west traffic by default.",
    )
    .rule(
        "result from kubernetes_tool",
        "Per the Kubernetes specialist: run a managed control plane with separate node groups \
         for system and workload pods.",
    )
    .rule(
        "result from cicd_tool",
        "Per the CI/CD specialist: keep trunk-based development with progressive delivery gates.",
    )
    .rule(
        "result from iac_tool",
        "Per the infrastructure-as-code specialist: land every change as a reviewed plan before \
         applying it.",
    )
    .rule("vpc", "@aws_tool design the VPC layout for this request")
    .rule("s3", "@aws_tool advise on the storage architecture for this request")
    .rule("subnet", "@networking_tool plan the subnet layout for this request")
    .rule("firewall", "@networking_tool advise on traffic controls for this request")
    .rule("cluster", "@kubernetes_tool advise on the cluster setup for this request")
    .rule("pod", "@kubernetes_tool advise on the workload layout for this request")
    .rule("pipeline", "@cicd_tool advise on the delivery pipeline for this request")
    .rule("release", "@cicd_tool advise on the release process for this request")
    .rule("terraform", "@iac_tool advise on the provisioning code for this request")
    .rule("provision", "@iac_tool advise on the provisioning workflow for this request");

    Arc::new(LlmAgent::new(
        Arc::new(client),
        "You are the coordinator of a DevOps consultancy. Answer the user's question, \
         delegating to your specialists where their expertise applies.",
    ))
}

fn specialist(id: &str) -> Arc<dyn Capability> {
    let (instructions, client) = match id {
        "aws" => (
            "You are an AWS cloud architecture expert.",
            ScriptedClient::new("Favor managed services and keep blast radii small.")
                .rule("vpc", "Use one VPC per environment with private subnets across three zones.")
                .rule("storage", "Use S3 with lifecycle policies; archive cold data to Glacier."),
        ),
        "networking" => (
            "You are a cloud networking expert.",
            ScriptedClient::new("Segment aggressively and log every flow.")
                .rule("subnet", "Carve a /20 per availability zone and keep 4x headroom for growth.")
                .rule("traffic", "Deny east-west traffic by default; allow per-service exceptions."),
        ),
        "cicd" => (
            "You are a CI/CD and delivery pipeline expert.",
            ScriptedClient::new("Automate the path to production end to end.")
                .rule("pipeline", "Build once, promote the same artifact through every stage.")
                .rule("release", "Gate releases on canary health, not on calendar dates."),
        ),
        "iac" => (
            "You are an infrastructure-as-code expert.",
            ScriptedClient::new("Never change infrastructure by hand.")
                .rule("terraform", "Keep state remote and locked; plan in CI, apply on review.")
                .rule("module", "Version modules independently and pin consumers to releases."),
        ),
        "kubernetes" => (
            "You are a Kubernetes platform expert.",
            ScriptedClient::new("Keep the control plane boring and the workloads declarative.")
                .rule("cluster", "Run a managed control plane; separate system and workload pools.")
                .rule("pod", "Set requests and limits everywhere; let the autoscaler do the rest."),
        ),
        other => (
            "You are a general infrastructure expert.",
            ScriptedClient::new(format!("The {other} specialist has no scripted guidance yet.")),
        ),
    };
    Arc::new(LlmAgent::new(Arc::new(client), instructions))
}
