// Copyright (c) 2026 Lattice Labs
// SPDX-License-Identifier: AGPL-3.0
//! Top-level workflow entry point.

use crate::application::router::{MessageRouter, RouteError};
use crate::domain::graph::{AgentGraph, GraphError};
use thiserror::Error;
use tracing::info;

/// Default entry node when the caller does not name one.
pub const DEFAULT_ENTRY_NODE: &str = "coordinator";

#[derive(Debug, Error)]
pub enum WorkflowError {
    /// Configuration error: the graph was not activated (or an edge
    /// or node precondition failed) before execution.
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// Routing error re-raised from the entry node's capability.
    #[error(transparent)]
    Route(#[from] RouteError),
}

/// Route a user query through the graph starting at `start_node`.
///
/// Fails with a configuration error when the graph is inactive; the
/// interactive surface is expected to catch routing failures and
/// report them without crashing the process.
pub async fn execute_workflow(
    router: &MessageRouter,
    graph: &AgentGraph,
    query: &str,
    start_node: &str,
) -> Result<String, WorkflowError> {
    if !graph.is_active() {
        return Err(GraphError::GraphInactive(graph.id().to_string()).into());
    }

    info!(graph = graph.id(), start_node, "executing workflow");
    let result = router.send(graph, start_node, query).await?;
    info!(graph = graph.id(), "workflow execution completed");
    Ok(result)
}
