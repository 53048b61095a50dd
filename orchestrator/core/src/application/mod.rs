// Copyright (c) 2026 Lattice Labs
// SPDX-License-Identifier: AGPL-3.0

pub mod router;
pub mod tool_factory;
pub mod topology;
pub mod workflow;

pub use router::{MessageRouter, RouteError, EMPTY_MESSAGE_REPLY};
pub use tool_factory::ToolFactory;
pub use topology::{TopologyError, TopologyService};
pub use workflow::{execute_workflow, WorkflowError, DEFAULT_ENTRY_NODE};
