// Copyright (c) 2026 Lattice Labs
// SPDX-License-Identifier: AGPL-3.0
//! # Lattice Core
//!
//! Graph-based orchestration of independently invocable agent
//! capabilities. A graph wires capabilities into a star or
//! hierarchical topology, exposes every subordinate to its supervisor
//! as a callable tool, and routes a user query through the graph to a
//! single textual result.
//!
//! # Architecture
//!
//! - **Domain:** nodes, edges, the graph aggregate, the capability
//!   and policy contracts.
//! - **Application:** topology builders, the dynamic tool factory,
//!   the message router, and the workflow entry point.
//! - **Infrastructure:** prompt composition (Handlebars), the event
//!   bus, the session interceptor, and the reference LLM capability.

pub mod domain;
pub mod application;
pub mod infrastructure;

pub use domain::*;
