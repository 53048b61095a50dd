// Copyright (c) 2026 Lattice Labs
// SPDX-License-Identifier: AGPL-3.0

use crate::domain::node::NodeId;
use serde::{Deserialize, Serialize};

/// Relationship kind carried by an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relationship {
    Peer,
    Supervisor,
}

/// A directed relation between two registered nodes.
///
/// A bidirectional link is always materialized as two directed edges:
/// the forward edge with `bidirectional = true` and a reverse edge
/// with `bidirectional = false`. The edge count of a bidirectional
/// link is therefore 2. Edges are immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    pub relationship: Relationship,
    pub bidirectional: bool,
}

impl Edge {
    pub fn new(from: NodeId, to: NodeId, relationship: Relationship, bidirectional: bool) -> Self {
        Self {
            from,
            to,
            relationship,
            bidirectional,
        }
    }

    /// The reverse half of a bidirectional link.
    pub fn reversed(&self) -> Self {
        Self {
            from: self.to.clone(),
            to: self.from.clone(),
            relationship: self.relationship,
            bidirectional: false,
        }
    }
}
