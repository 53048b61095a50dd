// Copyright (c) 2026 Lattice Labs
// SPDX-License-Identifier: AGPL-3.0
//! Leveled hierarchy configuration.
//!
//! The nested `levels → nodes → subordinates` shape is the only
//! external configuration the core parses. Levels are numbered with
//! deeper levels carrying larger numbers; builders process them in
//! descending order so subordinate tools exist before their
//! supervisor is itself wrapped.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HierarchyConfig {
    pub levels: Vec<HierarchyLevel>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HierarchyLevel {
    pub level: i32,
    pub nodes: Vec<HierarchyNodeSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HierarchyNodeSpec {
    pub id: String,
    #[serde(default)]
    pub subordinates: Vec<String>,
}

impl HierarchyConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Levels sorted deepest first (descending level number).
    pub fn levels_bottom_up(&self) -> Vec<&HierarchyLevel> {
        let mut levels: Vec<&HierarchyLevel> = self.levels.iter().collect();
        levels.sort_by(|a, b| b.level.cmp(&a.level));
        levels
    }
}
