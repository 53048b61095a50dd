// Copyright (c) 2026 Lattice Labs
// SPDX-License-Identifier: AGPL-3.0
//! Prompt Composer
//!
//! Renders the structured specialist directory into a supervisor's
//! augmented instruction set, using Handlebars for placeholder
//! substitution. Data (the directory of `{id, role, tool_name}`
//! entries) stays separate from presentation (the templates below);
//! the original instructions are always preserved verbatim at the
//! top.

use handlebars::Handlebars;
use serde::Serialize;
use serde_json::json;

/// One entry of the specialist directory advertised to a supervisor.
#[derive(Debug, Clone, Serialize)]
pub struct SpecialistEntry {
    pub id: String,
    pub role: String,
    pub tool_name: String,
}

const COORDINATOR_TEMPLATE: &str = "\
{{original}}

AVAILABLE SPECIALIST TOOLS:
{{#each specialists}}- {{role}} ({{id}}): use the {{tool_name}} tool
{{/each}}
TOOL USAGE INSTRUCTIONS:
1. Analyze the query to determine which specialists you need
2. Use the appropriate tools with clear, specific queries
3. Provide enough context in every query you send to a specialist
4. Synthesize the responses into one coherent, complete answer
5. If a tool does not respond adequately, answer from your own knowledge

IMPORTANT: Always provide a useful answer, even when the tools do not work as expected.";

const MANAGER_TEMPLATE: &str = "\
{{original}}

AVAILABLE TEAM:
{{#each subordinates}}- {{role}} ({{id}}): use the {{tool_name}} tool
{{/each}}
MANAGEMENT INSTRUCTIONS:
1. Delegate specific tasks to the appropriate members of your team
2. Coordinate work across specialists when a task spans several of them
3. Synthesize your team's results into coherent answers
4. Make sure every relevant perspective has been considered";

pub struct PromptComposer {
    registry: Handlebars<'static>,
}

impl PromptComposer {
    pub fn new() -> Result<Self, handlebars::TemplateError> {
        let mut registry = Handlebars::new();
        registry.register_escape_fn(handlebars::no_escape);
        registry.register_template_string("coordinator", COORDINATOR_TEMPLATE)?;
        registry.register_template_string("manager", MANAGER_TEMPLATE)?;
        Ok(Self { registry })
    }

    /// Coordinator augmentation: specialist directory plus the fixed
    /// operating instructions. An empty directory leaves the original
    /// instructions unchanged.
    pub fn coordinator_instructions(
        &self,
        original: &str,
        specialists: &[SpecialistEntry],
    ) -> Result<String, handlebars::RenderError> {
        if specialists.is_empty() {
            return Ok(original.to_string());
        }
        self.registry.render(
            "coordinator",
            &json!({ "original": original, "specialists": specialists }),
        )
    }

    /// Manager augmentation: the "team" prompt with delegation
    /// instructions.
    pub fn manager_instructions(
        &self,
        original: &str,
        subordinates: &[SpecialistEntry],
    ) -> Result<String, handlebars::RenderError> {
        if subordinates.is_empty() {
            return Ok(original.to_string());
        }
        self.registry.render(
            "manager",
            &json!({ "original": original, "subordinates": subordinates }),
        )
    }
}
