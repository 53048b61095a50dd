// Copyright (c) 2026 Lattice Labs
// SPDX-License-Identifier: AGPL-3.0
//! Reference LLM-backed capability.
//!
//! [`LlmAgent`] adapts an [`LlmClient`] into a rebindable
//! [`Capability`]: instructions and the user query are composed into
//! one prompt, and a reply beginning with `@tool_name ...` delegates
//! the remainder to that subordinate tool before the model is asked
//! to synthesize. [`ScriptedClient`] is a deterministic client for
//! demos and tests; real model providers implement [`LlmClient`]
//! outside the core.

use crate::domain::capability::{
    Capability, CapabilityBinding, CapabilityError, CapabilityOutput, ResponseObserver,
};
use crate::domain::llm::{GenerationOptions, LlmClient, LlmError};
use crate::domain::tool::AgentTool;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

/// Upper bound on generate → delegate rounds per invocation.
const DEFAULT_MAX_TURNS: usize = 4;

/// Deterministic client: answers with the reply of the first rule
/// whose keyword appears in the prompt (case-insensitive), falling
/// back to a default reply.
pub struct ScriptedClient {
    rules: Vec<(String, String)>,
    fallback: String,
}

impl ScriptedClient {
    pub fn new(fallback: impl Into<String>) -> Self {
        Self {
            rules: Vec::new(),
            fallback: fallback.into(),
        }
    }

    /// Rules are checked in registration order; first match wins.
    pub fn rule(mut self, keyword: impl Into<String>, reply: impl Into<String>) -> Self {
        self.rules.push((keyword.into().to_lowercase(), reply.into()));
        self
    }
}

#[async_trait]
impl LlmClient for ScriptedClient {
    async fn generate(
        &self,
        prompt: &str,
        _options: &GenerationOptions,
    ) -> Result<String, LlmError> {
        let haystack = prompt.to_lowercase();
        for (keyword, reply) in &self.rules {
            if haystack.contains(keyword) {
                return Ok(reply.clone());
            }
        }
        Ok(self.fallback.clone())
    }
}

/// A capability backed by a language-model client.
pub struct LlmAgent {
    client: Arc<dyn LlmClient>,
    instructions: String,
    tools: Vec<Arc<AgentTool>>,
    options: GenerationOptions,
    observer: Option<Arc<dyn ResponseObserver>>,
    max_turns: usize,
}

impl LlmAgent {
    pub fn new(client: Arc<dyn LlmClient>, instructions: impl Into<String>) -> Self {
        Self {
            client,
            instructions: instructions.into(),
            tools: Vec::new(),
            options: GenerationOptions::default(),
            observer: None,
            max_turns: DEFAULT_MAX_TURNS,
        }
    }

    pub fn with_options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn ResponseObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// A delegation directive is a reply of the form
    /// `@tool_name the query for that tool`.
    fn parse_directive(reply: &str) -> Option<(&str, &str)> {
        let rest = reply.trim().strip_prefix('@')?;
        let (name, query) = rest.split_once(char::is_whitespace)?;
        let query = query.trim();
        if name.is_empty() || query.is_empty() {
            return None;
        }
        Some((name, query))
    }
}

#[async_trait]
impl Capability for LlmAgent {
    async fn invoke(&self, query: &str) -> Result<CapabilityOutput, CapabilityError> {
        let mut transcript = format!("{}\n\nUser query:\n{}", self.instructions, query);

        for _ in 0..self.max_turns {
            let reply = self.client.generate(&transcript, &self.options).await?;

            if let Some((tool_name, tool_query)) = Self::parse_directive(&reply) {
                if let Some(tool) = self.tools.iter().find(|t| t.name() == tool_name) {
                    debug!(tool = tool_name, "delegating to subordinate tool");
                    let result = tool.call(tool_query).await;
                    transcript.push_str(&format!(
                        "\n\nResult from {tool_name}:\n{result}\n\nSynthesize the final answer for the user."
                    ));
                    continue;
                }
                warn!(tool = tool_name, "model requested an unknown tool");
            }

            if let Some(observer) = &self.observer {
                observer.on_response(&reply).await;
            }
            return Ok(CapabilityOutput::Text(reply));
        }

        Err(CapabilityError::Invocation(format!(
            "delegation did not converge after {} turns",
            self.max_turns
        )))
    }

    fn instructions(&self) -> String {
        self.instructions.clone()
    }

    fn observer(&self) -> Option<Arc<dyn ResponseObserver>> {
        self.observer.clone()
    }

    fn rebind(&self, binding: CapabilityBinding) -> Arc<dyn Capability> {
        Arc::new(Self {
            client: Arc::clone(&self.client),
            instructions: binding.instructions,
            tools: binding.tools,
            options: self.options.clone(),
            observer: binding.observer,
            max_turns: self.max_turns,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::tool_factory::ToolFactory;
    use crate::domain::node::{AgentNode, NodeId};
    use parking_lot::Mutex;

    struct Canned(&'static str);

    #[async_trait]
    impl Capability for Canned {
        async fn invoke(&self, _query: &str) -> Result<CapabilityOutput, CapabilityError> {
            Ok(CapabilityOutput::Text(self.0.to_string()))
        }

        fn instructions(&self) -> String {
            String::new()
        }

        fn rebind(&self, _binding: CapabilityBinding) -> Arc<dyn Capability> {
            Arc::new(Canned(self.0))
        }
    }

    struct Recorder(Mutex<Vec<String>>);

    #[async_trait]
    impl ResponseObserver for Recorder {
        async fn on_response(&self, response: &str) {
            self.0.lock().push(response.to_string());
        }
    }

    #[tokio::test]
    async fn scripted_client_matches_rules_in_order() {
        let client = ScriptedClient::new("default reply")
            .rule("vpc", "three subnets")
            .rule("cluster", "use a managed control plane");

        let options = GenerationOptions::default();
        assert_eq!(client.generate("Design a VPC", &options).await.unwrap(), "three subnets");
        assert_eq!(
            client.generate("Size the cluster", &options).await.unwrap(),
            "use a managed control plane"
        );
        assert_eq!(client.generate("anything else", &options).await.unwrap(), "default reply");
    }

    #[tokio::test]
    async fn agent_without_directive_returns_reply() {
        let client = Arc::new(ScriptedClient::new("plain answer"));
        let agent = LlmAgent::new(client, "You are a specialist.");

        let output = agent.invoke("question").await.unwrap();
        assert_eq!(output.into_text(), "plain answer");
    }

    #[tokio::test]
    async fn agent_delegates_to_named_tool_then_synthesizes() {
        let subordinate = Arc::new(AgentNode::new(
            NodeId::from("aws"),
            "AWS Expert",
            Arc::new(Canned("Current quota is 5 VPCs.")),
        ));
        let tool = ToolFactory::new().wrap(&subordinate);

        let client = Arc::new(
            ScriptedClient::new("@aws_tool check the VPC quota")
                .rule("result from aws_tool", "You have room for 5 VPCs."),
        );
        let observer = Arc::new(Recorder(Mutex::new(Vec::new())));
        let agent = LlmAgent::new(client, "You are the coordinator.")
            .with_observer(Arc::clone(&observer) as Arc<dyn ResponseObserver>);
        let agent = agent.rebind(CapabilityBinding {
            instructions: agent.instructions(),
            tools: vec![tool],
            observer: agent.observer(),
        });

        let output = agent.invoke("how many VPCs can I add?").await.unwrap();
        assert_eq!(output.into_text(), "You have room for 5 VPCs.");

        // The subordinate was really consulted, and the observer saw
        // the final response only.
        assert_eq!(subordinate.queue_depth(), 1);
        assert!(subordinate.messages()[0].processed);
        assert_eq!(observer.0.lock().as_slice(), ["You have room for 5 VPCs."]);
    }

    #[tokio::test]
    async fn unknown_tool_directive_degrades_to_plain_reply() {
        let client = Arc::new(ScriptedClient::new("@ghost_tool do something"));
        let agent = LlmAgent::new(client, "coordinator");

        let output = agent.invoke("question").await.unwrap();
        assert_eq!(output.into_text(), "@ghost_tool do something");
    }

    #[tokio::test]
    async fn endless_delegation_is_bounded() {
        let subordinate = Arc::new(AgentNode::new(
            NodeId::from("aws"),
            "AWS Expert",
            Arc::new(Canned("partial")),
        ));
        let tool = ToolFactory::new().wrap(&subordinate);

        // Every turn produces another directive; the loop must stop.
        let client = Arc::new(ScriptedClient::new("@aws_tool again"));
        let agent = LlmAgent::new(client, "coordinator");
        let agent = agent.rebind(CapabilityBinding {
            instructions: agent.instructions(),
            tools: vec![tool],
            observer: None,
        });

        let err = agent.invoke("question").await.unwrap_err();
        assert!(matches!(err, CapabilityError::Invocation(_)));
    }
}
