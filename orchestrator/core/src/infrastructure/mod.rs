// Copyright (c) 2026 Lattice Labs
// SPDX-License-Identifier: AGPL-3.0

pub mod event_bus;
pub mod interceptor;
pub mod llm;
pub mod prompt_composer;

pub use event_bus::EventBus;
pub use interceptor::{ConfirmationAnswer, ConfirmationPrompt, SessionInterceptor};
pub use llm::{LlmAgent, ScriptedClient};
pub use prompt_composer::{PromptComposer, SpecialistEntry};
