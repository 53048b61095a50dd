// Copyright (c) 2026 Lattice Labs
// SPDX-License-Identifier: AGPL-3.0
//! Interactive shell around the demonstration graph.
//!
//! Routes free text through the coordinator, streams tool activity
//! as dimmed side-channel lines, and answers confirmation prompts
//! through the terminal. Routing failures are reported and the loop
//! continues; only EOF or `quit` ends the session.

use crate::demo::{self, DemoGraph};
use anyhow::{Context, Result};
use async_trait::async_trait;
use colored::Colorize;
use lattice_core::application::workflow::{execute_workflow, DEFAULT_ENTRY_NODE};
use lattice_core::domain::events::GraphEvent;
use lattice_core::infrastructure::interceptor::{ConfirmationAnswer, ConfirmationPrompt};
use std::io::Write;
use std::sync::Arc;
use tracing::info;

pub struct ShellOptions {
    pub intercept: bool,
    pub hierarchical: bool,
}

pub async fn run(options: ShellOptions) -> Result<()> {
    let demo = demo::build(options.hierarchical, options.intercept, Arc::new(TtyPrompt))?;
    info!(graph = demo.graph.id(), "demo graph built");

    let mut stream = demo.events.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = stream.recv().await {
            print_event(&event);
        }
    });
    demo.graph.activate();

    banner(&demo, &options);

    loop {
        print!("{} ", "lattice>".cyan().bold());
        std::io::stdout().flush().context("failed to flush stdout")?;

        let Some(line) = read_line().await? else {
            break;
        };
        let line = line.trim();

        match line {
            "" => continue,
            "quit" | "exit" => break,
            "help" => help(),
            "status" => print_status(&demo)?,
            "intercept on" => {
                demo.interceptor.set_enabled(true);
                println!("{}", "Tool confirmation enabled.".green());
            }
            "intercept off" => {
                demo.interceptor.set_enabled(false);
                println!("{}", "Tool confirmation disabled.".yellow());
            }
            query => {
                match execute_workflow(&demo.router, &demo.graph, query, DEFAULT_ENTRY_NODE).await
                {
                    Ok(answer) => println!("\n{answer}\n"),
                    Err(err) => eprintln!("{}", format!("Routing failed: {err}").red()),
                }
            }
        }
    }

    demo.graph.deactivate();
    println!("{}", "Goodbye.".dimmed());
    Ok(())
}

/// Terminal-backed confirmation prompt for intercepted tool calls.
struct TtyPrompt;

#[async_trait]
impl ConfirmationPrompt for TtyPrompt {
    async fn confirm(
        &self,
        tool_name: &str,
        description: &str,
        input_preview: &str,
    ) -> ConfirmationAnswer {
        let question = format!(
            "Allow the coordinator to {description}?\n  tool:  {tool_name}\n  query: {input_preview}"
        );
        let choice = tokio::task::spawn_blocking(move || {
            dialoguer::Select::new()
                .with_prompt(question)
                .items(&[
                    "Yes, this call",
                    "No",
                    "Yes to every tool this session",
                    "Yes to this tool for the session",
                ])
                .default(0)
                .interact()
        })
        .await;

        // Any prompt failure (non-tty, interrupted) denies the call.
        match choice {
            Ok(Ok(0)) => ConfirmationAnswer::Yes,
            Ok(Ok(2)) => ConfirmationAnswer::AllSession,
            Ok(Ok(3)) => ConfirmationAnswer::ThisToolSession,
            _ => ConfirmationAnswer::No,
        }
    }
}

/// Reads one line from stdin off the async runtime. `None` on EOF.
async fn read_line() -> Result<Option<String>> {
    tokio::task::spawn_blocking(|| {
        let mut line = String::new();
        match std::io::stdin().read_line(&mut line) {
            Ok(0) => Ok(None),
            Ok(_) => Ok(Some(line)),
            Err(err) => Err(err),
        }
    })
    .await
    .context("input task failed")?
    .context("failed to read from stdin")
}

fn banner(demo: &DemoGraph, options: &ShellOptions) {
    let topology = if options.hierarchical { "hierarchical" } else { "star" };
    println!();
    println!("{}", "Lattice orchestration shell".bold());
    println!("Topology: {}", topology.cyan());
    println!("Agents:");
    println!("  coordinator - Coordinator (entry node)");
    for (id, role) in demo::SPECIALISTS {
        println!("  {id} - {role}");
    }
    let gate = if demo.interceptor.is_enabled() {
        "on".green()
    } else {
        "off".yellow()
    };
    println!("Tool confirmation: {gate}");
    println!("Type a question, or 'help' for commands.");
    println!();
}

fn help() {
    println!("Commands:");
    println!("  status              graph snapshot (topology, nodes, queues, tools)");
    println!("  intercept on|off    toggle the tool confirmation gate");
    println!("  quit                leave the shell");
    println!("  anything else       routed through the coordinator");
}

fn print_status(demo: &DemoGraph) -> Result<()> {
    let status = demo.graph.status();
    let rendered = serde_yaml::to_string(&status).context("failed to render graph status")?;
    println!("{rendered}");
    Ok(())
}

fn print_event(event: &GraphEvent) {
    let line = match event {
        GraphEvent::Lifecycle { graph_id, active } => {
            format!("[graph] {graph_id} active={active}")
        }
        GraphEvent::MessageRouted { node, .. } => format!("[route] message -> {node}"),
        GraphEvent::ToolInvoked { tool, node, .. } => format!("[tool] {tool} -> {node}"),
        GraphEvent::ToolCompleted { tool, .. } => format!("[tool] {tool} completed"),
        GraphEvent::ToolFailed { tool, error, .. } => format!("[tool] {tool} failed: {error}"),
        GraphEvent::ToolDenied { tool, .. } => format!("[tool] {tool} declined"),
    };
    eprintln!("{}", line.dimmed());
}
