// Copyright (c) 2026 Lattice Labs
// SPDX-License-Identifier: AGPL-3.0

//! # Lattice Shell
//!
//! The `lattice` binary wraps the orchestration core in an
//! interactive shell: it assembles a demonstration graph of scripted
//! agents, wires the chosen topology, and routes every line the user
//! types through the coordinator.
//!
//! ## Commands
//!
//! - free text - routed through the graph's entry node
//! - `status` - graph snapshot (topology, nodes, queues, tools)
//! - `intercept on|off` - toggle the tool confirmation gate
//! - `help`, `quit`

use anyhow::{Context, Result};
use clap::Parser;

mod demo;
mod shell;

/// Lattice - multi-agent orchestration shell
#[derive(Parser)]
#[command(name = "lattice")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LATTICE_LOG_LEVEL", default_value = "warn")]
    log_level: String,

    /// Start with the tool confirmation gate disabled
    #[arg(long, env = "LATTICE_NO_INTERCEPT")]
    no_intercept: bool,

    /// Build the leveled hierarchy demo instead of the star
    #[arg(long)]
    hierarchy: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    init_logging(&cli.log_level)?;

    shell::run(shell::ShellOptions {
        intercept: !cli.no_intercept,
        hierarchical: cli.hierarchy,
    })
    .await
}

/// Initialize tracing subscriber for logging
fn init_logging(level: &str) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(level))
        .context("Failed to create log filter")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();

    Ok(())
}
