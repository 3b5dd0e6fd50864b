// SPDX-FileCopyrightText: 2026 LifeOS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `lifeos shell` command implementation.
//!
//! Launches an interactive REPL with a colored prompt and readline
//! history. Each line runs one full turn through the orchestrator; the
//! conversation id is derived from the user id so the session window
//! survives restarts.

use colored::Colorize;
use lifeos_config::LifeosConfig;
use lifeos_core::LifeosError;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::info;

use crate::assemble::build_orchestrator;

/// Runs the interactive REPL until `/quit` or EOF.
pub async fn run_shell(config: LifeosConfig, user: &str) -> Result<(), LifeosError> {
    let orchestrator = build_orchestrator(&config)?;
    let conversation_id = format!("cli-{user}");

    let mut rl = DefaultEditor::new()
        .map_err(|e| LifeosError::Internal(format!("failed to initialize readline: {e}")))?;

    println!("{}", "lifeos shell".bold().green());
    println!("Type {} to exit.\n", "/quit".yellow());
    info!(user, conversation_id, "shell session started");

    let prompt = format!("{}> ", "lifeos".green());
    loop {
        match rl.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed == "/quit" || trimmed == "/exit" {
                    break;
                }
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(&line);

                let reply = orchestrator
                    .handle_turn(&conversation_id, user, trimmed)
                    .await;
                println!("{reply}\n");
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                return Err(LifeosError::Internal(format!("readline failed: {e}")));
            }
        }
    }

    println!("{}", "Adiós.".dimmed());
    Ok(())
}
