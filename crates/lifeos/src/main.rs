// SPDX-FileCopyrightText: 2026 LifeOS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! LifeOS - a multi-persona personal agent.
//!
//! This is the binary entry point. It loads configuration, wires the
//! identity resolver, model chain, memory service, tool catalog, and
//! session store into an [`lifeos_agent::Orchestrator`], then hands
//! control to the interactive shell.

mod assemble;
mod shell;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use lifeos_config::LifeosConfig;

/// LifeOS - a multi-persona personal agent.
#[derive(Parser, Debug)]
#[command(name = "lifeos", version, about, long_about = None)]
struct Cli {
    /// Explicit config file path (overrides the XDG hierarchy).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Launch an interactive REPL session (the default).
    Shell {
        /// External user id the shell speaks as.
        #[arg(long, default_value = "local")]
        user: String,
    },
    /// Print the resolved configuration.
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(errors) => {
            eprintln!("lifeos: configuration is invalid:");
            for error in &errors {
                eprintln!("  - {error}");
            }
            std::process::exit(1);
        }
    };

    init_tracing(&config.agent.log_level);

    let result = match cli.command {
        Some(Commands::Config) => {
            print_config(&config);
            Ok(())
        }
        Some(Commands::Shell { user }) => shell::run_shell(config, &user).await,
        None => shell::run_shell(config, "local").await,
    };

    if let Err(e) = result {
        eprintln!("lifeos: {e}");
        std::process::exit(1);
    }
}

fn load_config(path: Option<&std::path::Path>) -> Result<LifeosConfig, Vec<String>> {
    match path {
        Some(path) => {
            let config = lifeos_config::load_config_from_path(path)
                .map_err(|e| vec![e.to_string()])?;
            lifeos_config::validation::validate_config(&config)?;
            Ok(config)
        }
        None => lifeos_config::load_and_validate(),
    }
}

fn print_config(config: &LifeosConfig) {
    match toml::to_string_pretty(config) {
        Ok(rendered) => println!("{rendered}"),
        Err(e) => eprintln!("lifeos: failed to render config: {e}"),
    }
}

/// Initializes the tracing subscriber with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("lifeos={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
