// SPDX-FileCopyrightText: 2026 LifeOS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the LifeOS agent.
//!
//! Provides TOML configuration parsing with strict validation
//! (`deny_unknown_fields`), XDG file hierarchy lookup, environment variable
//! overrides, and built-in persona definitions.
//!
//! # Usage
//!
//! ```no_run
//! use lifeos_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("Agent name: {}", config.agent.name);
//! ```

pub mod loader;
pub mod model;
pub mod persona;
pub mod validation;

pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::{
    AgentConfig, GeminiConfig, IdentityConfig, LifeosConfig, MemoryConfig, RouterConfig,
    SearchConfig, SessionBackendKind, SessionConfig,
};
pub use persona::{default_personas, ExecutionMode, PersonaDefinition};

/// Load configuration from the XDG hierarchy and validate it.
///
/// This is the high-level entry point: loads config from TOML files and env
/// vars via Figment, then runs post-deserialization validation.
pub fn load_and_validate() -> Result<LifeosConfig, Vec<String>> {
    match loader::load_config() {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(vec![err.to_string()]),
    }
}

/// Load configuration from an inline TOML string and validate it.
///
/// Useful for testing and explicit configuration.
pub fn load_and_validate_str(toml_content: &str) -> Result<LifeosConfig, Vec<String>> {
    match loader::load_config_from_str(toml_content) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(vec![err.to_string()]),
    }
}
