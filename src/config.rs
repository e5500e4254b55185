//! Configuration management for stax host applications.
//!
//! This module handles the layered configuration system with the following
//! precedence:
//! 1. Command-line arguments (highest priority)
//! 2. Environment variables
//! 3. JSON config file
//! 4. Default values (lowest priority)

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{Result, StaxError};

/// Command-line arguments for the inspect_stack tool
#[derive(Parser, Debug)]
#[command(name = "inspect_stack")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the data file to inspect
    pub file: PathBuf,

    /// Load the file and report the cube shape, not just identify it
    #[arg(short, long)]
    pub load: bool,

    /// Selections to load, as `entry` or `entry:channel` (repeatable)
    #[arg(short, long)]
    pub selection: Vec<String>,

    /// Path to JSON configuration file
    #[arg(short, long, env = "STAX_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "STAX_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

/// Host application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Titles of built-in providers to register (None = all)
    #[serde(default)]
    pub enabled_providers: Option<Vec<String>>,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Config {
    /// Load configuration from all sources with proper precedence
    pub fn load(args: &Args) -> Result<Self> {
        // Start with defaults
        let mut config = Config::default();

        // Load from JSON file if provided
        if let Some(config_path) = &args.config {
            let json_config = Self::load_from_file(config_path)?;
            config.merge(json_config);
        }

        // Override with command-line arguments
        config.log_level = args.log_level.clone();

        Ok(config)
    }

    /// Load configuration from a JSON file
    fn load_from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.enabled_providers.is_some() {
            self.enabled_providers = other.enabled_providers;
        }
        self.log_level = other.log_level;
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(StaxError::Config {
                    message: format!(
                        "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                        self.log_level
                    ),
                });
            }
        }

        if let Some(providers) = &self.enabled_providers {
            if providers.is_empty() {
                return Err(StaxError::Config {
                    message: "enabled_providers must name at least one provider".to_string(),
                });
            }
        }

        Ok(())
    }

    /// Whether a provider title is enabled by this configuration
    pub fn provider_enabled(&self, title: &str) -> bool {
        match &self.enabled_providers {
            Some(enabled) => enabled.iter().any(|t| t == title),
            None => true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            enabled_providers: None,
            log_level: default_log_level(),
        }
    }
}

// Default value functions for serde
fn default_log_level() -> String {
    "info".to_string()
}
