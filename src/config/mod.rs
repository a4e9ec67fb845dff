// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Configuration system for tbconv.
//!
//! An optional YAML or TOML file can override the constants written into
//! TB-3 files and the log level. Every key has a default, so an empty file
//! is a valid configuration.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::format::{WriterOptions, DEFAULT_BANK, DEFAULT_GATE_WIDTH, DEFAULT_PATCH};

/// Root configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ConvertConfig {
    /// Echo input and output files to stdout
    #[serde(default)]
    pub print: bool,
    /// Output file constants
    #[serde(default)]
    pub output: OutputConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ConvertConfig {
    /// Load a configuration file, choosing the parser by extension
    /// (`.toml`, otherwise YAML)
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml(&contents),
            Some("yaml") | Some("yml") | None => Self::from_yaml(&contents),
            Some(other) => bail!("Unsupported config file extension: {:?}", other),
        }
    }

    /// Parse a configuration from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // serde_yaml rejects an empty document for a struct
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).context("Failed to parse YAML configuration")
    }

    /// Parse a configuration from TOML string
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("Failed to parse TOML configuration")
    }

    /// Serialize to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize configuration to YAML")
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string(self).context("Failed to serialize configuration to TOML")
    }

    /// Writer constants taken from this configuration
    pub fn writer_options(&self) -> WriterOptions {
        WriterOptions::from(&self.output)
    }
}

/// Constants written into TB-3 files
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    /// `GATE_WIDTH(..)` value
    #[serde(default = "default_gate_width")]
    pub gate_width: i32,
    /// `BANK(..)` value
    #[serde(default = "default_bank")]
    pub bank: i32,
    /// `PATCH(..)` value
    #[serde(default = "default_patch")]
    pub patch: i32,
}

fn default_gate_width() -> i32 {
    DEFAULT_GATE_WIDTH
}
fn default_bank() -> i32 {
    DEFAULT_BANK
}
fn default_patch() -> i32 {
    DEFAULT_PATCH
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            gate_width: default_gate_width(),
            bank: default_bank(),
            patch: default_patch(),
        }
    }
}

impl From<&OutputConfig> for WriterOptions {
    fn from(config: &OutputConfig) -> Self {
        WriterOptions {
            gate_width: config.gate_width,
            bank: config.bank,
            patch: config.patch,
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Maximum level: "error", "warn", "info", "debug" or "trace"
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}
