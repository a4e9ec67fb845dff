// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Log output setup.

use std::str::FromStr;

use anyhow::{anyhow, Result};
use tracing::Level;

/// Parse a level name such as "warn" or "DEBUG"
pub fn parse_level(name: &str) -> Result<Level> {
    Level::from_str(name.trim()).map_err(|_| anyhow!("Invalid log level: {:?}", name))
}

/// Pick the effective level: verbose mode never logs less than `debug`
pub fn effective_level(configured: Level, verbose: bool) -> Level {
    if verbose && configured < Level::DEBUG {
        Level::DEBUG
    } else {
        configured
    }
}

/// Install the global subscriber writing to stderr.
///
/// Calling this twice is harmless; the second call leaves the first
/// subscriber in place.
pub fn init(level: Level) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
