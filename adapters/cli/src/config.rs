//! Loading simulation parameters from TOML.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use rover_core::SimulationConfig;

/// Reads the configuration file when one is given, otherwise returns defaults.
pub(crate) fn load(path: Option<&Path>) -> Result<SimulationConfig> {
    let Some(path) = path else {
        return Ok(SimulationConfig::default());
    };

    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    parse(&contents).with_context(|| format!("failed to load config file {}", path.display()))
}

pub(crate) fn parse(contents: &str) -> Result<SimulationConfig> {
    toml::from_str(contents).context("failed to parse simulation config toml contents")
}
