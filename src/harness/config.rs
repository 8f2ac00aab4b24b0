// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Harness configuration: tool names, timeouts and directories

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_CONFIG_FILE: &str = "isosweep.toml";

/// External tool command names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// Isosurface extraction program
    pub extract: String,
    /// Edge extraction program, mesh to line file
    pub edge: String,
    /// Edge-count measurement program
    pub measure: String,
    /// Numeric parameter handed to the edge tool
    pub edge_param: String,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            extract: "isodual3D".to_string(),
            edge: "findedge".to_string(),
            measure: "findEdgeCount".to_string(),
            edge_param: "140".to_string(),
        }
    }
}

/// Harness configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// Directory holding `<type><n>.nrrd` datasets
    pub data_dir: PathBuf,
    /// Directory receiving the reports
    pub output_dir: PathBuf,
    /// Timeout for each subprocess, in seconds
    pub timeout_secs: u64,
    /// Directory for mesh and line files; a temporary directory when unset
    pub scratch_dir: Option<PathBuf>,
    /// Keep mesh and line files after measuring them
    pub keep_intermediates: bool,
    pub verbose: bool,
    /// Serialized as the trailing `[tools]` table
    pub tools: ToolConfig,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            tools: ToolConfig::default(),
            data_dir: PathBuf::from("testData2/"),
            output_dir: PathBuf::from("."),
            timeout_secs: 300,
            scratch_dir: None,
            keep_intermediates: false,
            verbose: false,
        }
    }
}

impl HarnessConfig {
    /// Load configuration from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config: HarnessConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;
        Ok(config)
    }

    /// Load `path` if given, else `isosweep.toml` if present, else defaults; then apply env overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => Self::from_file(DEFAULT_CONFIG_FILE)?,
            None => Self::default(),
        };
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply `ISOSWEEP_*` overrides read through `lookup`
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(tool) = lookup("ISOSWEEP_EXTRACT_TOOL") {
            self.tools.extract = tool;
        }
        if let Some(tool) = lookup("ISOSWEEP_EDGE_TOOL") {
            self.tools.edge = tool;
        }
        if let Some(tool) = lookup("ISOSWEEP_MEASURE_TOOL") {
            self.tools.measure = tool;
        }
        if let Some(secs) = lookup("ISOSWEEP_TIMEOUT_SECS") {
            self.timeout_secs = secs
                .parse()
                .with_context(|| format!("ISOSWEEP_TIMEOUT_SECS is not a number: {:?}", secs))?;
        }
        if let Some(dir) = lookup("ISOSWEEP_OUTPUT_DIR") {
            self.output_dir = PathBuf::from(dir);
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))?;
        Ok(())
    }
}
