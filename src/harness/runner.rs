// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Extraction and measurement pipeline for one variant on one dataset

use log::{debug, warn};
use std::path::{Path, PathBuf};

use super::config::ToolConfig;
use super::process::{CommandExecutor, CommandSpec, ProcessOutput};
use crate::errors::{HarnessError, Result};
use crate::sweep::OptionVariant;

/// Extraction parameters shared by every run
pub const DEFAULT_EXTRACT_PARAMS: &[&str] = &["-trimesh", "-multi_isov", "-sep_pos", "-s"];

pub const MESH_EXTENSION: &str = "off";
pub const LINE_EXTENSION: &str = "line";

/// Runs extraction, edge extraction and measurement through an executor
pub struct ExternalRunner<E> {
    executor: E,
    tools: ToolConfig,
    scratch_dir: PathBuf,
    keep_intermediates: bool,
}

impl<E: CommandExecutor> ExternalRunner<E> {
    /// Tool paths such as `./isodual3D` are resolved against the current
    /// directory; every pipeline step runs inside the scratch directory.
    pub fn new(executor: E, tools: ToolConfig, scratch_dir: impl Into<PathBuf>) -> Self {
        let tools = ToolConfig {
            extract: resolve_tool(&tools.extract),
            edge: resolve_tool(&tools.edge),
            measure: resolve_tool(&tools.measure),
            ..tools
        };
        Self {
            executor,
            tools,
            scratch_dir: scratch_dir.into(),
            keep_intermediates: false,
        }
    }

    pub fn keep_intermediates(mut self, keep: bool) -> Self {
        self.keep_intermediates = keep;
        self
    }

    pub fn scratch_dir(&self) -> &Path {
        &self.scratch_dir
    }

    pub fn tools(&self) -> &ToolConfig {
        &self.tools
    }

    /// Fails with `LaunchFailed` if any configured tool cannot be started
    pub fn check_tools(&self) -> Result<()> {
        for tool in [&self.tools.extract, &self.tools.edge, &self.tools.measure] {
            match self.executor.execute(&CommandSpec::new(tool.as_str())) {
                Err(err @ HarnessError::LaunchFailed { .. }) => return Err(err),
                // Usage errors and hangs still prove the tool exists
                _ => debug!("found tool {}", tool),
            }
        }
        Ok(())
    }

    /// Measure one variant on one dataset and return the edge-count error metric
    pub fn run_one(
        &self,
        dataset_file: &Path,
        isovalue: &str,
        policy: &str,
        variant: &OptionVariant,
    ) -> Result<i64> {
        let stem = artifact_stem(dataset_file, isovalue, policy, &variant.name);
        let mesh = format!("{}.{}", stem, MESH_EXTENSION);
        let line = format!("{}.{}", stem, LINE_EXTENSION);
        let dataset = absolute(dataset_file)?;

        // Never measure a mesh left over from an earlier run
        self.remove_intermediates(&mesh, &line)?;

        let result = self.measure(&dataset, isovalue, policy, variant, &mesh, &line);

        if !self.keep_intermediates {
            if let Err(err) = self.remove_intermediates(&mesh, &line) {
                warn!("failed to clean up intermediates for {}: {}", stem, err);
            }
        }
        result
    }

    fn measure(
        &self,
        dataset: &Path,
        isovalue: &str,
        policy: &str,
        variant: &OptionVariant,
        mesh: &str,
        line: &str,
    ) -> Result<i64> {
        let extract = self.extract_command(dataset, isovalue, policy, variant, mesh);
        let output = self.executor.execute(&extract)?;
        if !output.success() {
            return Err(HarnessError::ExtractionFailed {
                status: output.status_str(),
                stderr: output.stderr_tail(),
            });
        }

        let output = self.executor.execute(&self.edge_command(mesh))?;
        if !output.success() {
            return Err(HarnessError::EdgeToolFailed {
                status: output.status_str(),
                stderr: output.stderr_tail(),
            });
        }

        let output: ProcessOutput = self.executor.execute(&self.measure_command(line))?;
        if !output.success() {
            return Err(HarnessError::MeasurementFailed {
                status: output.status_str(),
                stderr: output.stderr_tail(),
            });
        }

        parse_metric(&output.stdout)
    }

    /// `<extract> <flags> -position <policy> <defaults> -o <mesh> <isovalue> <dataset>`
    pub fn extract_command(
        &self,
        dataset: &Path,
        isovalue: &str,
        policy: &str,
        variant: &OptionVariant,
        mesh: &str,
    ) -> CommandSpec {
        CommandSpec::new(self.tools.extract.as_str())
            .args(variant.flags.iter().cloned())
            .arg("-position")
            .arg(policy)
            .args(DEFAULT_EXTRACT_PARAMS.iter().copied())
            .arg("-o")
            .arg(mesh)
            .arg(isovalue)
            .arg(dataset.to_string_lossy())
            .current_dir(&self.scratch_dir)
    }

    pub fn edge_command(&self, mesh: &str) -> CommandSpec {
        CommandSpec::new(self.tools.edge.as_str())
            .arg(self.tools.edge_param.as_str())
            .arg(mesh)
            .current_dir(&self.scratch_dir)
    }

    pub fn measure_command(&self, line: &str) -> CommandSpec {
        CommandSpec::new(self.tools.measure.as_str())
            .arg("-fp")
            .arg(line)
            .current_dir(&self.scratch_dir)
    }

    fn remove_intermediates(&self, mesh: &str, line: &str) -> Result<()> {
        for name in [mesh, line] {
            let path = self.scratch_dir.join(name);
            match std::fs::remove_file(&path) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(HarnessError::io(path, e)),
            }
        }
        Ok(())
    }
}

/// The metric is the second whitespace-separated token of the measurement output
pub fn parse_metric(stdout: &str) -> Result<i64> {
    stdout
        .split_whitespace()
        .nth(1)
        .and_then(|token| token.parse::<i64>().ok())
        .ok_or_else(|| HarnessError::MalformedMeasurementOutput(stdout.trim().to_string()))
}

/// Intermediate file stem, unique per dataset, isovalue, policy and variant
pub fn artifact_stem(dataset_file: &Path, isovalue: &str, policy: &str, variant: &str) -> String {
    let dataset = dataset_file
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "dataset".to_string());
    format!("{}_{}_{}_{}", dataset, isovalue, policy, variant).replace(['/', '\\', ' '], "_")
}

/// Bare command names stay as they are and go through `PATH`
fn resolve_tool(program: &str) -> String {
    let path = Path::new(program);
    if path.is_absolute() || path.components().count() < 2 {
        return program.to_string();
    }
    match absolute(path) {
        Ok(resolved) => resolved.to_string_lossy().into_owned(),
        Err(err) => {
            warn!("cannot resolve tool path {}: {}", program, err);
            program.to_string()
        }
    }
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().map_err(|e| HarnessError::io(".", e))?;
    Ok(cwd.join(path))
}
