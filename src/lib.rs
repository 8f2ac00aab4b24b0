// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Isosweep
//!
//! Regression and benchmark harness for an external isosurface extraction
//! program. Sweeps extraction variants, vertex placement policies, isovalues
//! and datasets, measures each output mesh with external edge tools and
//! reports which variant has the lowest error per case.

pub mod cli;
pub mod errors;
pub mod harness;
pub mod report;
pub mod sweep;

pub use errors::{HarnessError, Result};
pub use harness::{ExternalRunner, HarnessConfig, ResultCollector, SystemExecutor};
pub use report::{PolicySummary, Reporter};
pub use sweep::{ConfigurationCatalog, ResultRow, ResultSet, RunMode, SweepPlan, SweepPlanner};

use std::path::PathBuf;
use tempfile::TempDir;

/// Scratch directory for intermediate mesh and line files
enum Scratch {
    Temp(TempDir),
    Kept(PathBuf),
}

impl Scratch {
    fn create(config: &HarnessConfig) -> Result<Self> {
        match config.scratch_dir {
            Some(ref dir) => {
                std::fs::create_dir_all(dir).map_err(|e| HarnessError::io(dir, e))?;
                Ok(Scratch::Kept(dir.clone()))
            }
            None if config.keep_intermediates => {
                let dir = config.output_dir.join("intermediates");
                std::fs::create_dir_all(&dir).map_err(|e| HarnessError::io(&dir, e))?;
                Ok(Scratch::Kept(dir))
            }
            None => TempDir::new()
                .map(Scratch::Temp)
                .map_err(|e| HarnessError::io(std::env::temp_dir(), e)),
        }
    }

    fn path(&self) -> PathBuf {
        match self {
            Scratch::Temp(dir) => dir.path().to_path_buf(),
            Scratch::Kept(dir) => dir.clone(),
        }
    }
}

/// Run a whole sweep against the real tools, calling `on_row(done, total, row)` per point
pub fn run_sweep<F>(
    config: &HarnessConfig,
    catalog: &ConfigurationCatalog,
    plan: &SweepPlan,
    on_row: F,
) -> Result<ResultSet>
where
    F: FnMut(usize, usize, &ResultRow),
{
    // Resolve the plan first so configuration errors never launch a tool
    plan.points(catalog)?;

    let scratch = Scratch::create(config)?;
    let executor = SystemExecutor::new(config.timeout());
    let runner = ExternalRunner::new(executor, config.tools.clone(), scratch.path())
        .keep_intermediates(config.keep_intermediates);
    runner.check_tools()?;

    ResultCollector::new(&runner, &config.data_dir).collect_with(catalog, plan, on_row)
}
