// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Drives the runner over every sweep point

use log::{info, warn};
use std::path::{Path, PathBuf};

use super::process::CommandExecutor;
use super::runner::ExternalRunner;
use crate::errors::Result;
use crate::sweep::{ConfigurationCatalog, ResultRow, ResultSet, SweepPlan, SweepPoint};

/// Collects one result row per sweep point
pub struct ResultCollector<'r, E> {
    runner: &'r ExternalRunner<E>,
    data_dir: PathBuf,
}

impl<'r, E: CommandExecutor> ResultCollector<'r, E> {
    pub fn new(runner: &'r ExternalRunner<E>, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            runner,
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn collect(&self, catalog: &ConfigurationCatalog, plan: &SweepPlan) -> Result<ResultSet> {
        self.collect_with(catalog, plan, |_, _, _| {})
    }

    /// Like `collect`, calling `on_row(done, total, row)` after each point.
    ///
    /// The catalog and plan are fully resolved before the first subprocess
    /// runs, so an unknown dataset type costs nothing.
    pub fn collect_with<F>(
        &self,
        catalog: &ConfigurationCatalog,
        plan: &SweepPlan,
        mut on_row: F,
    ) -> Result<ResultSet>
    where
        F: FnMut(usize, usize, &ResultRow),
    {
        catalog.validate()?;
        let points = plan.points(catalog)?;
        let total = points.len();
        let mut results = ResultSet::new(plan.mode, catalog.variant_names());

        let mut current_file = String::new();
        for (i, point) in points.into_iter().enumerate() {
            if point.file_name() != current_file {
                current_file = point.file_name();
                info!("Running test on {}", current_file);
            }

            let row = self.collect_point(catalog, point)?;
            on_row(i + 1, total, &row);
            results.push(row);
        }

        if results.skipped_count() > 0 {
            warn!(
                "{} of {} sweep points were skipped",
                results.skipped_count(),
                total
            );
        }
        Ok(results)
    }

    /// Run every variant on one point; a per-point failure yields a skipped row
    fn collect_point(&self, catalog: &ConfigurationCatalog, point: SweepPoint) -> Result<ResultRow> {
        let dataset = point.dataset_path(&self.data_dir);
        let mut metrics = Vec::with_capacity(catalog.variants().len());

        for variant in catalog.variants() {
            match self
                .runner
                .run_one(&dataset, &point.isovalue, &point.policy, variant)
            {
                Ok(metric) => metrics.push(metric),
                Err(err) if err.is_point_failure() => {
                    warn!("skipping {} with variant {}: {}", point, variant.name, err);
                    return Ok(ResultRow::skipped(point, variant.name.as_str(), err.to_string()));
                }
                Err(err) => return Err(err),
            }
        }

        Ok(ResultRow::measured(point, metrics))
    }
}
