// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Report generation (text, CSV and JSON)

pub mod csv;
pub mod summary;
pub mod text;

pub use summary::{row_extrema, summarize, summarize_policy, CaseLine, PolicySummary, SkippedCase};

use log::info;
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::{HarnessError, Result};
use crate::sweep::ResultSet;

pub const JSON_REPORT: &str = "isotest_results.json";

/// `isotest_<policy>.txt`
pub fn text_report_name(policy: &str) -> String {
    format!("isotest_{}.txt", policy)
}

/// `isotest_csv<policy>.txt`
pub fn csv_report_name(policy: &str) -> String {
    format!("isotest_csv{}.txt", policy)
}

/// Report writer
pub struct Reporter;

impl Reporter {
    /// One fixed-width table per policy; returns the files written
    pub fn write_text_report(results: &ResultSet, dir: &Path) -> Result<Vec<PathBuf>> {
        Self::write_per_policy(results, dir, text_report_name, text::render)
    }

    /// One comma-delimited table per policy; returns the files written
    pub fn write_csv_report(results: &ResultSet, dir: &Path) -> Result<Vec<PathBuf>> {
        Self::write_per_policy(results, dir, csv_report_name, csv::render)
    }

    /// Write JSON dump of the whole result set
    pub fn write_json_report(results: &ResultSet, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(results)?;
        fs::write(path, json).map_err(|e| HarnessError::io(path, e))
    }

    /// CSV, text and JSON reports into `dir`
    pub fn write_all(results: &ResultSet, dir: &Path) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(dir).map_err(|e| HarnessError::io(dir, e))?;

        let mut written = Self::write_csv_report(results, dir)?;
        written.extend(Self::write_text_report(results, dir)?);

        let json_path = dir.join(JSON_REPORT);
        Self::write_json_report(results, &json_path)?;
        written.push(json_path);

        Ok(written)
    }

    fn write_per_policy<N, R>(results: &ResultSet, dir: &Path, name: N, render: R) -> Result<Vec<PathBuf>>
    where
        N: Fn(&str) -> String,
        R: Fn(&PolicySummary) -> String,
    {
        let mut written = Vec::new();
        for summary in summarize(results)? {
            let path = dir.join(name(summary.policy.as_str()));
            fs::write(&path, render(&summary)).map_err(|e| HarnessError::io(&path, e))?;
            info!("wrote {}", path.display());
            written.push(path);
        }
        Ok(written)
    }
}
