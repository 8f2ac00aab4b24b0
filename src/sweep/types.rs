// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Sweep data model

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Extraction-tool flags that select one algorithm variant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionVariant {
    pub name: String,
    pub flags: Vec<String>,
}

/// Shape family and the isovalues that make sense for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetType {
    pub name: String,
    pub isovalues: Vec<String>,
}

/// Run size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    #[default]
    Short,
    Full,
}

impl RunMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunMode::Short => "short",
            RunMode::Full => "full",
        }
    }
}

/// One test case of the sweep
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SweepPoint {
    pub dataset_type: String,
    pub instance: u32,
    pub isovalue: String,
    pub policy: String,
}

impl SweepPoint {
    /// Dataset stem, e.g. `annulus2`
    pub fn stem(&self) -> String {
        format!("{}{}", self.dataset_type, self.instance)
    }

    /// Dataset file name, e.g. `annulus2.nrrd`
    pub fn file_name(&self) -> String {
        format!("{}.nrrd", self.stem())
    }

    pub fn dataset_path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(self.file_name())
    }
}

impl std::fmt::Display for SweepPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} iso={} position={}",
            self.file_name(),
            self.isovalue,
            self.policy
        )
    }
}

/// Why a sweep point produced no metrics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkipRecord {
    pub variant: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum RowOutcome {
    /// One metric per registered variant, in registration order
    Measured { metrics: Vec<i64> },
    Skipped(SkipRecord),
}

/// Outcome of every variant on one sweep point
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRow {
    pub point: SweepPoint,
    pub outcome: RowOutcome,
}

impl ResultRow {
    pub fn measured(point: SweepPoint, metrics: Vec<i64>) -> Self {
        Self {
            point,
            outcome: RowOutcome::Measured { metrics },
        }
    }

    pub fn skipped(point: SweepPoint, variant: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            point,
            outcome: RowOutcome::Skipped(SkipRecord {
                variant: variant.into(),
                reason: reason.into(),
            }),
        }
    }

    pub fn metrics(&self) -> Option<&[i64]> {
        match &self.outcome {
            RowOutcome::Measured { metrics } => Some(metrics),
            RowOutcome::Skipped(_) => None,
        }
    }

    pub fn skip(&self) -> Option<&SkipRecord> {
        match &self.outcome {
            RowOutcome::Skipped(skip) => Some(skip),
            RowOutcome::Measured { .. } => None,
        }
    }
}

/// Everything a sweep produced, in collection order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultSet {
    pub timestamp: String,
    pub mode: RunMode,
    /// Report column order
    pub variants: Vec<String>,
    pub rows: Vec<ResultRow>,
}

impl ResultSet {
    pub fn new(mode: RunMode, variants: Vec<String>) -> Self {
        Self {
            timestamp: Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            mode,
            variants,
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, row: ResultRow) {
        self.rows.push(row);
    }

    /// Distinct policies in first-appearance order
    pub fn policies(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for row in &self.rows {
            if !seen.contains(&row.point.policy.as_str()) {
                seen.push(row.point.policy.as_str());
            }
        }
        seen
    }

    pub fn rows_for_policy<'a>(&'a self, policy: &'a str) -> impl Iterator<Item = &'a ResultRow> + 'a {
        self.rows.iter().filter(move |row| row.point.policy == policy)
    }

    pub fn skipped_count(&self) -> usize {
        self.rows.iter().filter(|row| row.skip().is_some()).count()
    }
}
