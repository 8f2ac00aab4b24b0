// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Error types for the sweep harness

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Errors raised while planning, running or reporting a sweep
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("unknown dataset type: {0}")]
    UnknownDatasetType(String),

    #[error("unknown flag: {0}")]
    UnknownFlag(String),

    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    /// The executable could not be started at all.
    #[error("failed to launch `{program}`: {source}")]
    LaunchFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("extraction tool exited with {status}: {stderr}")]
    ExtractionFailed { status: String, stderr: String },

    #[error("edge tool exited with {status}: {stderr}")]
    EdgeToolFailed { status: String, stderr: String },

    #[error("measurement tool exited with {status}: {stderr}")]
    MeasurementFailed { status: String, stderr: String },

    #[error("malformed measurement output: {0:?}")]
    MalformedMeasurementOutput(String),

    #[error("`{program}` timed out after {}s", .timeout.as_secs_f64())]
    TimedOut { program: String, timeout: Duration },

    #[error("result row for {0} has no metrics")]
    EmptyMetricList(String),

    #[error("result row for {case} has {found} metrics for {expected} variants")]
    MetricCountMismatch {
        case: String,
        expected: usize,
        found: usize,
    },

    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl HarnessError {
    /// Errors that void a single sweep point but leave the sweep running.
    pub fn is_point_failure(&self) -> bool {
        matches!(
            self,
            HarnessError::ExtractionFailed { .. }
                | HarnessError::EdgeToolFailed { .. }
                | HarnessError::MeasurementFailed { .. }
                | HarnessError::MalformedMeasurementOutput(_)
                | HarnessError::TimedOut { .. }
        )
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        HarnessError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, HarnessError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_failure_classification() {
        assert!(HarnessError::MalformedMeasurementOutput("x".into()).is_point_failure());
        assert!(HarnessError::TimedOut {
            program: "isodual3D".into(),
            timeout: Duration::from_secs(1),
        }
        .is_point_failure());
        assert!(!HarnessError::UnknownDatasetType("cubez".into()).is_point_failure());
        assert!(!HarnessError::LaunchFailed {
            program: "findedge".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        }
        .is_point_failure());
    }

    #[test]
    fn test_timeout_message() {
        let err = HarnessError::TimedOut {
            program: "findedge".into(),
            timeout: Duration::from_millis(1500),
        };
        assert_eq!(err.to_string(), "`findedge` timed out after 1.5s");
    }
}
