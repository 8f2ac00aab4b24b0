// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Per-policy tallies shared by every report format

use serde::{Deserialize, Serialize};

use crate::errors::{HarnessError, Result};
use crate::sweep::{ResultSet, SkipRecord, SweepPoint};

/// One measured case with its extrema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseLine {
    pub stem: String,
    pub isovalue: String,
    pub metrics: Vec<i64>,
    pub min: i64,
    pub max: i64,
}

/// A case that produced no metrics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedCase {
    pub point: SweepPoint,
    pub skip: SkipRecord,
}

/// Everything one policy's report shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicySummary {
    pub policy: String,
    pub variants: Vec<String>,
    pub cases: Vec<CaseLine>,
    /// Per variant column, rows where it matched the row minimum (ties count for all)
    pub best_counts: Vec<usize>,
    /// Rows whose minimum error was zero
    pub zero_error_count: usize,
    pub skipped: Vec<SkippedCase>,
}

impl PolicySummary {
    pub fn num_tests(&self) -> usize {
        self.cases.len()
    }

    /// (variant name, best count) in column order
    pub fn best_by_variant(&self) -> impl Iterator<Item = (&str, usize)> {
        self.variants
            .iter()
            .map(String::as_str)
            .zip(self.best_counts.iter().copied())
    }
}

/// Smallest and largest metric of a row
pub fn row_extrema(metrics: &[i64], case: &str) -> Result<(i64, i64)> {
    let min = metrics.iter().copied().min();
    let max = metrics.iter().copied().max();
    match (min, max) {
        (Some(min), Some(max)) => Ok((min, max)),
        _ => Err(HarnessError::EmptyMetricList(case.to_string())),
    }
}

pub fn summarize_policy(results: &ResultSet, policy: &str) -> Result<PolicySummary> {
    let mut summary = PolicySummary {
        policy: policy.to_string(),
        variants: results.variants.clone(),
        cases: Vec::new(),
        best_counts: vec![0; results.variants.len()],
        zero_error_count: 0,
        skipped: Vec::new(),
    };

    for row in results.rows_for_policy(policy) {
        let metrics = match row.metrics() {
            Some(metrics) => metrics,
            None => {
                if let Some(skip) = row.skip() {
                    summary.skipped.push(SkippedCase {
                        point: row.point.clone(),
                        skip: skip.clone(),
                    });
                }
                continue;
            }
        };

        let case = row.point.to_string();
        let (min, max) = row_extrema(metrics, &case)?;
        if metrics.len() != summary.variants.len() {
            return Err(HarnessError::MetricCountMismatch {
                case,
                expected: summary.variants.len(),
                found: metrics.len(),
            });
        }
        if min == 0 {
            summary.zero_error_count += 1;
        }
        for (count, &metric) in summary.best_counts.iter_mut().zip(metrics) {
            if metric == min {
                *count += 1;
            }
        }

        summary.cases.push(CaseLine {
            stem: row.point.stem(),
            isovalue: row.point.isovalue.clone(),
            metrics: metrics.to_vec(),
            min,
            max,
        });
    }

    Ok(summary)
}

/// One summary per policy present in the rows, in first-appearance order
pub fn summarize(results: &ResultSet) -> Result<Vec<PolicySummary>> {
    results
        .policies()
        .into_iter()
        .map(|policy| summarize_policy(results, policy))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sweep::{ResultRow, RunMode};

    fn point(iso: &str, policy: &str) -> SweepPoint {
        SweepPoint {
            dataset_type: "annulus".into(),
            instance: 1,
            isovalue: iso.into(),
            policy: policy.into(),
        }
    }

    fn results(rows: Vec<ResultRow>) -> ResultSet {
        let mut set = ResultSet::new(RunMode::Short, vec!["lnd".into(), "lnd2".into()]);
        for row in rows {
            set.push(row);
        }
        set
    }

    #[test]
    fn test_min_max_and_best() {
        let set = results(vec![ResultRow::measured(point("10.1", "gradCD"), vec![5, 3])]);
        let summary = summarize_policy(&set, "gradCD").unwrap();

        assert_eq!(summary.cases[0].min, 3);
        assert_eq!(summary.cases[0].max, 5);
        assert_eq!(summary.best_counts, vec![0, 1]);
        assert_eq!(summary.zero_error_count, 0);
    }

    #[test]
    fn test_ties_count_for_every_column() {
        let set = results(vec![
            ResultRow::measured(point("10.1", "gradCD"), vec![2, 2]),
            ResultRow::measured(point("10.2", "gradCD"), vec![1, 4]),
        ]);
        let summary = summarize_policy(&set, "gradCD").unwrap();
        assert_eq!(summary.best_counts, vec![2, 1]);
        assert!(summary.best_counts.iter().sum::<usize>() >= summary.num_tests());
    }

    #[test]
    fn test_zero_error_counted_once() {
        let set = results(vec![ResultRow::measured(point("10.1", "gradCD"), vec![0, 4])]);
        let summary = summarize_policy(&set, "gradCD").unwrap();
        assert_eq!(summary.zero_error_count, 1);
        assert_eq!(summary.best_counts, vec![1, 0]);
    }

    #[test]
    fn test_skipped_rows_are_reported_not_tallied() {
        let set = results(vec![
            ResultRow::measured(point("10.1", "gradCD"), vec![1, 2]),
            ResultRow::skipped(point("10.2", "gradCD"), "lnd2", "timed out"),
        ]);
        let summary = summarize_policy(&set, "gradCD").unwrap();
        assert_eq!(summary.num_tests(), 1);
        assert_eq!(summary.skipped.len(), 1);
        assert_eq!(summary.skipped[0].skip.variant, "lnd2");
    }

    #[test]
    fn test_empty_metric_list() {
        assert!(matches!(
            row_extrema(&[], "annulus1.nrrd"),
            Err(HarnessError::EmptyMetricList(_))
        ));
        let set = results(vec![ResultRow::measured(point("10.1", "gradCD"), vec![])]);
        assert!(summarize_policy(&set, "gradCD").is_err());
    }

    #[test]
    fn test_metric_count_must_match_variants() {
        let set = results(vec![ResultRow::measured(point("10.1", "gradCD"), vec![5, 3])]);
        let mut json: serde_json::Value = serde_json::to_value(&set).unwrap();
        json["rows"][0]["outcome"]["metrics"] = serde_json::json!([5]);
        let edited: ResultSet = serde_json::from_value(json).unwrap();

        let err = summarize_policy(&edited, "gradCD").unwrap_err();
        assert!(matches!(
            err,
            HarnessError::MetricCountMismatch { expected: 2, found: 1, .. }
        ));
        assert!(summarize(&edited).is_err());
    }

    #[test]
    fn test_summarize_filters_by_policy() {
        let set = results(vec![
            ResultRow::measured(point("10.1", "gradCD"), vec![1, 2]),
            ResultRow::measured(point("10.1", "gradNS"), vec![3, 2]),
            ResultRow::measured(point("10.2", "gradCD"), vec![4, 2]),
        ]);
        let summaries = summarize(&set).unwrap();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].policy, "gradCD");
        assert_eq!(summaries[0].num_tests(), 2);
        assert_eq!(summaries[1].best_counts, vec![0, 1]);
    }
}
