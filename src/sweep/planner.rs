// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Sweep planning per run mode

use serde::{Deserialize, Serialize};
use std::ops::Range;

use super::catalog::ConfigurationCatalog;
use super::types::{RunMode, SweepPoint};
use crate::errors::Result;

pub const DEFAULT_DATASET_TYPES: &[&str] = &["annulus"];

pub const SHORT_POLICIES: &[&str] = &["gradCD", "gradEC", "gradNS", "gradCDdup", "gradIEDir"];

/// Policies appended to the short set in full mode
pub const FULL_EXTRA_POLICIES: &[&str] = &["gradES", "gradIE", "gradIES", "gradCS"];

pub const SHORT_INSTANCE_COUNT: u32 = 3;
pub const FULL_INSTANCE_COUNT: u32 = 50;

/// Axes of one sweep
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepPlan {
    pub mode: RunMode,
    pub dataset_types: Vec<String>,
    pub policies: Vec<String>,
    pub instance_count: u32,
}

impl SweepPlan {
    pub fn with_dataset_types(mut self, dataset_types: Vec<String>) -> Self {
        self.dataset_types = dataset_types;
        self
    }

    /// Instance indices; the upper bound is exclusive, so a count of N runs N-1 instances.
    pub fn instances(&self) -> Range<u32> {
        1..self.instance_count
    }

    /// Every sweep point in type, instance, isovalue, policy order
    pub fn points(&self, catalog: &ConfigurationCatalog) -> Result<Vec<SweepPoint>> {
        let mut points = Vec::new();
        for dataset_type in &self.dataset_types {
            let isovalues = catalog.isovalues_for(dataset_type)?;
            for instance in self.instances() {
                for isovalue in isovalues {
                    for policy in &self.policies {
                        points.push(SweepPoint {
                            dataset_type: dataset_type.clone(),
                            instance,
                            isovalue: isovalue.clone(),
                            policy: policy.clone(),
                        });
                    }
                }
            }
        }
        Ok(points)
    }
}

/// Maps a run mode to its sweep axes
pub struct SweepPlanner;

impl SweepPlanner {
    pub fn plan(mode: RunMode) -> SweepPlan {
        let dataset_types = to_owned(DEFAULT_DATASET_TYPES);
        match mode {
            RunMode::Short => SweepPlan {
                mode,
                dataset_types,
                policies: to_owned(SHORT_POLICIES),
                instance_count: SHORT_INSTANCE_COUNT,
            },
            RunMode::Full => {
                let mut policies = to_owned(SHORT_POLICIES);
                policies.extend(to_owned(FULL_EXTRA_POLICIES));
                SweepPlan {
                    mode,
                    dataset_types,
                    policies,
                    instance_count: FULL_INSTANCE_COUNT,
                }
            }
        }
    }
}

fn to_owned(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::HarnessError;

    #[test]
    fn test_short_plan() {
        let plan = SweepPlanner::plan(RunMode::Short);
        assert_eq!(plan.dataset_types, vec!["annulus"]);
        assert_eq!(plan.policies.len(), 5);
        assert_eq!(plan.instance_count, 3);
        assert_eq!(plan.instances().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_full_plan_extends_policies() {
        let short = SweepPlanner::plan(RunMode::Short);
        let full = SweepPlanner::plan(RunMode::Full);
        assert_eq!(full.instance_count, 50);
        assert_eq!(full.instances().len(), 49);
        assert!(full.policies.len() > short.policies.len());
        assert_eq!(&full.policies[..short.policies.len()], &short.policies[..]);
    }

    #[test]
    fn test_points_nested_order() {
        let catalog = ConfigurationCatalog::builtin();
        let plan = SweepPlanner::plan(RunMode::Short);
        let points = plan.points(&catalog).unwrap();

        // 2 instances x 5 isovalues x 5 policies
        assert_eq!(points.len(), 50);
        assert_eq!(points[0].stem(), "annulus1");
        assert_eq!(points[0].isovalue, "10.1");
        assert_eq!(points[0].policy, "gradCD");
        assert_eq!(points[1].policy, "gradEC");
        assert_eq!(points[5].isovalue, "10.2");
        assert_eq!(points[25].stem(), "annulus2");
    }

    #[test]
    fn test_points_unknown_type() {
        let catalog = ConfigurationCatalog::builtin();
        let plan = SweepPlanner::plan(RunMode::Short).with_dataset_types(vec!["cubez".into()]);
        assert!(matches!(
            plan.points(&catalog),
            Err(HarnessError::UnknownDatasetType(_))
        ));
    }
}
