// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Sweep definition: what gets run

pub mod catalog;
pub mod planner;
pub mod types;

pub use catalog::ConfigurationCatalog;
pub use planner::{SweepPlan, SweepPlanner};
pub use types::{
    DatasetType, OptionVariant, ResultRow, ResultSet, RowOutcome, RunMode, SkipRecord, SweepPoint,
};
