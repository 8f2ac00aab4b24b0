// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CLI subsystem for the sweep harness

pub mod args;
pub mod reporter;

pub use args::{normalize_legacy_flags, unknown_flag, CliArgs};
pub use reporter::Reporter;
