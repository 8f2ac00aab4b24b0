// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Sweep execution against the external extraction and measurement tools

pub mod collector;
pub mod config;
pub mod process;
pub mod runner;

pub use collector::ResultCollector;
pub use config::{HarnessConfig, ToolConfig};
pub use process::{CommandExecutor, CommandSpec, ProcessOutput, SystemExecutor};
pub use runner::{parse_metric, ExternalRunner};
