// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Command line arguments

use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

use crate::errors::HarnessError;
use crate::harness::HarnessConfig;
use crate::sweep::RunMode;

/// Single-dash spellings accepted for compatibility with older scripts
const LEGACY_FLAGS: &[(&str, &str)] = &[
    ("-short_test", "--short-test"),
    ("-full_test", "--full-test"),
    ("-loc", "--loc"),
    ("-help", "--help"),
];

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "isosweep")]
#[command(about = "Parameter sweep and error report for isosurface extraction variants", long_about = None)]
#[command(version)]
pub struct CliArgs {
    /// Run the short test: few instances, base placement policies (default)
    #[arg(long, conflicts_with = "full_test")]
    pub short_test: bool,

    /// Run the full test: many instances, extended placement policies
    #[arg(long)]
    pub full_test: bool,

    /// Directory holding the input datasets [default: testData2/]
    #[arg(long, value_name = "DIR")]
    pub loc: Option<PathBuf>,

    /// Directory receiving the reports
    #[arg(short, long, value_name = "DIR")]
    pub out: Option<PathBuf>,

    /// Harness configuration file (TOML)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Catalog of variants and dataset types (TOML)
    #[arg(long, value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Dataset types to sweep, comma-separated
    #[arg(long, value_delimiter = ',', value_name = "TYPES")]
    pub types: Option<Vec<String>>,

    /// Timeout for each external tool invocation, in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Keep mesh and line files in the scratch directory
    #[arg(long)]
    pub keep_intermediates: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl CliArgs {
    /// Parse after rewriting legacy single-dash flags
    pub fn try_parse_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::try_parse_from(normalize_legacy_flags(args))
    }

    pub fn mode(&self) -> RunMode {
        if self.full_test {
            RunMode::Full
        } else {
            RunMode::Short
        }
    }

    /// Command-line values take precedence over file and environment
    pub fn apply_to(&self, config: &mut HarnessConfig) {
        if let Some(ref loc) = self.loc {
            config.data_dir = loc.clone();
        }
        if let Some(ref out) = self.out {
            config.output_dir = out.clone();
        }
        if let Some(timeout) = self.timeout {
            config.timeout_secs = timeout;
        }
        if self.keep_intermediates {
            config.keep_intermediates = true;
        }
        if self.verbose {
            config.verbose = true;
        }
    }
}

pub fn normalize_legacy_flags<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    args.into_iter()
        .map(|arg| {
            let arg: OsString = arg.into();
            LEGACY_FLAGS
                .iter()
                .find(|(legacy, _)| arg == *legacy)
                .map(|(_, modern)| OsString::from(modern))
                .unwrap_or(arg)
        })
        .collect()
}

/// The `UnknownFlag` behind a clap parse error, if that is what it was
pub fn unknown_flag(err: &clap::Error) -> Option<HarnessError> {
    if err.kind() != ErrorKind::UnknownArgument {
        return None;
    }
    match err.get(ContextKind::InvalidArg) {
        Some(ContextValue::String(flag)) => Some(HarnessError::UnknownFlag(flag.clone())),
        _ => Some(HarnessError::UnknownFlag(String::from("<unknown>"))),
    }
}
