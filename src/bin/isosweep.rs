// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Isosweep CLI
//! Runs the variant sweep and writes per-position reports

use anyhow::{Context, Result};
use isosweep::cli::{unknown_flag, CliArgs, Reporter};
use isosweep::{report, ConfigurationCatalog, HarnessConfig, SweepPlanner};
use std::time::Instant;

fn main() -> Result<()> {
    let args = match CliArgs::try_parse_args(std::env::args_os()) {
        Ok(args) => args,
        Err(err) => {
            if let Some(flag_err) = unknown_flag(&err) {
                Reporter::report_error(&flag_err.to_string());
            }
            err.exit();
        }
    };

    init_logging(args.verbose);

    let mut config = HarnessConfig::load(args.config.as_deref())?;
    args.apply_to(&mut config);

    let catalog = match args.catalog {
        Some(ref path) => ConfigurationCatalog::from_file(path)?,
        None => ConfigurationCatalog::builtin(),
    };

    let mut plan = SweepPlanner::plan(args.mode());
    if let Some(ref types) = args.types {
        plan = plan.with_dataset_types(types.clone());
    }
    // Unknown dataset types are fatal before anything runs
    let total = plan.points(&catalog)?.len();

    Reporter::report_plan(&plan, &catalog, &config);
    if !config.data_dir.is_dir() {
        Reporter::report_warning(&format!(
            "dataset directory {} does not exist",
            config.data_dir.display()
        ));
    }

    let progress = config.verbose.then(|| Reporter::progress_bar(total));
    let start = Instant::now();

    let results = isosweep::run_sweep(&config, &catalog, &plan, |_, _, row| {
        if let Some(ref pb) = progress {
            pb.set_message(row.point.to_string());
            pb.inc(1);
        }
    })
    .context("Sweep aborted")?;

    if let Some(pb) = progress {
        pb.finish_with_message("Sweep complete");
    }

    let written = report::Reporter::write_all(&results, &config.output_dir)
        .context("Failed to write reports")?;
    let summaries = report::summarize(&results)?;

    Reporter::report_summaries(&summaries, start.elapsed());
    Reporter::report_outputs(&written);

    let skipped = results.skipped_count();
    if skipped > 0 {
        Reporter::report_warning(&format!(
            "{} of {} cases were skipped, see the SKIPPED CASES section of each report",
            skipped,
            results.rows.len()
        ));
    } else {
        Reporter::success(&format!("{} cases measured", results.rows.len()));
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .try_init();
}
