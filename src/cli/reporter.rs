// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CLI output reporter with colored formatting

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;

use crate::harness::HarnessConfig;
use crate::report::PolicySummary;
use crate::sweep::{ConfigurationCatalog, SweepPlan};

/// CLI reporter for formatted output
pub struct Reporter;

impl Reporter {
    /// Print what is about to run
    pub fn report_plan(plan: &SweepPlan, catalog: &ConfigurationCatalog, config: &HarnessConfig) {
        println!("\n{}", "━".repeat(80).bright_black());
        println!("{} {}", "Sweep:".bold(), plan.mode.as_str().cyan());
        println!("{}", "━".repeat(80).bright_black());
        println!(
            "  {} {}",
            "Datasets:".bright_black(),
            config.data_dir.display().to_string().cyan()
        );
        println!(
            "  {} {}",
            "Types:".bright_black(),
            plan.dataset_types.join(", ")
        );
        println!(
            "  {} {}",
            "Positions:".bright_black(),
            plan.policies.join(", ")
        );
        println!(
            "  {} {}",
            "Variants:".bright_black(),
            catalog.variant_names().join(", ")
        );
        println!(
            "  {} {}",
            "Instances:".bright_black(),
            plan.instances().len().to_string().cyan()
        );
    }

    /// Print best counts per policy
    pub fn report_summaries(summaries: &[PolicySummary], elapsed: Duration) {
        println!("\n{}", "═".repeat(80).bright_black());
        println!("{}", "Sweep Summary".bold());
        println!("{}", "═".repeat(80).bright_black());

        for summary in summaries {
            println!(
                "\n  {} {} ({} tests)",
                "Position:".bold(),
                summary.policy.cyan(),
                summary.num_tests()
            );
            let best = summary.best_counts.iter().copied().max().unwrap_or(0);
            for (variant, count) in summary.best_by_variant() {
                let count_str = count.to_string();
                let count_str = if count == best && best > 0 {
                    count_str.green()
                } else {
                    count_str.normal()
                };
                println!(
                    "    {:>15} {} {}",
                    variant,
                    "best in".bright_black(),
                    count_str
                );
            }
            println!(
                "    {} {}",
                "zero error:".bright_black(),
                summary.zero_error_count.to_string().yellow()
            );
            if !summary.skipped.is_empty() {
                println!(
                    "    {} {}",
                    "skipped:".bright_black(),
                    summary.skipped.len().to_string().red()
                );
            }
        }

        println!(
            "\n  {} {}",
            "Elapsed:".bright_black(),
            Self::format_duration(elapsed).yellow()
        );
        println!("{}", "═".repeat(80).bright_black());
    }

    /// List written report files
    pub fn report_outputs(paths: &[PathBuf]) {
        for path in paths {
            println!("  {} {}", "Report:".bright_black(), path.display().to_string().cyan());
        }
    }

    /// Report error
    pub fn report_error(message: &str) {
        eprintln!("\n{} {}", "❌ Error:".red().bold(), message);
    }

    /// Report warning
    pub fn report_warning(message: &str) {
        println!("\n{} {}", "⚠️  Warning:".yellow().bold(), message);
    }

    /// Print success message
    pub fn success(message: &str) {
        println!("{} {}", "✅".green(), message.green());
    }

    /// Progress bar over `total` sweep points
    pub fn progress_bar(total: usize) -> ProgressBar {
        let pb = ProgressBar::new(total as u64);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
        {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb
    }

    /// Format duration for display
    pub fn format_duration(duration: Duration) -> String {
        let secs = duration.as_secs();

        if secs < 1 {
            format!("{}ms", duration.as_millis())
        } else if secs < 60 {
            format!("{:.2}s", duration.as_secs_f64())
        } else {
            format!("{}m{:02}s", secs / 60, secs % 60)
        }
    }
}
