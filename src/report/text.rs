// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Fixed-width text tables

use super::summary::PolicySummary;

const METRIC_WIDTH: usize = 8;
const STEM_WIDTH: usize = 7;
const ISO_WIDTH: usize = 3;

/// Render one policy's table, summary footer and diagnostics
pub fn render(summary: &PolicySummary) -> String {
    let mut lines: Vec<String> = Vec::new();

    let mut header = vec!["filename iso".to_string()];
    header.extend(summary.variants.iter().map(|v| pad(v, METRIC_WIDTH)));
    lines.push(header.join(" "));

    for case in &summary.cases {
        let mut fields = vec![pad(&case.stem, STEM_WIDTH), pad(&case.isovalue, ISO_WIDTH), "|".to_string()];
        fields.extend(case.metrics.iter().map(|m| pad(&m.to_string(), METRIC_WIDTH)));
        fields.push("|".to_string());
        fields.push(case.min.to_string());
        fields.push(case.max.to_string());
        lines.push(fields.join(" "));
    }

    lines.push(String::new());
    lines.push(String::new());
    lines.push(" SUMMARY".to_string());
    lines.push(format!(
        "Test on {} num of tests {}",
        summary.policy,
        summary.num_tests()
    ));
    for (variant, count) in summary.best_by_variant() {
        lines.push(format!("{:>15} was best in {:>5} cases", variant, count));
    }
    lines.push(format!(
        "the min error was 0 in {} cases",
        summary.zero_error_count
    ));
    lines.push("*".repeat(37));

    if !summary.skipped.is_empty() {
        lines.push(String::new());
        lines.push(format!("SKIPPED CASES ({})", summary.skipped.len()));
        for case in &summary.skipped {
            lines.push(format!(
                "{} {} [{}] {}",
                pad(&case.point.stem(), STEM_WIDTH),
                pad(&case.point.isovalue, ISO_WIDTH),
                case.skip.variant,
                case.skip.reason
            ));
        }
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn pad(value: &str, width: usize) -> String {
    format!("{:<width$}", value, width = width)
}
