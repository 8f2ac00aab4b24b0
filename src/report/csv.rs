// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Comma-delimited tables

use super::summary::PolicySummary;

/// Render one policy's CSV table followed by summary and skipped-case blocks
pub fn render(summary: &PolicySummary) -> String {
    let mut rows: Vec<Vec<String>> = Vec::new();

    let mut header = vec!["filename".to_string(), "iso".to_string()];
    header.extend(summary.variants.iter().cloned());
    header.push("min".to_string());
    header.push("max".to_string());
    rows.push(header);

    for case in &summary.cases {
        let mut fields = vec![case.stem.clone(), case.isovalue.clone()];
        fields.extend(case.metrics.iter().map(i64::to_string));
        fields.push(case.min.to_string());
        fields.push(case.max.to_string());
        rows.push(fields);
    }

    rows.push(Vec::new());
    rows.push(vec!["variant".to_string(), "best_count".to_string()]);
    for (variant, count) in summary.best_by_variant() {
        rows.push(vec![variant.to_string(), count.to_string()]);
    }
    rows.push(vec!["num_tests".to_string(), summary.num_tests().to_string()]);
    rows.push(vec![
        "zero_error".to_string(),
        summary.zero_error_count.to_string(),
    ]);

    if !summary.skipped.is_empty() {
        rows.push(Vec::new());
        rows.push(
            ["skipped", "iso", "variant", "reason"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        );
        for case in &summary.skipped {
            rows.push(vec![
                case.point.stem(),
                case.point.isovalue.clone(),
                case.skip.variant.clone(),
                case.skip.reason.clone(),
            ]);
        }
    }

    let mut out = String::new();
    for row in rows {
        let line: Vec<String> = row.iter().map(|f| escape(f)).collect();
        out.push_str(&line.join(","));
        out.push('\n');
    }
    out
}

/// Quote a field containing a delimiter, quote or newline
fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::summary::{CaseLine, SkippedCase};
    use crate::sweep::{SkipRecord, SweepPoint};

    #[test]
    fn test_render_rows() {
        let summary = PolicySummary {
            policy: "gradNS".into(),
            variants: vec!["lnd".into(), "lnd2".into()],
            cases: vec![CaseLine {
                stem: "annulus2".into(),
                isovalue: "10.5".into(),
                metrics: vec![0, 4],
                min: 0,
                max: 4,
            }],
            best_counts: vec![1, 0],
            zero_error_count: 1,
            skipped: vec![SkippedCase {
                point: SweepPoint {
                    dataset_type: "annulus".into(),
                    instance: 2,
                    isovalue: "10.7".into(),
                    policy: "gradNS".into(),
                },
                skip: SkipRecord {
                    variant: "lnd".into(),
                    reason: "malformed measurement output: \"a, b\"".into(),
                },
            }],
        };

        let csv = render(&summary);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "filename,iso,lnd,lnd2,min,max");
        assert_eq!(lines[1], "annulus2,10.5,0,4,0,4");
        assert!(lines.contains(&"lnd,1"));
        assert!(lines.contains(&"zero_error,1"));
        assert!(lines.contains(&"annulus2,10.7,lnd,\"malformed measurement output: \"\"a, b\"\"\""));
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("plain"), "plain");
        assert_eq!(escape("a,b"), "\"a,b\"");
    }
}
