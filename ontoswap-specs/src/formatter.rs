//! Plain-text rendering of fixture reports.

use crate::runner::{CaseOutcome, FixtureReport};

/// Format one fixture's results, failures with their input and diff.
pub fn format_report(fixture_name: &str, report: &FixtureReport) -> String {
    let mut output = String::new();

    let status = if report.is_success() { "PASS" } else { "FAIL" };
    output.push_str(&format!("{}: {}", status, fixture_name));
    if let Some(title) = &report.title {
        output.push_str(&format!(" ({})", title));
    }
    output.push('\n');

    for case in &report.cases {
        match &case.outcome {
            CaseOutcome::Passed => {
                output.push_str(&format!("  \u{2713} {}\n", case.name)); // check mark
            }
            CaseOutcome::Mismatch { expected, actual } => {
                output.push_str(&format!("  \u{2717} {}\n", case.name)); // cross mark
                output.push_str(&format!("      input:    {}\n", case.input));
                output.push_str(&format!("      expected: {}\n", expected));
                output.push_str(&format!("      found:    {}\n", actual));
            }
            CaseOutcome::Error { message } => {
                output.push_str(&format!("  \u{2717} {}\n", case.name));
                output.push_str(&format!("      input:    {}\n", case.input));
                output.push_str(&format!("      error:    {}\n", message));
            }
        }
    }

    output.push_str(&format!(
        "  {} passed, {} failed",
        report.passed(),
        report.failed()
    ));
    output
}

/// One line per fixture plus a total.
pub fn format_summary(reports: &[(String, FixtureReport)]) -> String {
    let mut output = String::new();
    for (name, report) in reports {
        let status = if report.is_success() { "PASS" } else { "FAIL" };
        output.push_str(&format!(
            "{} {} ({}/{})\n",
            status,
            name,
            report.passed(),
            report.cases.len()
        ));
    }
    let failed: usize = reports.iter().map(|(_, report)| report.failed()).sum();
    let total: usize = reports.iter().map(|(_, report)| report.cases.len()).sum();
    output.push_str(&format!("{} cases, {} failed", total, failed));
    output
}
