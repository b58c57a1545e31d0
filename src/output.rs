//! Output formatting for JSON and text modes
//!
//! The report goes to stdout. Progress and diagnostics go through `tracing`
//! on stderr, so `--json` output stays machine-readable.

use crate::runner::{Failure, PlannedTest, RunReport};
use crate::verdict::FailReason;
use serde::Serialize;

/// Result of a test run
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: Vec<FailureEntry>,
}

/// A single failing test in the run summary
#[derive(Debug, Serialize)]
pub struct FailureEntry {
    pub test: String,
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

/// Result of `--list`
#[derive(Debug, Serialize)]
pub struct ListResult {
    pub tests: Vec<ListEntry>,
}

/// A single discovered test
#[derive(Debug, Serialize)]
pub struct ListEntry {
    pub test: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixture: Option<String>,
}

impl RunSummary {
    pub fn new(report: &RunReport) -> Self {
        Self {
            total: report.total,
            passed: report.passed(),
            failed: report.failures.iter().map(FailureEntry::new).collect(),
        }
    }
}

impl FailureEntry {
    pub fn new(failure: &Failure) -> Self {
        let (exit_code, output) = match &failure.reason {
            FailReason::Exit(code) => (*code, None),
            FailReason::Output(out) => (Some(0), Some(out.clone())),
        };
        Self {
            test: failure.test.to_string(),
            reason: failure.reason.to_string(),
            exit_code,
            output,
        }
    }
}

impl ListResult {
    pub fn new(plan: &[PlannedTest]) -> Self {
        Self {
            tests: plan
                .iter()
                .map(|p| ListEntry {
                    test: p.test.to_string(),
                    fixture: p.fixture.as_ref().map(|f| f.display().to_string()),
                })
                .collect(),
        }
    }
}

/// Render a run report as operator-facing text
pub fn render_report(report: &RunReport) -> String {
    if report.is_success() {
        let noun = if report.total == 1 { "test" } else { "tests" };
        return format!("All tests passed ({} {})\n", report.total, noun);
    }

    let mut out = format!(
        "Failed tests ({} of {}):\n",
        report.failures.len(),
        report.total
    );
    for failure in &report.failures {
        out.push_str(&format!("  {} ({})\n", failure.test, failure.reason));
    }
    out
}

/// Render a discovery listing as text: `<test> <fixture or ->`
pub fn render_list(plan: &[PlannedTest]) -> String {
    let mut out = String::new();
    for planned in plan {
        let fixture = planned
            .fixture
            .as_ref()
            .map(|f| f.display().to_string())
            .unwrap_or_else(|| "-".to_string());
        out.push_str(&format!("{}\t{}\n", planned.test, fixture));
    }
    out
}

/// Print JSON output to stdout
pub fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing JSON: {}", e);
            std::process::exit(2);
        }
    }
}
