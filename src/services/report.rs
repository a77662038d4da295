//! Plain-text rendering for run summaries and impact reports.

use crate::domain::models::{ImpactReport, RunSummary, Status, Verdict};
use std::fmt::Write;

pub fn summarize(verdicts: &[Verdict]) -> RunSummary {
    let mut s = RunSummary {
        total: verdicts.len(),
        ..Default::default()
    };
    for v in verdicts {
        match v.status {
            Status::Pass => s.passed += 1,
            Status::Fail => s.failed += 1,
            Status::Error => s.errored += 1,
            Status::Timeout => s.timed_out += 1,
        }
        s.elapsed_secs += v.duration;
    }
    s
}

pub fn render_summary(s: &RunSummary) -> String {
    format!(
        "Ran {} projects: {} passed, {} failed, {} errored, {} timed out ({:.2}s total)",
        s.total, s.passed, s.failed, s.errored, s.timed_out, s.elapsed_secs
    )
}

pub fn render_impact(r: &ImpactReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Impact Analysis");
    let _ = writeln!(out, "Total projects analyzed: {}", r.total_projects);
    let _ = writeln!(out, "Status changes: {}", r.status_changed);
    let _ = writeln!(out);

    section(&mut out, "NEWLY BROKEN", &r.newly_broken);
    section(&mut out, "NEWLY FIXED", &r.newly_fixed);

    let _ = writeln!(out, "Still passing: {}", r.still_passing.len());
    let _ = writeln!(out, "Still failing: {}", r.still_failing.len());

    if let Some(line) = overall_line(r) {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", line);
    }
    out
}

/// Silent when statuses changed but nothing broke.
pub fn overall_line(r: &ImpactReport) -> Option<&'static str> {
    if !r.newly_broken.is_empty() {
        Some("This change breaks existing dependents!")
    } else if r.status_changed == 0 {
        Some("No impact detected - change appears safe!")
    } else {
        None
    }
}

fn section(out: &mut String, title: &str, projects: &[String]) {
    if projects.is_empty() {
        return;
    }
    let _ = writeln!(out, "{} ({}):", title, projects.len());
    for p in projects {
        let _ = writeln!(out, "  - {}", p);
    }
    let _ = writeln!(out);
}
