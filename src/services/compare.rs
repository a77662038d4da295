use crate::domain::models::{ImpactReport, Verdict};
use std::collections::HashMap;

/// Classify each project of `before` by its pass/non-pass transition into
/// `after`. Projects missing from `after` are left out of every bucket but
/// still count towards `total_projects`.
pub fn compare(before: &[Verdict], after: &[Verdict]) -> ImpactReport {
    let mut report = ImpactReport {
        total_projects: before.len(),
        ..Default::default()
    };

    let after_by_project: HashMap<&str, &Verdict> =
        after.iter().map(|v| (v.project.as_str(), v)).collect();

    for b in before {
        let Some(a) = after_by_project.get(b.project.as_str()) else {
            continue;
        };
        let name = b.project.clone();
        match (b.passed(), a.passed()) {
            (true, false) => {
                report.newly_broken.push(name);
                report.status_changed += 1;
            }
            (false, true) => {
                report.newly_fixed.push(name);
                report.status_changed += 1;
            }
            (true, true) => report.still_passing.push(name),
            (false, false) => report.still_failing.push(name),
        }
    }

    report
}
