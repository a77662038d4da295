//! Execution engine: one verdict per project, in input order.
//!
//! ## Per-project lifecycle
//! 1. Clear any stale directory left by an earlier run.
//! 2. Fetch the source under its own deadline.
//! 3. Run the test command under a fresh deadline.
//! 4. Classify the outcome into a `Verdict`.
//!
//! Nothing that happens to a single project aborts the batch. Only failing
//! to create the workspace root is fatal.
//!
//! With `jobs > 1` projects are striped across worker threads. Each worker
//! owns `<work_dir>/worker-<k>/` so no two in-flight projects share a
//! directory, and results are put back in input order once all workers
//! have finished.

use crate::domain::constants::{
    DETAILS_CAP_CHARS, FALLBACK_DIR_NAME, MAX_SUMMARY_LINES, PASS_DETAILS, TIMEOUT_DETAILS,
};
use crate::domain::errors::DeptestError;
use crate::domain::models::{Project, Status, Verdict};
use crate::services::toolchain::{SourceFetcher, TestOutcome, TestRunner};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct EngineOptions {
    pub work_dir: PathBuf,
    pub timeout: Duration,
    pub jobs: usize,
    pub failure_markers: Vec<String>,
}

pub struct Engine<'a> {
    fetcher: &'a dyn SourceFetcher,
    tester: &'a dyn TestRunner,
    opts: EngineOptions,
}

impl<'a> Engine<'a> {
    pub fn new(
        fetcher: &'a dyn SourceFetcher,
        tester: &'a dyn TestRunner,
        opts: EngineOptions,
    ) -> Self {
        Self {
            fetcher,
            tester,
            opts,
        }
    }

    pub fn run(&self, projects: &[Project]) -> anyhow::Result<Vec<Verdict>> {
        create_workspace(&self.opts.work_dir)?;
        let jobs = self.opts.jobs.max(1).min(projects.len().max(1));
        if jobs == 1 {
            return Ok(self.run_sequential(projects));
        }
        self.run_parallel(projects, jobs)
    }

    fn run_sequential(&self, projects: &[Project]) -> Vec<Verdict> {
        let total = projects.len();
        projects
            .iter()
            .enumerate()
            .map(|(i, p)| self.run_logged(i, total, p, &self.opts.work_dir))
            .collect()
    }

    fn run_parallel(&self, projects: &[Project], jobs: usize) -> anyhow::Result<Vec<Verdict>> {
        let roots: Vec<PathBuf> = (0..jobs)
            .map(|k| self.opts.work_dir.join(format!("worker-{}", k)))
            .collect();
        for root in &roots {
            create_workspace(root)?;
        }

        let total = projects.len();
        let mut collected: Vec<(usize, Verdict)> = std::thread::scope(|s| {
            let handles: Vec<_> = roots
                .iter()
                .enumerate()
                .map(|(k, root)| {
                    s.spawn(move || {
                        projects
                            .iter()
                            .enumerate()
                            .skip(k)
                            .step_by(jobs)
                            .map(|(i, p)| (i, self.run_logged(i, total, p, root)))
                            .collect::<Vec<_>>()
                    })
                })
                .collect();
            handles
                .into_iter()
                .flat_map(|h| h.join().unwrap_or_else(|p| std::panic::resume_unwind(p)))
                .collect()
        });

        collected.sort_by_key(|(i, _)| *i);
        Ok(collected.into_iter().map(|(_, v)| v).collect())
    }

    fn run_logged(&self, index: usize, total: usize, project: &Project, root: &Path) -> Verdict {
        tracing::info!("[{}/{}] testing {}", index + 1, total, project.import_path);
        let verdict = self.run_one(project, root);
        tracing::info!(
            project = %verdict.project,
            duration_secs = verdict.duration,
            "status: {}",
            verdict.status
        );
        verdict
    }

    /// Materialize, fetch and test a single project under `root`.
    pub fn run_one(&self, project: &Project, root: &Path) -> Verdict {
        let start = Instant::now();
        let finish = |status: Status, details: String| Verdict {
            project: project.import_path.clone(),
            status,
            details,
            duration: start.elapsed().as_secs_f64(),
        };

        let dir = root.join(workspace_dir_name(&project.import_path));
        if let Err(e) = clear_stale(&dir) {
            return finish(Status::Error, format!("workspace cleanup failed: {}", e));
        }

        if let Err(e) = self.fetcher.fetch(project, &dir, self.opts.timeout) {
            tracing::debug!(project = %project.import_path, error = %e, "fetch failed");
            return finish(Status::Error, format!("clone failed: {}", e));
        }

        match self.tester.run_tests(&dir, self.opts.timeout) {
            Ok(TestOutcome::Passed) => finish(Status::Pass, PASS_DETAILS.to_string()),
            Ok(TestOutcome::TimedOut) => finish(Status::Timeout, TIMEOUT_DETAILS.to_string()),
            Ok(TestOutcome::Failed { output }) => finish(
                Status::Fail,
                extract_error_summary(&output, &self.opts.failure_markers),
            ),
            Err(e) => finish(
                Status::Fail,
                format!("test command could not start: {}", e),
            ),
        }
    }
}

fn create_workspace(path: &Path) -> Result<(), DeptestError> {
    std::fs::create_dir_all(path).map_err(|source| DeptestError::Workspace {
        path: path.to_path_buf(),
        source,
    })
}

fn clear_stale(dir: &Path) -> std::io::Result<()> {
    let Ok(meta) = std::fs::symlink_metadata(dir) else {
        return Ok(());
    };
    tracing::debug!(path = %dir.display(), "removing stale workspace entry");
    if meta.is_dir() {
        std::fs::remove_dir_all(dir)
    } else {
        std::fs::remove_file(dir)
    }
}

/// Last non-empty path segment of the identity. Distinct identities may
/// share a name; the later one then replaces the earlier checkout.
pub fn workspace_dir_name(import_path: &str) -> String {
    match import_path.rsplit('/').find(|s| !s.is_empty()) {
        Some(seg) if seg != "." && seg != ".." => seg.to_string(),
        _ => FALLBACK_DIR_NAME.to_string(),
    }
}

/// Up to the first three marker lines joined with `"; "`, else the head of
/// the raw output.
pub fn extract_error_summary(output: &str, markers: &[String]) -> String {
    let matched: Vec<&str> = output
        .split('\n')
        .filter(|line| markers.iter().any(|m| line.contains(m.as_str())))
        .take(MAX_SUMMARY_LINES)
        .collect();
    if !matched.is_empty() {
        return matched.join("; ");
    }
    truncate_chars(output, DETAILS_CAP_CHARS)
}

fn truncate_chars(s: &str, cap: usize) -> String {
    match s.char_indices().nth(cap) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}
