//! External tool boundary for the execution engine.
//!
//! The engine only needs two capabilities: put a project's source into a
//! directory, and run its test command there. Both sit behind traits so the
//! engine's control flow can be exercised with fakes.

use crate::domain::models::{Project, ToolchainConfig};
use crate::services::process::{run_captured, run_quiet, ProcessStatus};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("{program} exited with {}", describe_exit(.code))]
    Exited { program: String, code: Option<i32> },
    #[error("timed out after {}s", .0.as_secs_f64())]
    TimedOut(Duration),
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestOutcome {
    Passed,
    Failed { output: String },
    TimedOut,
}

pub trait SourceFetcher: Send + Sync {
    fn fetch(&self, project: &Project, dest: &Path, timeout: Duration) -> Result<(), FetchError>;
}

pub trait TestRunner: Send + Sync {
    /// Errors mean the test command could not be started at all.
    fn run_tests(&self, dir: &Path, timeout: Duration) -> std::io::Result<TestOutcome>;
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("exit status {}", c),
        None => "termination by signal".to_string(),
    }
}

pub fn fetch_url(project: &Project) -> String {
    format!("https://{}.git", project.import_path.trim_end_matches('/'))
}

/// Shallow single-revision clone of the default branch.
pub struct GitFetcher {
    program: String,
}

impl GitFetcher {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl SourceFetcher for GitFetcher {
    fn fetch(&self, project: &Project, dest: &Path, timeout: Duration) -> Result<(), FetchError> {
        let mut cmd = Command::new(&self.program);
        cmd.args(["clone", "--depth", "1"])
            .arg(fetch_url(project))
            .arg(dest);
        let status = run_quiet(cmd, timeout).map_err(|source| FetchError::Spawn {
            program: self.program.clone(),
            source,
        })?;
        check_fetch_status(&self.program, status, timeout)
    }
}

fn check_fetch_status(
    program: &str,
    status: ProcessStatus,
    timeout: Duration,
) -> Result<(), FetchError> {
    if status.timed_out {
        return Err(FetchError::TimedOut(timeout));
    }
    if !status.success {
        return Err(FetchError::Exited {
            program: program.to_string(),
            code: status.exit_code,
        });
    }
    Ok(())
}

/// Runs the ecosystem test command (`go test ./...` by default).
pub struct CommandTestRunner {
    program: String,
    args: Vec<String>,
}

impl CommandTestRunner {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

impl TestRunner for CommandTestRunner {
    fn run_tests(&self, dir: &Path, timeout: Duration) -> std::io::Result<TestOutcome> {
        let capture = capture_path(dir);
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args).current_dir(dir);
        let result = run_captured(cmd, timeout, &capture);
        let output = match std::fs::read(&capture) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(e) => {
                tracing::warn!(
                    path = %capture.display(),
                    error = %e,
                    "could not read test capture"
                );
                String::new()
            }
        };
        if let Err(e) = std::fs::remove_file(&capture) {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(path = %capture.display(), error = %e, "could not remove test capture");
            }
        }

        let status = result?;
        tracing::debug!(
            dir = %dir.display(),
            exit_code = ?status.exit_code,
            elapsed_ms = status.elapsed.as_millis() as u64,
            "test command finished"
        );
        Ok(if status.timed_out {
            TestOutcome::TimedOut
        } else if status.success {
            TestOutcome::Passed
        } else {
            TestOutcome::Failed { output }
        })
    }
}

// Beside the project directory, never inside it, so `./...` does not see it.
fn capture_path(dir: &Path) -> PathBuf {
    let name = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    dir.with_file_name(format!(".{}.test-output", name))
}

pub fn from_config(cfg: &ToolchainConfig) -> (GitFetcher, CommandTestRunner) {
    (
        GitFetcher::new(cfg.fetch_program.clone()),
        CommandTestRunner::new(cfg.test_program.clone(), cfg.test_args.clone()),
    )
}
