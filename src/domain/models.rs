use crate::domain::constants::{
    DEFAULT_DISCOVERY_BASE_URL, DEFAULT_DISCOVERY_LIMIT, DEFAULT_FAILURE_MARKERS,
    DEFAULT_FETCH_PROGRAM, DEFAULT_JOBS, DEFAULT_TEST_ARGS, DEFAULT_TEST_PROGRAM,
    DEFAULT_TIMEOUT_SECS, DEFAULT_WORK_DIR,
};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

#[derive(Serialize)]
pub struct JsonErr {
    pub ok: bool,
    pub error: ErrorBody,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

/// A downstream codebase discovered as depending on the library under test.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Project {
    pub import_path: String,
    #[serde(default)]
    pub synopsis: String,
}

impl Project {
    pub fn new(import_path: impl Into<String>) -> Self {
        Self {
            import_path: import_path.into(),
            synopsis: String::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Pass,
    Fail,
    Error,
    Timeout,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Pass => "pass",
            Status::Fail => "fail",
            Status::Error => "error",
            Status::Timeout => "timeout",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of testing one project in one run. Field order is the persisted order.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Verdict {
    pub project: String,
    pub status: Status,
    pub details: String,
    pub duration: f64,
}

impl Verdict {
    pub fn passed(&self) -> bool {
        self.status == Status::Pass
    }
}

#[derive(Debug, Serialize, Clone, Default, PartialEq)]
pub struct ImpactReport {
    pub total_projects: usize,
    pub newly_broken: Vec<String>,
    pub newly_fixed: Vec<String>,
    pub still_passing: Vec<String>,
    pub still_failing: Vec<String>,
    pub status_changed: usize,
}

#[derive(Debug, Serialize, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub errored: usize,
    pub timed_out: usize,
    pub elapsed_secs: f64,
}

#[derive(Serialize)]
pub struct DiscoverReport {
    pub module: String,
    pub output: String,
    pub dependents: Vec<Project>,
}

#[derive(Serialize)]
pub struct RunReport {
    pub output: String,
    pub summary: RunSummary,
    pub verdicts: Vec<Verdict>,
}

#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub run: RunConfig,
    #[serde(default)]
    pub toolchain: ToolchainConfig,
    #[serde(default)]
    pub discovery: DiscoveryConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RunConfig {
    pub timeout_secs: u64,
    pub work_dir: String,
    pub jobs: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            work_dir: DEFAULT_WORK_DIR.to_string(),
            jobs: DEFAULT_JOBS,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ToolchainConfig {
    pub fetch_program: String,
    pub test_program: String,
    pub test_args: Vec<String>,
    pub failure_markers: Vec<String>,
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            fetch_program: DEFAULT_FETCH_PROGRAM.to_string(),
            test_program: DEFAULT_TEST_PROGRAM.to_string(),
            test_args: DEFAULT_TEST_ARGS.iter().map(|s| s.to_string()).collect(),
            failure_markers: DEFAULT_FAILURE_MARKERS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DiscoveryConfig {
    pub base_url: String,
    pub limit: usize,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_DISCOVERY_BASE_URL.to_string(),
            limit: DEFAULT_DISCOVERY_LIMIT,
        }
    }
}
