pub const DEFAULT_DEPENDENTS_FILE: &str = "dependents.json";
pub const DEFAULT_WORK_DIR: &str = "workspace";
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;
pub const DEFAULT_JOBS: usize = 1;

pub const DEFAULT_FETCH_PROGRAM: &str = "git";
pub const DEFAULT_TEST_PROGRAM: &str = "go";
pub const DEFAULT_TEST_ARGS: &[&str] = &["test", "./..."];
pub const DEFAULT_FAILURE_MARKERS: &[&str] = &["FAIL", "Error"];

pub const DEFAULT_DISCOVERY_BASE_URL: &str = "https://pkg.go.dev";
pub const DEFAULT_DISCOVERY_LIMIT: usize = 10;
pub const DISCOVERY_HTTP_TIMEOUT_SECS: u64 = 30;

/// Raw-output fallback cap for failure details, in characters.
pub const DETAILS_CAP_CHARS: usize = 200;
pub const MAX_SUMMARY_LINES: usize = 3;

pub const PASS_DETAILS: &str = "all tests passed";
pub const TIMEOUT_DETAILS: &str = "test execution exceeded timeout";

pub const FALLBACK_DIR_NAME: &str = "project";
