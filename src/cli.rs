use crate::domain::constants::DEFAULT_DEPENDENTS_FILE;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "deptest",
    version,
    about = "Run the test suites of a library's dependents and diff two runs"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(
        long,
        global = true,
        value_name = "FILE",
        help = "Config file (default: ~/.config/deptest/config.toml when present)"
    )]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Find projects that import a module and save them as a project list
    Discover {
        module: String,
        #[arg(long, help = "Maximum number of dependents (0 = default)")]
        limit: Option<usize>,
        #[arg(short, long, default_value = DEFAULT_DEPENDENTS_FILE)]
        output: PathBuf,
    },
    /// Clone and test every project of a project list, saving the verdicts
    Run {
        #[arg(short, long, default_value = DEFAULT_DEPENDENTS_FILE)]
        input: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
        #[arg(
            long,
            value_parser = parse_timeout,
            help = "Per-project timeout for each of fetch and test, e.g. 90, 30s, 5m, 1h"
        )]
        timeout: Option<Duration>,
        #[arg(long, value_name = "DIR")]
        work_dir: Option<PathBuf>,
        #[arg(long, help = "Number of projects tested concurrently")]
        jobs: Option<usize>,
    },
    /// Compare two verdict files and print the impact report
    Compare { before: PathBuf, after: PathBuf },
}

pub fn parse_timeout(raw: &str) -> Result<Duration, String> {
    let s = raw.trim();
    let split = s
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(s.len());
    let (digits, unit) = s.split_at(split);
    let n: u64 = digits
        .parse()
        .map_err(|_| format!("invalid duration '{}'", raw))?;
    let d = match unit {
        "" | "s" => Duration::from_secs(n),
        "ms" => Duration::from_millis(n),
        "m" => Duration::from_secs(n.saturating_mul(60)),
        "h" => Duration::from_secs(n.saturating_mul(3600)),
        _ => return Err(format!("unknown duration unit in '{}'", raw)),
    };
    if d.is_zero() {
        return Err("timeout must be greater than zero".to_string());
    }
    Ok(d)
}
