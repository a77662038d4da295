//! Deadline-bounded subprocess execution.
//!
//! A child is polled until it exits or its window closes. On expiry the
//! child is killed and reaped before returning, so nothing outlives the
//! call.

use std::fs::File;
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(25);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessStatus {
    pub exit_code: Option<i32>,
    pub success: bool,
    pub timed_out: bool,
    pub elapsed: Duration,
}

/// Run `cmd` with all output discarded.
pub fn run_quiet(mut cmd: Command, timeout: Duration) -> std::io::Result<ProcessStatus> {
    cmd.stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    spawn_and_wait(cmd, timeout)
}

/// Run `cmd` with stdout and stderr both written to `capture`, keeping the
/// interleaving of the two streams.
pub fn run_captured(
    mut cmd: Command,
    timeout: Duration,
    capture: &Path,
) -> std::io::Result<ProcessStatus> {
    let out = File::create(capture)?;
    let err = out.try_clone()?;
    cmd.stdin(Stdio::null())
        .stdout(Stdio::from(out))
        .stderr(Stdio::from(err));
    spawn_and_wait(cmd, timeout)
}

fn spawn_and_wait(mut cmd: Command, timeout: Duration) -> std::io::Result<ProcessStatus> {
    tracing::debug!(command = ?cmd, timeout_ms = timeout.as_millis() as u64, "spawning");
    let started_at = Instant::now();
    let mut child = cmd.spawn()?;

    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(ProcessStatus {
                exit_code: status.code(),
                success: status.success(),
                timed_out: false,
                elapsed: started_at.elapsed(),
            });
        }
        if started_at.elapsed() >= timeout {
            if let Err(e) = child.kill() {
                tracing::warn!(error = %e, "kill after deadline failed");
            }
            let status = child.wait()?;
            return Ok(ProcessStatus {
                exit_code: status.code(),
                success: false,
                timed_out: true,
                elapsed: started_at.elapsed(),
            });
        }
        thread::sleep(POLL_INTERVAL);
    }
}
