#![allow(dead_code)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated HOME plus a scratch directory the binary runs in.
pub struct TestEnv {
    _tmp: TempDir,
    pub home: PathBuf,
    pub cwd: PathBuf,
    pub bin: PathBuf,
    pub test_log: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let home = tmp.path().join("home");
        let cwd = tmp.path().join("cwd");
        let bin = tmp.path().join("bin");
        fs::create_dir_all(&home).expect("create isolated home");
        fs::create_dir_all(&cwd).expect("create cwd");
        fs::create_dir_all(&bin).expect("create bin dir");
        let test_log = tmp.path().join("test-invocations.log");

        Self {
            _tmp: tmp,
            home,
            cwd,
            bin,
            test_log,
        }
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("deptest");
        cmd.env("HOME", &self.home)
            .env("RUST_LOG", "info")
            .current_dir(&self.cwd);
        cmd
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.cwd.join(rel)
    }

    pub fn write(&self, rel: &str, contents: &str) -> PathBuf {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dir");
        }
        fs::write(&path, contents).expect("write fixture file");
        path
    }

    pub fn write_projects(&self, rel: &str, import_paths: &[&str]) -> PathBuf {
        let projects: Vec<Value> = import_paths
            .iter()
            .map(|p| serde_json::json!({"import_path": p, "synopsis": ""}))
            .collect();
        self.write(
            rel,
            &serde_json::to_string_pretty(&projects).expect("serialize projects"),
        )
    }

    pub fn read_json(&self, rel: &str) -> Value {
        let raw = fs::read_to_string(self.path(rel)).expect("read output file");
        serde_json::from_str(&raw).expect("valid json file")
    }

    pub fn run_json(&self, args: &[&str]) -> Value {
        let mut cmd = self.cmd();
        let out = cmd
            .arg("--json")
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }

    /// Runs a command expected to fail with exit code 1 and returns its error envelope.
    pub fn run_json_err(&self, args: &[&str]) -> Value {
        let mut cmd = self.cmd();
        let out = cmd
            .arg("--json")
            .args(args)
            .assert()
            .failure()
            .code(1)
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json error output")
    }

    pub fn test_log(&self) -> String {
        fs::read_to_string(&self.test_log).unwrap_or_default()
    }

    /// Installs fake `git` and `go` scripts and a config file pointing at them.
    ///
    /// The fake clone fails for identities containing `missing`; otherwise it
    /// writes the clone URL to `ORIGIN` in the destination. The fake test run
    /// reads `ORIGIN` and fails for `broken`, hangs for `slow`, passes otherwise.
    #[cfg(unix)]
    pub fn install_fake_toolchain(&self) -> PathBuf {
        let git = self.bin.join("fake-git");
        let go = self.bin.join("fake-go");

        write_script(
            &git,
            r#"#!/bin/sh
url="$4"
dest="$5"
case "$url" in
  *missing*)
    echo "fatal: repository '$url' not found" >&2
    exit 128
    ;;
esac
mkdir -p "$dest" || exit 1
echo "$url" > "$dest/ORIGIN"
"#,
        );
        write_script(
            &go,
            &format!(
                r#"#!/bin/sh
origin=$(cat ORIGIN)
echo "$origin" >> "{log}"
case "$origin" in
  *broken*)
    echo "=== RUN   TestParse"
    echo "--- FAIL: TestParse (0.00s)"
    echo "FAIL	example.com/broken	0.01s"
    exit 1
    ;;
  *slow*)
    exec sleep 30
    ;;
esac
echo "ok  	example.com/good	0.01s"
"#,
                log = self.test_log.display()
            ),
        );

        self.write(
            "deptest.toml",
            &format!(
                "[toolchain]\nfetch_program = \"{}\"\ntest_program = \"{}\"\ntest_args = []\n",
                git.display(),
                go.display()
            ),
        )
    }
}

#[cfg(unix)]
fn write_script(path: &Path, body: &str) {
    use std::os::unix::fs::PermissionsExt;
    fs::write(path, body).expect("write script");
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).expect("chmod script");
}

/// Serves one canned HTTP 200 response on a loopback port and returns the base URL.
pub fn serve_once(body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback");
    let addr = listener.local_addr().expect("local addr");
    std::thread::spawn(move || {
        let Ok((mut stream, _)) = listener.accept() else {
            return;
        };
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
            match stream.read(&mut chunk) {
                Ok(0) | Err(_) => break,
                Ok(n) => buf.extend_from_slice(&chunk[..n]),
            }
        }
        let response = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            body.len(),
            body
        );
        let _ = stream.write_all(response.as_bytes());
    });
    format!("http://{}", addr)
}
