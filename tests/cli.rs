use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::str::contains;
use tempfile::TempDir;

fn cmd(home: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("deptest");
    cmd.env("HOME", home.path()).current_dir(home.path());
    cmd
}

#[test]
fn top_level_help_lists_commands() {
    let home = TempDir::new().expect("temp home");
    cmd(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("discover"))
        .stdout(contains("run"))
        .stdout(contains("compare"));
}

#[test]
fn version_flag() {
    let home = TempDir::new().expect("temp home");
    cmd(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(contains("deptest"));
}

#[test]
fn missing_subcommand_is_usage_error() {
    let home = TempDir::new().expect("temp home");
    cmd(&home).assert().failure().code(2);
}

#[test]
fn run_without_output_is_usage_error() {
    let home = TempDir::new().expect("temp home");
    cmd(&home)
        .arg("run")
        .assert()
        .failure()
        .code(2)
        .stderr(contains("--output"));
}

#[test]
fn compare_needs_two_files() {
    let home = TempDir::new().expect("temp home");
    cmd(&home)
        .args(["compare", "before.json"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn bad_timeout_is_usage_error() {
    let home = TempDir::new().expect("temp home");
    cmd(&home)
        .args(["run", "-o", "out.json", "--timeout", "0"])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("greater than zero"));
}
