use crate::domain::errors::DeptestError;
use crate::domain::models::ConfigFile;
use crate::services::engine::EngineOptions;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub fn default_config_path() -> Option<PathBuf> {
    let home = std::env::var("HOME").ok()?;
    Some(PathBuf::from(home).join(".config/deptest/config.toml"))
}

/// An explicit path must exist; the default location is optional.
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<ConfigFile> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => match default_config_path() {
            Some(p) if p.exists() => p,
            _ => return Ok(ConfigFile::default()),
        },
    };
    let raw = std::fs::read_to_string(&path).map_err(|source| DeptestError::Read {
        path: path.clone(),
        source,
    })?;
    let cfg: ConfigFile = toml::from_str(&raw).map_err(|e| DeptestError::Config {
        path: path.clone(),
        reason: e.to_string(),
    })?;
    validate(&cfg, &path)?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(cfg)
}

fn validate(cfg: &ConfigFile, path: &Path) -> Result<(), DeptestError> {
    let invalid = |reason: &str| DeptestError::Config {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    };
    if cfg.run.timeout_secs == 0 {
        return Err(invalid("run.timeout_secs must be greater than zero"));
    }
    if cfg.run.jobs == 0 {
        return Err(invalid("run.jobs must be at least 1"));
    }
    if cfg.toolchain.fetch_program.trim().is_empty() {
        return Err(invalid("toolchain.fetch_program must not be empty"));
    }
    if cfg.toolchain.test_program.trim().is_empty() {
        return Err(invalid("toolchain.test_program must not be empty"));
    }
    if cfg.toolchain.failure_markers.iter().any(|m| m.is_empty()) {
        return Err(invalid("toolchain.failure_markers must not contain empty strings"));
    }
    Ok(())
}

/// Flags given on the command line win over the config file.
pub fn engine_options(
    cfg: &ConfigFile,
    timeout: Option<Duration>,
    work_dir: Option<&Path>,
    jobs: Option<usize>,
) -> Result<EngineOptions, DeptestError> {
    let jobs = jobs.unwrap_or(cfg.run.jobs);
    if jobs == 0 {
        return Err(DeptestError::InvalidArgument(
            "--jobs must be at least 1".to_string(),
        ));
    }
    Ok(EngineOptions {
        work_dir: work_dir
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(&cfg.run.work_dir)),
        timeout: timeout.unwrap_or(Duration::from_secs(cfg.run.timeout_secs)),
        jobs,
        failure_markers: cfg.toolchain.failure_markers.clone(),
    })
}
