use crate::domain::errors::DeptestError;
use crate::domain::models::{Project, Verdict};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};

pub fn save_projects(path: &Path, projects: &[Project]) -> anyhow::Result<()> {
    save_list(path, projects)
}

pub fn load_projects(path: &Path) -> anyhow::Result<Vec<Project>> {
    load_list(path, "project list")
}

pub fn save_verdicts(path: &Path, verdicts: &[Verdict]) -> anyhow::Result<()> {
    save_list(path, verdicts)
}

pub fn load_verdicts(path: &Path) -> anyhow::Result<Vec<Verdict>> {
    load_list(path, "verdict list")
}

fn save_list<T: Serialize>(path: &Path, items: &[T]) -> anyhow::Result<()> {
    let raw = serde_json::to_string_pretty(items)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| DeptestError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    std::fs::write(path, raw).map_err(|source| DeptestError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), count = items.len(), "saved list");
    Ok(())
}

// Empty lists written by older tooling are stored as `null`.
fn load_list<T: DeserializeOwned>(path: &Path, kind: &'static str) -> anyhow::Result<Vec<T>> {
    let raw = std::fs::read_to_string(path).map_err(|source| DeptestError::Read {
        path: PathBuf::from(path),
        source,
    })?;
    let items: Option<Vec<T>> =
        serde_json::from_str(&raw).map_err(|source| DeptestError::MalformedFile {
            kind,
            path: path.to_path_buf(),
            source,
        })?;
    Ok(items.unwrap_or_default())
}
