use std::path::PathBuf;

/// Command-level failures. Per-project problems never show up here; they
/// are recorded as verdicts instead.
#[derive(thiserror::Error, Debug)]
pub enum DeptestError {
    #[error("malformed {kind} file {}: {source}", path.display())]
    MalformedFile {
        kind: &'static str,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to prepare workspace {}: {source}", path.display())]
    Workspace {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to fetch dependents of {module}: {reason}")]
    DiscoveryFetch { module: String, reason: String },
    #[error("no dependents found for {0}")]
    NoDependents(String),
    #[error("invalid config {}: {reason}", path.display())]
    Config { path: PathBuf, reason: String },
}

impl DeptestError {
    pub fn code(&self) -> &'static str {
        match self {
            DeptestError::MalformedFile { .. } | DeptestError::InvalidArgument(_) => "INPUT_ERROR",
            DeptestError::Read { .. }
            | DeptestError::Write { .. }
            | DeptestError::Workspace { .. } => "PERSISTENCE_ERROR",
            DeptestError::DiscoveryFetch { .. } | DeptestError::NoDependents(_) => {
                "DISCOVERY_ERROR"
            }
            DeptestError::Config { .. } => "CONFIG_ERROR",
        }
    }
}
