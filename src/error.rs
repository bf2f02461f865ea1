use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yml::Error),

    #[error("Not a git repository")]
    NotGitRepo,

    #[error("Could not find git executable (searched: {0})")]
    ExecutableNotFound(String),

    #[error("Artifact tool not found: {0}")]
    ArtifactToolNotFound(String),

    #[error("Could not process sidecar file {}: {reason}", .path.display())]
    SidecarParse { path: PathBuf, reason: String },

    #[error("Command failed with exit code {code}: {command}")]
    Subprocess { command: String, code: i32 },

    #[error("{0}")]
    Other(String),
}

impl BridgeError {
    /// Process exit code the binaries report for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            BridgeError::Subprocess { code, .. } => *code,
            BridgeError::ExecutableNotFound(_) | BridgeError::ArtifactToolNotFound(_) => 127,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, BridgeError>;
