use std::path::PathBuf;

use git2::Repository;

use crate::error::{BridgeError, Result};
use crate::paths::canonicalize_lenient;

pub struct GitRepo {
    pub repo: Repository,
    pub root: PathBuf,
}

impl GitRepo {
    /// Discover from the environment (`GIT_DIR` and friends, as set for hooks),
    /// falling back to searching upward from the current directory.
    pub fn discover() -> Result<Self> {
        let repo = Repository::open_from_env().map_err(|_| BridgeError::NotGitRepo)?;
        Self::from_repository(repo)
    }

    #[cfg(test)]
    pub fn discover_from(path: &std::path::Path) -> Result<Self> {
        let repo = Repository::discover(path).map_err(|_| BridgeError::NotGitRepo)?;
        Self::from_repository(repo)
    }

    fn from_repository(repo: Repository) -> Result<Self> {
        let root = repo
            .workdir()
            .map(canonicalize_lenient)
            .ok_or(BridgeError::NotGitRepo)?;
        Ok(Self { repo, root })
    }
}
