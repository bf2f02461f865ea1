use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Overrides the config file location.
pub const CONFIG_PATH_VAR: &str = "GIT_DVC_BRIDGE_CONFIG";

/// Directories searched for the real git when no explicit executable is set.
pub const DEFAULT_GIT_SEARCH_PATH: &str = "/usr/bin:/bin:/usr/local/bin";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BridgeConfig {
    #[serde(default = "default_git_search_path")]
    pub git_search_path: String,
    #[serde(default)]
    pub git_executable: Option<PathBuf>,
    #[serde(default = "default_sidecar_extension")]
    pub sidecar_extension: String,
}

fn default_git_search_path() -> String {
    DEFAULT_GIT_SEARCH_PATH.to_string()
}

fn default_sidecar_extension() -> String {
    "dvc".to_string()
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            git_search_path: default_git_search_path(),
            git_executable: None,
            sidecar_extension: default_sidecar_extension(),
        }
    }
}

impl BridgeConfig {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yml::from_str(&contents)?;
        Ok(config)
    }

    /// Load from `$GIT_DVC_BRIDGE_CONFIG`, falling back to the user config dir.
    /// A broken file costs a warning, not the git call.
    pub fn load_from_env() -> Self {
        Self::default_path()
            .map(|path| Self::load_or_default(&path))
            .unwrap_or_default()
    }

    /// Like [`load`](Self::load), but a broken file only costs a warning.
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable config");
            Self::default()
        })
    }

    pub fn default_path() -> Option<PathBuf> {
        if let Some(explicit) = std::env::var_os(CONFIG_PATH_VAR) {
            return Some(PathBuf::from(explicit));
        }
        dirs::config_dir().map(|dir| dir.join("git-dvc-bridge").join("config.yml"))
    }

    /// Sidecar suffix including the leading dot, e.g. `.dvc`.
    pub fn sidecar_suffix(&self) -> String {
        format!(".{}", self.sidecar_extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let config = BridgeConfig::load(&temp.path().join("config.yml")).unwrap();
        assert_eq!(config, BridgeConfig::default());
        assert_eq!(config.sidecar_suffix(), ".dvc");
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yml");
        std::fs::write(&path, "git_executable: /opt/git/bin/git\n").unwrap();

        let config = BridgeConfig::load(&path).unwrap();
        assert_eq!(config.git_executable, Some(PathBuf::from("/opt/git/bin/git")));
        assert_eq!(config.git_search_path, DEFAULT_GIT_SEARCH_PATH);
        assert_eq!(config.sidecar_extension, "dvc");
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yml");
        std::fs::write(&path, "sidecar_extension: [unclosed\n").unwrap();
        assert!(BridgeConfig::load(&path).is_err());
    }

    #[test]
    fn test_invalid_yaml_falls_back_to_defaults_when_lenient() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yml");
        std::fs::write(&path, "git_executable: [unclosed\n").unwrap();
        assert_eq!(BridgeConfig::load_or_default(&path), BridgeConfig::default());
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yml");
        std::fs::write(&path, "artifact_tool: dvc\nsidecar_extension: dvc\n").unwrap();
        assert_eq!(BridgeConfig::load(&path).unwrap(), BridgeConfig::default());
    }
}
