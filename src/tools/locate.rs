//! Finding the real executables behind the shim.

use std::collections::HashSet;
use std::env;
use std::path::{Path, PathBuf};

use crate::config::BridgeConfig;
use crate::error::{BridgeError, Result};

use super::ARTIFACT_TOOL;

/// Split a PATH-style string, dropping the shim's own directory, relative
/// entries and duplicates.
pub fn clean_search_paths(path_str: &str, shim_dir: Option<&Path>) -> Vec<PathBuf> {
    let mut seen = HashSet::new();
    env::split_paths(path_str)
        .filter(|p| !p.as_os_str().is_empty() && p.is_absolute())
        .map(|p| {
            let trimmed = p.to_string_lossy().trim_end_matches('/').to_string();
            if trimmed.is_empty() { p } else { PathBuf::from(trimmed) }
        })
        .filter(|p| shim_dir.is_none_or(|shim| !same_dir(p, shim)))
        .filter(|p| seen.insert(p.clone()))
        .collect()
}

fn same_dir(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

/// Resolve the real git, never returning the running shim itself.
pub fn locate_git(config: &BridgeConfig, shim_exe: Option<&Path>) -> Result<PathBuf> {
    if let Some(explicit) = &config.git_executable {
        if is_executable(explicit) {
            return Ok(explicit.clone());
        }
        return Err(BridgeError::ExecutableNotFound(explicit.display().to_string()));
    }

    let shim_dir = shim_exe.and_then(Path::parent);
    let paths = clean_search_paths(&config.git_search_path, shim_dir);
    let joined = env::join_paths(&paths)
        .map_err(|e| BridgeError::Other(format!("Invalid git search path: {e}")))?;
    let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("/"));

    let found = which::which_in("git", Some(joined), cwd)
        .map_err(|_| BridgeError::ExecutableNotFound(config.git_search_path.clone()))?;

    if let Some(shim) = shim_exe
        && is_same_file(&found, shim)
    {
        return Err(BridgeError::ExecutableNotFound(config.git_search_path.clone()));
    }

    tracing::debug!(git = %found.display(), "resolved real git");
    Ok(found)
}

/// Resolve the artifact tool from the inherited PATH.
pub fn locate_artifact_tool() -> Result<PathBuf> {
    which::which(ARTIFACT_TOOL)
        .map_err(|_| BridgeError::ArtifactToolNotFound(ARTIFACT_TOOL.to_string()))
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

pub(crate) fn is_executable(path: &Path) -> bool {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::metadata(path)
            .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
            .unwrap_or(false)
    }

    #[cfg(not(unix))]
    {
        std::fs::metadata(path).map(|m| m.is_file()).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_executable(path: &Path) {
        fs::write(path, "#!/bin/sh\nexit 0\n").unwrap();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(path).unwrap().permissions();
            perms.set_mode(0o755);
            fs::set_permissions(path, perms).unwrap();
        }
    }

    #[test]
    fn test_clean_search_paths_filters_shim_dir() {
        let temp = TempDir::new().unwrap();
        let shim_dir = temp.path().join("shims");
        fs::create_dir(&shim_dir).unwrap();

        let path_str = format!("/usr/bin:{}:/bin", shim_dir.display());
        let paths = clean_search_paths(&path_str, Some(&shim_dir));
        assert_eq!(paths, vec![PathBuf::from("/usr/bin"), PathBuf::from("/bin")]);
    }

    #[test]
    fn test_clean_search_paths_dedupes_and_drops_relative() {
        let paths = clean_search_paths("/usr/bin/:bin:/bin::/usr/bin", None);
        assert_eq!(paths, vec![PathBuf::from("/usr/bin"), PathBuf::from("/bin")]);
    }

    #[test]
    fn test_locate_git_prefers_explicit_executable() {
        let temp = TempDir::new().unwrap();
        let git = temp.path().join("git");
        write_executable(&git);

        let config = BridgeConfig {
            git_executable: Some(git.clone()),
            ..BridgeConfig::default()
        };
        assert_eq!(locate_git(&config, None).unwrap(), git);
    }

    #[test]
    fn test_locate_git_skips_shim_directory() {
        let temp = TempDir::new().unwrap();
        let shim_dir = temp.path().join("shims");
        let real_dir = temp.path().join("real");
        fs::create_dir_all(&shim_dir).unwrap();
        fs::create_dir_all(&real_dir).unwrap();
        write_executable(&shim_dir.join("git"));
        write_executable(&real_dir.join("git"));

        let config = BridgeConfig {
            git_search_path: format!("{}:{}", shim_dir.display(), real_dir.display()),
            ..BridgeConfig::default()
        };
        let found = locate_git(&config, Some(&shim_dir.join("git"))).unwrap();
        assert_eq!(found, real_dir.join("git"));
    }

    #[test]
    fn test_locate_git_missing_is_executable_not_found() {
        let temp = TempDir::new().unwrap();
        let config = BridgeConfig {
            git_search_path: temp.path().display().to_string(),
            ..BridgeConfig::default()
        };
        assert!(matches!(
            locate_git(&config, None),
            Err(BridgeError::ExecutableNotFound(_))
        ));
    }
}
