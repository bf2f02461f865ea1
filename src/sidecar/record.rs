use std::path::{Path, PathBuf};

use crate::error::{BridgeError, Result};
use crate::paths::normalize_lexically;

/// Read-only view of a sidecar file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidecarRecord {
    path: PathBuf,
    declared: Option<String>,
}

impl SidecarRecord {
    /// Read and parse a sidecar.
    ///
    /// Unreadable or non-UTF-8 files produce [`BridgeError::SidecarParse`];
    /// callers treat that the same as a record without a declared path.
    pub fn read(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|e| BridgeError::SidecarParse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let contents = String::from_utf8(bytes).map_err(|e| BridgeError::SidecarParse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Ok(Self::parse(path, &contents))
    }

    pub fn parse(path: &Path, contents: &str) -> Self {
        Self {
            path: path.to_path_buf(),
            declared: parse_declared_path(contents),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    #[cfg(test)]
    pub fn declared_path(&self) -> Option<&str> {
        self.declared.as_deref()
    }

    #[cfg(test)]
    pub fn is_valid(&self) -> bool {
        self.declared.is_some()
    }

    /// The declared artifact, resolved against the sidecar's own directory
    /// when relative, with `.`/`..` collapsed.
    pub fn artifact_path(&self) -> Option<PathBuf> {
        let declared = Path::new(self.declared.as_deref()?);
        if declared.is_absolute() {
            return Some(normalize_lexically(declared));
        }
        let base = self.path.parent().unwrap_or(Path::new(""));
        Some(normalize_lexically(&base.join(declared)))
    }
}

/// First `path:` field, either a plain key or the first key of a `- ` item.
fn parse_declared_path(contents: &str) -> Option<String> {
    contents.lines().find_map(|line| {
        let mut field = line.trim_start();
        if let Some(item) = field.strip_prefix("- ") {
            field = item.trim_start();
        }
        let value = field.strip_prefix("path:")?;
        let value = unquote(value.trim());
        (!value.is_empty()).then(|| value.to_string())
    })
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}
