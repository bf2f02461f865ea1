use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::paths::canonicalize_lenient;

/// How a path relates to a sidecar record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackingRelation {
    /// `<path>.dvc` exists next to the path.
    SelfSidecar(PathBuf),
    /// The path is a directory holding `<dirname>.dvc`.
    DirectSidecar(PathBuf),
    /// Some ancestor directory below the repository root holds its own sidecar.
    AncestorSidecar(PathBuf),
    None,
}

/// Classifies paths against the sidecars of one repository.
///
/// The upward search stops at the repository root; the root directory itself
/// is the last one checked.
pub struct TrackingResolver {
    root: PathBuf,
    suffix: String,
}

impl TrackingResolver {
    pub fn new(root: &Path, suffix: &str) -> Self {
        Self {
            root: canonicalize_lenient(root),
            suffix: suffix.to_string(),
        }
    }

    pub fn resolve(&self, target: &Path) -> TrackingRelation {
        // Drops trailing separators so `data/` looks for `data.dvc`.
        let target: PathBuf = target.components().collect();

        let own = self.with_suffix(&target);
        if own.is_file() {
            return TrackingRelation::SelfSidecar(own);
        }

        let canonical = canonicalize_lenient(&target);

        if target.is_dir()
            && let Some(name) = canonical.file_name()
        {
            let inner = target.join(self.sidecar_name(name.to_os_string()));
            if inner.is_file() {
                return TrackingRelation::DirectSidecar(inner);
            }
        }

        if !canonical.starts_with(&self.root) {
            tracing::debug!(path = %canonical.display(), "outside repository root");
            return TrackingRelation::None;
        }

        let mut current = canonical.as_path();
        while current != self.root {
            let Some(parent) = current.parent() else {
                break;
            };
            current = parent;
            if let Some(name) = current.file_name() {
                let candidate = current.join(self.sidecar_name(name.to_os_string()));
                if candidate.is_file() {
                    return TrackingRelation::AncestorSidecar(candidate);
                }
            }
        }

        TrackingRelation::None
    }

    fn with_suffix(&self, path: &Path) -> PathBuf {
        let mut raw = path.as_os_str().to_os_string();
        raw.push(&self.suffix);
        PathBuf::from(raw)
    }

    fn sidecar_name(&self, mut name: OsString) -> OsString {
        name.push(&self.suffix);
        name
    }
}
