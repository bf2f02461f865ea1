//! Pre-push: push every nested DVC repository before git pushes.

use std::path::{Path, PathBuf};

use console::style;
use walkdir::WalkDir;

use crate::error::Result;
use crate::tools::{ARTIFACT_CONTROL_DIR, Invocation, ToolRunner};

/// Directories under `root` that contain a `control_dir` directory, in
/// sorted walk order (parents before their children).
///
/// `.git` and the control directories themselves are not descended into.
pub fn find_artifact_repos(root: &Path, control_dir: &str) -> Vec<PathBuf> {
    let mut repos = Vec::new();
    let mut walker = WalkDir::new(root).sort_by_file_name().into_iter();

    while let Some(entry) = walker.next() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable entry");
                continue;
            }
        };
        if !entry.file_type().is_dir() || entry.depth() == 0 {
            continue;
        }

        let name = entry.file_name();
        if name == ".git" {
            walker.skip_current_dir();
        } else if name == control_dir {
            if let Some(parent) = entry.path().parent() {
                repos.push(parent.to_path_buf());
            }
            walker.skip_current_dir();
        }
    }

    repos
}

/// Push each repository in order, stopping at the first failure.
pub fn push_all<R: ToolRunner + ?Sized>(runner: &R, repos: &[PathBuf]) -> Result<()> {
    for repo in repos {
        println!(
            "{} DVC repository found: {}",
            style("●").cyan(),
            repo.display()
        );
        println!("Executing DVC push before Git push...");
        runner.run_checked(&Invocation::artifact(["push"]).in_dir(repo))?;
    }
    Ok(())
}

/// Where the outer push is going, as passed to the hook by git.
#[derive(Debug, Clone, Default)]
pub struct PushTarget {
    pub remote: Option<String>,
    pub url: Option<String>,
}

pub fn run_pre_push<R: ToolRunner + ?Sized>(
    runner: &R,
    root: &Path,
    target: &PushTarget,
) -> Result<()> {
    if let Ok(cwd) = std::env::current_dir() {
        println!("Current directory: {}", cwd.display());
    }
    println!("Git root directory: {}", root.display());
    if let Some(remote) = &target.remote {
        println!(
            "Pushing to {remote}{}",
            target.url.as_deref().map(|u| format!(" ({u})")).unwrap_or_default()
        );
    }

    let repos = find_artifact_repos(root, ARTIFACT_CONTROL_DIR);
    if repos.is_empty() {
        println!(
            "{} No DVC repository found in Git repository.",
            style("!").yellow()
        );
        return Ok(());
    }

    push_all(runner, &repos)?;
    println!(
        "{} Pushed {} DVC repositor{}",
        style("✓").green().bold(),
        repos.len(),
        if repos.len() == 1 { "y" } else { "ies" }
    );
    Ok(())
}
