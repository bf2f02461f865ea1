//! Routing of `git add` arguments to dvc/git action sequences.

use std::ffi::{OsStr, OsString};
use std::path::Path;

use console::style;

use crate::config::BridgeConfig;
use crate::error::Result;
use crate::git::ls_files::{UNTRACKED_OR_CACHED, parse_listing};
use crate::sidecar::{SidecarRecord, TrackingRelation, TrackingResolver};
use crate::tools::{ARTIFACT_CONTROL_DIR, Invocation, ToolRunner};

/// Argument that stands for the whole working tree.
pub const WHOLE_TREE: &str = ".";

/// Arguments following `add`, split into options and paths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddRequest {
    pub options: Vec<OsString>,
    pub paths: Vec<OsString>,
}

impl AddRequest {
    pub fn parse(args: &[OsString]) -> Self {
        let mut request = Self::default();
        let mut only_paths = false;
        for arg in args {
            if only_paths {
                request.paths.push(arg.clone());
            } else if arg == "--" {
                only_paths = true;
            } else if arg.as_encoded_bytes().starts_with(b"-") && arg != "-" {
                request.options.push(arg.clone());
            } else {
                request.paths.push(arg.clone());
            }
        }
        request
    }
}

pub struct AddRouter<'a, R: ToolRunner + ?Sized> {
    runner: &'a R,
    resolver: TrackingResolver,
    config: &'a BridgeConfig,
    options: Vec<OsString>,
    dry_run: bool,
}

impl<'a, R: ToolRunner + ?Sized> AddRouter<'a, R> {
    pub fn new(runner: &'a R, root: &Path, config: &'a BridgeConfig) -> Self {
        Self {
            runner,
            resolver: TrackingResolver::new(root, &config.sidecar_suffix()),
            config,
            options: Vec::new(),
            dry_run: false,
        }
    }

    /// Options forwarded to every `git add` the router issues.
    ///
    /// With `-n`/`--dry-run` the dvc side is only printed, never run.
    pub fn with_options(mut self, options: Vec<OsString>) -> Self {
        self.dry_run = options.iter().any(|o| is_dry_run_flag(o));
        self.options = options;
        self
    }

    /// Route each path in order. The first failing tool aborts the rest.
    pub fn run(&self, paths: &[OsString]) -> Result<()> {
        for arg in paths {
            if arg == WHOLE_TREE {
                self.add_whole_tree()?;
            } else {
                self.route(arg)?;
            }
        }
        Ok(())
    }

    fn route(&self, arg: &OsStr) -> Result<()> {
        let path = Path::new(arg);

        if self.is_sidecar(path) && path.is_file() {
            return self.add_sidecar(path);
        }

        match self.resolver.resolve(path) {
            TrackingRelation::AncestorSidecar(sidecar) => {
                tracing::debug!(sidecar = %sidecar.display(), "governed by ancestor");
                println!(
                    "{} Parent directory is tracked by DVC, proceeding with git add: {}",
                    style("●").cyan(),
                    path.display()
                );
                self.git_add(path)
            }
            TrackingRelation::SelfSidecar(sidecar) | TrackingRelation::DirectSidecar(sidecar) => {
                println!(
                    "{} {} has a .{} file, updating DVC tracking",
                    style("●").cyan(),
                    path.display(),
                    self.config.sidecar_extension
                );
                self.track(path)?;
                println!("{} Adding {} to git", style("✓").green(), sidecar.display());
                self.git_add(&sidecar)
            }
            TrackingRelation::None => self.git_add(path),
        }
    }

    fn add_sidecar(&self, sidecar: &Path) -> Result<()> {
        match SidecarRecord::read(sidecar) {
            Ok(record) => {
                if let Some(artifact) = record.artifact_path() {
                    println!(
                        "{} Updating DVC tracking (path: {})",
                        style("●").cyan(),
                        artifact.display()
                    );
                    self.track(&artifact)?;
                } else {
                    tracing::debug!(sidecar = %record.path().display(), "no declared path");
                }
            }
            Err(e) => {
                eprintln!("{} Warning: {e}", style("!").yellow().bold());
            }
        }
        self.git_add(sidecar)
    }

    fn add_whole_tree(&self) -> Result<()> {
        let listing = self.runner.capture(&Invocation::git(UNTRACKED_OR_CACHED));
        let files = match listing {
            Ok(captured) if captured.code == 0 => parse_listing(&captured.stdout),
            Ok(captured) => {
                tracing::warn!(code = captured.code, "file listing failed, adding whole tree");
                return self.git_add(Path::new(WHOLE_TREE));
            }
            Err(e) => {
                tracing::warn!(error = %e, "file listing failed, adding whole tree");
                return self.git_add(Path::new(WHOLE_TREE));
            }
        };

        for file in &files {
            let path = Path::new(file);
            if self.is_bookkeeping(path) {
                self.git_add(path)?;
            } else {
                self.route(OsStr::new(file))?;
            }
        }
        Ok(())
    }

    fn is_sidecar(&self, path: &Path) -> bool {
        path.extension()
            .is_some_and(|ext| ext == OsStr::new(&self.config.sidecar_extension))
    }

    /// Ignore files and anything under a tool's control directory.
    fn is_bookkeeping(&self, path: &Path) -> bool {
        let ignore_file = path
            .file_name()
            .is_some_and(|name| name == ".gitignore" || name == ".dvcignore");
        let under_control_dir = path.parent().is_some_and(|parent| {
            parent
                .components()
                .any(|c| c.as_os_str() == ".git" || c.as_os_str() == ARTIFACT_CONTROL_DIR)
        });
        ignore_file || under_control_dir
    }

    fn track(&self, path: &Path) -> Result<()> {
        let invocation = Invocation::artifact([OsStr::new("add"), path.as_os_str()]);
        if self.dry_run {
            println!("{} Would run: {invocation}", style("●").cyan());
            return Ok(());
        }
        self.runner.run_checked(&invocation)
    }

    fn git_add(&self, path: &Path) -> Result<()> {
        let mut args: Vec<&OsStr> = vec![OsStr::new("add")];
        args.extend(self.options.iter().map(OsString::as_os_str));
        args.push(OsStr::new("--"));
        args.push(path.as_os_str());
        self.runner.run_checked(&Invocation::git(args))
    }
}

/// `--dry-run`, an unambiguous prefix of it, or a short-flag cluster with `n`.
fn is_dry_run_flag(option: &OsStr) -> bool {
    let Some(option) = option.to_str() else {
        return false;
    };
    if let Some(long) = option.strip_prefix("--") {
        return long.len() >= 2 && "dry-run".starts_with(long);
    }
    option
        .strip_prefix('-')
        .is_some_and(|cluster| cluster.contains('n'))
}
