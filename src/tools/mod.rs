//! Invocation of the two wrapped tools.
//!
//! Everything the bridge does to the outside world goes through [`ToolRunner`]:
//! the routing and orchestration code only builds [`Invocation`]s and inspects
//! exit codes, which keeps the action sequences observable in tests.

pub mod exec;
pub mod locate;
pub mod system;

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;

use console::style;

use crate::error::{BridgeError, Result};

pub use system::SystemRunner;

/// Program name of the artifact tool.
pub const ARTIFACT_TOOL: &str = "dvc";

/// Directory that marks the root of an artifact repository.
pub const ARTIFACT_CONTROL_DIR: &str = ".dvc";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    /// The real source-control tool (git).
    Git,
    /// The artifact tool (dvc).
    Artifact,
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tool::Git => f.write_str("git"),
            Tool::Artifact => f.write_str(ARTIFACT_TOOL),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub tool: Tool,
    pub args: Vec<OsString>,
    pub cwd: Option<PathBuf>,
}

impl Invocation {
    pub fn new<I, S>(tool: Tool, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        Self {
            tool,
            args: args.into_iter().map(|a| a.as_ref().to_os_string()).collect(),
            cwd: None,
        }
    }

    pub fn git<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        Self::new(Tool::Git, args)
    }

    pub fn artifact<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        Self::new(Tool::Artifact, args)
    }

    /// Run with `dir` as the working directory instead of inheriting it.
    pub fn in_dir(mut self, dir: &Path) -> Self {
        self.cwd = Some(dir.to_path_buf());
        self
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tool)?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct Captured {
    pub code: i32,
    pub stdout: String,
}

pub trait ToolRunner {
    /// Run with inherited stdio and return the exit code.
    fn run(&self, invocation: &Invocation) -> Result<i32>;

    /// Run with stdout captured and stderr discarded.
    fn capture(&self, invocation: &Invocation) -> Result<Captured>;

    /// Whether the artifact tool can be located on the search path.
    fn artifact_tool_available(&self) -> bool;

    /// Run and turn a non-zero exit into [`BridgeError::Subprocess`].
    fn run_checked(&self, invocation: &Invocation) -> Result<()> {
        let code = self.run(invocation)?;
        if code != 0 {
            eprintln!(
                "{} Error executing command: {invocation}",
                style("✗").red().bold()
            );
            return Err(BridgeError::Subprocess {
                command: invocation.to_string(),
                code,
            });
        }
        Ok(())
    }
}

/// Exit code of a finished child, mapping signals to `128 + signal`.
pub fn exit_code(status: ExitStatus) -> i32 {
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    status.code().unwrap_or(1)
}
