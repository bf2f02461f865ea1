use std::io;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use crate::error::{BridgeError, Result};
use crate::shim::context::GUARD_VAR;

use super::locate::locate_artifact_tool;
use super::{ARTIFACT_TOOL, Captured, Invocation, Tool, ToolRunner, exit_code};

/// Runs invocations as real child processes.
///
/// Every child gets the recursion guard in its environment so that any `git`
/// it spawns passes straight through the shim.
pub struct SystemRunner {
    git: PathBuf,
}

impl SystemRunner {
    pub fn new(git: PathBuf) -> Self {
        Self { git }
    }

    fn command(&self, invocation: &Invocation) -> Command {
        let program = match invocation.tool {
            Tool::Git => self.git.clone().into_os_string(),
            Tool::Artifact => ARTIFACT_TOOL.into(),
        };
        let mut cmd = Command::new(program);
        cmd.args(&invocation.args).env(GUARD_VAR, "1");
        if let Some(dir) = &invocation.cwd {
            cmd.current_dir(dir);
        }
        cmd
    }

    fn spawn_error(&self, invocation: &Invocation, err: io::Error) -> BridgeError {
        match (invocation.tool, err.kind()) {
            (Tool::Artifact, io::ErrorKind::NotFound) => {
                BridgeError::ArtifactToolNotFound(ARTIFACT_TOOL.to_string())
            }
            (Tool::Git, io::ErrorKind::NotFound) => {
                BridgeError::ExecutableNotFound(self.git.display().to_string())
            }
            _ => BridgeError::Io(err),
        }
    }
}

impl ToolRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> Result<i32> {
        tracing::debug!(%invocation, cwd = ?invocation.cwd, "running");
        let status = self
            .command(invocation)
            .status()
            .map_err(|e| self.spawn_error(invocation, e))?;
        Ok(exit_code(status))
    }

    fn capture(&self, invocation: &Invocation) -> Result<Captured> {
        tracing::debug!(%invocation, "capturing");
        let output = self
            .command(invocation)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .map_err(|e| self.spawn_error(invocation, e))?;
        Ok(Captured {
            code: exit_code(output.status),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        })
    }

    fn artifact_tool_available(&self) -> bool {
        locate_artifact_tool().is_ok()
    }
}
