//! Tail invocation of the real git in place of the shim.

use std::ffi::OsString;
use std::path::Path;
use std::process::Command;

use crate::error::Result;
use crate::shim::context::GUARD_VAR;

/// Replace the current process with `program args...`.
///
/// On Unix this never returns on success. Elsewhere the child is run to
/// completion and its exit code is returned for the caller to exit with.
pub fn replace_process(program: &Path, args: &[OsString]) -> Result<i32> {
    let mut cmd = Command::new(program);
    cmd.args(args).env(GUARD_VAR, "1");

    tracing::debug!(program = %program.display(), ?args, "forwarding to real tool");

    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        cmd.arg0("git");
        let err = cmd.exec();
        Err(err.into())
    }

    #[cfg(not(unix))]
    {
        let status = cmd.status()?;
        Ok(super::exit_code(status))
    }
}
