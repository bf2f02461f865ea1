use std::process::ExitCode;

use console::style;
use git_dvc_bridge::BridgeError;
use git_dvc_bridge::logging;
use git_dvc_bridge::shim::{self, ShimContext};

fn main() -> ExitCode {
    logging::init();

    match shim::run(ShimContext::from_env()) {
        Ok(code) => ExitCode::from(code as u8),
        Err(e) => fail(&e),
    }
}

fn fail(e: &BridgeError) -> ExitCode {
    // Tool failures were already reported next to the command that failed.
    if !matches!(e, BridgeError::Subprocess { .. }) {
        eprintln!("{} {e}", style("git-dvc-shim:").red().bold());
    }
    ExitCode::from(e.exit_code() as u8)
}
