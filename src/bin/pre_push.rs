use std::process::ExitCode;

use clap::Parser;
use console::style;
use git_dvc_bridge::BridgeError;
use git_dvc_bridge::cli::pre_push::{self, PrePushArgs};
use git_dvc_bridge::logging;

fn main() -> ExitCode {
    logging::init();
    let args = PrePushArgs::parse();

    match pre_push::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if !matches!(e, BridgeError::Subprocess { .. }) {
                eprintln!("{} {e}", style("Error:").red().bold());
            }
            ExitCode::from(e.exit_code() as u8)
        }
    }
}
