use clap::Parser;

use crate::error::Result;
use crate::git::repo::GitRepo;
use crate::hook::push::{PushTarget, run_pre_push};
use crate::tools::SystemRunner;

/// Arguments git passes to a pre-push hook.
#[derive(Parser, Debug)]
#[command(
    name = "git-dvc-pre-push",
    version,
    about = "Push every DVC repository in the work tree before git pushes"
)]
pub struct PrePushArgs {
    /// Name of the remote being pushed to
    pub remote: Option<String>,
    /// URL of the remote being pushed to
    pub url: Option<String>,
}

pub fn run(args: PrePushArgs) -> Result<()> {
    let git = GitRepo::discover()?;
    // The hook never runs git itself; the path only fills the runner.
    let runner = SystemRunner::new("git".into());
    let target = PushTarget {
        remote: args.remote,
        url: args.url,
    };
    run_pre_push(&runner, &git.root, &target)
}
