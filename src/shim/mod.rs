//! The `git` shim: decides per invocation whether to route or forward.

pub mod context;

use std::ffi::OsString;
use std::path::Path;

use crate::config::BridgeConfig;
use crate::error::Result;
use crate::git::repo::GitRepo;
use crate::router::{AddRequest, AddRouter, DualCommand, run_dual};
use crate::tools::exec::replace_process;
use crate::tools::locate::locate_git;
use crate::tools::{SystemRunner, ToolRunner};

pub use context::{GUARD_VAR, Guard, ShimContext};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Hand the whole invocation to the real git.
    Forward,
    Add(AddRequest),
    Dual(DualCommand),
}

pub fn route(guard: Guard, args: &[OsString]) -> Route {
    if guard == Guard::Reentrant {
        return Route::Forward;
    }
    let Some(subcommand) = args.first() else {
        return Route::Forward;
    };
    if subcommand == "add" {
        let request = AddRequest::parse(&args[1..]);
        if request.paths.is_empty() {
            return Route::Forward;
        }
        return Route::Add(request);
    }
    match DualCommand::from_subcommand(subcommand) {
        Some(command) => Route::Dual(command),
        None => Route::Forward,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Exit(i32),
    /// The caller must replace the process with the real git.
    Forward,
}

/// Execute a routed invocation. `root` is the repository root, when known.
pub fn dispatch<R: ToolRunner + ?Sized>(
    runner: &R,
    route: Route,
    args: &[OsString],
    config: &BridgeConfig,
    root: Option<&Path>,
) -> Result<Outcome> {
    match route {
        Route::Forward => Ok(Outcome::Forward),
        Route::Add(request) => {
            let Some(root) = root else {
                // Outside a work tree git prints the right error itself.
                return Ok(Outcome::Forward);
            };
            AddRouter::new(runner, root, config)
                .with_options(request.options)
                .run(&request.paths)?;
            Ok(Outcome::Exit(0))
        }
        Route::Dual(command) => Ok(Outcome::Exit(run_dual(runner, command, args)?)),
    }
}

/// Entry point of the shim binary. Returns the exit code to report.
pub fn run(ctx: ShimContext) -> Result<i32> {
    let real_git = locate_git(&ctx.config, ctx.shim_exe.as_deref())?;
    let routed = route(ctx.guard, &ctx.args);
    tracing::debug!(guard = ?ctx.guard, route = ?routed, "shim invoked");

    if routed == Route::Forward {
        return replace_process(&real_git, &ctx.args);
    }

    let root = match &routed {
        Route::Add(_) => GitRepo::discover().ok().map(|git| git.root),
        _ => None,
    };
    let runner = SystemRunner::new(real_git.clone());
    match dispatch(&runner, routed, &ctx.args, &ctx.config, root.as_deref())? {
        Outcome::Exit(code) => Ok(code),
        Outcome::Forward => replace_process(&real_git, &ctx.args),
    }
}
