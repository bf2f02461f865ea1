//! Keeps DVC tracking in step with everyday git commands.
//!
//! The `git-dvc-shim` binary is installed under the name `git` ahead of the
//! real git on `PATH`. It routes `add`, `diff`, `pull` and `status` through
//! both tools and execs the real git for everything else. The
//! `git-dvc-pre-push` binary is installed as a pre-push hook and pushes every
//! DVC repository in the work tree before git pushes.

pub mod cli;
pub mod config;
pub mod error;
pub mod git;
pub mod hook;
pub mod logging;
pub mod paths;
pub mod router;
pub mod shim;
pub mod sidecar;
pub mod tools;

pub use error::{BridgeError, Result};
