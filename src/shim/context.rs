//! Per-invocation shim state, read once from the process environment.

use std::env;
use std::ffi::{OsStr, OsString};
use std::path::PathBuf;

use crate::config::BridgeConfig;

/// Recursion guard. Set on every child the shim spawns or execs.
pub const GUARD_VAR: &str = "GIT_WRAPPER_RUNNING";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    /// First shim in this process tree.
    Fresh,
    /// A shim (or something it started) is already running git.
    Reentrant,
}

impl Guard {
    pub fn from_value(value: Option<&OsStr>) -> Self {
        match value {
            Some(v) if !v.is_empty() => Guard::Reentrant,
            _ => Guard::Fresh,
        }
    }

    pub fn from_env() -> Self {
        Self::from_value(env::var_os(GUARD_VAR).as_deref())
    }
}

#[derive(Debug)]
pub struct ShimContext {
    pub guard: Guard,
    /// Arguments after the program name, untouched.
    pub args: Vec<OsString>,
    pub config: BridgeConfig,
    /// The running shim, excluded when searching for the real git.
    pub shim_exe: Option<PathBuf>,
}

impl ShimContext {
    pub fn from_env() -> Self {
        Self {
            guard: Guard::from_env(),
            args: env::args_os().skip(1).collect(),
            config: BridgeConfig::load_from_env(),
            shim_exe: env::current_exe().ok(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_from_value() {
        assert_eq!(Guard::from_value(None), Guard::Fresh);
        assert_eq!(Guard::from_value(Some(OsStr::new(""))), Guard::Fresh);
        assert_eq!(Guard::from_value(Some(OsStr::new("1"))), Guard::Reentrant);
        assert_eq!(Guard::from_value(Some(OsStr::new("yes"))), Guard::Reentrant);
    }
}
