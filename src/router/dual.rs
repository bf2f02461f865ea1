//! Combined git + dvc views for diff, pull and status.

use std::ffi::{OsStr, OsString};

use console::style;

use crate::error::{BridgeError, Result};
use crate::tools::{Invocation, ToolRunner};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DualCommand {
    Diff,
    Pull,
    Status,
}

impl DualCommand {
    pub fn from_subcommand(name: &OsStr) -> Option<Self> {
        match name.to_str()? {
            "diff" => Some(Self::Diff),
            "pull" => Some(Self::Pull),
            "status" => Some(Self::Status),
            _ => None,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Diff => "Diff",
            Self::Pull => "Pull",
            Self::Status => "Status",
        }
    }

    fn artifact_label(self) -> &'static str {
        match self {
            Self::Diff => "DVC Diff",
            Self::Pull => "DVC Pull",
            Self::Status => "DVC Data Status",
        }
    }

    fn artifact_args(self) -> &'static [&'static str] {
        match self {
            Self::Diff => &["diff"],
            Self::Pull => &["pull"],
            Self::Status => &["data", "status", "--granular"],
        }
    }

    /// Pull must not leave data behind the code it just fetched.
    fn artifact_failure_is_fatal(self) -> bool {
        matches!(self, Self::Pull)
    }
}

/// Run git with `args` unchanged, then the dvc counterpart.
///
/// Returns the exit code the shim should report. For diff and status that is
/// always git's; for pull a failure on either side is an error.
pub fn run_dual<R: ToolRunner + ?Sized>(
    runner: &R,
    command: DualCommand,
    args: &[OsString],
) -> Result<i32> {
    let git = Invocation::git(args);

    println!("\n=== Git {} ===", command.label());
    let git_code = runner.run(&git)?;

    if command.artifact_failure_is_fatal() && git_code != 0 {
        eprintln!(
            "{} Error during {}: {git}",
            style("✗").red().bold(),
            command.label().to_lowercase()
        );
        return Err(BridgeError::Subprocess {
            command: git.to_string(),
            code: git_code,
        });
    }

    if !runner.artifact_tool_available() {
        skip_notice(command);
        return Ok(git_code);
    }

    let artifact = Invocation::artifact(command.artifact_args());
    println!("\n=== {} ===", command.artifact_label());
    match runner.run(&artifact) {
        Ok(0) => {}
        Ok(code) if command.artifact_failure_is_fatal() => {
            eprintln!(
                "{} Error during {}: {artifact}",
                style("✗").red().bold(),
                command.label().to_lowercase()
            );
            return Err(BridgeError::Subprocess {
                command: artifact.to_string(),
                code,
            });
        }
        Ok(code) => {
            tracing::debug!(code, %artifact, "advisory artifact command failed");
            eprintln!("{} {artifact} exited with code {code}", style("!").yellow());
        }
        Err(BridgeError::ArtifactToolNotFound(_)) => skip_notice(command),
        Err(e) if command.artifact_failure_is_fatal() => return Err(e),
        Err(e) => {
            eprintln!("{} {artifact} could not run: {e}", style("!").yellow());
        }
    }

    Ok(git_code)
}

fn skip_notice(command: DualCommand) {
    eprintln!(
        "{} DVC not found, proceeding with git {} only",
        style("!").yellow(),
        command.label().to_lowercase()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::testing::RecordingRunner;

    fn os(args: &[&str]) -> Vec<OsString> {
        args.iter().map(OsString::from).collect()
    }

    #[test]
    fn test_subcommand_recognition() {
        assert_eq!(DualCommand::from_subcommand(OsStr::new("diff")), Some(DualCommand::Diff));
        assert_eq!(DualCommand::from_subcommand(OsStr::new("pull")), Some(DualCommand::Pull));
        assert_eq!(DualCommand::from_subcommand(OsStr::new("status")), Some(DualCommand::Status));
        assert_eq!(DualCommand::from_subcommand(OsStr::new("push")), None);
    }

    #[test]
    fn test_status_runs_both_tools_with_original_args() {
        let runner = RecordingRunner::new();
        let code = run_dual(&runner, DualCommand::Status, &os(&["status", "-s"])).unwrap();
        assert_eq!(code, 0);
        assert_eq!(runner.calls(), vec!["git status -s", "dvc data status --granular"]);
    }

    #[test]
    fn test_diff_runs_artifact_even_when_git_fails() {
        let runner = RecordingRunner::new().failing("git diff", 1);
        let code = run_dual(&runner, DualCommand::Diff, &os(&["diff", "HEAD~1"])).unwrap();
        assert_eq!(code, 1);
        assert_eq!(runner.calls(), vec!["git diff HEAD~1", "dvc diff"]);
    }

    #[test]
    fn test_diff_artifact_failure_is_advisory() {
        let runner = RecordingRunner::new().failing("dvc diff", 255);
        let code = run_dual(&runner, DualCommand::Diff, &os(&["diff"])).unwrap();
        assert_eq!(code, 0);
    }

    #[test]
    fn test_pull_skips_artifact_when_git_fails() {
        let runner = RecordingRunner::new().failing("git pull", 1);
        let err = run_dual(&runner, DualCommand::Pull, &os(&["pull"])).unwrap_err();
        assert!(matches!(err, BridgeError::Subprocess { code: 1, .. }));
        assert_eq!(runner.calls(), vec!["git pull"]);
    }

    #[test]
    fn test_pull_artifact_failure_is_fatal() {
        let runner = RecordingRunner::new().failing("dvc pull", 4);
        let err =
            run_dual(&runner, DualCommand::Pull, &os(&["pull", "origin", "main"])).unwrap_err();
        assert!(matches!(err, BridgeError::Subprocess { code: 4, .. }));
        assert_eq!(runner.calls(), vec!["git pull origin main", "dvc pull"]);
    }

    #[test]
    fn test_missing_artifact_tool_degrades_to_git_only() {
        for command in [DualCommand::Diff, DualCommand::Pull, DualCommand::Status] {
            let runner = RecordingRunner::new().without_artifact_tool();
            let name = command.label().to_lowercase();
            let args = os(&[name.as_str()]);
            let code = run_dual(&runner, command, &args).unwrap();
            assert_eq!(code, 0);
            assert_eq!(runner.calls().len(), 1);
            assert!(runner.calls()[0].starts_with("git "));
        }
    }
}
