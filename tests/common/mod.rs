#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

const GIT_STUB: &str = r#"#!/bin/sh
echo "git $* guard=$GIT_WRAPPER_RUNNING" >> "$BRIDGE_TEST_LOG"
case "$1" in
  commit) exit 3 ;;
  ls-files) printf 'model.dvc\000train.py\000' ;;
esac
exit 0
"#;

const DVC_STUB: &str = r#"#!/bin/sh
echo "dvc $* cwd=$(pwd)" >> "$BRIDGE_TEST_LOG"
case "$(pwd)" in
  *"$DVC_STUB_FAIL_IN") [ -n "$DVC_STUB_FAIL_IN" ] && exit 4 ;;
esac
exit 0
"#;

/// A repository plus stub `git`/`dvc` executables that log their calls.
pub struct Fixture {
    pub temp: TempDir,
    pub repo: PathBuf,
    pub log: PathBuf,
    config: PathBuf,
    dvc_dir: PathBuf,
    empty_dir: PathBuf,
}

impl Fixture {
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let temp = TempDir::new()?;
        let base = temp.path().canonicalize()?;
        let repo = base.join("repo");
        let git_dir = base.join("git-bin");
        let dvc_dir = base.join("dvc-bin");
        let empty_dir = base.join("empty-bin");
        for dir in [&repo, &git_dir, &dvc_dir, &empty_dir] {
            fs::create_dir_all(dir)?;
        }
        git2::Repository::init(&repo)?;

        write_executable(&git_dir.join("git"), GIT_STUB)?;
        write_executable(&dvc_dir.join("dvc"), DVC_STUB)?;

        let config = base.join("config.yml");
        fs::write(
            &config,
            format!("git_executable: {}\n", git_dir.join("git").display()),
        )?;
        let log = base.join("calls.log");
        fs::write(&log, "")?;

        Ok(Self {
            temp,
            repo,
            log,
            config,
            dvc_dir,
            empty_dir,
        })
    }

    fn command(&self, bin: &str, with_dvc: bool) -> Command {
        let path = if with_dvc { &self.dvc_dir } else { &self.empty_dir };
        let mut cmd = Command::cargo_bin(bin).expect("binary built");
        cmd.current_dir(&self.repo)
            .env("PATH", path)
            .env("GIT_DVC_BRIDGE_CONFIG", &self.config)
            .env("BRIDGE_TEST_LOG", &self.log)
            .env_remove("GIT_WRAPPER_RUNNING")
            .env_remove("GIT_DIR")
            .env_remove("GIT_WORK_TREE")
            .env_remove("DVC_STUB_FAIL_IN");
        cmd
    }

    pub fn shim(&self) -> Command {
        self.command("git-dvc-shim", true)
    }

    pub fn shim_without_dvc(&self) -> Command {
        self.command("git-dvc-shim", false)
    }

    pub fn pre_push(&self) -> Command {
        self.command("git-dvc-pre-push", true)
    }

    pub fn calls(&self) -> Vec<String> {
        fs::read_to_string(&self.log)
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }
}

fn write_executable(path: &Path, contents: &str) -> std::io::Result<()> {
    fs::write(path, contents)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(path)?.permissions();
        perms.set_mode(0o755);
        fs::set_permissions(path, perms)?;
    }
    Ok(())
}
