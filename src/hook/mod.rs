pub mod push;

pub use push::{find_artifact_repos, push_all, run_pre_push};
