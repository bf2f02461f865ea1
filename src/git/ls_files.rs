use std::collections::HashSet;

/// Arguments listing untracked and cached files, honoring git's ignore rules.
///
/// NUL-terminated so paths with special characters come through unquoted.
pub const UNTRACKED_OR_CACHED: [&str; 5] = [
    "ls-files",
    "-z",
    "--others",
    "--exclude-standard",
    "--cached",
];

/// Parse `git ls-files -z` output into unique paths, keeping git's order.
///
/// `--others` and `--cached` overlap on conflicted entries, which git then
/// lists more than once.
pub fn parse_listing(output: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    output
        .split('\0')
        .filter(|entry| !entry.is_empty())
        .filter(|entry| seen.insert(*entry))
        .map(str::to_string)
        .collect()
}
