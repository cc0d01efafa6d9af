//! Branch name tokenizer
//!
//! Pure string functions over branch names of the shapes
//! `[refs/heads/][release-prefix/][task-prefix][serial][-suffix]` and
//! `[refs/heads/][release-prefix/]major.minor.patch`.

use regex::Regex;
use std::sync::LazyLock;

/// Full ref prefix of a branch
pub const REF_HEADS_PREFIX: &str = "refs/heads/";

/// Ref namespace used by the matching-refs endpoint
pub const HEADS_PREFIX: &str = "heads";

static REF_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^ */*refs/heads/").expect("valid regex"));

static VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+\.[0-9]+\.[0-9]+$").expect("valid regex"));

/// A branch name split against a configured release prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedBranchName<'a> {
    /// The name started with `refs/heads/`
    pub ref_prefix_present: bool,
    /// The release prefix was found at the start of the name
    pub release_prefix_matched: bool,
    /// Trimmed rest of the name; the whole trimmed name if the prefix did not match
    pub remainder: &'a str,
}

/// Remove a leading `refs/heads/` (case-insensitive, optionally preceded by
/// spaces and slashes).
pub fn strip_ref_prefix(name: &str) -> &str {
    REF_PREFIX_RE
        .find(name)
        .map_or(name, |m| &name[m.end()..])
}

/// Split a branch name into its ref prefix, release prefix and remainder.
pub fn parse_branch_name<'a>(name: &'a str, release_prefix: &str) -> ParsedBranchName<'a> {
    let stripped = strip_ref_prefix(name);
    let ref_prefix_present = stripped.len() != name.len();
    let trimmed = stripped.trim();

    let prefix = release_prefix.trim().trim_end_matches('/');
    if prefix.is_empty() {
        return ParsedBranchName {
            ref_prefix_present,
            release_prefix_matched: true,
            remainder: trimmed,
        };
    }

    let token = if trimmed.contains('/') {
        format!("{prefix}/")
    } else {
        prefix.to_string()
    };

    match trimmed.get(..token.len()) {
        Some(head) if head.eq_ignore_ascii_case(&token) => ParsedBranchName {
            ref_prefix_present,
            release_prefix_matched: true,
            remainder: trimmed[token.len()..].trim(),
        },
        _ => ParsedBranchName {
            ref_prefix_present,
            release_prefix_matched: false,
            remainder: trimmed,
        },
    }
}

/// Name without ref and release prefixes, or `None` if the release prefix is absent.
pub fn strip_release_prefix<'a>(name: &'a str, release_prefix: &str) -> Option<&'a str> {
    let parsed = parse_branch_name(name, release_prefix);
    parsed.release_prefix_matched.then_some(parsed.remainder)
}

/// Serial number of a task-style release branch (`release/RLS-11` -> 11).
///
/// The digits must directly follow the first occurrence of the task prefix.
pub fn extract_task_serial(name: &str, release_prefix: &str, task_prefix: &str) -> Option<u64> {
    let remainder = strip_release_prefix(name, release_prefix)?;
    let task_prefix = task_prefix.trim();
    let start = remainder.find(task_prefix)? + task_prefix.len();
    let after = &remainder[start..];
    let digits_end = after
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(after.len());
    after[..digits_end].parse().ok()
}

/// Whether the string is exactly `major.minor.patch`
pub fn is_version_name(name: &str) -> bool {
    VERSION_RE.is_match(name)
}

/// Serial number of a dotted version (`1.2.3` -> 123, `10.10.100` -> 1010100).
///
/// The decimal values of major, minor and patch are written one after
/// another, so for single digit parts this is `major*100 + minor*10 + patch`.
pub fn extract_version_serial(version: &str) -> Option<u64> {
    if !is_version_name(version) {
        return None;
    }
    let parts = version
        .split('.')
        .map(str::parse::<u64>)
        .collect::<Result<Vec<_>, _>>()
        .ok()?;
    let [major, minor, patch] = parts.as_slice() else {
        return None;
    };
    format!("{major}{minor}{patch}").parse().ok()
}

/// Full ref of a branch: `release/RLS-1` -> `refs/heads/release/RLS-1`
pub fn branch_ref(name: &str) -> String {
    format!("{REF_HEADS_PREFIX}{}", name.trim().trim_matches('/'))
}

/// Ref prefix that selects every branch under a release prefix.
///
/// An empty release prefix selects every branch.
pub fn heads_ref_prefix(release_prefix: &str) -> String {
    match release_prefix.trim().trim_matches('/') {
        "" => REF_HEADS_PREFIX.to_string(),
        prefix => format!("{REF_HEADS_PREFIX}{prefix}/"),
    }
}

/// Matching-refs path for branches under a release prefix: `heads/release/`
pub fn matching_refs_path(release_prefix: &str) -> String {
    match release_prefix.trim().trim_matches('/') {
        "" => format!("{HEADS_PREFIX}/"),
        prefix => format!("{HEADS_PREFIX}/{prefix}/"),
    }
}

/// Full branch name of a ref found under a release prefix
pub fn join_release_prefix(release_prefix: &str, name: &str) -> String {
    match release_prefix.trim().trim_matches('/') {
        "" => name.to_string(),
        prefix => format!("{prefix}/{name}"),
    }
}

/// Name of the helper branch that carries a conflicting merge
pub fn automerge_branch_name(target: &str, source: &str) -> String {
    format!(
        "automerge_{}_to_{}",
        strip_ref_prefix(source).trim(),
        strip_ref_prefix(target).trim()
    )
}
