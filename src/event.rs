//! GitHub Actions event payload adapter
//!
//! Normalizes `pull_request` and `push` payloads into a [`MergeUnit`].

use crate::error::{Error, Result};
use crate::release::strip_ref_prefix;
use crate::types::MergeUnit;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct EventPayload {
    pull_request: Option<PullRequestPayload>,
    #[serde(rename = "ref")]
    ref_name: Option<String>,
    after: Option<String>,
    repository: Option<RepositoryPayload>,
}

#[derive(Debug, Deserialize)]
struct PullRequestPayload {
    base: BranchPayload,
    head: BranchPayload,
}

#[derive(Debug, Deserialize)]
struct BranchPayload {
    #[serde(rename = "ref")]
    ref_name: String,
    #[serde(default)]
    sha: String,
    repo: Option<RepositoryPayload>,
}

#[derive(Debug, Deserialize)]
struct RepositoryPayload {
    name: Option<String>,
    owner: Option<OwnerPayload>,
}

#[derive(Debug, Deserialize)]
struct OwnerPayload {
    login: Option<String>,
    name: Option<String>,
}

impl RepositoryPayload {
    fn owner_login(&self) -> Option<&str> {
        let owner = self.owner.as_ref()?;
        owner.login.as_deref().or(owner.name.as_deref())
    }
}

fn branch_name(ref_name: &str) -> String {
    strip_ref_prefix(ref_name).trim().to_string()
}

/// Read and parse the event file GitHub Actions points `GITHUB_EVENT_PATH` at
pub fn load_event(path: &Path) -> Result<serde_json::Value> {
    debug!(path = %path.display(), "loading event payload");
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Build the merge unit for this run from an event payload.
///
/// A `pull_request` payload yields the PR's base and head. Any other payload
/// is treated as a push: the pushed branch is both base and head, and the
/// commit is `sha` (the run's `GITHUB_SHA`) or the payload's `after`.
pub fn merge_unit_from_event(payload: &serde_json::Value, sha: Option<&str>) -> Result<MergeUnit> {
    let event = EventPayload::deserialize(payload)
        .map_err(|e| Error::Event(format!("Unrecognized event payload: {e}")))?;

    if let Some(pr) = event.pull_request {
        let repo = pr
            .base
            .repo
            .as_ref()
            .or(event.repository.as_ref())
            .ok_or_else(|| Error::Event("Failed to get repository name".to_string()))?;
        let repo_name = repo
            .name
            .clone()
            .ok_or_else(|| Error::Event("Failed to get repository name".to_string()))?;
        let repo_owner = repo
            .owner_login()
            .ok_or_else(|| Error::Event("Failed to get repository owner".to_string()))?
            .to_string();

        return Ok(MergeUnit {
            base_ref: branch_name(&pr.base.ref_name),
            head_ref: branch_name(&pr.head.ref_name),
            head_sha: pr.head.sha,
            repo_owner,
            repo_name,
        });
    }

    let repo = event
        .repository
        .as_ref()
        .filter(|r| r.name.as_deref().is_some_and(|n| !n.is_empty()))
        .ok_or_else(|| Error::Event("Failed to get repository name".to_string()))?;
    let repo_owner = repo
        .owner_login()
        .ok_or_else(|| Error::Event("Failed to get repository owner".to_string()))?
        .to_string();
    let pushed = branch_name(event.ref_name.as_deref().unwrap_or_default());
    let head_sha = sha
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .or(event.after)
        .unwrap_or_default();

    Ok(MergeUnit {
        base_ref: pushed.clone(),
        head_ref: pushed,
        head_sha,
        repo_owner,
        repo_name: repo.name.clone().unwrap_or_default(),
    })
}
