//! Core types for release-automerge

use serde::{Deserialize, Serialize};

/// The unit of work for one run: a merged pull request or a direct push
///
/// For a direct push `base_ref` and `head_ref` name the same branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeUnit {
    /// Branch the changes landed in (e.g. `release/RLS-11`)
    pub base_ref: String,
    /// Branch the changes came from
    pub head_ref: String,
    /// Latest commit of the head branch
    pub head_sha: String,
    /// Repository owner login
    pub repo_owner: String,
    /// Repository name
    pub repo_name: String,
}

/// Repository coordinates used by the platform service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoConfig {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// REST API root, e.g. `https://api.github.com`
    pub api_url: String,
}

impl RepoConfig {
    /// Build repository coordinates for a merge unit
    pub fn for_unit(unit: &MergeUnit, api_url: impl Into<String>) -> Self {
        Self {
            owner: unit.repo_owner.clone(),
            repo: unit.repo_name.clone(),
            api_url: api_url.into(),
        }
    }
}

/// How release branches are listed on the remote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum FetchStrategy {
    /// Paginated REST `git/matching-refs`
    Api,
    /// Single GraphQL `repository.refs` query
    #[default]
    Graphql,
}

impl std::fmt::Display for FetchStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Api => write!(f, "api"),
            Self::Graphql => write!(f, "graphql"),
        }
    }
}

/// Answer of the remote merge endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeStatus {
    /// A merge commit was created (201)
    Merged,
    /// The target already contains the source (204)
    NothingToMerge,
    /// The branches conflict (409)
    Conflict,
}

impl std::fmt::Display for MergeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Merged => write!(f, "merged"),
            Self::NothingToMerge => write!(f, "nothing to merge"),
            Self::Conflict => write!(f, "conflict"),
        }
    }
}

/// Result of merging the source into one target branch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The target is up to date with the source
    Merged,
    /// The merge conflicted and a pull request was opened (or already existed)
    Conflict,
}

impl From<MergeStatus> for MergeOutcome {
    fn from(status: MergeStatus) -> Self {
        match status {
            MergeStatus::Merged | MergeStatus::NothingToMerge => Self::Merged,
            MergeStatus::Conflict => Self::Conflict,
        }
    }
}
