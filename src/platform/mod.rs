//! Platform service for the hosting remote
//!
//! The merge orchestrator only talks to the repository through this trait.

mod github;

pub use github::{DEFAULT_API_URL, GitHubService};

use crate::error::Result;
use crate::types::{MergeStatus, RepoConfig};
use async_trait::async_trait;

/// Remote repository operations needed by the automerge run
#[async_trait]
pub trait PlatformService: Send + Sync {
    /// List every branch under `release_prefix/` through the paginated REST API.
    ///
    /// Returned names carry no `refs/heads/` prefix.
    async fn list_matching_branches(&self, release_prefix: &str) -> Result<Vec<String>>;

    /// List up to `first` branches under `release_prefix/` through a single
    /// GraphQL query, keeping only names that contain `query` when one is given.
    ///
    /// Returned names are full branch names (`release/RLS-11`).
    async fn search_branches(
        &self,
        release_prefix: &str,
        query: Option<&str>,
        first: u32,
    ) -> Result<Vec<String>>;

    /// Merge `source` into `target` on the remote
    ///
    /// Conflicts and no-op merges are statuses, not errors. Any other
    /// response is an error.
    async fn merge_branch(&self, source: &str, target: &str) -> Result<MergeStatus>;

    /// Whether an open PR from `source` into `target` exists
    async fn active_pr_exists(&self, target: &str, source: &str) -> Result<bool>;

    /// Open a PR from `source` into `target`, returning its number
    async fn create_pr(&self, target: &str, source: &str) -> Result<u64>;

    /// Add a label to a PR (created on the remote if missing)
    async fn add_label(&self, pr_number: u64, label: &str) -> Result<()>;

    /// Create branch `name` at commit `sha`, returning the created branch name
    async fn create_branch(&self, name: &str, sha: &str) -> Result<String>;

    /// Repository coordinates
    fn repo(&self) -> &RepoConfig;
}
