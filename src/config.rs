//! Action configuration
//!
//! Loaded once from the action inputs and read-only afterwards.

use crate::error::{Error, Result};
use crate::types::FetchStrategy;

/// Default prefix of release branches
pub const DEFAULT_RELEASE_PREFIX: &str = "release";

/// Default prefix of the release task id inside a branch name
pub const DEFAULT_TASK_PREFIX: &str = "RLS-";

/// Default main development branch
pub const DEFAULT_MAIN_BRANCH: &str = "main";

/// Default git remote name
pub const DEFAULT_REMOTE: &str = "origin";

/// Configuration snapshot for one run
#[derive(Clone, PartialEq, Eq)]
pub struct ActionConfig {
    /// GitHub token
    pub token: String,
    /// Label for pull requests opened on a merge conflict
    pub automerge_pr_label: Option<String>,
    /// Task prefix before the serial digits, e.g. `RLS-` in `release/RLS-11`
    pub release_branch_task_prefix: String,
    /// Branch that receives the merge when no newer release exists
    pub main_branch_name: String,
    /// How release branches are listed
    pub branch_fetching_strategy: FetchStrategy,
    /// Prefix of release branches, e.g. `release`
    pub release_branch_prefix: String,
    /// Git remote name
    pub remote_name: String,
}

impl ActionConfig {
    /// Create a configuration with defaults for everything but the token
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(Error::Config(
                "Input required and not supplied: token".to_string(),
            ));
        }
        Ok(Self {
            token,
            automerge_pr_label: None,
            release_branch_task_prefix: DEFAULT_TASK_PREFIX.to_string(),
            main_branch_name: DEFAULT_MAIN_BRANCH.to_string(),
            branch_fetching_strategy: FetchStrategy::default(),
            release_branch_prefix: DEFAULT_RELEASE_PREFIX.to_string(),
            remote_name: DEFAULT_REMOTE.to_string(),
        })
    }

    /// Label to attach to conflict pull requests, if a non-blank one is set
    pub fn pr_label(&self) -> Option<&str> {
        self.automerge_pr_label
            .as_deref()
            .map(str::trim)
            .filter(|label| !label.is_empty())
    }
}

// Keep the token out of debug logs.
impl std::fmt::Debug for ActionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionConfig")
            .field("token", &"***")
            .field("automerge_pr_label", &self.automerge_pr_label)
            .field("release_branch_task_prefix", &self.release_branch_task_prefix)
            .field("main_branch_name", &self.main_branch_name)
            .field("branch_fetching_strategy", &self.branch_fetching_strategy)
            .field("release_branch_prefix", &self.release_branch_prefix)
            .field("remote_name", &self.remote_name)
            .finish()
    }
}
