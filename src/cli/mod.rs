//! Command line surface
//!
//! Every flag doubles as the GitHub Actions input variable (`INPUT_*`) so the
//! binary runs unchanged as an action step.

mod context;
mod run;
mod style;

pub use context::RunContext;
pub use run::{error_command, run_automerge};

use clap::Parser;
use release_automerge::config::{
    ActionConfig, DEFAULT_MAIN_BRANCH, DEFAULT_RELEASE_PREFIX, DEFAULT_REMOTE, DEFAULT_TASK_PREFIX,
};
use release_automerge::error::{Error, Result};
use release_automerge::platform::DEFAULT_API_URL;
use release_automerge::types::FetchStrategy;
use std::path::PathBuf;

/// Merge release branches forward into the next release or the main branch
#[derive(Debug, Parser)]
#[command(name = "release-automerge", version, about)]
pub struct Cli {
    /// GitHub token with contents and pull-requests write access
    #[arg(long, env = "INPUT_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Label added to pull requests opened on a merge conflict
    #[arg(long, env = "INPUT_AUTOMERGEPRLABEL")]
    pub automerge_pr_label: Option<String>,

    /// Prefix of release branches
    #[arg(long, env = "INPUT_RELEASEBRANCHPRFIX")]
    pub release_branch_prefix: Option<String>,

    /// Task prefix preceding the serial digits in release branch names
    #[arg(long, env = "INPUT_RELEASEBRANCHTASKPREFIX")]
    pub release_branch_task_prefix: Option<String>,

    /// Branch receiving the merge when there is no newer release
    #[arg(long, env = "INPUT_MAINBRANCHNAME")]
    pub main_branch_name: Option<String>,

    /// How release branches are listed
    #[arg(long, env = "INPUT_BRANCHFETCHINGSTRATEGY", value_enum, ignore_case = true)]
    pub branch_fetching_strategy: Option<FetchStrategy>,

    /// Git remote name
    #[arg(long, env = "INPUT_REMOTENAME")]
    pub remote_name: Option<String>,

    /// Workflow event payload
    #[arg(long, env = "GITHUB_EVENT_PATH")]
    pub event_path: Option<PathBuf>,

    /// Commit that triggered the workflow
    #[arg(long, env = "GITHUB_SHA")]
    pub sha: Option<String>,

    /// GitHub REST API root
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Show the merges that would happen without performing them
    #[arg(long)]
    pub dry_run: bool,
}

fn non_blank(value: Option<&String>, default: &str) -> String {
    value
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .unwrap_or(default)
        .to_string()
}

impl Cli {
    /// Build the action configuration, applying defaults for blank inputs
    pub fn action_config(&self) -> Result<ActionConfig> {
        let mut config = ActionConfig::new(self.token.clone().unwrap_or_default())?;
        config.automerge_pr_label = self.automerge_pr_label.clone();
        config.release_branch_prefix =
            non_blank(self.release_branch_prefix.as_ref(), DEFAULT_RELEASE_PREFIX);
        config.release_branch_task_prefix =
            non_blank(self.release_branch_task_prefix.as_ref(), DEFAULT_TASK_PREFIX);
        config.main_branch_name = non_blank(self.main_branch_name.as_ref(), DEFAULT_MAIN_BRANCH);
        config.remote_name = non_blank(self.remote_name.as_ref(), DEFAULT_REMOTE);
        config.branch_fetching_strategy = self.branch_fetching_strategy.unwrap_or_default();
        Ok(config)
    }

    /// Validated API root without a trailing slash
    pub fn api_url(&self) -> Result<String> {
        let url = url::Url::parse(self.api_url.trim())
            .map_err(|e| Error::Config(format!("Invalid API URL '{}': {e}", self.api_url)))?;
        Ok(url.as_str().trim_end_matches('/').to_string())
    }
}
