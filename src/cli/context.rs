//! Shared run context
//!
//! Gathers everything a run needs before any remote call: the action
//! configuration, the merge unit from the event payload, and the platform
//! service for the unit's repository.

use crate::cli::Cli;
use release_automerge::config::ActionConfig;
use release_automerge::error::{Error, Result};
use release_automerge::event::{load_event, merge_unit_from_event};
use release_automerge::platform::{GitHubService, PlatformService};
use release_automerge::types::{MergeUnit, RepoConfig};
use tracing::debug;

/// Everything one automerge run works with
pub struct RunContext {
    /// Action inputs
    pub config: ActionConfig,
    /// Branches and commit this run merges forward
    pub unit: MergeUnit,
    /// Platform service bound to the unit's repository
    pub platform: Box<dyn PlatformService>,
}

impl RunContext {
    /// Create a run context from parsed command line inputs
    pub fn new(cli: &Cli) -> Result<Self> {
        let config = cli.action_config()?;
        debug!(?config, "loaded action config");

        let event_path = cli.event_path.as_deref().ok_or_else(|| {
            Error::Event("GITHUB_EVENT_PATH is not set; no event payload to read".to_string())
        })?;
        let payload = load_event(event_path)?;
        let unit = merge_unit_from_event(&payload, cli.sha.as_deref())?;
        debug!(?unit, "resolved merge unit");

        let repo = RepoConfig::for_unit(&unit, cli.api_url()?);
        let platform = Box::new(GitHubService::new(&config.token, repo)?);

        Ok(Self {
            config,
            unit,
            platform,
        })
    }
}
