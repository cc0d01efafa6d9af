//! One automerge run, from branch listing to the last merge
//!
//! Gather branches (effectful), resolve related branches (pure), then merge
//! into the next release or the main branch (effectful).

use crate::config::ActionConfig;
use crate::error::{Error, Result};
use crate::merge::{MergeReport, create_merge_plan, merge_to_related_branches};
use crate::platform::PlatformService;
use crate::release::{
    branches_related_to, is_version_name, next_targets, serial_number, strip_release_prefix,
};
use crate::report::Reporter;
use crate::types::{FetchStrategy, MergeUnit};
use tracing::{debug, info};

/// Maximum number of refs requested by the GraphQL search
const GRAPHQL_FIRST: u32 = 100;

/// Options for a run
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Resolve targets without merging anything
    pub dry_run: bool,
}

/// What a run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The target branch is not a release branch; nothing to do
    Skipped {
        /// The unit's target branch
        branch: String,
    },
    /// Dry run: the merges that would have been attempted
    Planned {
        /// Merge source
        source: String,
        /// Targets in merge order
        targets: Vec<String>,
    },
    /// Merges were attempted
    Completed(MergeReport),
}

/// Serial number of the unit's target branch, if it is a release branch
pub fn release_serial(unit: &MergeUnit, config: &ActionConfig) -> Option<u64> {
    serial_number(
        &unit.base_ref,
        &config.release_branch_prefix,
        &config.release_branch_task_prefix,
    )
}

/// Name filter for the GraphQL search.
///
/// Task-style targets only relate to task-style branches, so the search is
/// narrowed to the task prefix. Version-named targets search the whole
/// release prefix.
pub fn search_query<'a>(unit: &MergeUnit, config: &'a ActionConfig) -> Option<&'a str> {
    let version_target = strip_release_prefix(&unit.base_ref, &config.release_branch_prefix)
        .is_some_and(is_version_name);
    let task_prefix = config.release_branch_task_prefix.trim();
    (!version_target && !task_prefix.is_empty()).then_some(task_prefix)
}

/// List the release branches on the remote with the configured strategy
pub async fn fetch_release_branches(
    platform: &dyn PlatformService,
    unit: &MergeUnit,
    config: &ActionConfig,
) -> Result<Vec<String>> {
    debug!(strategy = %config.branch_fetching_strategy, "fetching release branches");
    match config.branch_fetching_strategy {
        FetchStrategy::Api => {
            platform
                .list_matching_branches(&config.release_branch_prefix)
                .await
        }
        FetchStrategy::Graphql => {
            platform
                .search_branches(
                    &config.release_branch_prefix,
                    search_query(unit, config),
                    GRAPHQL_FIRST,
                )
                .await
        }
    }
}

/// Merge the unit forward into the next release branch, or into the main
/// branch when it targets the newest release.
///
/// Runs for units whose target has no release serial are skipped without
/// touching the remote.
pub async fn run(
    platform: &dyn PlatformService,
    unit: &MergeUnit,
    config: &ActionConfig,
    options: RunOptions,
    reporter: &dyn Reporter,
) -> Result<RunOutcome> {
    let Some(serial) = release_serial(unit, config) else {
        info!(branch = %unit.base_ref, "not a release branch, skipping");
        return Ok(RunOutcome::Skipped {
            branch: unit.base_ref.clone(),
        });
    };
    debug!(branch = %unit.base_ref, serial, "release branch detected");

    let branches = fetch_release_branches(platform, unit, config).await?;
    reporter.debug("workflow::branches", &branches);
    if branches.is_empty() {
        return Err(Error::NoBranchesFound);
    }

    let related = branches_related_to(unit, config, &branches)?;
    reporter.debug("workflow::related", &related);

    let mut targets = next_targets(&related);
    if targets.is_empty() {
        info!(main = %config.main_branch_name, "no newer release, merging into the main branch");
        targets.push(config.main_branch_name.clone());
    }

    if options.dry_run {
        let plan = create_merge_plan(&unit.head_ref, &targets);
        return Ok(RunOutcome::Planned {
            source: unit.head_ref.clone(),
            targets: plan.targets().map(str::to_string).collect(),
        });
    }

    let report = merge_to_related_branches(platform, unit, config, &targets, reporter).await?;
    info!(
        merged = report.merged.len(),
        conflicted = ?report.conflicted,
        "automerge finished"
    );
    Ok(RunOutcome::Completed(report))
}
