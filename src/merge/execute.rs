//! Merge execution - effectful operations
//!
//! Performs the planned merges through the platform API and opens a
//! conflict PR when the remote refuses a merge.

use crate::config::ActionConfig;
use crate::error::Result;
use crate::merge::plan::{MergePlan, create_merge_plan};
use crate::merge::pull_request::create_pull_request_if_not_exists;
use crate::platform::PlatformService;
use crate::report::Reporter;
use crate::types::{MergeOutcome, MergeStatus, MergeUnit};

/// Result of merge execution
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// Targets the source was merged into (or already contained it)
    pub merged: Vec<String>,
    /// Target where the merge conflicted and a PR took over (if any)
    pub conflicted: Option<String>,
}

impl MergeReport {
    /// Check if every planned merge went through
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.conflicted.is_none()
    }

    /// Check if at least one target received the changes
    #[must_use]
    pub const fn has_merges(&self) -> bool {
        !self.merged.is_empty()
    }
}

/// Merge the unit's head branch into `target` (EFFECTFUL)
///
/// A conflict is not an error: a PR is opened instead (unless one is already
/// open) and [`MergeOutcome::Conflict`] is returned. Errors from the merge
/// or the PR fallback are propagated.
pub async fn merge_source_to_branch(
    platform: &dyn PlatformService,
    unit: &MergeUnit,
    config: &ActionConfig,
    target: &str,
    reporter: &dyn Reporter,
) -> Result<MergeOutcome> {
    let source = unit.head_ref.as_str();
    let status = platform.merge_branch(source, target).await?;
    reporter.debug("merge_source_to_branch::status", &(source, target, status));

    if status == MergeStatus::Conflict {
        create_pull_request_if_not_exists(
            platform,
            unit,
            target,
            source,
            config.pr_label(),
            reporter,
        )
        .await?;
    }

    Ok(status.into())
}

/// Execute the merge plan (EFFECTFUL)
///
/// Steps run one at a time. Execution stops at the first conflict, and the
/// first error aborts the run.
pub async fn execute_merge(
    plan: &MergePlan,
    platform: &dyn PlatformService,
    unit: &MergeUnit,
    config: &ActionConfig,
    reporter: &dyn Reporter,
) -> Result<MergeReport> {
    let mut report = MergeReport::default();

    for step in &plan.steps {
        reporter.debug("execute_merge::step", &step.to_string());
        match merge_source_to_branch(platform, unit, config, &step.target, reporter).await? {
            MergeOutcome::Merged => report.merged.push(step.target.clone()),
            MergeOutcome::Conflict => {
                report.conflicted = Some(step.target.clone());
                break;
            }
        }
    }

    Ok(report)
}

/// Merge the unit's head branch into each of `targets` in order
///
/// Duplicate targets are merged once. An empty list makes no remote calls.
pub async fn merge_to_related_branches<S: AsRef<str> + Sync>(
    platform: &dyn PlatformService,
    unit: &MergeUnit,
    config: &ActionConfig,
    targets: &[S],
    reporter: &dyn Reporter,
) -> Result<MergeReport> {
    let plan = create_merge_plan(&unit.head_ref, targets);
    reporter.debug("merge_to_related_branches::plan", &plan);
    execute_merge(&plan, platform, unit, config, reporter).await
}
