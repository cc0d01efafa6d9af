//! Relation between the merged branch and the other release branches

use super::serial::branches_with_upper_serial;
use crate::config::ActionConfig;
use crate::error::{Error, Result};
use crate::types::MergeUnit;
use tracing::debug;

/// Release branches ahead of the unit's target branch, lowest serial first.
///
/// An empty result is not an error: it means there is no newer release.
pub fn branches_related_to<S: AsRef<str>>(
    unit: &MergeUnit,
    config: &ActionConfig,
    all_branches: &[S],
) -> Result<Vec<String>> {
    let target = unit.base_ref.trim();
    if target.is_empty() {
        return Err(Error::MissingTargetBranch);
    }
    debug!(
        target,
        candidates = all_branches.len(),
        release_prefix = %config.release_branch_prefix,
        task_prefix = %config.release_branch_task_prefix,
        "resolving related branches"
    );

    branches_with_upper_serial(
        &unit.base_ref,
        all_branches,
        &config.release_branch_prefix,
        &config.release_branch_task_prefix,
    )
}

/// Branches to merge into during this run: only the next release, if any.
pub fn next_targets<S: AsRef<str>>(related: &[S]) -> Vec<String> {
    related
        .first()
        .map(|first| vec![first.as_ref().to_string()])
        .unwrap_or_default()
}
