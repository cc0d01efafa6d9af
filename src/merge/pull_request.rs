//! Conflict fallback: hand the merge over to a pull request

use crate::error::Result;
use crate::platform::PlatformService;
use crate::release::automerge_branch_name;
use crate::report::Reporter;
use crate::types::MergeUnit;

/// Open a PR merging `source` into `target` unless one is already open.
///
/// The PR head is a fresh `automerge_{source}_to_{target}` branch created at
/// the unit's head commit, so the conflict can be resolved without touching
/// the release branch. An open PR from either the source or the automerge
/// branch counts as existing. A failure to label the PR is reported and
/// swallowed.
pub async fn create_pull_request_if_not_exists(
    platform: &dyn PlatformService,
    unit: &MergeUnit,
    target: &str,
    source: &str,
    label: Option<&str>,
    reporter: &dyn Reporter,
) -> Result<()> {
    let branch_name = automerge_branch_name(target, source);
    for head in [source, branch_name.as_str()] {
        if platform.active_pr_exists(target, head).await? {
            reporter.debug("create_pull_request::already-exists", &(target, head));
            return Ok(());
        }
    }

    let pr_branch = platform.create_branch(&branch_name, &unit.head_sha).await?;
    reporter.debug("create_pull_request::branch-created", &pr_branch);

    let pr_number = platform.create_pr(target, &pr_branch).await?;
    reporter.debug("create_pull_request::pr-created", &pr_number);

    let Some(label) = label.map(str::trim).filter(|l| !l.is_empty()) else {
        return Ok(());
    };

    if let Err(err) = platform.add_label(pr_number, label).await {
        reporter.error(&err);
    }
    Ok(())
}
