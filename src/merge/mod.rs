//! Forward-merge engine for release branches
//!
//! Two-phase pattern:
//! 1. Plan - dedupe targets into a `MergePlan` (pure, testable)
//! 2. Execute - perform merges, falling back to a PR on conflict (effectful)

mod execute;
mod plan;
mod pull_request;

pub use execute::{MergeReport, execute_merge, merge_source_to_branch, merge_to_related_branches};
pub use plan::{MergePlan, MergeStep, create_merge_plan};
pub use pull_request::create_pull_request_if_not_exists;
