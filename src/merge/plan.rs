//! Merge planning - pure functions for creating merge plans
//!
//! No I/O happens here. The plan is handed to `execute_merge`.

use std::collections::HashSet;

/// A single forward merge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeStep {
    /// Branch whose changes are merged
    pub source: String,
    /// Branch receiving the changes
    pub target: String,
}

impl std::fmt::Display for MergeStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "merge {} into {}", self.source, self.target)
    }
}

/// Ordered merge steps, one per distinct target
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergePlan {
    /// Steps in execution order
    pub steps: Vec<MergeStep>,
}

impl MergePlan {
    /// Check if there is nothing to merge
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Number of planned merges
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Target branches in execution order
    pub fn targets(&self) -> impl Iterator<Item = &str> {
        self.steps.iter().map(|step| step.target.as_str())
    }
}

/// Create a plan merging `source` into each target (PURE)
///
/// Targets are deduplicated by exact string, keeping first-occurrence order.
pub fn create_merge_plan<S: AsRef<str>>(source: &str, targets: &[S]) -> MergePlan {
    let mut seen = HashSet::new();
    let steps = targets
        .iter()
        .map(AsRef::as_ref)
        .filter(|target| seen.insert(*target))
        .map(|target| MergeStep {
            source: source.to_string(),
            target: target.to_string(),
        })
        .collect();

    MergePlan { steps }
}
