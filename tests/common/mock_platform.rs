//! Mock platform service for testing
//!
//! These are test utilities - not all may be used in every test binary.

#![allow(dead_code)]

use async_trait::async_trait;
use release_automerge::error::{Error, Result};
use release_automerge::platform::PlatformService;
use release_automerge::types::{MergeStatus, RepoConfig};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

/// Call record for `search_branches`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCall {
    pub release_prefix: String,
    pub query: Option<String>,
    pub first: u32,
}

/// Call record for `merge_branch`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeCall {
    pub source: String,
    pub target: String,
}

/// Call record for `active_pr_exists` and `create_pr`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrCall {
    pub target: String,
    pub source: String,
}

/// Call record for `create_branch`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateBranchCall {
    pub name: String,
    pub sha: String,
}

/// Call record for `add_label`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddLabelCall {
    pub pr_number: u64,
    pub label: String,
}

/// Hand-written mock platform service
///
/// Features:
/// - Auto-incrementing PR numbers
/// - Call tracking for verification
/// - Configurable merge answers per target branch
/// - Error injection for failure path testing
pub struct MockPlatformService {
    config: RepoConfig,
    next_pr_number: AtomicU64,
    branches: Mutex<Vec<String>>,
    merge_responses: Mutex<HashMap<String, MergeStatus>>,
    open_prs: Mutex<Vec<PrCall>>,
    // Call tracking
    list_calls: Mutex<Vec<String>>,
    search_calls: Mutex<Vec<SearchCall>>,
    merge_calls: Mutex<Vec<MergeCall>>,
    pr_exists_calls: Mutex<Vec<PrCall>>,
    create_pr_calls: Mutex<Vec<PrCall>>,
    create_branch_calls: Mutex<Vec<CreateBranchCall>>,
    add_label_calls: Mutex<Vec<AddLabelCall>>,
    // Error injection
    error_on_list: Mutex<Option<String>>,
    error_on_merge: Mutex<HashMap<String, String>>,
    error_on_create_branch: Mutex<Option<String>>,
    error_on_create_pr: Mutex<Option<String>>,
    error_on_add_label: Mutex<Option<String>>,
}

impl MockPlatformService {
    /// Create a new mock with the given config
    pub fn with_config(config: RepoConfig) -> Self {
        Self {
            config,
            next_pr_number: AtomicU64::new(1),
            branches: Mutex::new(Vec::new()),
            merge_responses: Mutex::new(HashMap::new()),
            open_prs: Mutex::new(Vec::new()),
            list_calls: Mutex::new(Vec::new()),
            search_calls: Mutex::new(Vec::new()),
            merge_calls: Mutex::new(Vec::new()),
            pr_exists_calls: Mutex::new(Vec::new()),
            create_pr_calls: Mutex::new(Vec::new()),
            create_branch_calls: Mutex::new(Vec::new()),
            add_label_calls: Mutex::new(Vec::new()),
            error_on_list: Mutex::new(None),
            error_on_merge: Mutex::new(HashMap::new()),
            error_on_create_branch: Mutex::new(None),
            error_on_create_pr: Mutex::new(None),
            error_on_add_label: Mutex::new(None),
        }
    }

    // === Response setup ===

    /// Branches on the remote, seen by both listing strategies
    pub fn set_branches(&self, branches: &[&str]) {
        *self.branches.lock().unwrap() = branches.iter().map(ToString::to_string).collect();
    }

    /// Answer of `merge_branch` for a target (defaults to `Merged`)
    pub fn set_merge_response(&self, target: &str, status: MergeStatus) {
        self.merge_responses
            .lock()
            .unwrap()
            .insert(target.to_string(), status);
    }

    /// Pretend an open PR from `source` into `target` already exists
    pub fn add_open_pr(&self, target: &str, source: &str) {
        self.open_prs.lock().unwrap().push(PrCall {
            target: target.to_string(),
            source: source.to_string(),
        });
    }

    // === Error injection methods ===

    /// Make both listing strategies return an error
    pub fn fail_list_branches(&self, msg: &str) {
        *self.error_on_list.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `merge_branch` into `target` return an error
    pub fn fail_merge_into(&self, target: &str, msg: &str) {
        self.error_on_merge
            .lock()
            .unwrap()
            .insert(target.to_string(), msg.to_string());
    }

    /// Make `create_branch` return an error
    pub fn fail_create_branch(&self, msg: &str) {
        *self.error_on_create_branch.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `create_pr` return an error
    pub fn fail_create_pr(&self, msg: &str) {
        *self.error_on_create_pr.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `add_label` return an error
    pub fn fail_add_label(&self, msg: &str) {
        *self.error_on_add_label.lock().unwrap() = Some(msg.to_string());
    }

    // === Call verification methods ===

    /// Prefixes `list_matching_branches` was called with
    pub fn get_list_calls(&self) -> Vec<String> {
        self.list_calls.lock().unwrap().clone()
    }

    /// All `search_branches` calls
    pub fn get_search_calls(&self) -> Vec<SearchCall> {
        self.search_calls.lock().unwrap().clone()
    }

    /// All `merge_branch` calls
    pub fn get_merge_calls(&self) -> Vec<MergeCall> {
        self.merge_calls.lock().unwrap().clone()
    }

    /// Targets of all `merge_branch` calls, in order
    pub fn merged_targets(&self) -> Vec<String> {
        self.get_merge_calls().into_iter().map(|c| c.target).collect()
    }

    /// All `active_pr_exists` calls
    pub fn get_pr_exists_calls(&self) -> Vec<PrCall> {
        self.pr_exists_calls.lock().unwrap().clone()
    }

    /// All `create_pr` calls
    pub fn get_create_pr_calls(&self) -> Vec<PrCall> {
        self.create_pr_calls.lock().unwrap().clone()
    }

    /// All `create_branch` calls
    pub fn get_create_branch_calls(&self) -> Vec<CreateBranchCall> {
        self.create_branch_calls.lock().unwrap().clone()
    }

    /// All `add_label` calls
    pub fn get_add_label_calls(&self) -> Vec<AddLabelCall> {
        self.add_label_calls.lock().unwrap().clone()
    }

    /// Total number of remote calls of any kind
    pub fn total_calls(&self) -> usize {
        self.list_calls.lock().unwrap().len()
            + self.search_calls.lock().unwrap().len()
            + self.merge_calls.lock().unwrap().len()
            + self.pr_exists_calls.lock().unwrap().len()
            + self.create_pr_calls.lock().unwrap().len()
            + self.create_branch_calls.lock().unwrap().len()
            + self.add_label_calls.lock().unwrap().len()
    }

    /// Assert that `merge_branch` was called exactly for these targets, in order
    pub fn assert_merged_into(&self, targets: &[&str]) {
        let calls = self.merged_targets();
        assert_eq!(
            calls, targets,
            "Expected merges into {targets:?} but got: {calls:?}"
        );
    }

    /// Assert that `create_pr` was called with specific target and source
    pub fn assert_create_pr_called(&self, target: &str, source: &str) {
        let calls = self.get_create_pr_calls();
        assert!(
            calls.iter().any(|c| c.target == target && c.source == source),
            "Expected create_pr({target}, {source}) but got: {calls:?}"
        );
    }

    /// Assert that no PR was opened
    pub fn assert_no_pr_created(&self) {
        let calls = self.get_create_pr_calls();
        assert!(calls.is_empty(), "Expected no create_pr calls but got: {calls:?}");
    }

    fn listing_result(&self) -> Result<Vec<String>> {
        if let Some(msg) = self.error_on_list.lock().unwrap().as_ref() {
            return Err(Error::GitHubApi(msg.clone()));
        }
        Ok(self.branches.lock().unwrap().clone())
    }
}

#[async_trait]
impl PlatformService for MockPlatformService {
    async fn list_matching_branches(&self, release_prefix: &str) -> Result<Vec<String>> {
        self.list_calls
            .lock()
            .unwrap()
            .push(release_prefix.to_string());
        self.listing_result()
    }

    async fn search_branches(
        &self,
        release_prefix: &str,
        query: Option<&str>,
        first: u32,
    ) -> Result<Vec<String>> {
        self.search_calls.lock().unwrap().push(SearchCall {
            release_prefix: release_prefix.to_string(),
            query: query.map(ToString::to_string),
            first,
        });
        // GitHub keeps only ref names containing the query
        let branches = self.listing_result()?;
        Ok(branches
            .into_iter()
            .filter(|name| query.is_none_or(|q| name.contains(q)))
            .collect())
    }

    async fn merge_branch(&self, source: &str, target: &str) -> Result<MergeStatus> {
        self.merge_calls.lock().unwrap().push(MergeCall {
            source: source.to_string(),
            target: target.to_string(),
        });

        if let Some(msg) = self.error_on_merge.lock().unwrap().get(target) {
            return Err(Error::GitHubApi(msg.clone()));
        }

        let responses = self.merge_responses.lock().unwrap();
        Ok(responses.get(target).copied().unwrap_or(MergeStatus::Merged))
    }

    async fn active_pr_exists(&self, target: &str, source: &str) -> Result<bool> {
        let call = PrCall {
            target: target.to_string(),
            source: source.to_string(),
        };
        let exists = self.open_prs.lock().unwrap().contains(&call);
        self.pr_exists_calls.lock().unwrap().push(call);
        Ok(exists)
    }

    async fn create_pr(&self, target: &str, source: &str) -> Result<u64> {
        self.create_pr_calls.lock().unwrap().push(PrCall {
            target: target.to_string(),
            source: source.to_string(),
        });

        if let Some(msg) = self.error_on_create_pr.lock().unwrap().as_ref() {
            return Err(Error::GitHubApi(msg.clone()));
        }

        Ok(self.next_pr_number.fetch_add(1, Ordering::SeqCst))
    }

    async fn add_label(&self, pr_number: u64, label: &str) -> Result<()> {
        self.add_label_calls.lock().unwrap().push(AddLabelCall {
            pr_number,
            label: label.to_string(),
        });

        if let Some(msg) = self.error_on_add_label.lock().unwrap().as_ref() {
            return Err(Error::GitHubApi(msg.clone()));
        }
        Ok(())
    }

    async fn create_branch(&self, name: &str, sha: &str) -> Result<String> {
        self.create_branch_calls
            .lock()
            .unwrap()
            .push(CreateBranchCall {
                name: name.to_string(),
                sha: sha.to_string(),
            });

        if let Some(msg) = self.error_on_create_branch.lock().unwrap().as_ref() {
            return Err(Error::GitHubApi(msg.clone()));
        }
        Ok(name.to_string())
    }

    fn repo(&self) -> &RepoConfig {
        &self.config
    }
}
