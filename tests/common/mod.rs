//! Shared test fixtures

#![allow(dead_code)]

mod mock_platform;

pub use mock_platform::*;

use release_automerge::config::ActionConfig;
use release_automerge::report::Reporter;
use release_automerge::types::{MergeUnit, RepoConfig};
use std::fmt::Debug;
use std::sync::Mutex;

/// Repository coordinates used by every mock
pub fn repo_config() -> RepoConfig {
    RepoConfig {
        owner: "acme".to_string(),
        repo: "widgets".to_string(),
        api_url: "https://api.github.com".to_string(),
    }
}

/// A mock platform bound to `acme/widgets`
pub fn mock_platform() -> MockPlatformService {
    MockPlatformService::with_config(repo_config())
}

/// A merged PR from `head` into `base`
pub fn pr_unit(base: &str, head: &str) -> MergeUnit {
    MergeUnit {
        base_ref: base.to_string(),
        head_ref: head.to_string(),
        head_sha: "0123456789abcdef".to_string(),
        repo_owner: "acme".to_string(),
        repo_name: "widgets".to_string(),
    }
}

/// A direct push to `branch`
pub fn push_unit(branch: &str) -> MergeUnit {
    pr_unit(branch, branch)
}

/// Default configuration with a test token
pub fn test_config() -> ActionConfig {
    ActionConfig::new("test-token").unwrap()
}

/// Default configuration with a conflict PR label
pub fn labeled_config(label: &str) -> ActionConfig {
    let mut config = test_config();
    config.automerge_pr_label = Some(label.to_string());
    config
}

/// Reporter that records everything it is given
#[derive(Default)]
pub struct RecordingReporter {
    pub tags: Mutex<Vec<String>>,
    pub errors: Mutex<Vec<String>>,
}

impl RecordingReporter {
    pub fn tags(&self) -> Vec<String> {
        self.tags.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }
}

impl Reporter for RecordingReporter {
    fn debug(&self, tag: &str, _payload: &dyn Debug) {
        self.tags.lock().unwrap().push(tag.to_string());
    }

    fn error(&self, err: &dyn std::error::Error) {
        self.errors.lock().unwrap().push(err.to_string());
    }
}
