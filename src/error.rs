//! Error types for release-automerge

use thiserror::Error;

/// Errors that abort an automerge run
#[derive(Debug, Error)]
pub enum Error {
    /// The merge unit carries no target branch
    #[error("Failed to determine PR target branch")]
    MissingTargetBranch,

    /// The target branch name has no release serial number
    #[error("Failed to define a serial number for the PR branch \"{0}\"")]
    UndefinedSerial(String),

    /// The remote returned no release branches at all
    #[error("No branches were found")]
    NoBranchesFound,

    /// Invalid action inputs
    #[error("configuration error: {0}")]
    Config(String),

    /// The workflow event payload could not be understood
    #[error("event error: {0}")]
    Event(String),

    /// GitHub API returned something we could not use
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    /// The merge endpoint answered with an unexpected status
    #[error("Failed to merge branches. Status: {status}. Data: {body}")]
    MergeFailed {
        /// HTTP status code
        status: u16,
        /// Raw response payload
        body: String,
    },

    /// octocrab transport or API error
    #[error("GitHub API error: {0}")]
    Octocrab(#[from] octocrab::Error),

    /// reqwest transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, Error>;
