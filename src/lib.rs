//! release-automerge: carry release branch changes forward on GitHub
//!
//! When a pull request lands in (or a commit is pushed to) a release branch,
//! the changes are merged into the next release branch by serial number, or
//! into the main branch when no newer release exists. A merge conflict opens
//! a pull request instead.

pub mod config;
pub mod error;
pub mod event;
pub mod merge;
pub mod platform;
pub mod release;
pub mod report;
pub mod types;
pub mod workflow;
