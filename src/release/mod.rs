//! Release branch resolution
//!
//! Pure functions, no I/O:
//! 1. Name - tokenize branch names and extract serial numbers
//! 2. Serial - order candidates by serial number
//! 3. Relation - pick the branches ahead of the merged one

mod name;
mod relation;
mod serial;

pub use name::{
    HEADS_PREFIX, ParsedBranchName, REF_HEADS_PREFIX, automerge_branch_name, branch_ref,
    extract_task_serial, extract_version_serial, heads_ref_prefix, is_version_name,
    join_release_prefix, matching_refs_path, parse_branch_name, strip_ref_prefix,
    strip_release_prefix,
};
pub use relation::{branches_related_to, next_targets};
pub use serial::{branches_with_upper_serial, serial_number};
