//! Serial number ordering of release branches

use super::name::{extract_task_serial, extract_version_serial, strip_release_prefix};
use crate::error::{Error, Result};
use std::collections::HashMap;

/// Serial number of a release branch in either naming convention.
///
/// `release/1.2.3` uses the version encoding, anything else falls back to
/// the task prefix (`release/RLS-11`). Returns `None` for branches outside
/// the release prefix or without a recognizable serial.
pub fn serial_number(branch: &str, release_prefix: &str, task_prefix: &str) -> Option<u64> {
    let remainder = strip_release_prefix(branch, release_prefix)?;
    extract_version_serial(remainder)
        .or_else(|| extract_task_serial(branch, release_prefix, task_prefix))
}

/// Candidates whose serial is greater than the serial of `current`, ascending.
///
/// Candidates without a serial are dropped. Candidates with equal serials
/// keep their input order. Fails if `current` has no serial.
pub fn branches_with_upper_serial<S: AsRef<str>>(
    current: &str,
    candidates: &[S],
    release_prefix: &str,
    task_prefix: &str,
) -> Result<Vec<String>> {
    let current_serial = serial_number(current, release_prefix, task_prefix)
        .ok_or_else(|| Error::UndefinedSerial(current.to_string()))?;

    let mut serials: HashMap<&str, Option<u64>> = HashMap::new();
    let mut upper: Vec<(u64, &str)> = Vec::new();

    for candidate in candidates {
        let name = candidate.as_ref();
        let serial = *serials
            .entry(name.trim())
            .or_insert_with(|| serial_number(name, release_prefix, task_prefix));

        if let Some(serial) = serial
            && serial > current_serial
        {
            upper.push((serial, name));
        }
    }

    upper.sort_by_key(|(serial, _)| *serial);
    Ok(upper.into_iter().map(|(_, name)| name.to_string()).collect())
}
