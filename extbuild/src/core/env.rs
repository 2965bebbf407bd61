//! Environment snapshot-and-override.

use std::ffi::{OsStr, OsString};

/// Apply a single-variable override to a snapshot of environment pairs.
///
/// The parent environment is copied, never mutated in place: any existing
/// entry for `key` is dropped, the override appended, and the merged
/// snapshot handed to the child process explicitly.
pub fn with_override(
    base: impl IntoIterator<Item = (OsString, OsString)>,
    key: &str,
    value: &str,
) -> Vec<(OsString, OsString)> {
    let mut env: Vec<(OsString, OsString)> = base
        .into_iter()
        .filter(|(name, _)| name.as_os_str() != OsStr::new(key))
        .collect();
    env.push((OsString::from(key), OsString::from(value)));
    env
}
