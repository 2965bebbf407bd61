//! Toolchain version extraction and comparison.

use anyhow::{Context, Result};
use regex::Regex;

/// Minimum CMake version enforced on Windows.
pub const MIN_CMAKE_VERSION: [u32; 3] = [3, 1, 0];

/// Extract the dotted version from `cmake --version` output.
pub fn parse_version(output: &str) -> Result<Vec<u32>> {
    let pattern = Regex::new(r"version\s*([\d.]+)").context("compile version pattern")?;
    let caps = pattern
        .captures(output)
        .context("no version string in toolchain output")?;
    let components = caps[1]
        .split('.')
        .filter(|part| !part.is_empty())
        .map(str::parse)
        .collect::<Result<Vec<u32>, _>>()
        .context("parse version components")?;
    if components.is_empty() {
        anyhow::bail!("empty version string in toolchain output");
    }
    Ok(components)
}

/// Numeric per-component comparison; missing trailing components count as
/// zero, so `3.1` and `3.1.0` are equal.
pub fn at_least(found: &[u32], minimum: &[u32]) -> bool {
    let len = found.len().max(minimum.len());
    for i in 0..len {
        let f = found.get(i).copied().unwrap_or(0);
        let m = minimum.get(i).copied().unwrap_or(0);
        if f != m {
            return f > m;
        }
    }
    true
}

pub fn format_version(version: &[u32]) -> String {
    version
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(".")
}
