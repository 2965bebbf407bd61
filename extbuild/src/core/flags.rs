//! Compiler-flag merging for the configure environment.

use std::path::Path;

/// Merged `CXXFLAGS` value handed to the configure subprocess.
///
/// Inherited flags come first so the generated defines win on conflict. The
/// version define carries literal escaped quotes: the flag travels through
/// the build tool's shell before it reaches the compiler.
pub fn compiler_flags(
    inherited: Option<&str>,
    version: &str,
    gtest_root: Option<&Path>,
) -> String {
    let mut parts: Vec<String> = Vec::new();
    if let Some(flags) = inherited
        && !flags.is_empty()
    {
        parts.push(flags.to_string());
    }
    parts.push(format!("-DVERSION_INFO=\\\"{version}\\\""));
    if let Some(root) = gtest_root {
        let include = root.join("googletest").join("include");
        parts.push(format!("-I{}", include.display()));
    }
    parts.join(" ")
}
