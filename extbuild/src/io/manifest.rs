//! Build manifest stored at `extbuild.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;

/// Build manifest (TOML).
///
/// This file is intended to be edited by humans; a minimal manifest only
/// names the package and its extensions, everything else defaults.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Manifest {
    pub package: Package,
    #[serde(default, rename = "extension")]
    pub extensions: Vec<Extension>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Package {
    pub name: String,

    /// Feeds the `VERSION_INFO` define compiled into each module.
    pub version: String,

    /// Interpreter the bindings are built against.
    #[serde(default = "default_python")]
    pub python: String,

    /// Toolchain binary; overridable for vendored installs and tests.
    #[serde(default = "default_cmake")]
    pub cmake: String,
}

/// One native extension module to configure and build.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Extension {
    /// Module name; also names the staging subdirectory under the output
    /// root and the working subdirectory under build-temp.
    pub name: String,

    /// CMake source directory, relative to the invocation directory.
    #[serde(default = "default_source_dir")]
    pub source_dir: PathBuf,
}

fn default_python() -> String {
    "python3".to_string()
}

fn default_cmake() -> String {
    "cmake".to_string()
}

fn default_source_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Manifest {
    pub fn validate(&self) -> Result<()> {
        if self.package.name.trim().is_empty() {
            return Err(anyhow!("package.name must not be empty"));
        }
        if self.package.version.trim().is_empty() {
            return Err(anyhow!("package.version must not be empty"));
        }
        if self.extensions.is_empty() {
            return Err(anyhow!("at least one [[extension]] is required"));
        }
        for ext in &self.extensions {
            if ext.name.trim().is_empty() {
                return Err(anyhow!("extension.name must not be empty"));
            }
        }
        Ok(())
    }
}

/// Load and validate a manifest from a TOML file.
pub fn load_manifest(path: &Path) -> Result<Manifest> {
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let manifest: Manifest =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    manifest.validate()?;
    Ok(manifest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_manifest_applies_defaults() {
        let manifest: Manifest = toml::from_str(
            r#"
            [package]
            name = "s2-py"
            version = "0.11.0"

            [[extension]]
            name = "s2_py"
            "#,
        )
        .expect("parse");

        manifest.validate().expect("validate");
        assert_eq!(manifest.package.python, "python3");
        assert_eq!(manifest.package.cmake, "cmake");
        assert_eq!(manifest.extensions[0].source_dir, PathBuf::from("."));
    }

    #[test]
    fn validate_rejects_missing_extensions() {
        let manifest: Manifest = toml::from_str(
            r#"
            [package]
            name = "s2-py"
            version = "0.11.0"
            "#,
        )
        .expect("parse");

        let err = manifest.validate().unwrap_err();
        assert!(err.to_string().contains("extension"));
    }

    #[test]
    fn validate_rejects_empty_package_name() {
        let manifest: Manifest = toml::from_str(
            r#"
            [package]
            name = ""
            version = "0.11.0"

            [[extension]]
            name = "s2_py"
            "#,
        )
        .expect("parse");

        assert!(manifest.validate().is_err());
    }

    #[test]
    fn load_missing_manifest_errors() {
        let temp = tempfile::tempdir().expect("tempdir");
        let err = load_manifest(&temp.path().join("extbuild.toml")).unwrap_err();
        assert!(err.to_string().contains("read"));
    }

    #[test]
    fn load_parses_manifest_from_disk() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("extbuild.toml");
        fs::write(
            &path,
            r#"
            [package]
            name = "s2-py"
            version = "0.11.0"
            python = "/usr/bin/python3"

            [[extension]]
            name = "s2_py"
            source_dir = "native"
            "#,
        )
        .expect("write manifest");

        let manifest = load_manifest(&path).expect("load");
        assert_eq!(manifest.package.python, "/usr/bin/python3");
        assert_eq!(manifest.extensions[0].source_dir, PathBuf::from("native"));
    }
}
