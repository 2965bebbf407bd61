//! Build-run orchestration.
//!
//! One run walks `toolchain check -> configure -> build` for each extension
//! in manifest order, strictly sequentially. Any failure aborts the whole
//! run; there is no retry and no partial success.

use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{debug, info, instrument};

use crate::core::args::{ConfigureContext, build_args, configure_args};
use crate::core::env::with_override;
use crate::core::flags::compiler_flags;
use crate::core::mode::BuildMode;
use crate::core::platform::Platform;
use crate::error::BuildError;
use crate::io::manifest::{Extension, Manifest};
use crate::io::process::ToolRunner;
use crate::io::toolchain::verify_toolchain;

/// Options for one build run, from CLI flags.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    pub mode: BuildMode,
    pub platform: Platform,
    /// Root the per-extension staging directories live under.
    pub out_dir: PathBuf,
    /// Root of the per-extension CMake working directories.
    pub build_temp: PathBuf,
}

/// Ambient state read once from the parent environment.
#[derive(Debug, Clone, Default)]
pub struct EnvInput {
    /// `GTEST_ROOT`, absolute-resolved, when set and non-empty.
    pub gtest_root: Option<PathBuf>,
    /// Inherited `CXXFLAGS`, when set.
    pub cxxflags: Option<String>,
    /// Full parent environment snapshot handed to configure children.
    pub vars: Vec<(OsString, OsString)>,
}

impl EnvInput {
    /// Snapshot the parent process environment. The parent is only read,
    /// never mutated.
    pub fn from_process_env() -> Result<Self> {
        let gtest_root = match env::var_os("GTEST_ROOT") {
            Some(root) if !root.is_empty() => {
                Some(std::path::absolute(PathBuf::from(root)).context("resolve GTEST_ROOT")?)
            }
            _ => None,
        };
        Ok(EnvInput {
            gtest_root,
            cxxflags: env::var("CXXFLAGS").ok(),
            vars: env::vars_os().collect(),
        })
    }
}

/// Run the whole build: toolchain check, then each extension in manifest
/// order.
#[instrument(skip_all, fields(mode = %options.mode))]
pub fn run_build<R: ToolRunner>(
    runner: &R,
    manifest: &Manifest,
    options: &BuildOptions,
    env_input: &EnvInput,
) -> Result<()> {
    verify_toolchain(runner, &manifest.package.cmake, options.platform)?;
    for ext in &manifest.extensions {
        build_extension(runner, manifest, ext, options, env_input)?;
    }
    Ok(())
}

#[instrument(skip_all, fields(extension = %ext.name))]
fn build_extension<R: ToolRunner>(
    runner: &R,
    manifest: &Manifest,
    ext: &Extension,
    options: &BuildOptions,
    env_input: &EnvInput,
) -> Result<()> {
    let source_dir = std::path::absolute(&ext.source_dir)
        .with_context(|| format!("resolve source dir for {}", ext.name))?;
    let ext_dir = std::path::absolute(options.out_dir.join(&ext.name))
        .with_context(|| format!("resolve output dir for {}", ext.name))?;
    let workdir = options.build_temp.join(&ext.name);

    let ctx = ConfigureContext {
        ext_dir: &ext_dir,
        python: &manifest.package.python,
        gtest_root: env_input.gtest_root.as_deref(),
        mode: options.mode,
        platform: options.platform,
    };
    let cxxflags = compiler_flags(
        env_input.cxxflags.as_deref(),
        &manifest.package.version,
        env_input.gtest_root.as_deref(),
    );
    let child_env = with_override(env_input.vars.iter().cloned(), "CXXFLAGS", &cxxflags);

    fs::create_dir_all(&workdir)
        .with_context(|| format!("create build dir {}", workdir.display()))?;

    info!(source_dir = %source_dir.display(), workdir = %workdir.display(), "configuring");
    let mut configure = vec![source_dir.display().to_string()];
    configure.extend(configure_args(&ctx));
    let status = runner.run_status(
        &manifest.package.cmake,
        &configure,
        &workdir,
        Some(&child_env),
    )?;
    if !status.success() {
        return Err(BuildError::ConfigureFailed { code: status.code }.into());
    }

    info!("building");
    let mut build = vec!["--build".to_string(), ".".to_string()];
    build.extend(build_args(options.mode, options.platform));
    let status = runner.run_status(&manifest.package.cmake, &build, &workdir, None)?;
    if !status.success() {
        return Err(BuildError::BuildFailed { code: status.code }.into());
    }

    debug!(ext_dir = %ext_dir.display(), "extension staged");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FakeRunner, demo_manifest};
    use std::ffi::OsStr;

    fn options(root: &std::path::Path) -> BuildOptions {
        BuildOptions {
            mode: BuildMode::Release,
            platform: Platform::Posix,
            out_dir: root.join("lib"),
            build_temp: root.join("temp"),
        }
    }

    fn env_input() -> EnvInput {
        EnvInput {
            gtest_root: None,
            cxxflags: None,
            vars: vec![(OsString::from("PATH"), OsString::from("/usr/bin"))],
        }
    }

    #[test]
    fn configure_runs_before_build_with_expected_args() {
        let temp = tempfile::tempdir().expect("tempdir");
        let runner = FakeRunner::new();
        let manifest = demo_manifest("cmake", &["demo_ext"]);

        run_build(&runner, &manifest, &options(temp.path()), &env_input()).expect("build");

        let calls = runner.invocations();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[0].args, vec!["--version"]);

        let configure = &calls[1];
        assert_eq!(configure.program, "cmake");
        assert!(configure.args[1..].contains(&"-Wno-dev".to_string()));
        assert_eq!(
            configure.args.last().map(String::as_str),
            Some("-DCMAKE_BUILD_TYPE=Release")
        );
        assert_eq!(configure.cwd.as_deref(), Some(temp.path().join("temp/demo_ext").as_path()));

        let build = &calls[2];
        assert_eq!(
            build.args,
            vec!["--build", ".", "--config", "Release", "--", "-j2"]
        );
        assert_eq!(build.cwd, configure.cwd);
        assert!(build.env.is_none());
    }

    #[test]
    fn configure_env_carries_merged_cxxflags() {
        let temp = tempfile::tempdir().expect("tempdir");
        let runner = FakeRunner::new();
        let manifest = demo_manifest("cmake", &["demo_ext"]);
        let mut env = env_input();
        env.cxxflags = Some("-O2".to_string());

        run_build(&runner, &manifest, &options(temp.path()), &env).expect("build");

        let calls = runner.invocations();
        let child_env = calls[1].env.as_ref().expect("configure env");
        let cxxflags: Vec<_> = child_env
            .iter()
            .filter(|(name, _)| name.as_os_str() == OsStr::new("CXXFLAGS"))
            .collect();
        assert_eq!(cxxflags.len(), 1);
        assert_eq!(
            cxxflags[0].1,
            OsString::from("-O2 -DVERSION_INFO=\\\"0.11.0\\\"")
        );
        assert!(
            child_env.contains(&(OsString::from("PATH"), OsString::from("/usr/bin")))
        );
    }

    #[test]
    fn gtest_root_feeds_define_and_include() {
        let temp = tempfile::tempdir().expect("tempdir");
        let runner = FakeRunner::new();
        let manifest = demo_manifest("cmake", &["demo_ext"]);
        let mut env = env_input();
        env.gtest_root = Some(PathBuf::from("/opt/gtest"));

        run_build(&runner, &manifest, &options(temp.path()), &env).expect("build");

        let calls = runner.invocations();
        assert!(
            calls[1]
                .args
                .contains(&"-DGTEST_ROOT=/opt/gtest".to_string())
        );
        let child_env = calls[1].env.as_ref().expect("configure env");
        let cxxflags = child_env
            .iter()
            .find(|(name, _)| name.as_os_str() == OsStr::new("CXXFLAGS"))
            .expect("cxxflags entry");
        assert!(
            cxxflags
                .1
                .to_string_lossy()
                .ends_with("-I/opt/gtest/googletest/include")
        );
    }

    #[test]
    fn configure_failure_aborts_before_build() {
        let temp = tempfile::tempdir().expect("tempdir");
        let runner = FakeRunner::with_status_codes(vec![2]);
        let manifest = demo_manifest("cmake", &["demo_ext"]);

        let err =
            run_build(&runner, &manifest, &options(temp.path()), &env_input()).unwrap_err();
        match err.downcast_ref::<BuildError>() {
            Some(BuildError::ConfigureFailed { code }) => assert_eq!(*code, 2),
            other => panic!("unexpected error: {other:?}"),
        }
        // version query + configure only, no build invocation
        assert_eq!(runner.invocations().len(), 2);
    }

    #[test]
    fn build_failure_is_reported_with_exit_code() {
        let temp = tempfile::tempdir().expect("tempdir");
        let runner = FakeRunner::with_status_codes(vec![0, 5]);
        let manifest = demo_manifest("cmake", &["demo_ext"]);

        let err =
            run_build(&runner, &manifest, &options(temp.path()), &env_input()).unwrap_err();
        match err.downcast_ref::<BuildError>() {
            Some(BuildError::BuildFailed { code }) => assert_eq!(*code, 5),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn extensions_build_sequentially_in_manifest_order() {
        let temp = tempfile::tempdir().expect("tempdir");
        let runner = FakeRunner::new();
        let manifest = demo_manifest("cmake", &["first_ext", "second_ext"]);

        run_build(&runner, &manifest, &options(temp.path()), &env_input()).expect("build");

        let calls = runner.invocations();
        assert_eq!(calls.len(), 5);
        assert!(calls[1].args[1..]
            .iter()
            .any(|a| a.ends_with("/lib/first_ext") && a.starts_with("-DCMAKE_LIBRARY_OUTPUT_DIRECTORY=")));
        assert!(calls[3].args[1..]
            .iter()
            .any(|a| a.ends_with("/lib/second_ext") && a.starts_with("-DCMAKE_LIBRARY_OUTPUT_DIRECTORY=")));
    }

    #[test]
    fn existing_build_dir_is_reused() {
        let temp = tempfile::tempdir().expect("tempdir");
        let opts = options(temp.path());
        fs::create_dir_all(opts.build_temp.join("demo_ext")).expect("pre-create");

        let runner = FakeRunner::new();
        let manifest = demo_manifest("cmake", &["demo_ext"]);
        run_build(&runner, &manifest, &opts, &env_input()).expect("first build");

        let runner = FakeRunner::new();
        run_build(&runner, &manifest, &opts, &env_input()).expect("second build");
    }
}
