//! Test-only fakes for toolchain invocation.

use std::cell::RefCell;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow};

use crate::io::process::{CaptureOutput, RunStatus, ToolRunner};

/// One recorded invocation made through a [`FakeRunner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    /// Working directory; `None` for capture invocations.
    pub cwd: Option<PathBuf>,
    /// Environment snapshot; `None` when the child inherits the parent's.
    pub env: Option<Vec<(OsString, OsString)>>,
}

/// Scripted runner: records every invocation and replays queued exit codes.
pub struct FakeRunner {
    version_stdout: String,
    version_code: i32,
    spawn_fails: bool,
    /// Exit codes handed out to successive `run_status` calls; exhausted
    /// entries default to success.
    status_codes: RefCell<Vec<i32>>,
    pub invocations: RefCell<Vec<Invocation>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::with_version("cmake version 3.22.1\n")
    }

    /// Runner whose version query prints `stdout` and exits 0.
    pub fn with_version(stdout: &str) -> Self {
        Self::with_status(stdout, 0)
    }

    /// Runner whose version query prints `stdout` and exits with `code`.
    pub fn with_status(stdout: &str, code: i32) -> Self {
        FakeRunner {
            version_stdout: stdout.to_string(),
            version_code: code,
            spawn_fails: false,
            status_codes: RefCell::new(Vec::new()),
            invocations: RefCell::new(Vec::new()),
        }
    }

    /// Runner that cannot spawn anything (binary absent).
    pub fn failing_spawn() -> Self {
        let mut runner = Self::new();
        runner.spawn_fails = true;
        runner
    }

    /// Queue exit codes for successive `run_status` calls.
    pub fn with_status_codes(codes: Vec<i32>) -> Self {
        let runner = Self::new();
        *runner.status_codes.borrow_mut() = codes;
        runner
    }

    /// All recorded invocations, in order.
    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations.borrow().clone()
    }
}

impl Default for FakeRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolRunner for FakeRunner {
    fn run_capture(&self, program: &str, args: &[String]) -> Result<CaptureOutput> {
        if self.spawn_fails {
            return Err(anyhow!("run {program}: no such file or directory"));
        }
        self.invocations.borrow_mut().push(Invocation {
            program: program.to_string(),
            args: args.to_vec(),
            cwd: None,
            env: None,
        });
        Ok(CaptureOutput {
            status: RunStatus {
                code: self.version_code,
            },
            stdout: self.version_stdout.clone(),
        })
    }

    fn run_status(
        &self,
        program: &str,
        args: &[String],
        cwd: &Path,
        env: Option<&[(OsString, OsString)]>,
    ) -> Result<RunStatus> {
        if self.spawn_fails {
            return Err(anyhow!("run {program}: no such file or directory"));
        }
        self.invocations.borrow_mut().push(Invocation {
            program: program.to_string(),
            args: args.to_vec(),
            cwd: Some(cwd.to_path_buf()),
            env: env.map(<[(OsString, OsString)]>::to_vec),
        });
        let mut codes = self.status_codes.borrow_mut();
        let code = if codes.is_empty() { 0 } else { codes.remove(0) };
        Ok(RunStatus { code })
    }
}

/// Minimal valid manifest for orchestration tests.
pub fn demo_manifest(cmake: &str, extensions: &[&str]) -> crate::io::manifest::Manifest {
    crate::io::manifest::Manifest {
        package: crate::io::manifest::Package {
            name: "demo".to_string(),
            version: "0.11.0".to_string(),
            python: "/usr/bin/python3".to_string(),
            cmake: cmake.to_string(),
        },
        extensions: extensions
            .iter()
            .map(|name| crate::io::manifest::Extension {
                name: (*name).to_string(),
                source_dir: PathBuf::from("."),
            })
            .collect(),
    }
}
