//! Narrow subprocess capability for toolchain invocation.
//!
//! The [`ToolRunner`] trait is the orchestrator's only route to spawning
//! processes, so build logic stays unit-testable without a real toolchain.
//! Configure/build children inherit stdio: toolchain diagnostics reach the
//! user verbatim, with no capture or reformatting in between. Calls block
//! until the child exits; there is no timeout.

use std::ffi::OsString;
use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result};
use tracing::{debug, instrument};

/// Outcome of one child process, reduced to what the orchestrator needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunStatus {
    /// Exit code; `-1` when the child was terminated by a signal.
    pub code: i32,
}

impl RunStatus {
    pub fn success(self) -> bool {
        self.code == 0
    }
}

/// Captured output of a version query.
#[derive(Debug, Clone)]
pub struct CaptureOutput {
    pub status: RunStatus,
    pub stdout: String,
}

/// Run external commands, blocking until they exit.
pub trait ToolRunner {
    /// Run `program args...` capturing stdout (version queries). A spawn
    /// failure is an `Err`.
    fn run_capture(&self, program: &str, args: &[String]) -> Result<CaptureOutput>;

    /// Run `program args...` in `cwd` with inherited stdio. When `env` is
    /// `Some`, the child receives exactly that environment snapshot.
    fn run_status(
        &self,
        program: &str,
        args: &[String],
        cwd: &Path,
        env: Option<&[(OsString, OsString)]>,
    ) -> Result<RunStatus>;
}

/// Runner that spawns the real external toolchain.
pub struct SystemRunner;

impl ToolRunner for SystemRunner {
    #[instrument(skip_all, fields(program = %program))]
    fn run_capture(&self, program: &str, args: &[String]) -> Result<CaptureOutput> {
        debug!(program, ?args, "running capture command");
        let output = Command::new(program)
            .args(args)
            .output()
            .with_context(|| format!("run {program}"))?;
        debug!(exit_code = ?output.status.code(), "capture command finished");
        Ok(CaptureOutput {
            status: RunStatus {
                code: output.status.code().unwrap_or(-1),
            },
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        })
    }

    #[instrument(skip_all, fields(program = %program, cwd = %cwd.display()))]
    fn run_status(
        &self,
        program: &str,
        args: &[String],
        cwd: &Path,
        env: Option<&[(OsString, OsString)]>,
    ) -> Result<RunStatus> {
        let mut cmd = Command::new(program);
        cmd.args(args).current_dir(cwd);
        if let Some(pairs) = env {
            cmd.env_clear();
            for (key, value) in pairs {
                cmd.env(key, value);
            }
        }
        debug!(program, ?args, "running command");
        let status = cmd.status().with_context(|| format!("run {program}"))?;
        debug!(exit_code = ?status.code(), "command finished");
        Ok(RunStatus {
            code: status.code().unwrap_or(-1),
        })
    }
}
