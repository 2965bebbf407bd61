//! Toolchain presence and version verification.

use anyhow::Result;
use tracing::{debug, warn};

use crate::core::platform::Platform;
use crate::core::version::{self, MIN_CMAKE_VERSION};
use crate::error::BuildError;
use crate::io::process::ToolRunner;

/// Verify the configure tool can run, and meets the minimum version on
/// Windows.
///
/// The version gate applies to Windows only; POSIX platforms skip it even
/// when the reported version is older. Extending the gate to other
/// platforms would be a behavior change, not a fix.
pub fn verify_toolchain<R: ToolRunner>(runner: &R, cmake: &str, platform: Platform) -> Result<()> {
    let output = match runner.run_capture(cmake, &["--version".to_string()]) {
        Ok(output) => output,
        Err(err) => {
            warn!(err = %err, "toolchain version query failed");
            return Err(BuildError::ToolchainMissing(format!("{err:#}")).into());
        }
    };
    if !output.status.success() {
        return Err(BuildError::ToolchainMissing(format!(
            "{cmake} --version exited with code {}",
            output.status.code
        ))
        .into());
    }

    if platform.is_windows() {
        let found = version::parse_version(&output.stdout)?;
        if !version::at_least(&found, &MIN_CMAKE_VERSION) {
            return Err(BuildError::ToolchainTooOld {
                found: version::format_version(&found),
                minimum: version::format_version(&MIN_CMAKE_VERSION),
            }
            .into());
        }
    }

    debug!(cmake, "toolchain verified");
    Ok(())
}
