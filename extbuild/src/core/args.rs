//! Configure/build argument computation.
//!
//! Order matters: later duplicate CMake flags override earlier ones, so the
//! sequences here are emitted exactly as written and never reordered.

use std::path::Path;

use crate::core::mode::BuildMode;
use crate::core::platform::Platform;

/// Inputs for one extension's configure invocation.
#[derive(Debug, Clone)]
pub struct ConfigureContext<'a> {
    /// Absolute directory the compiled module is staged into.
    pub ext_dir: &'a Path,
    /// Interpreter the bindings are built against.
    pub python: &'a str,
    /// Absolute GoogleTest root, when `GTEST_ROOT` was supplied.
    pub gtest_root: Option<&'a Path>,
    pub mode: BuildMode,
    pub platform: Platform,
}

/// CMake configure arguments for one extension.
pub fn configure_args(ctx: &ConfigureContext) -> Vec<String> {
    let ext_dir = ctx.ext_dir.display();
    let mut args = vec![
        "-Wno-dev".to_string(),
        format!("-DCMAKE_LIBRARY_OUTPUT_DIRECTORY={ext_dir}"),
        format!("-DCMAKE_SWIG_OUTDIR={ext_dir}"),
        "-DWITH_PYTHON=ON".to_string(),
        format!("-DPython3_EXECUTABLE:FILEPATH={}", ctx.python),
        // Older FindPython consumers still read the legacy variable.
        format!("-DPYTHON_EXECUTABLE={}", ctx.python),
    ];

    if let Some(root) = ctx.gtest_root {
        args.push(format!("-DGTEST_ROOT={}", root.display()));
    }

    match ctx.platform {
        Platform::Windows { x64 } => {
            // Multi-config generators ignore CMAKE_BUILD_TYPE; the output
            // directory must be pinned per configuration instead.
            args.push(format!(
                "-DCMAKE_LIBRARY_OUTPUT_DIRECTORY_{}={ext_dir}",
                ctx.mode.upper()
            ));
            if x64 {
                args.push("-A".to_string());
                args.push("x64".to_string());
            }
        }
        Platform::Posix => {
            args.push(format!("-DCMAKE_BUILD_TYPE={}", ctx.mode));
        }
    }

    args
}

/// Arguments for `cmake --build .`.
///
/// POSIX builds pin make parallelism at two jobs; MSBuild gets its native
/// `/m` parallel switch instead.
pub fn build_args(mode: BuildMode, platform: Platform) -> Vec<String> {
    let mut args = vec![
        "--config".to_string(),
        mode.as_str().to_string(),
        "--".to_string(),
    ];
    match platform {
        Platform::Windows { .. } => args.push("/m".to_string()),
        Platform::Posix => args.push("-j2".to_string()),
    }
    args
}
