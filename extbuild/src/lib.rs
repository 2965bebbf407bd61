//! CMake-driven builder for native extension modules.
//!
//! `extbuild` compiles native extension modules (SWIG-generated Python
//! bindings and similar) by driving an external CMake toolchain through a
//! configure-then-build subprocess pair, staging each compiled artifact
//! under `<out-dir>/<extension-name>/`. The architecture enforces a strict
//! separation:
//!
//! - **[`core`]**: Pure, deterministic logic (argument lists, compiler
//!   flags, environment merging, version checks). No I/O, fully testable in
//!   isolation.
//! - **[`io`]**: Side-effecting operations (manifest loading, process
//!   execution, toolchain verification). Isolated to enable faking in tests.
//!
//! The [`build`] module coordinates core logic with I/O to implement the
//! CLI commands.

pub mod build;
pub mod core;
pub mod error;
pub mod exit_codes;
pub mod io;
pub mod logging;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
