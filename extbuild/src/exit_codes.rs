//! Stable exit codes for extbuild CLI commands.

/// Build or check succeeded.
pub const OK: i32 = 0;
/// Invalid manifest, CLI usage, or other local error.
pub const INVALID: i32 = 1;
/// Toolchain missing or below the minimum supported version.
pub const TOOLCHAIN: i32 = 2;
/// Configure subprocess exited nonzero.
pub const CONFIGURE: i32 = 3;
/// Build subprocess exited nonzero.
pub const BUILD: i32 = 4;
