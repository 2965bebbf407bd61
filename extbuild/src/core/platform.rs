//! Platform variant for toolchain-behavior branching.

/// Platform family the build runs on.
///
/// Modeled as a closed variant rather than scattered `cfg!` conditionals so
/// the Windows and POSIX flag sets stay auditable and testable
/// independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Windows hosts. `x64` records whether the host is 64-bit, which
    /// selects the `-A x64` generator architecture.
    Windows { x64: bool },
    /// Everything else (Linux, macOS, BSDs).
    Posix,
}

impl Platform {
    /// Platform of the running host.
    pub fn host() -> Self {
        if cfg!(windows) {
            Platform::Windows {
                x64: cfg!(target_pointer_width = "64"),
            }
        } else {
            Platform::Posix
        }
    }

    pub fn is_windows(self) -> bool {
        matches!(self, Platform::Windows { .. })
    }
}
