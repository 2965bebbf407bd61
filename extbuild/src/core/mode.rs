//! Debug/Release build-mode selection.

/// CMake build configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildMode {
    Debug,
    Release,
}

impl BuildMode {
    /// Mode selected by the CLI debug switch.
    pub fn from_debug_flag(debug: bool) -> Self {
        if debug {
            BuildMode::Debug
        } else {
            BuildMode::Release
        }
    }

    /// Literal configuration name as CMake expects it.
    pub fn as_str(self) -> &'static str {
        match self {
            BuildMode::Debug => "Debug",
            BuildMode::Release => "Release",
        }
    }

    /// Uppercased name for per-configuration variable suffixes.
    pub fn upper(self) -> &'static str {
        match self {
            BuildMode::Debug => "DEBUG",
            BuildMode::Release => "RELEASE",
        }
    }
}

impl std::fmt::Display for BuildMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
