//! Global configuration model for mpbuild.

use std::path::PathBuf;

/// Root configuration for a single mpbuild invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MpbuildConfig {
    /// Container runtime executable (`docker`, `podman`, ...).
    pub runtime: String,
    /// Explicit MicroPython source tree; discovered from the current
    /// directory when unset.
    pub mpy_dir: Option<PathBuf>,
    /// Whether to allocate an interactive terminal for the container.
    pub interactive: bool,
}

impl Default for MpbuildConfig {
    fn default() -> Self {
        Self {
            runtime: crate::constants::DEFAULT_RUNTIME.to_string(),
            mpy_dir: None,
            interactive: true,
        }
    }
}
