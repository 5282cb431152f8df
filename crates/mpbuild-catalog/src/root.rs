//! Source tree root discovery.

use std::path::{Path, PathBuf};

use mpbuild_common::error::{MpbuildError, Result};

/// A located MicroPython source tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRoot {
    /// Absolute path of the tree root (the directory holding `ports/` and `py/`).
    pub root: PathBuf,
    /// Port inferred from the start directory when it lies under `ports/<port>/`.
    pub auto_port: Option<String>,
}

/// Returns true if `dir` looks like the root of a MicroPython checkout.
pub fn is_mpy_root(dir: &Path) -> bool {
    dir.join("ports").is_dir() && dir.join("py").is_dir()
}

/// Walks up from `start` (or the current directory) to the first
/// MicroPython source tree root.
///
/// The start directory is canonicalized first, so the returned root has no
/// `..` segments or symlinks and compares equal to a canonical cwd.
///
/// # Errors
///
/// Returns `MpbuildError::NotFound` if no ancestor is a source tree root,
/// or an I/O error if the start directory cannot be resolved.
pub fn find_mpy_root(start: Option<&Path>) -> Result<SourceRoot> {
    let start = match start {
        Some(dir) => canonical(dir)?,
        None => canonical(&current_dir()?)?,
    };

    let root = start
        .ancestors()
        .find(|dir| is_mpy_root(dir))
        .ok_or_else(|| MpbuildError::NotFound {
            kind: "micropython source tree",
            id: start.display().to_string(),
        })?
        .to_path_buf();

    let auto_port = port_of(&root, &start);
    tracing::debug!(root = %root.display(), auto_port = ?auto_port, "found source tree");
    Ok(SourceRoot { root, auto_port })
}

/// Returns the port name if `path` lies strictly inside `<root>/ports/<port>`.
pub fn port_of(root: &Path, path: &Path) -> Option<String> {
    path.strip_prefix(root.join("ports"))
        .ok()?
        .components()
        .next()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
}

fn current_dir() -> Result<PathBuf> {
    std::env::current_dir().map_err(|e| MpbuildError::Io {
        path: PathBuf::from("."),
        source: e,
    })
}

/// Resolves `dir` against the current directory, following symlinks and
/// collapsing `.` and `..`.
///
/// # Errors
///
/// Returns an I/O error if `dir` does not exist.
pub fn canonical(dir: &Path) -> Result<PathBuf> {
    std::fs::canonicalize(dir).map_err(|e| MpbuildError::Io {
        path: dir.to_path_buf(),
        source: e,
    })
}
