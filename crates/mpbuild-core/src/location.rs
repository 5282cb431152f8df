//! Port and make path inference for pass-through make mode.
//!
//! The port is never named by the board catalog here; it is inferred, in
//! order, from a `-C <path>` flag among the make arguments, from the
//! current directory, and finally from an explicit `--port` override.
//! All path handling is lexical: nothing here touches the filesystem.

use std::path::{Component, Path, PathBuf};

use mpbuild_common::error::{MpbuildError, Result};

/// Make's change-directory flag.
pub const LOCATION_FLAG: &str = "-C";

/// Where a pass-through make invocation runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// Port whose container builds the target.
    pub port: String,
    /// Directory passed to `make -C`, relative to the source tree root.
    pub make_path: String,
    /// Remaining make arguments, with any consumed `-C <path>` removed.
    pub extra_args: Vec<String>,
}

/// Infers the port and make path for a pass-through make invocation.
///
/// `root` is the source tree root and `cwd` the current directory; both
/// must be absolute.
///
/// # Errors
///
/// Returns `MpbuildError::PortUndetermined` if neither the arguments, the
/// current directory, nor `port_override` identify a port.
pub fn resolve_location(
    root: &Path,
    cwd: &Path,
    extra_args: &[String],
    port_override: Option<&str>,
) -> Result<Location> {
    let ports_dir = root.join("ports");
    let mut extra_args = extra_args.to_vec();

    if let Some(index) = location_flag_index(&extra_args) {
        let target = normalize(&cwd.join(&extra_args[index + 1]));
        if let Some(port) = port_under(&ports_dir, &target) {
            let make_path = relative(root, &target);
            let _ = extra_args.drain(index..=index + 1);
            tracing::debug!(port = %port, make_path = %make_path, "port from -C flag");
            return Ok(Location {
                port,
                make_path,
                extra_args,
            });
        }
    }

    let cwd = normalize(cwd);
    let port = port_under(&ports_dir, &cwd)
        .inspect(|port| tracing::debug!(port = %port, "port from current directory"))
        .or_else(|| port_override.map(str::to_string))
        .ok_or(MpbuildError::PortUndetermined)?;

    let port_dir = ports_dir.join(&port);
    let make_path = if cwd.starts_with(&port_dir) {
        relative(root, &cwd)
    } else {
        format!("ports/{port}")
    };

    Ok(Location {
        port,
        make_path,
        extra_args,
    })
}

/// Position of a `-C` flag that is followed by a value.
fn location_flag_index(args: &[String]) -> Option<usize> {
    (0..args.len().saturating_sub(1)).find(|&i| args[i] == LOCATION_FLAG)
}

/// First path segment under `ports_dir`, if `path` lies strictly inside it.
fn port_under(ports_dir: &Path, path: &Path) -> Option<String> {
    match path.strip_prefix(ports_dir).ok()?.components().next()? {
        Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
        _ => None,
    }
}

/// `path` relative to `root`, with `/` separators.
fn relative(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Resolves `.` and `..` components without consulting the filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let _ = out.pop();
            }
            other => out.push(other),
        }
    }
    out
}
