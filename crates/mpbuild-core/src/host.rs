//! Host environment facts, captured once per invocation.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use mpbuild_common::error::{MpbuildError, Result};

/// Everything the command synthesizer needs to know about the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostEnv {
    /// Effective user id.
    pub uid: u32,
    /// Effective group id.
    pub gid: u32,
    /// Home directory, mounted into the container.
    pub home: PathBuf,
    /// Processor count, used as make's job count.
    pub nprocs: usize,
    /// Absolute path of the source tree root.
    pub mpy_root: PathBuf,
}

impl HostEnv {
    /// Reads the host facts from the running process.
    ///
    /// # Errors
    ///
    /// Returns `MpbuildError::Config` if `HOME` is unset or empty.
    pub fn capture(mpy_root: &Path) -> Result<Self> {
        let env = Self::from_parts(
            std::env::var_os("HOME"),
            nix::unistd::geteuid().as_raw(),
            nix::unistd::getegid().as_raw(),
            num_cpus::get(),
            mpy_root,
        )?;
        tracing::debug!(
            uid = env.uid,
            gid = env.gid,
            home = %env.home.display(),
            nprocs = env.nprocs,
            "captured host environment"
        );
        Ok(env)
    }

    /// Builds the host facts from already-read values.
    ///
    /// # Errors
    ///
    /// Returns `MpbuildError::Config` if `home` is `None` or empty.
    pub fn from_parts(
        home: Option<OsString>,
        uid: u32,
        gid: u32,
        nprocs: usize,
        mpy_root: &Path,
    ) -> Result<Self> {
        let home = home
            .filter(|h| !h.is_empty())
            .map(PathBuf::from)
            .ok_or_else(|| MpbuildError::Config {
                message: "HOME is not set".into(),
            })?;

        Ok(Self {
            uid,
            gid,
            home,
            nprocs,
            mpy_root: mpy_root.to_path_buf(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOT: &str = "/src/micropython";

    #[test]
    fn unset_home_is_config_error() {
        let err = HostEnv::from_parts(None, 1000, 1000, 4, Path::new(ROOT)).unwrap_err();
        assert!(matches!(err, MpbuildError::Config { .. }));
        assert!(err.to_string().contains("HOME"));
    }

    #[test]
    fn empty_home_is_config_error() {
        let err = HostEnv::from_parts(Some(OsString::new()), 1000, 1000, 4, Path::new(ROOT))
            .unwrap_err();
        assert!(matches!(err, MpbuildError::Config { .. }));
    }

    #[test]
    fn parts_are_carried_through() {
        let env = HostEnv::from_parts(
            Some(OsString::from("/home/dev")),
            501,
            20,
            12,
            Path::new(ROOT),
        )
        .expect("host env");
        assert_eq!(env.uid, 501);
        assert_eq!(env.gid, 20);
        assert_eq!(env.home, PathBuf::from("/home/dev"));
        assert_eq!(env.nprocs, 12);
        assert_eq!(env.mpy_root, PathBuf::from(ROOT));
    }
}
