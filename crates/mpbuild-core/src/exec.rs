//! Synchronous execution of a synthesized container command.

use std::io::Write;
use std::path::PathBuf;
use std::process::Command;

use mpbuild_common::error::{MpbuildError, Result};

use crate::invocation::BuildInvocation;
use crate::panel;

/// Runs a shell command line to completion.
pub trait Runner {
    /// Runs `command` with the terminal inherited and returns its exit code.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned.
    fn run(&self, command: &str) -> Result<i32>;
}

/// [`Runner`] that hands the command line to `sh -c`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShellRunner;

impl Runner for ShellRunner {
    fn run(&self, command: &str) -> Result<i32> {
        let status = Command::new("sh")
            .arg("-c")
            .arg(command)
            .status()
            .map_err(|e| MpbuildError::Io {
                path: "sh".into(),
                source: e,
            })?;
        // Killed by a signal: no code, report a generic failure.
        Ok(status.code().unwrap_or(1))
    }
}

/// Checks that the container runtime executable is on `PATH`.
///
/// # Errors
///
/// Returns `MpbuildError::NotFound` if it is not.
pub fn ensure_runtime(runtime: &str) -> Result<PathBuf> {
    which::which(runtime).map_err(|_| MpbuildError::NotFound {
        kind: "container runtime",
        id: runtime.to_string(),
    })
}

/// Shows, runs and reports one invocation.
///
/// Writes the command panel to `out` before running it. On failure the
/// failing command is echoed back; on a successful non-clean build the
/// first deploy-instructions file, if present, is shown as plain text.
/// Panel titles carry ANSI styling only when `ansi` is set. Returns the
/// command's exit code.
///
/// # Errors
///
/// Returns an error if the command cannot be spawned or `out` cannot be
/// written.
pub fn execute<R: Runner, W: Write>(
    runner: &R,
    invocation: &BuildInvocation,
    command: &str,
    out: &mut W,
    ansi: bool,
) -> Result<i32> {
    write_out(out, &panel::render(Some(&invocation.title()), command, ansi))?;

    tracing::info!(port = %invocation.port, image = %invocation.image, "running build container");
    let code = runner.run(command)?;
    tracing::info!(code, "build container exited");

    if code != 0 {
        write_out(
            out,
            &format!("ERROR: The following command returned {code}: {command}\n"),
        )?;
        return Ok(code);
    }

    let deploy = invocation
        .deploy_file
        .as_ref()
        .filter(|p| !invocation.do_clean && p.is_file());
    if let Some(path) = deploy {
        let text = std::fs::read_to_string(path).map_err(|e| MpbuildError::Io {
            path: path.clone(),
            source: e,
        })?;
        write_out(out, &panel::render(None, &text, ansi))?;
    }
    Ok(code)
}

fn write_out<W: Write>(out: &mut W, text: &str) -> Result<()> {
    out.write_all(text.as_bytes())
        .and_then(|()| out.flush())
        .map_err(|e| MpbuildError::Io {
            path: "<stdout>".into(),
            source: e,
        })
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use mpbuild_common::types::{ImageRef, VariantParam};

    use super::*;
    use crate::invocation::Target;

    struct FakeRunner {
        code: i32,
        seen: RefCell<Vec<String>>,
    }

    impl FakeRunner {
        fn new(code: i32) -> Self {
            Self {
                code,
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    impl Runner for FakeRunner {
        fn run(&self, command: &str) -> Result<i32> {
            self.seen.borrow_mut().push(command.to_string());
            Ok(self.code)
        }
    }

    fn invocation(extra: &[&str], deploy_file: Option<PathBuf>) -> BuildInvocation {
        let extra_args: Vec<String> = extra.iter().map(|s| (*s).to_string()).collect();
        BuildInvocation {
            port: "rp2".into(),
            target: Target::Board {
                name: "RPI_PICO".into(),
                variant: None,
                variant_param: VariantParam::BoardVariant,
            },
            image: ImageRef::new("img"),
            make_path: "ports/rp2".into(),
            do_clean: crate::invocation::is_clean(&extra_args),
            extra_args,
            deploy_file,
        }
    }

    fn deploy_fixture() -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        let path = dir.path().join("deploy.md");
        std::fs::write(&path, "Hold BOOTSEL and copy firmware.uf2").expect("write");
        (dir, path)
    }

    #[test]
    fn success_shows_command_then_deploy_instructions() {
        let (_dir, deploy) = deploy_fixture();
        let runner = FakeRunner::new(0);
        let mut out = Vec::new();
        let code = execute(&runner, &invocation(&[], Some(deploy)), "the-cmd", &mut out, false)
            .expect("execute");
        let text = String::from_utf8(out).expect("utf8");

        assert_eq!(code, 0);
        assert!(!text.contains('\x1b'));
        assert_eq!(runner.seen.borrow().as_slice(), ["the-cmd"]);
        assert!(text.contains("Build rp2/RPI_PICO"));
        let cmd_at = text.find("the-cmd").expect("command shown");
        let deploy_at = text.find("Hold BOOTSEL").expect("deploy shown");
        assert!(cmd_at < deploy_at);
    }

    #[test]
    fn failure_echoes_command_and_returns_code() {
        let (_dir, deploy) = deploy_fixture();
        let runner = FakeRunner::new(2);
        let mut out = Vec::new();
        let code = execute(&runner, &invocation(&[], Some(deploy)), "the-cmd", &mut out, true)
            .expect("execute");
        let text = String::from_utf8(out).expect("utf8");

        assert_eq!(code, 2);
        assert!(text.contains("\x1b[1mBuild rp2/RPI_PICO\x1b[0m"));
        assert!(text.contains("ERROR: The following command returned 2: the-cmd"));
        assert!(!text.contains("Hold BOOTSEL"));
    }

    #[test]
    fn clean_never_shows_deploy_instructions() {
        let (_dir, deploy) = deploy_fixture();
        let runner = FakeRunner::new(0);
        let mut out = Vec::new();
        let _ = execute(&runner, &invocation(&["clean"], Some(deploy)), "c", &mut out, false)
            .expect("execute");
        let text = String::from_utf8(out).expect("utf8");

        assert!(text.contains("Clean rp2/RPI_PICO"));
        assert!(!text.contains("Hold BOOTSEL"));
    }

    #[test]
    fn missing_deploy_file_is_skipped() {
        let runner = FakeRunner::new(0);
        let mut out = Vec::new();
        let missing = PathBuf::from("/nonexistent/deploy.md");
        let code = execute(&runner, &invocation(&[], Some(missing)), "c", &mut out, false)
            .expect("execute");
        assert_eq!(code, 0);
    }

    #[test]
    fn shell_runner_propagates_exit_code() {
        assert_eq!(ShellRunner.run("exit 3").expect("run"), 3);
        assert_eq!(ShellRunner.run("true").expect("run"), 0);
    }

    #[test]
    fn missing_runtime_is_not_found() {
        let err = ensure_runtime("mpbuild-no-such-runtime").unwrap_err();
        assert!(matches!(err, MpbuildError::NotFound { .. }));
    }
}
