//! CLI command definitions and dispatch.

pub mod build;
pub mod check_images;
pub mod clean;
pub mod list;
pub mod make;

use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use mpbuild_catalog::root::{SourceRoot, find_mpy_root};
use mpbuild_common::config::MpbuildConfig;
use mpbuild_common::constants::DEFAULT_RUNTIME;
use mpbuild_core::exec::{self, ShellRunner};
use mpbuild_core::host::HostEnv;
use mpbuild_core::invocation::BuildInvocation;

/// mpbuild — Build MicroPython firmware in the right toolchain container.
#[derive(Parser, Debug)]
#[command(name = "mpbuild", version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// MicroPython source tree (discovered from the current directory if unset).
    #[arg(long, global = true, env = "MPBUILD_MPY_DIR")]
    pub mpy_dir: Option<PathBuf>,

    /// Container runtime executable.
    #[arg(long, global = true, env = "MPBUILD_RUNTIME", default_value = DEFAULT_RUNTIME)]
    pub runtime: String,

    /// Never allocate an interactive terminal for the container.
    #[arg(long, global = true)]
    pub no_tty: bool,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build a MicroPython board.
    Build(build::BuildArgs),
    /// Clean a MicroPython board.
    Clean(clean::CleanArgs),
    /// Run make in the container of the port inferred from -C, the current directory or --port.
    Make(make::MakeArgs),
    /// List available boards.
    List(list::ListArgs),
    /// Check that every board's photos exist and are small enough.
    CheckImages(check_images::CheckImagesArgs),
}

/// State shared by every command of one invocation.
#[derive(Debug)]
pub struct Context {
    /// Effective configuration.
    pub config: MpbuildConfig,
}

impl Context {
    fn from_cli(cli: &Cli) -> Self {
        Self {
            config: MpbuildConfig {
                runtime: cli.runtime.clone(),
                mpy_dir: cli.mpy_dir.clone(),
                interactive: !cli.no_tty && std::io::stdin().is_terminal(),
            },
        }
    }

    /// Locates the MicroPython source tree.
    ///
    /// # Errors
    ///
    /// Returns an error if no source tree encloses the configured or
    /// current directory.
    pub fn source_root(&self) -> anyhow::Result<SourceRoot> {
        Ok(find_mpy_root(self.config.mpy_dir.as_deref())?)
    }
}

/// Dispatches the parsed CLI command to its handler.
///
/// # Errors
///
/// Returns an error if resolution or command execution fails.
pub fn execute(cli: Cli) -> anyhow::Result<ExitCode> {
    let ctx = Context::from_cli(&cli);
    tracing::debug!(config = ?ctx.config, "starting");
    match cli.command {
        Command::Build(args) => build::execute(args, &ctx),
        Command::Clean(args) => clean::execute(args, &ctx),
        Command::Make(args) => make::execute(args, &ctx),
        Command::List(args) => list::execute(&args, &ctx),
        Command::CheckImages(args) => check_images::execute(&args, &ctx),
    }
}

/// Synthesizes the container command for `invocation`, runs it and maps
/// its exit status to the process exit code.
fn run_invocation(
    ctx: &Context,
    mpy_root: &Path,
    invocation: &BuildInvocation,
) -> anyhow::Result<ExitCode> {
    let _ = exec::ensure_runtime(&ctx.config.runtime)?;
    let host = HostEnv::capture(mpy_root)?;
    let command = mpbuild_core::command::synthesize(invocation, &host, &ctx.config);

    let stdout = std::io::stdout();
    let ansi = stdout.is_terminal();
    let mut stdout = stdout.lock();
    let code = exec::execute(&ShellRunner, invocation, &command, &mut stdout, ansi)?;
    Ok(exit_code(code))
}

fn exit_code(code: i32) -> ExitCode {
    match u8::try_from(code) {
        Ok(0) => ExitCode::SUCCESS,
        Ok(code) => ExitCode::from(code),
        Err(_) => ExitCode::FAILURE,
    }
}
