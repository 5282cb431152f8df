//! `mpbuild clean` — Remove a board's build artifacts.

use std::process::ExitCode;

use clap::Args;
use mpbuild_common::constants::CLEAN_TARGET;

use super::Context;
use super::build::{ImageChoice, build_board};

/// Arguments for the `clean` command.
#[derive(Args, Debug)]
pub struct CleanArgs {
    /// Board name, e.g. `RPI_PICO`.
    pub board: String,

    /// Board variant, e.g. `RISCV`.
    pub variant: Option<String>,
}

/// Executes the `clean` command.
///
/// Runs the board's build with `clean` as the only make argument, which
/// runs the container as root and skips the pre-build steps.
///
/// # Errors
///
/// Returns an error if the board or variant cannot be resolved, or the
/// container cannot be started.
pub fn execute(args: CleanArgs, ctx: &Context) -> anyhow::Result<ExitCode> {
    build_board(
        ctx,
        &args.board,
        args.variant.as_deref(),
        vec![CLEAN_TARGET.to_string()],
        &ImageChoice::default(),
    )
}
