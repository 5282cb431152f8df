//! `mpbuild build` — Build firmware for a board.

use std::process::ExitCode;

use clap::Args;
use mpbuild_catalog::Database;
use mpbuild_common::constants::ESP32_PORT;
use mpbuild_common::types::ImageRef;
use mpbuild_core::invocation::BuildInvocation;
use mpbuild_core::resolver::{self, ResolvedBoard};

use super::Context;
use crate::output::{RESET, YELLOW};

/// Arguments for the `build` command.
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Board name, e.g. `RPI_PICO`.
    pub board: String,

    /// Board variant, e.g. `RISCV`.
    pub variant: Option<String>,

    /// ESP-IDF version for esp32 boards, e.g. `5.2.2`.
    #[arg(long)]
    pub idf: Option<String>,

    /// Build container image to use instead of the port's default.
    #[arg(long, conflicts_with = "idf")]
    pub container: Option<String>,

    /// Extra arguments passed to make, after `--`.
    #[arg(last = true)]
    pub make_args: Vec<String>,
}

/// Executes the `build` command.
///
/// # Errors
///
/// Returns an error if the board, variant or port cannot be resolved, or
/// the container cannot be started.
pub fn execute(args: BuildArgs, ctx: &Context) -> anyhow::Result<ExitCode> {
    build_board(
        ctx,
        &args.board,
        args.variant.as_deref(),
        args.make_args,
        &ImageChoice {
            idf: args.idf.as_deref(),
            container: args.container.as_deref(),
        },
    )
}

/// User overrides of the registry's container choice.
#[derive(Debug, Default)]
pub struct ImageChoice<'a> {
    /// ESP-IDF version; only meaningful for esp32 boards.
    pub idf: Option<&'a str>,
    /// Explicit image for any board.
    pub container: Option<&'a str>,
}

impl ImageChoice<'_> {
    fn resolve(&self, resolved: &ResolvedBoard<'_>) -> Option<ImageRef> {
        if let Some(image) = self.container {
            return Some(ImageRef::new(image));
        }
        let version = self.idf?;
        if resolved.port.name == ESP32_PORT {
            return Some(ImageRef::esp_idf(version));
        }
        tracing::warn!(port = %resolved.port.name, "--idf ignored for non-esp32 port");
        eprintln!(
            "{YELLOW}Note:{RESET} --idf only applies to esp32 boards; ignoring it for {}.",
            resolved.port.name
        );
        None
    }
}

/// Resolves `board`/`variant`, then builds it with `extra_args`.
///
/// # Errors
///
/// Returns an error if resolution fails or the container cannot be started.
pub fn build_board(
    ctx: &Context,
    board: &str,
    variant: Option<&str>,
    extra_args: Vec<String>,
    image: &ImageChoice<'_>,
) -> anyhow::Result<ExitCode> {
    let root = ctx.source_root()?;
    let db = Database::load(&root.root)?;

    let resolved = resolver::resolve(&db, board, variant)?;
    let invocation = BuildInvocation::for_board(&resolved, extra_args, image.resolve(&resolved))?;

    super::run_invocation(ctx, &db.mpy_root_directory, &invocation)
}
