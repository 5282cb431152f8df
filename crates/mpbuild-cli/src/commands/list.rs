//! `mpbuild list` — List boards and their variants.

use std::process::ExitCode;

use clap::Args;
use mpbuild_catalog::Database;
use mpbuild_common::error::MpbuildError;
use mpbuild_core::registry;

use super::Context;
use crate::output::{BOLD, CYAN, DIM, RESET, hyperlink};

/// Arguments for the `list` command.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only list boards of this port.
    #[arg(long)]
    pub port: Option<String>,

    /// Link board names to their product pages.
    #[arg(long)]
    pub links: bool,
}

/// Executes the `list` command.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or `--port` names an
/// unknown port.
pub fn execute(args: &ListArgs, ctx: &Context) -> anyhow::Result<ExitCode> {
    let root = ctx.source_root()?;
    let db = Database::load(&root.root)?;

    if let Some(port) = &args.port {
        if db.port(port).is_none() {
            return Err(MpbuildError::NotFound {
                kind: "port",
                id: port.clone(),
            }
            .into());
        }
    }

    let ports = db
        .ports
        .keys()
        .filter(|name| args.port.as_ref().is_none_or(|p| p == *name));

    for port in ports {
        let boards: Vec<_> = db.boards_for_port(port).collect();
        if boards.is_empty() {
            continue;
        }
        let note = if registry::is_supported(port) {
            String::new()
        } else {
            format!(" {DIM}(no build container){RESET}")
        };
        println!("{BOLD}{port}{RESET}{note}");

        for board in boards {
            let name = if args.links && !board.url.is_empty() {
                hyperlink(&board.url, &board.name)
            } else {
                board.name.clone()
            };
            let variants = board.variant_names();
            if variants.is_empty() {
                println!("  {name}");
            } else {
                println!("  {name} {CYAN}[{}]{RESET}", variants.join(", "));
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
