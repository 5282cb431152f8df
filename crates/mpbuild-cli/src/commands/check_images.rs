//! `mpbuild check-images` — Audit board photos in the media repository.

use std::process::ExitCode;

use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use mpbuild_catalog::Database;
use mpbuild_catalog::audit::{self, AuditReport, HttpProbe};
use mpbuild_common::constants::MAX_IMAGE_BYTES;

use super::Context;
use crate::output::{BOLD, GREEN, RESET, YELLOW, format_size, hyperlink};

/// Arguments for the `check-images` command.
#[derive(Args, Debug)]
pub struct CheckImagesArgs {
    /// Print every board as it is checked.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Executes the `check-images` command.
///
/// Exits non-zero if any board was flagged.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or the HTTP client
/// cannot be created.
pub fn execute(args: &CheckImagesArgs, ctx: &Context) -> anyhow::Result<ExitCode> {
    let root = ctx.source_root()?;
    let db = Database::load(&root.root)?;
    let probe = HttpProbe::new()?;

    let total = db.boards.values().filter(|b| b.physical_board).count();
    let pb = progress_bar(total)?;
    let report = audit::audit(&db, &probe, |board| {
        if args.verbose {
            pb.suspend(|| eprintln!("  {}/{}", board.port.name, board.name));
        }
        pb.inc(1);
    });
    pb.finish_and_clear();

    print_report(&report);
    Ok(if report.is_clean() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Progress bar on stderr, one tick per audited board.
fn progress_bar(total: usize) -> anyhow::Result<ProgressBar> {
    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::with_template("{msg} [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("#>-"),
    );
    pb.set_message("Checking images");
    Ok(pb)
}

fn print_report(report: &AuditReport) {
    if report.is_clean() {
        println!("{GREEN}All board images present and within size limits.{RESET}");
        return;
    }

    section("No images", "no image in board.json", report.no_images.len());
    for b in &report.no_images {
        println!("  {}/{BOLD}{}{RESET}", b.port, b.board);
    }

    section("Not found", "image not in micropython-media", report.not_found.len());
    for issue in &report.not_found {
        let label = format!("{}/{BOLD}{}{RESET}", issue.port, issue.board);
        println!("  {}", hyperlink(&issue.url, &label));
    }

    let limit = format!("image > {}", format_size(MAX_IMAGE_BYTES));
    section("Too large", &limit, report.too_large.len());
    for issue in &report.too_large {
        let label = format!("{}/{BOLD}{}{RESET}", issue.port, issue.board);
        let size = issue.size.map(format_size).unwrap_or_default();
        println!("  {} {size}", hyperlink(&issue.url, &label));
    }
}

fn section(title: &str, subtitle: &str, count: usize) {
    println!();
    println!("{YELLOW}{BOLD}{title}{RESET} ({subtitle}): {count}");
}
