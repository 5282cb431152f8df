//! `mpbuild make` — Run raw make arguments in the right port's container.

use std::process::ExitCode;

use clap::Args;
use mpbuild_catalog::root::canonical;
use mpbuild_core::invocation::BuildInvocation;
use mpbuild_core::location::resolve_location;

use super::Context;

/// Arguments for the `make` command.
#[derive(Args, Debug)]
pub struct MakeArgs {
    /// Port to build when neither -C nor the current directory names one.
    #[arg(long)]
    pub port: Option<String>,

    /// Arguments passed to make; `-C <path>` selects the directory.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

/// Executes the `make` command.
///
/// # Errors
///
/// Returns an error if the port cannot be determined or has no container,
/// or the container cannot be started.
pub fn execute(args: MakeArgs, ctx: &Context) -> anyhow::Result<ExitCode> {
    let root = ctx.source_root()?;
    let cwd = canonical(&std::env::current_dir()?)?;

    let location = resolve_location(&root.root, &cwd, &args.args, args.port.as_deref())?;
    tracing::info!(
        port = %location.port,
        make_path = %location.make_path,
        "resolved make location"
    );
    let invocation = BuildInvocation::for_make(location)?;

    super::run_invocation(ctx, &root.root, &invocation)
}
