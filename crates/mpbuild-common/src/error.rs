//! Unified error types for the mpbuild workspace.
//!
//! Resolution failures (`UnknownBoard`, `UnknownVariant`, `UnsupportedPort`,
//! `PortUndetermined`) are raised before any command is synthesized, so
//! there is never partial state to roll back.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum MpbuildError {
    /// The board name is absent from the catalog.
    #[error("invalid board '{board}'")]
    UnknownBoard {
        /// Board name as supplied by the user.
        board: String,
    },

    /// The variant is not declared by the board.
    #[error(
        "variant '{variant}' not found for board '{board}': valid variants are: {}",
        format_names(.valid)
    )]
    UnknownVariant {
        /// Board the variant was looked up on.
        board: String,
        /// Variant name as supplied by the user.
        variant: String,
        /// Every variant name the board declares, in catalog order.
        valid: Vec<String>,
    },

    /// The port has no registered build container.
    #[error("sorry, builds are not supported for the {port} port at this time")]
    UnsupportedPort {
        /// Port name without a container.
        port: String,
    },

    /// Pass-through mode could not infer which port to build.
    #[error(
        "could not determine port from arguments or current directory, please specify with --port"
    )]
    PortUndetermined,

    /// An I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path where the I/O error occurred.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A configuration value is invalid or missing.
    #[error("invalid configuration: {message}")]
    Config {
        /// Description of the invalid configuration.
        message: String,
    },

    /// A required resource was not found.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Type of the missing resource.
        kind: &'static str,
        /// Identifier of the missing resource.
        id: String,
    },

    /// An HTTP request could not be completed.
    #[error("request to {url} failed: {message}")]
    Http {
        /// Requested URL.
        url: String,
        /// Transport-level error description.
        message: String,
    },
}

fn format_names(names: &[String]) -> String {
    if names.is_empty() {
        return "(none)".to_string();
    }
    names.join(", ")
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, MpbuildError>;
