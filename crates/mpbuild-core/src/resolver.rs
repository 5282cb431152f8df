//! Board and variant resolution against the catalog.

use mpbuild_catalog::{Board, Database, Port, Variant};
use mpbuild_common::error::{MpbuildError, Result};

/// A board found in the catalog together with its port and chosen variant.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedBoard<'a> {
    /// Port the board belongs to.
    pub port: &'a Port,
    /// The board itself.
    pub board: &'a Board,
    /// The requested variant, if any.
    pub variant: Option<&'a Variant>,
}

/// Looks up `board_name` and, if given, `variant_name` on that board.
///
/// # Errors
///
/// Returns `MpbuildError::UnknownBoard` if the board is not in the catalog,
/// or `MpbuildError::UnknownVariant` (listing the board's variants) if the
/// board does not declare the variant.
pub fn resolve<'a>(
    db: &'a Database,
    board_name: &str,
    variant_name: Option<&str>,
) -> Result<ResolvedBoard<'a>> {
    let board = db.board(board_name).ok_or_else(|| MpbuildError::UnknownBoard {
        board: board_name.to_string(),
    })?;

    let variant = variant_name
        .map(|name| {
            board
                .find_variant(name)
                .ok_or_else(|| MpbuildError::UnknownVariant {
                    board: board.name.clone(),
                    variant: name.to_string(),
                    valid: board.variant_names(),
                })
        })
        .transpose()?;

    tracing::info!(
        board = %board.name,
        port = %board.port.name,
        variant = variant.map(|v| v.name.as_str()),
        "resolved board"
    );
    Ok(ResolvedBoard {
        port: &board.port,
        board,
        variant,
    })
}
