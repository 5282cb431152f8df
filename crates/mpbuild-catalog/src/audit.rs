//! Board photo audit.
//!
//! Every physical board should list at least one photo in `board.json`,
//! and each photo must exist in the media repository and stay below
//! [`MAX_IMAGE_BYTES`].

use mpbuild_common::constants::{MAX_IMAGE_BYTES, MEDIA_BASE_URL};
use mpbuild_common::error::{MpbuildError, Result};
use reqwest::header::CONTENT_LENGTH;

use crate::board::Board;
use crate::database::Database;

/// Result of probing one image URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The server answered with a success status.
    Found {
        /// Advertised size in bytes, if the server sent one.
        content_length: Option<u64>,
    },
    /// The server answered with an error status, or the request failed.
    Missing {
        /// HTTP status, `None` on transport failure.
        status: Option<u16>,
    },
}

/// Checks whether an image URL exists.
pub trait ImageProbe {
    /// Issues a `HEAD` request (or equivalent) for `url`.
    fn head(&self, url: &str) -> ProbeOutcome;
}

/// [`ImageProbe`] backed by a blocking HTTP client.
#[derive(Debug)]
pub struct HttpProbe {
    client: reqwest::blocking::Client,
}

impl HttpProbe {
    /// Creates a probe with a fresh HTTP client.
    ///
    /// # Errors
    ///
    /// Returns `MpbuildError::Http` if the TLS backend cannot be initialised.
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("mpbuild/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| MpbuildError::Http {
                url: MEDIA_BASE_URL.to_string(),
                message: e.to_string(),
            })?;
        Ok(Self { client })
    }
}

impl ImageProbe for HttpProbe {
    fn head(&self, url: &str) -> ProbeOutcome {
        match self.client.head(url).send() {
            Ok(resp) if resp.status().is_success() => ProbeOutcome::Found {
                content_length: resp
                    .headers()
                    .get(CONTENT_LENGTH)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok()),
            },
            Ok(resp) => ProbeOutcome::Missing {
                status: Some(resp.status().as_u16()),
            },
            Err(e) => {
                tracing::debug!(url, error = %e, "image probe failed");
                ProbeOutcome::Missing { status: None }
            }
        }
    }
}

/// A board flagged by the audit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardRef {
    /// Port name.
    pub port: String,
    /// Board name.
    pub board: String,
}

/// A specific photo flagged by the audit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageIssue {
    /// Port name.
    pub port: String,
    /// Board name.
    pub board: String,
    /// Checked URL.
    pub url: String,
    /// Advertised size, for oversized images.
    pub size: Option<u64>,
}

/// Findings grouped by category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditReport {
    /// Boards that list no photos.
    pub no_images: Vec<BoardRef>,
    /// Photos absent from the media repository.
    pub not_found: Vec<ImageIssue>,
    /// Photos larger than [`MAX_IMAGE_BYTES`].
    pub too_large: Vec<ImageIssue>,
}

impl AuditReport {
    /// Returns true if nothing was flagged.
    pub fn is_clean(&self) -> bool {
        self.no_images.is_empty() && self.not_found.is_empty() && self.too_large.is_empty()
    }
}

/// URL of a board photo in the media repository.
pub fn image_url(board: &str, image: &str) -> String {
    format!("{MEDIA_BASE_URL}/{board}/{image}")
}

/// Audits every physical board of the catalog.
///
/// `on_board` is called once per board after it has been checked, so the
/// caller can drive a progress display.
pub fn audit<P: ImageProbe>(
    db: &Database,
    probe: &P,
    mut on_board: impl FnMut(&Board),
) -> AuditReport {
    let mut report = AuditReport::default();

    for board in db.boards.values().filter(|b| b.physical_board) {
        audit_board(board, probe, &mut report);
        on_board(board);
    }

    tracing::info!(
        no_images = report.no_images.len(),
        not_found = report.not_found.len(),
        too_large = report.too_large.len(),
        "image audit complete"
    );
    report
}

fn audit_board<P: ImageProbe>(board: &Board, probe: &P, report: &mut AuditReport) {
    if board.images.is_empty() {
        report.no_images.push(BoardRef {
            port: board.port.name.clone(),
            board: board.name.clone(),
        });
        return;
    }

    for image in &board.images {
        let url = image_url(&board.name, image);
        let issue = |size| ImageIssue {
            port: board.port.name.clone(),
            board: board.name.clone(),
            url: url.clone(),
            size,
        };
        match probe.head(&url) {
            ProbeOutcome::Missing { .. } => report.not_found.push(issue(None)),
            ProbeOutcome::Found {
                content_length: Some(size),
            } if size > MAX_IMAGE_BYTES => report.too_large.push(issue(Some(size))),
            ProbeOutcome::Found { .. } => {}
        }
    }
}
