//! Board catalog loaded from a MicroPython source tree.
//!
//! Physical boards come from `ports/<port>/boards/<BOARD>/board.json`.
//! The special ports (unix, windows, webassembly) have no boards; each is
//! exposed as a single virtual board named after the port, with one
//! variant per `ports/<port>/variants/<VARIANT>/` directory.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use mpbuild_common::constants::SPECIAL_PORTS;
use mpbuild_common::error::{MpbuildError, Result};

use crate::board::{Board, BoardJson, Port, Variant};

/// Queryable catalog of every port and board in a source tree.
#[derive(Debug, Clone)]
pub struct Database {
    /// Absolute path of the source tree root.
    pub mpy_root_directory: PathBuf,
    /// Ports keyed by name.
    pub ports: BTreeMap<String, Arc<Port>>,
    /// Boards keyed by name.
    pub boards: BTreeMap<String, Board>,
}

impl Database {
    /// Scans the source tree rooted at `root`.
    ///
    /// Boards with a missing or malformed `board.json` are skipped with a
    /// warning rather than failing the whole catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the `ports/` directory cannot be read.
    pub fn load(root: &Path) -> Result<Self> {
        let mut db = Self {
            mpy_root_directory: root.to_path_buf(),
            ports: BTreeMap::new(),
            boards: BTreeMap::new(),
        };

        for port_dir in sorted_subdirs(&root.join("ports"))? {
            let Some(name) = dir_name(&port_dir) else {
                continue;
            };
            let port = Arc::new(Port::new(name.clone(), root));

            if SPECIAL_PORTS.contains(&name.as_str()) {
                db.insert_board(special_board(&port)?);
            } else if port_dir.join("boards").is_dir() {
                for board_dir in sorted_subdirs(&port_dir.join("boards"))? {
                    if let Some(board) = load_board(&port, &board_dir) {
                        db.insert_board(board);
                    }
                }
            }
            let _ = db.ports.insert(name, port);
        }

        tracing::info!(
            root = %root.display(),
            ports = db.ports.len(),
            boards = db.boards.len(),
            "loaded board catalog"
        );
        Ok(db)
    }

    fn insert_board(&mut self, board: Board) {
        if let Some(existing) = self.boards.get(&board.name) {
            tracing::warn!(
                board = %board.name,
                kept = %existing.port.name,
                ignored = %board.port.name,
                "duplicate board name"
            );
            return;
        }
        let _ = self.boards.insert(board.name.clone(), board);
    }

    /// Looks up a board by name.
    pub fn board(&self, name: &str) -> Option<&Board> {
        self.boards.get(name)
    }

    /// Looks up a port by name.
    pub fn port(&self, name: &str) -> Option<&Arc<Port>> {
        self.ports.get(name)
    }

    /// Returns the boards of a port, sorted by name.
    pub fn boards_for_port<'a>(&'a self, port: &'a str) -> impl Iterator<Item = &'a Board> + 'a {
        self.boards.values().filter(move |b| b.port.name == port)
    }
}

fn load_board(port: &Arc<Port>, board_dir: &Path) -> Option<Board> {
    let name = dir_name(board_dir)?;
    let json_path = board_dir.join("board.json");
    let content = match std::fs::read_to_string(&json_path) {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!(path = %json_path.display(), error = %e, "skipping board");
            return None;
        }
    };
    match serde_json::from_str::<BoardJson>(&content) {
        Ok(raw) => Some(raw.into_board(name, Arc::clone(port), board_dir.to_path_buf())),
        Err(e) => {
            tracing::warn!(path = %json_path.display(), error = %e, "malformed board.json");
            None
        }
    }
}

fn special_board(port: &Arc<Port>) -> Result<Board> {
    let variants_dir = port.directory.join("variants");
    let variants = if variants_dir.is_dir() {
        sorted_subdirs(&variants_dir)?
            .iter()
            .filter_map(|dir| dir_name(dir))
            .map(|name| Variant {
                name,
                text: String::new(),
                board: port.name.clone(),
            })
            .collect()
    } else {
        Vec::new()
    };

    Ok(Board {
        name: port.name.clone(),
        port: Arc::clone(port),
        path: port.directory.clone(),
        physical_board: false,
        variants,
        url: String::new(),
        mcu: String::new(),
        product: port.name.clone(),
        vendor: String::new(),
        images: Vec::new(),
        deploy: Vec::new(),
    })
}

fn sorted_subdirs(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|e| MpbuildError::Io {
        path: dir.to_path_buf(),
        source: e,
    })?;
    let mut dirs: Vec<PathBuf> = entries
        .filter_map(std::result::Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    dirs.sort();
    Ok(dirs)
}

fn dir_name(path: &Path) -> Option<String> {
    path.file_name().map(|n| n.to_string_lossy().into_owned())
}
