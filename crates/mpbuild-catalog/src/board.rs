//! Typed catalog entities: ports, boards and their variants.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use mpbuild_common::types::VariantParam;
use serde::Deserialize;

/// A hardware/toolchain family with its own directory under `ports/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Port {
    /// Port name, e.g. `rp2`.
    pub name: String,
    /// Absolute path of `ports/<name>`.
    pub directory: PathBuf,
}

impl Port {
    /// Creates a port rooted in the given source tree.
    #[must_use]
    pub fn new(name: impl Into<String>, repo: &Path) -> Self {
        let name = name.into();
        Self {
            directory: repo.join("ports").join(&name),
            name,
        }
    }
}

/// A named build configuration of a board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    /// Variant name, e.g. `RISCV`.
    pub name: String,
    /// Human readable description from `board.json`.
    pub text: String,
    /// Name of the board declaring this variant.
    pub board: String,
}

/// A buildable target within a port.
#[derive(Debug, Clone)]
pub struct Board {
    /// Board name, e.g. `RPI_PICO2`.
    pub name: String,
    /// Port the board belongs to (shared with every other board of the port).
    pub port: Arc<Port>,
    /// Directory holding the board definition.
    pub path: PathBuf,
    /// False for the virtual boards of ports without a `boards/` directory.
    pub physical_board: bool,
    /// Declared variants in catalog order.
    pub variants: Vec<Variant>,
    /// Product page URL.
    pub url: String,
    /// MCU family.
    pub mcu: String,
    /// Product name.
    pub product: String,
    /// Vendor name.
    pub vendor: String,
    /// Photo file names, relative to the board's media directory.
    pub images: Vec<String>,
    /// Deploy instruction files, resolved against the board directory.
    pub deploy: Vec<PathBuf>,
}

impl Board {
    /// Looks up a variant by exact name.
    pub fn find_variant(&self, name: &str) -> Option<&Variant> {
        self.variants.iter().find(|v| v.name == name)
    }

    /// Returns every declared variant name, in catalog order.
    pub fn variant_names(&self) -> Vec<String> {
        self.variants.iter().map(|v| v.name.clone()).collect()
    }

    /// The deploy instructions shown after a successful build.
    ///
    /// Only the first file is ever used.
    pub fn deploy_filename(&self) -> Option<&Path> {
        self.deploy.first().map(PathBuf::as_path)
    }

    /// Make variable that selects a variant of this board.
    pub const fn variant_param(&self) -> VariantParam {
        VariantParam::for_board(self.physical_board)
    }
}

/// On-disk shape of `board.json`. Unknown keys are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct BoardJson {
    pub url: String,
    pub mcu: String,
    pub product: String,
    pub vendor: String,
    pub images: Vec<String>,
    pub deploy: Vec<String>,
    pub variants: serde_json::Map<String, serde_json::Value>,
}

impl BoardJson {
    pub(crate) fn into_board(self, name: String, port: Arc<Port>, path: PathBuf) -> Board {
        let variants = self
            .variants
            .into_iter()
            .map(|(variant, text)| Variant {
                name: variant,
                text: text.as_str().unwrap_or_default().to_string(),
                board: name.clone(),
            })
            .collect();
        let deploy = self.deploy.iter().map(|d| path.join(d)).collect();

        Board {
            name,
            port,
            physical_board: true,
            variants,
            url: self.url,
            mcu: self.mcu,
            product: self.product,
            vendor: self.vendor,
            images: self.images,
            deploy,
            path,
        }
    }
}
