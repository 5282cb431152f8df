//! Domain primitive types used across the mpbuild workspace.

use std::fmt;

/// Reference to a build container image, e.g. `espressif/idf:v5.2.2`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageRef(String);

impl ImageRef {
    /// Creates an image reference from a string value.
    #[must_use]
    pub fn new(image: impl Into<String>) -> Self {
        Self(image.into())
    }

    /// Builds an ESP-IDF image reference for the given IDF version.
    ///
    /// Versions without a leading `v` get one, matching Espressif's tags.
    #[must_use]
    pub fn esp_idf(version: &str) -> Self {
        let tag = if version.starts_with('v') {
            version.to_string()
        } else {
            format!("v{version}")
        };
        Self(format!("{}:{tag}", crate::constants::ESP_IDF_IMAGE))
    }

    /// Returns the inner string representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Make variable used to select a board variant.
///
/// Physical boards take `BOARD_VARIANT`; the virtual boards of the special
/// ports (unix, windows, webassembly) take `VARIANT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariantParam {
    /// `BOARD_VARIANT=<name>`
    BoardVariant,
    /// `VARIANT=<name>`
    Variant,
}

impl VariantParam {
    /// Picks the variable name for a board.
    #[must_use]
    pub const fn for_board(physical_board: bool) -> Self {
        if physical_board {
            Self::BoardVariant
        } else {
            Self::Variant
        }
    }

    /// Returns the make variable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BoardVariant => "BOARD_VARIANT",
            Self::Variant => "VARIANT",
        }
    }
}

impl fmt::Display for VariantParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
