//! Build container registry.
//!
//! An ordered rule list evaluated top to bottom; the first rule whose port
//! and variant match wins. The rp2 rules come first because that port
//! selects between two physically different cores by variant.

use mpbuild_common::constants::{
    ARM_BUILD_CONTAINER, ESP32_BUILD_CONTAINER, ESP8266_BUILD_CONTAINER, RISCV_VARIANT,
    RP2_ARM_BUILD_CONTAINER, RP2_PORT, RP2_RISCV_BUILD_CONTAINER, UNIX_BUILD_CONTAINER,
};
use mpbuild_common::error::{MpbuildError, Result};
use mpbuild_common::types::ImageRef;

/// Variant condition of a [`ContainerRule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantMatch {
    /// Matches only this exact variant name.
    Exactly(&'static str),
    /// Matches any variant, including none.
    Any,
}

impl VariantMatch {
    fn matches(self, variant: Option<&str>) -> bool {
        match self {
            Self::Exactly(name) => variant == Some(name),
            Self::Any => true,
        }
    }
}

/// One entry of the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerRule {
    /// Port the rule applies to.
    pub port: &'static str,
    /// Variant condition.
    pub variant: VariantMatch,
    /// Image selected when the rule matches.
    pub image: &'static str,
}

const fn rule(port: &'static str, image: &'static str) -> ContainerRule {
    ContainerRule {
        port,
        variant: VariantMatch::Any,
        image,
    }
}

/// Registry rules in priority order.
pub const RULES: &[ContainerRule] = &[
    ContainerRule {
        port: RP2_PORT,
        variant: VariantMatch::Exactly(RISCV_VARIANT),
        image: RP2_RISCV_BUILD_CONTAINER,
    },
    rule(RP2_PORT, RP2_ARM_BUILD_CONTAINER),
    rule("stm32", ARM_BUILD_CONTAINER),
    rule("nrf", ARM_BUILD_CONTAINER),
    rule("mimxrt", ARM_BUILD_CONTAINER),
    rule("renesas-ra", ARM_BUILD_CONTAINER),
    rule("samd", ARM_BUILD_CONTAINER),
    rule("esp32", ESP32_BUILD_CONTAINER),
    rule("esp8266", ESP8266_BUILD_CONTAINER),
    rule("unix", UNIX_BUILD_CONTAINER),
];

/// Returns the build container for a port/variant pair.
///
/// # Errors
///
/// Returns `MpbuildError::UnsupportedPort` if no rule covers the port.
pub fn resolve_container(port: &str, variant: Option<&str>) -> Result<ImageRef> {
    let image = RULES
        .iter()
        .find(|r| r.port == port && r.variant.matches(variant))
        .map(|r| ImageRef::new(r.image))
        .ok_or_else(|| MpbuildError::UnsupportedPort {
            port: port.to_string(),
        })?;
    tracing::debug!(port, variant, image = %image, "resolved build container");
    Ok(image)
}

/// Returns true if some rule covers the port.
pub fn is_supported(port: &str) -> bool {
    RULES.iter().any(|r| r.port == port)
}
