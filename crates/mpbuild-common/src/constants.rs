//! Build container images and other system-wide constants.

/// Shared ARM toolchain image used by most Cortex-M ports.
pub const ARM_BUILD_CONTAINER: &str = "micropython/build-micropython-arm";

/// ARM image pinned to a newer base OS; the rp2 port needs a recent gcc.
pub const RP2_ARM_BUILD_CONTAINER: &str = "micropython/build-micropython-arm:bookworm";

/// Image carrying the RISC-V toolchain for the RP2350 Hazard3 cores.
pub const RP2_RISCV_BUILD_CONTAINER: &str = "micropython/build-micropython-rp2350riscv";

/// Espressif's ESP-IDF image repository (without tag).
pub const ESP_IDF_IMAGE: &str = "espressif/idf";

/// Default ESP-IDF image for the esp32 port.
pub const ESP32_BUILD_CONTAINER: &str = "espressif/idf:v5.2.2";

/// Toolchain image for the esp8266 port.
pub const ESP8266_BUILD_CONTAINER: &str = "larsks/esp-open-sdk";

/// Host gcc image for the unix port.
pub const UNIX_BUILD_CONTAINER: &str = "gcc:12-bookworm";

/// Port name of the RP2 family.
pub const RP2_PORT: &str = "rp2";

/// Port name of the ESP32 family.
pub const ESP32_PORT: &str = "esp32";

/// Variant selecting the RISC-V cores on RP2 boards.
pub const RISCV_VARIANT: &str = "RISCV";

/// The single extra argument token that turns a build into a clean.
pub const CLEAN_TARGET: &str = "clean";

/// Ports that have no `boards/` directory and carry their variants
/// directly under `ports/<port>/variants/`.
pub const SPECIAL_PORTS: &[&str] = &["unix", "webassembly", "windows"];

/// Base URL of the board photo repository.
pub const MEDIA_BASE_URL: &str =
    "https://raw.githubusercontent.com/micropython/micropython-media/main/boards";

/// Board photos above this size are flagged by the image audit.
pub const MAX_IMAGE_BYTES: u64 = 500_000;

/// Container runtime executable used when none is configured.
pub const DEFAULT_RUNTIME: &str = "docker";
