//! Integration tests for source tree discovery and catalog loading.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::fs;

use mpbuild_catalog::Database;
use mpbuild_catalog::root::find_mpy_root;
use mpbuild_common::types::VariantParam;

#[test]
fn discover_then_load_from_inside_a_board_directory() {
    let dir = tempfile::tempdir().expect("failed to create tempdir");
    let root = dir.path();
    fs::create_dir_all(root.join("py")).expect("mkdir py");
    let board_dir = root.join("ports/esp32/boards/ESP32_GENERIC_S3");
    fs::create_dir_all(&board_dir).expect("mkdir board");
    fs::write(
        board_dir.join("board.json"),
        r#"{
            "deploy": ["../deploy_s3.md"],
            "images": ["generic_s3.jpg"],
            "mcu": "esp32s3",
            "product": "ESP32-S3",
            "url": "https://www.espressif.com/en/products/modules",
            "vendor": "Espressif",
            "variants": {"SPIRAM_OCT": "Support for Octal-SPIRAM", "FLASH_4M": "4MiB flash"},
            "features": ["BLE", "WiFi"]
        }"#,
    )
    .expect("write board.json");
    fs::create_dir_all(root.join("ports/windows/variants/dev")).expect("mkdir");

    let found = find_mpy_root(Some(&board_dir)).expect("root");
    assert_eq!(found.auto_port.as_deref(), Some("esp32"));
    let board_dir = found.root.join("ports/esp32/boards/ESP32_GENERIC_S3");

    let db = Database::load(&found.root).expect("load");
    let board = db.board("ESP32_GENERIC_S3").expect("board");
    assert_eq!(board.mcu, "esp32s3");
    assert_eq!(board.variant_names(), vec!["SPIRAM_OCT", "FLASH_4M"]);
    assert_eq!(board.variant_param(), VariantParam::BoardVariant);
    assert_eq!(
        board.deploy_filename(),
        Some(board_dir.join("../deploy_s3.md").as_path())
    );

    let windows = db.board("windows").expect("virtual board");
    assert_eq!(windows.variant_param(), VariantParam::Variant);
    assert_eq!(windows.variant_names(), vec!["dev"]);
}
