//! Pass-through location inference when the source tree root is given as a
//! relative path.
//!
//! Kept in its own test binary because it changes the process working
//! directory.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::fs;
use std::path::Path;

use mpbuild_catalog::root::{canonical, find_mpy_root};
use mpbuild_core::location::resolve_location;

#[test]
fn relative_root_matches_cwd_for_port_inference() {
    let dir = tempfile::tempdir().expect("failed to create tempdir");
    fs::create_dir_all(dir.path().join("py")).expect("mkdir py");
    fs::create_dir_all(dir.path().join("ports/rp2/boards/RPI_PICO")).expect("mkdir port");
    let port_dir = dir.path().join("ports/rp2");

    std::env::set_current_dir(&port_dir).expect("chdir");
    let found = find_mpy_root(Some(Path::new("../.."))).expect("root");
    let cwd = canonical(&std::env::current_dir().expect("cwd")).expect("canonical cwd");

    assert_eq!(found.root, canonical(dir.path()).expect("canonical tree"));
    assert_eq!(found.auto_port.as_deref(), Some("rp2"));

    let location = resolve_location(&found.root, &cwd, &[], None).expect("location");
    assert_eq!(location.port, "rp2");
    assert_eq!(location.make_path, "ports/rp2");

    let args = vec!["-C".to_string(), "../../ports/rp2".to_string(), "all".to_string()];
    let location = resolve_location(&found.root, &cwd, &args, None).expect("-C location");
    assert_eq!(location.port, "rp2");
    assert_eq!(location.make_path, "ports/rp2");
    assert_eq!(location.extra_args, vec!["all".to_string()]);

    std::env::set_current_dir(std::env::temp_dir()).expect("leave tree");
}
