//! Integration tests for path defaults.

use std::path::{Path, PathBuf};

use dq_cli::paths::{default_output_path, resolve_reference_dir};

#[test]
fn test_default_output_path_sits_next_to_input() {
    assert_eq!(
        default_output_path(Path::new("data/customers.csv")),
        PathBuf::from("data/customers_checked.csv")
    );
    assert_eq!(
        default_output_path(Path::new("export.2024.csv")),
        PathBuf::from("export.2024_checked.csv")
    );
}

#[test]
fn test_explicit_reference_dir_wins() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(resolve_reference_dir(Some(dir.path())), dir.path());
}

#[test]
fn test_bundled_reference_dir_has_manifest() {
    if std::env::var_os("DQ_REFERENCE_DIR").is_some() {
        return;
    }
    assert!(resolve_reference_dir(None).join("manifest.toml").is_file());
}
