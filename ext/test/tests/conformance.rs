//! Conformance tests that run YAML fixtures against the resolution engine.
//!
//! Run with: cargo test -p loqr-test --test conformance

#![cfg(feature = "fixtures")]

use loqr_test::fixture::Fixture;
use std::fs;
use std::path::{Path, PathBuf};

/// Get the conformance directory relative to the workspace root.
fn fixtures_dir() -> PathBuf {
    // The manifest dir is ext/test; go up to the workspace root.
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let ext_test = Path::new(manifest_dir);

    let root = ext_test
        .parent() // ext
        .and_then(|p| p.parent()) // workspace root
        .expect("could not find workspace root");

    root.join("conformance")
}

/// Load and run all fixtures in one file.
fn run_fixture_file(name: &str) {
    let path = fixtures_dir().join(name);
    let yaml = fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("read {}: {e}", path.display()));

    let fixtures = Fixture::from_yaml_multi(&yaml)
        .unwrap_or_else(|e| panic!("parse {}: {e}", path.display()));
    assert!(!fixtures.is_empty(), "{name} contains no fixtures");

    for fixture in fixtures {
        println!("Running: {}", fixture.name);
        fixture.run_and_assert();
    }
}

#[test]
fn resolution_basics() {
    run_fixture_file("01_resolution.yaml");
}

#[test]
fn precedence_and_aliases() {
    run_fixture_file("02_precedence.yaml");
}

#[test]
fn free_text_fallback() {
    run_fixture_file("03_fallback.yaml");
}

#[test]
fn rent_variant() {
    run_fixture_file("04_rent_variant.yaml");
}
