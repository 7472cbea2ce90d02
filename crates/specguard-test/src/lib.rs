//! Test harness for specguard.
//!
//! Loads the fixture specs under `tests/fixtures/specs` and runs them through
//! the default rules. The scenarios live in the `compat` test module.

use std::path::{Path, PathBuf};

use specguard_diff::check_compatibility;
use specguard_spec_parser::{parse_document_file, Document, ParseError};

#[cfg(test)]
pub mod compat;

/// Absolute path to the shared spec fixtures directory.
pub fn fixtures() -> PathBuf {
    // CARGO_MANIFEST_DIR = .../crates/specguard-test
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .ancestors()
        .nth(2)
        .unwrap_or(manifest_dir)
        .join("tests/fixtures/specs")
}

/// Load a fixture spec by file name.
pub fn load_fixture(name: &str) -> Result<Document, ParseError> {
    parse_document_file(&fixtures().join(name))
}

/// Compare two fixtures with the default rules.
pub fn compare_fixtures(old: &str, new: &str) -> Result<Vec<String>, ParseError> {
    let old = load_fixture(old)?;
    let new = load_fixture(new)?;
    Ok(check_compatibility(&old, &new))
}
