//! Shared test fixtures for integration tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use keycodec::models::{Layout, RowGrid};
use keycodec::services::{JsonFileStore, LayoutRegistry};
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Builds a grid from string slices.
pub fn grid(rows: &[&[&str]]) -> RowGrid {
    rows.iter()
        .map(|row| row.iter().map(|slot| (*slot).to_string()).collect())
        .collect()
}

/// The three-key layout from the end-to-end scenario.
pub fn qwe_grids() -> (RowGrid, RowGrid) {
    (grid(&[&["q", "w", "e"]]), grid(&[&["Q", "W", "E"]]))
}

/// A two-row layout with a spacer slot and punctuation.
pub fn small_grids() -> (RowGrid, RowGrid) {
    (
        grid(&[&["1", "2", "3"], &["a", "b", ""]]),
        grid(&[&["!", "@", "#"], &["A", "B", ""]]),
    )
}

/// Builds a validated-shape layout from the small grids.
pub fn small_layout(key: &str) -> Layout {
    let (lowercase, uppercase) = small_grids();
    Layout::new(key, key.to_uppercase(), lowercase, uppercase)
}

/// Creates a registry backed by a JSON file in a fresh temp dir.
///
/// The store is not seeded with built-in layouts.
pub fn temp_registry() -> (LayoutRegistry, PathBuf, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("layouts.json");
    let registry = LayoutRegistry::new(Box::new(JsonFileStore::new(&path)))
        .expect("Failed to open registry");
    (registry, path, temp_dir)
}

/// Writes a `GRID.json` file and returns its path.
pub fn write_grid_file(dir: &Path, name: &str, lowercase: &RowGrid, uppercase: &RowGrid) -> PathBuf {
    let path = dir.join(name);
    let content = json!({ "lowercase": lowercase, "uppercase": uppercase });
    fs::write(&path, serde_json::to_string_pretty(&content).unwrap())
        .expect("Failed to write grid file");
    path
}

/// Encodes form fields as `application/x-www-form-urlencoded`.
pub fn form_body(fields: &[(&str, &str)]) -> String {
    fields
        .iter()
        .map(|(name, value)| format!("{}={}", percent_encode(name), percent_encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

fn percent_encode(value: &str) -> String {
    value
        .bytes()
        .map(|b| {
            if b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.' | b'~') {
                (b as char).to_string()
            } else {
                format!("%{b:02X}")
            }
        })
        .collect()
}
