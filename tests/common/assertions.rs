//! Assertion helpers for tests.

use std::fs;
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;

/// All regular files below `dir`, sorted, relative to `dir`.
pub fn list_files(dir: &Path) -> Vec<PathBuf> {
    fn walk(root: &Path, dir: &Path, out: &mut Vec<PathBuf>) {
        let Ok(entries) = fs::read_dir(dir) else {
            return;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                walk(root, &path, out);
            } else if let Ok(rel) = path.strip_prefix(root) {
                out.push(rel.to_path_buf());
            }
        }
    }

    let mut files = Vec::new();
    walk(dir, dir, &mut files);
    files.sort();
    files
}

/// Assert nothing at all exists below `dir`.
pub fn assert_no_files(dir: &Path) {
    let files = list_files(dir);
    assert!(files.is_empty(), "Expected no files, found {files:?}");
}

/// Assert two directories hold the same files with identical bytes.
pub fn assert_same_tree(a: &Path, b: &Path) {
    let files_a = list_files(a);
    assert_eq!(files_a, list_files(b), "Directories hold different files");
    for file in &files_a {
        let bytes_a = fs::read(a.join(file)).expect("readable");
        let bytes_b = fs::read(b.join(file)).expect("readable");
        assert!(bytes_a == bytes_b, "{} differs between runs", file.display());
    }
}

/// Assert `value` is `#` followed by six lowercase hex digits.
pub fn assert_hex6(value: &str) {
    assert_eq!(value.len(), 7, "Expected #rrggbb, got {value:?}");
    assert!(value.starts_with('#'), "Expected #rrggbb, got {value:?}");
    assert!(
        value[1..].chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()),
        "Expected lowercase hex digits, got {value:?}"
    );
}
