//! Filesystem discovery: which files under a folder are music files.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::error::ScanError;

/// Recursively collect `.mp3` files under `root`, sorted by path.
pub fn scan_mp3s(root: &Path) -> Result<Vec<PathBuf>, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::NotAFolder(root.to_path_buf()));
    }

    let mut out = Vec::new();

    for entry in WalkDir::new(root).follow_links(true) {
        // Unreadable folders and symlink loops are skipped, not fatal.
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(path = ?e.path(), error = %e, "skipping unreadable entry");
                continue;
            }
        };

        if entry.file_type().is_file() && is_mp3(entry.path()) {
            out.push(entry.into_path());
        }
    }

    out.sort();
    Ok(out)
}

fn is_mp3(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("mp3"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn finds_mp3s_recursively_and_sorted() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("b/nested")).unwrap();
        fs::write(dir.path().join("b/nested/z.MP3"), b"").unwrap();
        fs::write(dir.path().join("a.mp3"), b"").unwrap();
        fs::write(dir.path().join("cover.jpg"), b"").unwrap();
        fs::write(dir.path().join("notes.mp3.txt"), b"").unwrap();

        let found = scan_mp3s(dir.path()).unwrap();
        let names: Vec<_> = found
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_path_buf())
            .collect();

        assert_eq!(
            names,
            vec![PathBuf::from("a.mp3"), PathBuf::from("b/nested/z.MP3")]
        );
    }

    #[cfg(unix)]
    #[test]
    fn symlink_loop_does_not_abort_scan() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.mp3"), b"").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        std::os::unix::fs::symlink("..", dir.path().join("sub/loop")).unwrap();

        let found = scan_mp3s(dir.path()).unwrap();
        assert_eq!(found, vec![dir.path().join("a.mp3")]);
    }

    #[test]
    fn rejects_missing_folder() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(scan_mp3s(&missing), Err(ScanError::NotAFolder(_))));
    }
}
