use std::path::{Path, PathBuf};
use tracing::{debug, error};
use walkdir::WalkDir;

/// Files at or above this size are never scanned.
pub const MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// Enumerate every regular file under `root` smaller than `max_file_size`.
///
/// Symlinks are not followed and never yielded; directories, devices, fifos
/// and sockets are skipped. Entries that cannot be read are logged and
/// skipped so one bad subdirectory does not abort the walk. The list is fully
/// materialized so the caller knows the total before dispatching work.
pub fn walk(root: &Path, max_file_size: u64) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for entry_result in WalkDir::new(root).follow_links(false) {
        let entry = match entry_result {
            Ok(entry) => entry,
            Err(err) => {
                let path = err
                    .path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| root.display().to_string());
                error!("Error reading entry under {}: {}", path, err);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let metadata = match entry.metadata() {
            Ok(metadata) => metadata,
            Err(err) => {
                error!(
                    "Error getting metadata for {}: {}",
                    entry.path().display(),
                    err
                );
                continue;
            }
        };

        if metadata.len() >= max_file_size {
            debug!(
                "Skipping {} ({} bytes, limit {})",
                entry.path().display(),
                metadata.len(),
                max_file_size
            );
            continue;
        }

        files.push(entry.into_path());
    }

    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn sorted_names(files: &[PathBuf], root: &Path) -> Vec<String> {
        let mut names: Vec<String> = files
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_walk_recurses_into_subdirectories() {
        let tmp = tempdir().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("a/b/c")).unwrap();
        fs::write(root.join("top.txt"), "x").unwrap();
        fs::write(root.join("a/one.txt"), "x").unwrap();
        fs::write(root.join("a/b/c/deep.txt"), "x").unwrap();

        let files = walk(root, MAX_FILE_SIZE);
        assert_eq!(
            sorted_names(&files, root),
            vec!["a/b/c/deep.txt", "a/one.txt", "top.txt"]
        );
    }

    #[test]
    fn test_walk_includes_empty_files() {
        let tmp = tempdir().unwrap();
        fs::write(tmp.path().join("empty.txt"), "").unwrap();
        assert_eq!(walk(tmp.path(), MAX_FILE_SIZE).len(), 1);
    }

    #[test]
    fn test_walk_excludes_files_at_or_above_limit() {
        let tmp = tempdir().unwrap();
        let root = tmp.path();
        fs::write(root.join("small.txt"), vec![b'a'; 9]).unwrap();
        fs::write(root.join("exact.txt"), vec![b'a'; 10]).unwrap();
        fs::write(root.join("big.txt"), vec![b'a'; 11]).unwrap();

        let files = walk(root, 10);
        assert_eq!(sorted_names(&files, root), vec!["small.txt"]);
    }

    #[test]
    fn test_walk_default_limit_is_fifty_mib() {
        let tmp = tempdir().unwrap();
        let root = tmp.path();
        // Sparse files, so this stays cheap on disk.
        fs::File::create(root.join("under.bin"))
            .unwrap()
            .set_len(MAX_FILE_SIZE - 1)
            .unwrap();
        fs::File::create(root.join("at.bin"))
            .unwrap()
            .set_len(MAX_FILE_SIZE)
            .unwrap();

        let files = walk(root, MAX_FILE_SIZE);
        assert_eq!(sorted_names(&files, root), vec!["under.bin"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_walk_skips_symlinks() {
        let tmp = tempdir().unwrap();
        let root = tmp.path();
        fs::write(root.join("real.txt"), "x").unwrap();
        fs::create_dir(root.join("dir")).unwrap();
        std::os::unix::fs::symlink(root.join("real.txt"), root.join("link.txt")).unwrap();
        std::os::unix::fs::symlink(root.join("dir"), root.join("dir_link")).unwrap();

        let files = walk(root, MAX_FILE_SIZE);
        assert_eq!(sorted_names(&files, root), vec!["real.txt"]);
    }

    #[test]
    fn test_walk_missing_root_is_empty() {
        let tmp = tempdir().unwrap();
        assert!(walk(&tmp.path().join("missing"), MAX_FILE_SIZE).is_empty());
    }
}
