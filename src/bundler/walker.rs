//! Read-only traversal of a single package root.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::error::{BuildError, Result};

/// Directory names that never belong in an archive.
const DENY_DIRS: &[&str] = &[".git", ".hg", ".svn", "__pycache__"];

/// File suffixes that never belong in an archive.
const DENY_SUFFIXES: &[&str] = &[".pyc", ".pyo"];

/// Walk every regular file strictly beneath `root`, yielding
/// `(archive_path, source_path)` pairs in lexicographic order.
///
/// The archive path is the root's final path segment joined with the file's
/// root-relative path, always slash-separated. Symlinks are not followed,
/// so link loops cannot occur; version-control metadata and byte-compiled
/// caches are skipped.
///
/// Fails up front with [`BuildError::NotFound`] when `root` is missing or
/// not a directory.
pub fn walk_package(
    root: &Path,
) -> Result<impl Iterator<Item = Result<(String, PathBuf)>> + use<>> {
    let root = fs::canonicalize(root).map_err(|_| BuildError::NotFound {
        path: root.to_path_buf(),
    })?;
    if !root.is_dir() {
        return Err(BuildError::NotFound { path: root });
    }
    let prefix = root
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| BuildError::NotFound { path: root.clone() })?;

    let walk = WalkDir::new(root.clone())
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(include_entry);

    Ok(walk.filter_map(move |entry| {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                return Some(Err(BuildError::Io {
                    context: format!("walking {}", root.display()),
                    source: err.into(),
                }));
            }
        };
        if !entry.file_type().is_file() {
            return None;
        }
        let name = entry.file_name().to_string_lossy();
        if DENY_SUFFIXES.iter().any(|suffix| name.ends_with(suffix)) {
            return None;
        }
        let Ok(relative) = entry.path().strip_prefix(&root) else {
            return None;
        };
        let mut archive_path = prefix.clone();
        for component in relative.components() {
            archive_path.push('/');
            archive_path.push_str(&component.as_os_str().to_string_lossy());
        }
        Some(Ok((archive_path, entry.into_path())))
    }))
}

fn include_entry(entry: &DirEntry) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return true;
    }
    !DENY_DIRS.contains(&entry.file_name().to_str().unwrap_or(""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn archive_paths_are_prefixed_and_slash_separated() {
        let tmp = TempDir::new().unwrap();
        let pkg = tmp.path().join("pkg");
        fs::create_dir_all(pkg.join("sub")).unwrap();
        fs::write(pkg.join("__init__.py"), "").unwrap();
        fs::write(pkg.join("sub").join("mod.py"), "x = 1\n").unwrap();

        let paths: Vec<String> = walk_package(&pkg)
            .unwrap()
            .map(|item| item.unwrap().0)
            .collect();
        assert_eq!(paths, ["pkg/__init__.py", "pkg/sub/mod.py"]);
    }

    #[test]
    fn caches_and_vcs_metadata_are_skipped() {
        let tmp = TempDir::new().unwrap();
        let pkg = tmp.path().join("pkg");
        fs::create_dir_all(pkg.join("__pycache__")).unwrap();
        fs::create_dir_all(pkg.join(".git")).unwrap();
        fs::write(pkg.join("__pycache__").join("mod.cpython-312.pyc"), "x").unwrap();
        fs::write(pkg.join(".git").join("HEAD"), "ref").unwrap();
        fs::write(pkg.join("mod.pyc"), "x").unwrap();
        fs::write(pkg.join("mod.py"), "x = 1\n").unwrap();

        let paths: Vec<String> = walk_package(&pkg)
            .unwrap()
            .map(|item| item.unwrap().0)
            .collect();
        assert_eq!(paths, ["pkg/mod.py"]);
    }

    #[test]
    fn missing_root_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let err = walk_package(&tmp.path().join("nope")).err().unwrap();
        assert!(matches!(err, BuildError::NotFound { .. }));
    }

    #[test]
    fn file_root_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("file.py");
        fs::write(&file, "").unwrap();
        let err = walk_package(&file).err().unwrap();
        assert!(matches!(err, BuildError::NotFound { .. }));
    }
}
