//! The merged, collision-checked set of entries destined for one archive.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{BuildError, Result};

/// Where an entry's bytes come from.
#[derive(Debug)]
pub enum EntrySource {
    /// A regular file copied from disk.
    File(PathBuf),
    /// Synthesized content, owned by the build itself.
    Generated(Vec<u8>),
}

/// One file inside the output archive.
///
/// The archive path is relative, slash-separated, and unique within a build.
#[derive(Debug)]
pub struct ArchiveEntry {
    pub archive_path: String,
    pub source: EntrySource,
    pub executable: bool,
}

/// Ordered, collision-checked collection of [`ArchiveEntry`] values.
///
/// Insertion order is preserved; the writer serializes entries exactly in
/// this order.
#[derive(Debug, Default)]
pub struct EntrySet {
    entries: Vec<ArchiveEntry>,
    index: HashMap<String, usize>,
}

impl EntrySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ArchiveEntry> {
        self.entries.iter()
    }

    /// Add a synthesized entry. The caller guarantees the path is reserved;
    /// file entries are always prefixed with their root's name, so a bare
    /// top-level path cannot clash with them.
    pub fn insert_generated(&mut self, archive_path: &str, content: Vec<u8>) {
        debug_assert!(!self.index.contains_key(archive_path));
        self.index
            .insert(archive_path.to_string(), self.entries.len());
        self.entries.push(ArchiveEntry {
            archive_path: archive_path.to_string(),
            source: EntrySource::Generated(content),
            executable: false,
        });
    }

    /// Claim `archive_path` for `source`. The first claim wins; a later
    /// claim backed by the same underlying file is dropped silently, while
    /// a different file under an already-claimed path is a collision.
    pub fn insert_file(&mut self, archive_path: String, source: PathBuf) -> Result<()> {
        if let Some(&at) = self.index.get(&archive_path) {
            let first = match &self.entries[at].source {
                EntrySource::File(path) if same_source(path, &source) => {
                    log::debug!("skipping {archive_path}: duplicate of {}", path.display());
                    return Ok(());
                }
                EntrySource::File(path) => path.clone(),
                // File entries are always prefixed with their root's name,
                // so only a synthesized bare-path entry such as the
                // launcher can already sit here. Guard it anyway so a
                // claim on a reserved path surfaces as a collision with a
                // recognizable label instead of a bogus source file.
                EntrySource::Generated(_) => PathBuf::from(format!("<generated {archive_path}>")),
            };
            log::warn!(
                "collision at {archive_path}: {} vs {}",
                first.display(),
                source.display()
            );
            return Err(BuildError::Collision {
                archive_path,
                first,
                second: source,
            });
        }

        log::debug!("adding {archive_path}");
        let executable = is_executable(&source);
        self.index.insert(archive_path.clone(), self.entries.len());
        self.entries.push(ArchiveEntry {
            archive_path,
            source: EntrySource::File(source),
            executable,
        });
        Ok(())
    }
}

/// Two paths name the same source when they resolve to the same file.
fn same_source(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    fs::metadata(path)
        .map(|meta| meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(_path: &Path) -> bool {
    false
}
