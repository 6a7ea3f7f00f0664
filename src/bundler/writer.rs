//! Serialization of an [`EntrySet`] into the output zip container.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use zip::write::{SimpleFileOptions, ZipWriter};
use zip::{CompressionMethod, DateTime};

use crate::bundler::resolver::{EntrySet, EntrySource};
use crate::error::{BuildError, Result};

/// Interpreter directive honored by the OS loader and ignored by zip readers.
const SHEBANG: &[u8] = b"#!/usr/bin/env python3\n";

/// Write `entries` as a zip archive at `output`, replacing any existing
/// file there.
///
/// Entries are serialized in set order, all with the same compression
/// method (`Stored`, or `Deflated` when `compress` is set) and a fixed
/// epoch timestamp so identical requests produce identical bytes. When
/// `executable` is set the container is prefixed with an interpreter line
/// and the file's executable bit is raised, best-effort.
///
/// The archive is staged in a temporary file beside the destination and
/// renamed into place only after a complete, successful write; a failed
/// build never leaves a truncated file at `output`.
pub fn write_archive(
    entries: &EntrySet,
    output: &Path,
    compress: bool,
    executable: bool,
) -> Result<()> {
    let parent = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    if !parent.is_dir() {
        return Err(BuildError::NotFound {
            path: parent.to_path_buf(),
        });
    }

    let mut staged = tempfile::Builder::new()
        .prefix(".zipbundler-")
        .suffix(".part")
        .tempfile_in(parent)
        .map_err(|err| BuildError::io("staging archive", parent, err))?;

    write_entries(staged.as_file_mut(), entries, compress, executable, output)?;

    #[cfg(unix)]
    if executable {
        use std::os::unix::fs::PermissionsExt;
        let _ = staged
            .as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o755));
    }

    staged
        .persist(output)
        .map_err(|err| BuildError::io("replacing archive", output, err.error))?;
    Ok(())
}

fn write_entries(
    file: &mut File,
    entries: &EntrySet,
    compress: bool,
    executable: bool,
    output: &Path,
) -> Result<()> {
    if executable {
        file.write_all(SHEBANG)
            .map_err(|err| BuildError::io("writing interpreter line", output, err))?;
    }

    let method = if compress {
        CompressionMethod::Deflated
    } else {
        CompressionMethod::Stored
    };

    let mut zip = ZipWriter::new(file);
    for entry in entries.iter() {
        let mode = if entry.executable { 0o755 } else { 0o644 };
        let options = SimpleFileOptions::default()
            .compression_method(method)
            .last_modified_time(DateTime::default())
            .unix_permissions(mode);
        zip.start_file(entry.archive_path.as_str(), options)
            .map_err(|err| zip_failure(&entry.archive_path, err))?;
        match &entry.source {
            EntrySource::File(path) => {
                let mut source = File::open(path)
                    .map_err(|err| BuildError::io("reading source file", path, err))?;
                io::copy(&mut source, &mut zip)
                    .map_err(|err| BuildError::io("copying into archive", path, err))?;
            }
            EntrySource::Generated(bytes) => {
                zip.write_all(bytes)
                    .map_err(|err| BuildError::io("writing generated entry", output, err))?;
            }
        }
    }
    zip.finish().map_err(|err| zip_failure("central directory", err))?;
    Ok(())
}

fn zip_failure(what: &str, err: zip::result::ZipError) -> BuildError {
    match err {
        zip::result::ZipError::Io(source) => BuildError::Io {
            context: format!("writing {what}"),
            source,
        },
        other => BuildError::Io {
            context: format!("writing {what}"),
            source: io::Error::other(other),
        },
    }
}
