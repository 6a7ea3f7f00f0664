//! The archive-assembly pipeline: walk, resolve, synthesize, write.

pub mod launcher;
pub mod resolver;
pub mod walker;
pub mod writer;

use std::path::PathBuf;

use crate::error::Result;
use launcher::{EntryPoint, LAUNCHER_PATH};
use resolver::EntrySet;

/// One archive build. Immutable once constructed; together with the
/// contents of the package roots it fully determines the output bytes.
#[derive(Debug, Clone)]
pub struct BuildRequest {
    /// Destination archive path.
    pub output: PathBuf,
    /// Package directories, in the order they claim archive paths.
    pub package_roots: Vec<PathBuf>,
    /// Optional `module.path:callable` invoked on direct execution.
    pub entry_point: Option<String>,
    /// Deflate entries instead of storing them uncompressed.
    pub compress: bool,
}

/// Bundle the requested package roots into a single runnable archive.
///
/// Runs start-to-finish on the calling thread. Concurrent builds are safe
/// as long as they target distinct output paths; nothing here locks the
/// destination.
pub fn build(request: &BuildRequest) -> Result<()> {
    // 1. Validate the entry point before touching the filesystem.
    let entry_point = request
        .entry_point
        .as_deref()
        .map(EntryPoint::parse)
        .transpose()?;

    // 2. Synthesize the launcher; by convention it is entry 0.
    let mut entries = EntrySet::new();
    entries.insert_generated(
        LAUNCHER_PATH,
        launcher::launcher_source(entry_point.as_ref()).into_bytes(),
    );

    // 3. Walk every root in the order supplied; the first claim on an
    //    archive path wins.
    for root in &request.package_roots {
        for item in walker::walk_package(root)? {
            let (archive_path, source) = item?;
            entries.insert_file(archive_path, source)?;
        }
    }

    // 4. Serialize. An entry point makes the archive directly executable.
    writer::write_archive(
        &entries,
        &request.output,
        request.compress,
        entry_point.is_some(),
    )?;

    log::info!("wrote {} ({} entries)", request.output.display(), entries.len());
    Ok(())
}
