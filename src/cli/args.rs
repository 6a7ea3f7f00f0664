//! Command line argument surface.

use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

/// Bundle Python packages into a runnable, importable zip archive.
#[derive(Parser, Debug)]
#[command(
    name = "zipbundler",
    version,
    about = "Bundle your packages into a runnable, importable zip",
    long_about = "Bundles one or more package directories into a single zip archive \
that Python can execute directly.

Each package directory is stored under its own name inside the archive, a \
__main__.py launcher is synthesized, and with --entry-point the result is a \
self-contained executable.

Usage:
  zipbundler src/mypackage -o app.pyz
  zipbundler pkg_a pkg_b -o app.pyz --compress --entry-point pkg_a.cli:main"
)]
pub struct Args {
    /// Package directories to bundle
    #[arg(value_name = "PACKAGE", required = true)]
    pub packages: Vec<PathBuf>,

    /// Path of the archive to write
    #[arg(short = 'o', long, value_name = "PATH")]
    pub output: PathBuf,

    /// Deflate-compress entries instead of storing them
    #[arg(long)]
    pub compress: bool,

    /// Invoke MODULE:CALLABLE when the archive is executed directly
    #[arg(long, value_name = "MODULE:CALLABLE")]
    pub entry_point: Option<String>,

    /// Only report warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Report every file added to the archive
    #[arg(short, long)]
    pub verbose: bool,

    /// Explicit log level (off, error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<LevelFilter>,
}

impl Args {
    /// Effective log threshold; `--log-level` overrides the verbosity flags.
    pub fn log_filter(&self) -> LevelFilter {
        if let Some(level) = self.log_level {
            level
        } else if self.quiet {
            LevelFilter::Warn
        } else if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }
}
