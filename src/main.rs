//! zipbundler - bundle Python packages into a runnable, importable zip.

use std::process;

use clap::Parser;
use zipbundler::cli::{self, Args};

fn main() {
    let args = Args::parse();

    // The CLI owns verbosity policy; the core only emits against it.
    env_logger::Builder::new()
        .filter_level(args.log_filter())
        .format_timestamp(None)
        .format_target(false)
        .init();

    process::exit(cli::run(args));
}
