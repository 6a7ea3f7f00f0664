//! Command line interface for zipbundler.

mod args;

pub use args::Args;

use crate::bundler::{self, BuildRequest};

/// Execute the build described by parsed arguments, returning the process
/// exit code.
pub fn run(args: Args) -> i32 {
    let request = BuildRequest {
        output: args.output,
        package_roots: args.packages,
        entry_point: args.entry_point,
        compress: args.compress,
    };

    match bundler::build(&request) {
        Ok(()) => 0,
        Err(err) => {
            log::error!("{err}");
            err.exit_code()
        }
    }
}
