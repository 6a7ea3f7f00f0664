//! Bundle Python package trees into a single runnable zip archive.
//!
//! The crate walks one or more package roots, merges their files into a
//! collision-checked entry set, synthesizes a `__main__.py` launcher, and
//! serializes everything as a zip container the Python interpreter can
//! execute directly.
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod bundler;
pub mod cli;
pub mod error;

// Re-export commonly used types
pub use bundler::{BuildRequest, build};
pub use error::{BuildError, Result};
