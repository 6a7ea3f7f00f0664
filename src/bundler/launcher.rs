//! Synthesis of the launcher module the Python runtime auto-invokes.

use crate::error::{BuildError, Result};

/// Archive path the runtime executes when the archive is run directly.
pub const LAUNCHER_PATH: &str = "__main__.py";

/// A validated `module.path:callable` entry-point specifier.
///
/// Parsed strictly up front so a typo surfaces at build time, not when
/// someone eventually runs the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryPoint {
    module: String,
    callable: String,
}

impl EntryPoint {
    /// Parse `module.path:callable`: exactly one `:` separating a non-empty
    /// dotted module path from a non-empty identifier.
    pub fn parse(given: &str) -> Result<Self> {
        let invalid = |reason: &str| BuildError::InvalidEntryPoint {
            given: given.to_string(),
            reason: reason.to_string(),
        };

        let Some((module, callable)) = given.split_once(':') else {
            return Err(invalid("expected MODULE:CALLABLE"));
        };
        if callable.contains(':') {
            return Err(invalid("more than one ':' separator"));
        }
        if module.is_empty() {
            return Err(invalid("module path is empty"));
        }
        if callable.is_empty() {
            return Err(invalid("callable name is empty"));
        }
        if !module.split('.').all(is_identifier) {
            return Err(invalid("module path is not a dotted identifier path"));
        }
        if !is_identifier(callable) {
            return Err(invalid("callable name is not an identifier"));
        }

        Ok(Self {
            module: module.to_string(),
            callable: callable.to_string(),
        })
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn callable(&self) -> &str {
        &self.callable
    }
}

fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if first == '_' || first.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}

/// Generate the launcher's source text.
///
/// With an entry point the launcher imports the module and calls the
/// callable with no arguments, letting any exception propagate. Without
/// one it only marks the bundle as importable.
pub fn launcher_source(entry_point: Option<&EntryPoint>) -> String {
    match entry_point {
        Some(entry_point) => format!(
            "# -*- coding: utf-8 -*-\nimport {module}\n{module}.{callable}()\n",
            module = entry_point.module(),
            callable = entry_point.callable(),
        ),
        None => concat!(
            "# -*- coding: utf-8 -*-\n",
            "# No entry point was configured; this archive only makes its\n",
            "# packages importable.\n",
        )
        .to_string(),
    }
}
