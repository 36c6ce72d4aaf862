// ABOUTME: Parser for `[container:]path` arguments used by copy operations.
// ABOUTME: Pure string handling; never touches the filesystem.

use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FileSpecError {
    #[error("filespec must match the canonical format: [container:]path")]
    DoesntMatchFormat,
}

/// One side of a copy: a path, optionally inside a container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CpFileSpec {
    pub container: Option<String>,
    pub path: String,
}

impl CpFileSpec {
    fn local(arg: &str) -> Self {
        Self {
            container: None,
            path: arg.to_string(),
        }
    }

    pub fn is_local(&self) -> bool {
        self.container.is_none()
    }
}

/// Parse a copy argument.
///
/// Absolute paths and dot-prefixed relative paths are always local, even if
/// they contain a colon. Otherwise the part before the first colon names the
/// container.
pub fn parse_cp_file_spec(arg: &str) -> Result<CpFileSpec, FileSpecError> {
    if arg.starts_with(':') {
        return Err(FileSpecError::DoesntMatchFormat);
    }

    // Drive-letter prefixes count as absolute only where the platform says so.
    if Path::new(arg).is_absolute() {
        return Ok(CpFileSpec::local(arg));
    }

    match arg.split_once(':') {
        Some((container, path)) if !container.starts_with('.') => Ok(CpFileSpec {
            container: Some(container.to_string()),
            path: path.to_string(),
        }),
        _ => Ok(CpFileSpec::local(arg)),
    }
}
