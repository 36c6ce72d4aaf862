// ABOUTME: Container reference validation (ID, ID prefix, or name).
// ABOUTME: Rejects values the runtime API could never resolve.

use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContainerRefError {
    #[error("container reference cannot be empty")]
    Empty,

    #[error("invalid container reference {0:?}: contains whitespace")]
    Whitespace(String),

    #[error("invalid container reference {0:?}: contains '/'")]
    Slash(String),
}

/// A container ID, unique ID prefix, or container name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContainerRef(String);

impl ContainerRef {
    pub fn new(value: &str) -> Result<Self, ContainerRefError> {
        // Docker reports names with a leading slash; accept that form.
        let value = value.strip_prefix('/').unwrap_or(value);

        if value.is_empty() {
            return Err(ContainerRefError::Empty);
        }

        if value.chars().any(char::is_whitespace) {
            return Err(ContainerRefError::Whitespace(value.to_string()));
        }

        if value.contains('/') {
            return Err(ContainerRefError::Slash(value.to_string()));
        }

        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContainerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
