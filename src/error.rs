// ABOUTME: Application-wide error types for ctrctl.
// ABOUTME: Uses thiserror; messages are what users see after "Error: ".

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::filespec::FileSpecError;
use crate::runtime::{ContainerError, RuntimeError};
use crate::types::{ContainerRefError, SignalError};

#[derive(Debug, Error)]
pub enum Error {
    #[error("\"{0}\" is not a valid value for --mode")]
    InvalidMode(String),

    #[error("\"{0}\" is not a valid cgroup manager (expected cgroupfs, systemd or none)")]
    InvalidCgroupManager(String),

    #[error("\"{command}\" requires at least {min} argument(s)")]
    Arity { command: String, min: usize },

    #[error("top requires cgroup v2 for rootless containers")]
    TopRequiresCgroupV2,

    #[error("top requires cgroup manager, but cgroup manager is set to \"none\"")]
    TopRequiresCgroupManager,

    #[error(transparent)]
    InvalidReference(#[from] ContainerRefError),

    #[error(transparent)]
    InvalidSignal(#[from] SignalError),

    #[error(transparent)]
    FileSpec(#[from] FileSpecError),

    #[error("configuration file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    #[error(transparent)]
    Container(#[from] ContainerError),

    #[error("operation cancelled")]
    Cancelled,

    #[error("{}", MultipleDisplay(.0))]
    Multiple(Vec<Error>),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    /// Collapse per-reference failures: one error stays as-is, several are joined.
    pub fn from_many(mut errors: Vec<Error>) -> Option<Error> {
        match errors.len() {
            0 => None,
            1 => errors.pop(),
            _ => Some(Error::Multiple(errors)),
        }
    }

    /// Usage errors are the caller's fault (bad flag, bad argument shape).
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            Error::InvalidMode(_)
                | Error::InvalidCgroupManager(_)
                | Error::Arity { .. }
                | Error::InvalidReference(_)
                | Error::InvalidSignal(_)
                | Error::FileSpec(_)
        )
    }
}

struct MultipleDisplay<'a>(&'a [Error]);

impl fmt::Display for MultipleDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} errors:", self.0.len())?;
        for e in self.0 {
            write!(f, "\n{e}")?;
        }
        Ok(())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
