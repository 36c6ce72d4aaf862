// ABOUTME: Runtime daemon address parsing.
// ABOUTME: Supports unix sockets (with or without scheme) and TCP endpoints.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Address {
    Unix(PathBuf),
    /// `host:port`, reached over plain HTTP.
    Tcp(String),
}

impl FromStr for Address {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(path) = s.strip_prefix("unix://") {
            return Ok(Address::Unix(PathBuf::from(path)));
        }

        if let Some(host) = s
            .strip_prefix("tcp://")
            .or_else(|| s.strip_prefix("http://"))
        {
            let host = host.trim_end_matches('/');
            if host.is_empty() || !host.contains(':') {
                return Err(Error::InvalidConfig(format!(
                    "address {s:?} must include host and port"
                )));
            }
            return Ok(Address::Tcp(host.to_string()));
        }

        if s.starts_with('/') {
            return Ok(Address::Unix(PathBuf::from(s)));
        }

        Err(Error::InvalidConfig(format!(
            "unsupported address {s:?} (expected unix://, tcp:// or an absolute socket path)"
        )))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Address::Unix(path) => write!(f, "unix://{}", path.display()),
            Address::Tcp(host) => write!(f, "tcp://{host}"),
        }
    }
}
