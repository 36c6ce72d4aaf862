// ABOUTME: Output mode for container inspect.
// ABOUTME: dockercompat mirrors the Docker API document; native is the runtime's own view.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InspectMode {
    #[default]
    DockerCompat,
    Native,
}

impl InspectMode {
    pub const VALUES: &'static [&'static str] = &["dockercompat", "native"];
}

impl FromStr for InspectMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dockercompat" => Ok(InspectMode::DockerCompat),
            "native" => Ok(InspectMode::Native),
            other => Err(Error::InvalidMode(other.to_string())),
        }
    }
}

impl fmt::Display for InspectMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InspectMode::DockerCompat => write!(f, "dockercompat"),
            InspectMode::Native => write!(f, "native"),
        }
    }
}
