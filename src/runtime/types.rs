// ABOUTME: Runtime endpoint definitions for Docker and Podman.
// ABOUTME: Includes RuntimeType enum and the resolved Endpoint.

use serde::{Deserialize, Serialize};

use crate::config::Address;

/// The container runtime type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeType {
    Docker,
    Podman,
}

impl RuntimeType {
    /// Best guess from a socket address; Podman sockets carry its name.
    pub fn guess(address: &Address) -> Self {
        if address.to_string().contains("podman") {
            RuntimeType::Podman
        } else {
            RuntimeType::Docker
        }
    }
}

impl std::fmt::Display for RuntimeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuntimeType::Docker => write!(f, "docker"),
            RuntimeType::Podman => write!(f, "podman"),
        }
    }
}

/// Where and what the runtime daemon is.
#[derive(Debug, Clone)]
pub struct Endpoint {
    pub runtime_type: RuntimeType,
    pub address: Address,
}
