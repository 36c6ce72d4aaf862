// ABOUTME: Runtime socket detection on the local host.
// ABOUTME: Checks Podman sockets first, then Docker, unless an address is configured.

use super::types::{Endpoint, RuntimeType};
use crate::config::Address;
use std::path::{Path, PathBuf};

/// Error during runtime detection.
#[derive(Debug, thiserror::Error)]
pub enum DetectionError {
    #[error("no container runtime found (checked Podman and Docker sockets)")]
    NoRuntimeFound,
}

const ROOTFUL_PODMAN: &str = "/run/podman/podman.sock";
const DOCKER_SOCKET: &str = "/var/run/docker.sock";

/// Resolve the runtime endpoint.
///
/// An explicit address always wins. Otherwise the detection order is:
/// 1. Rootless Podman socket (`$XDG_RUNTIME_DIR/podman/podman.sock`)
/// 2. Rootful Podman socket (`/run/podman/podman.sock`)
/// 3. Docker socket (`/var/run/docker.sock`)
pub fn detect_runtime(address: Option<&Address>) -> Result<Endpoint, DetectionError> {
    if let Some(address) = address {
        return Ok(Endpoint {
            runtime_type: RuntimeType::guess(address),
            address: address.clone(),
        });
    }

    detect_local()
}

/// Detect a runtime socket on the local system.
pub fn detect_local() -> Result<Endpoint, DetectionError> {
    candidates()
        .into_iter()
        .find(|(_, path)| path.exists())
        .map(|(runtime_type, path)| Endpoint {
            runtime_type,
            address: Address::Unix(path),
        })
        .ok_or(DetectionError::NoRuntimeFound)
}

fn candidates() -> Vec<(RuntimeType, PathBuf)> {
    let mut out = Vec::with_capacity(3);
    if let Some(dir) = std::env::var_os("XDG_RUNTIME_DIR") {
        out.push((
            RuntimeType::Podman,
            Path::new(&dir).join("podman").join("podman.sock"),
        ));
    }
    out.push((RuntimeType::Podman, PathBuf::from(ROOTFUL_PODMAN)));
    out.push((RuntimeType::Docker, PathBuf::from(DOCKER_SOCKET)));
    out
}
