// ABOUTME: Shared types used across runtime trait definitions.
// ABOUTME: StopRequest, ContainerDetails, NativeContainer, ProcessList, ContainerState.

use crate::types::StopSignal;
use serde::Serialize;
use std::collections::HashMap;
use std::time::Duration;

/// Parameters forwarded to the runtime when stopping a container.
///
/// `None` fields are left out of the request so the runtime applies its own
/// defaults (and any per-container stop timeout or stop signal).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopRequest {
    pub timeout: Option<Duration>,
    pub signal: Option<StopSignal>,
}

/// Everything inspect can report about one container.
#[derive(Debug, Clone)]
pub struct ContainerDetails {
    /// The Docker-compatible inspect document, as returned by the API.
    pub document: serde_json::Value,
    /// Normalised view independent of the API dialect.
    pub native: NativeContainer,
}

/// Runtime-native container view rendered by `inspect --mode=native`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct NativeContainer {
    pub id: String,
    pub name: String,
    pub image: String,
    pub state: ContainerState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pid: Option<i64>,
    pub created: String,
    pub restart_count: i64,
    pub labels: HashMap<String, String>,
    pub networks: HashMap<String, NetworkInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_rw: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_root_fs: Option<i64>,
}

/// Container lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerState {
    Created,
    Running,
    Paused,
    Restarting,
    Removing,
    Exited,
    Dead,
}

/// Network attachment of a container.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct NetworkInfo {
    pub network_id: String,
    pub ip_address: String,
    pub gateway: String,
    pub mac_address: String,
}

/// Output of `ps` run inside a container's PID namespace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessList {
    pub titles: Vec<String>,
    pub processes: Vec<Vec<String>>,
}

/// Runtime version information.
#[derive(Debug, Clone)]
pub struct RuntimeMetadata {
    pub name: String,
    pub version: String,
    pub api_version: String,
    pub os: String,
    pub arch: String,
    pub cgroup_version: Option<String>,
}
