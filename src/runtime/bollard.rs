// ABOUTME: Bollard-based container runtime implementation.
// ABOUTME: Supports both Docker and Podman via the Docker-compatible API.

use crate::config::Address;
use crate::runtime::traits::sealed::Sealed;
use crate::runtime::traits::{
    ContainerDetails, ContainerError, ContainerFilters, ContainerOps, ContainerState,
    ContainerSummary, NativeContainer, NetworkInfo, ProcessList, RuntimeInfo, RuntimeInfoError,
    RuntimeMetadata, StopRequest,
};
use crate::runtime::types::{Endpoint, RuntimeType};
use crate::types::ContainerRef;
use async_trait::async_trait;
use bollard::Docker;
use bollard::models::{ContainerInspectResponse, ContainerStateStatusEnum};
use bollard::query_parameters::{
    InspectContainerOptions, ListContainersOptions, StopContainerOptions, TopOptions,
};
use std::collections::HashMap;

const CLIENT_TIMEOUT_SECS: u64 = 120;

// =============================================================================
// Error Mapping Helpers
// =============================================================================

fn map_container_not_found_error(
    e: bollard::errors::Error,
    reference: &ContainerRef,
) -> ContainerError {
    match &e {
        bollard::errors::Error::DockerResponseServerError { status_code, .. }
            if *status_code == 404 =>
        {
            ContainerError::NotFound(reference.to_string())
        }
        _ => ContainerError::Runtime(e.to_string()),
    }
}

fn is_not_modified(e: &bollard::errors::Error) -> bool {
    matches!(
        e,
        bollard::errors::Error::DockerResponseServerError { status_code, .. } if *status_code == 304
    )
}

fn map_container_top_error(e: bollard::errors::Error, reference: &ContainerRef) -> ContainerError {
    match &e {
        bollard::errors::Error::DockerResponseServerError {
            status_code,
            message,
        } if *status_code == 409 => ContainerError::Conflict(message.clone()),
        _ => map_container_not_found_error(e, reference),
    }
}

fn map_state(status: ContainerStateStatusEnum) -> ContainerState {
    match status {
        ContainerStateStatusEnum::CREATED => ContainerState::Created,
        ContainerStateStatusEnum::RUNNING => ContainerState::Running,
        ContainerStateStatusEnum::PAUSED => ContainerState::Paused,
        ContainerStateStatusEnum::RESTARTING => ContainerState::Restarting,
        ContainerStateStatusEnum::REMOVING => ContainerState::Removing,
        ContainerStateStatusEnum::EXITED => ContainerState::Exited,
        ContainerStateStatusEnum::DEAD => ContainerState::Dead,
        _ => ContainerState::Exited,
    }
}

fn native_view(details: &ContainerInspectResponse) -> NativeContainer {
    let state = details.state.as_ref();

    let mut networks = HashMap::new();
    if let Some(nets) = details
        .network_settings
        .as_ref()
        .and_then(|s| s.networks.as_ref())
    {
        for (name, endpoint) in nets {
            networks.insert(
                name.clone(),
                NetworkInfo {
                    network_id: endpoint.network_id.clone().unwrap_or_default(),
                    ip_address: endpoint.ip_address.clone().unwrap_or_default(),
                    gateway: endpoint.gateway.clone().unwrap_or_default(),
                    mac_address: endpoint.mac_address.clone().unwrap_or_default(),
                },
            );
        }
    }

    NativeContainer {
        id: details.id.clone().unwrap_or_default(),
        name: details
            .name
            .as_deref()
            .unwrap_or_default()
            .trim_start_matches('/')
            .to_string(),
        image: details
            .config
            .as_ref()
            .and_then(|c| c.image.clone())
            .unwrap_or_default(),
        state: state
            .and_then(|s| s.status)
            .map(map_state)
            .unwrap_or(ContainerState::Exited),
        pid: state.and_then(|s| s.pid).filter(|pid| *pid > 0),
        created: details
            .created
            .as_ref()
            .map(|dt| dt.to_string())
            .unwrap_or_default(),
        restart_count: details.restart_count.unwrap_or(0),
        labels: details
            .config
            .as_ref()
            .and_then(|c| c.labels.clone())
            .unwrap_or_default(),
        networks,
        size_rw: details.size_rw,
        size_root_fs: details.size_root_fs,
    }
}

// =============================================================================
// BollardRuntime
// =============================================================================

/// Container runtime implementation using bollard.
pub struct BollardRuntime {
    client: Docker,
    runtime_type: RuntimeType,
}

impl BollardRuntime {
    /// Create a new BollardRuntime from a Docker client.
    pub fn new(client: Docker, runtime_type: RuntimeType) -> Self {
        Self {
            client,
            runtime_type,
        }
    }

    /// Connect to the runtime at a resolved endpoint.
    ///
    /// Connecting is lazy in bollard; call `ping()` to verify the daemon answers.
    pub fn connect(endpoint: &Endpoint) -> Result<Self, RuntimeInfoError> {
        let client = match &endpoint.address {
            Address::Unix(path) => Docker::connect_with_unix(
                &path.to_string_lossy(),
                CLIENT_TIMEOUT_SECS,
                bollard::API_DEFAULT_VERSION,
            ),
            Address::Tcp(host) => Docker::connect_with_http(
                &format!("http://{host}"),
                CLIENT_TIMEOUT_SECS,
                bollard::API_DEFAULT_VERSION,
            ),
        }
        .map_err(|e| RuntimeInfoError::ConnectionFailed(e.to_string()))?;

        Ok(Self::new(client, endpoint.runtime_type))
    }
}

impl Sealed for BollardRuntime {}

#[async_trait]
impl RuntimeInfo for BollardRuntime {
    async fn info(&self) -> Result<RuntimeMetadata, RuntimeInfoError> {
        let info = self
            .client
            .info()
            .await
            .map_err(|e| RuntimeInfoError::ConnectionFailed(e.to_string()))?;

        let name = match self.runtime_type {
            RuntimeType::Docker => "Docker".to_string(),
            RuntimeType::Podman => "Podman".to_string(),
        };

        Ok(RuntimeMetadata {
            name,
            version: info.server_version.unwrap_or_default(),
            api_version: bollard::API_DEFAULT_VERSION.to_string(),
            os: info.operating_system.unwrap_or_default(),
            arch: info.architecture.unwrap_or_default(),
            cgroup_version: info.cgroup_version.map(|v| v.to_string()),
        })
    }

    async fn ping(&self) -> Result<(), RuntimeInfoError> {
        self.client
            .ping()
            .await
            .map_err(|e| RuntimeInfoError::ConnectionFailed(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl ContainerOps for BollardRuntime {
    async fn inspect_container(
        &self,
        reference: &ContainerRef,
        size: bool,
    ) -> Result<ContainerDetails, ContainerError> {
        let details = self
            .client
            .inspect_container(reference.as_str(), Some(InspectContainerOptions { size }))
            .await
            .map_err(|e| map_container_not_found_error(e, reference))?;

        let native = native_view(&details);
        let document = serde_json::to_value(&details)
            .map_err(|e| ContainerError::Runtime(format!("encoding inspect result: {e}")))?;

        Ok(ContainerDetails { document, native })
    }

    async fn stop_container(
        &self,
        reference: &ContainerRef,
        request: &StopRequest,
    ) -> Result<(), ContainerError> {
        let opts = StopContainerOptions {
            t: request.timeout.map(|d| d.as_secs().min(i32::MAX as u64) as i32),
            signal: request.signal.as_ref().map(|s| s.as_api_value()),
        };

        tracing::debug!(
            container = %reference,
            timeout = ?opts.t,
            signal = ?opts.signal,
            "stopping container"
        );

        match self
            .client
            .stop_container(reference.as_str(), Some(opts))
            .await
        {
            Ok(()) => Ok(()),
            Err(e) if is_not_modified(&e) => {
                tracing::debug!(container = %reference, "container already stopped");
                Ok(())
            }
            Err(e) => Err(map_container_not_found_error(e, reference)),
        }
    }

    async fn top(
        &self,
        reference: &ContainerRef,
        ps_args: &str,
    ) -> Result<ProcessList, ContainerError> {
        let opts = if ps_args.is_empty() {
            None::<TopOptions>
        } else {
            Some(TopOptions {
                ps_args: ps_args.to_string(),
            })
        };

        let response = self
            .client
            .top_processes(reference.as_str(), opts)
            .await
            .map_err(|e| map_container_top_error(e, reference))?;

        Ok(ProcessList {
            titles: response.titles.unwrap_or_default(),
            processes: response.processes.unwrap_or_default(),
        })
    }

    async fn list_containers(
        &self,
        filters: &ContainerFilters,
    ) -> Result<Vec<ContainerSummary>, ContainerError> {
        let opts = ListContainersOptions {
            all: filters.all,
            ..Default::default()
        };

        let containers = self
            .client
            .list_containers(Some(opts))
            .await
            .map_err(|e| ContainerError::Runtime(e.to_string()))?;

        Ok(containers
            .into_iter()
            .map(|c| ContainerSummary {
                id: c.id.unwrap_or_default(),
                name: c
                    .names
                    .unwrap_or_default()
                    .first()
                    .map(|n| n.trim_start_matches('/').to_string())
                    .unwrap_or_default(),
                state: c
                    .state
                    .map(|s| format!("{:?}", s).to_lowercase())
                    .unwrap_or_default(),
            })
            .collect())
    }
}
