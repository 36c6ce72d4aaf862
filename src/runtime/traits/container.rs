// ABOUTME: Container operations trait for container runtimes.
// ABOUTME: Inspect, stop, top, and list containers by reference.

use super::sealed::Sealed;
use super::shared_types::{ContainerDetails, ProcessList, StopRequest};
use crate::types::ContainerRef;
use async_trait::async_trait;

/// Container operations consumed by the lifecycle subcommands.
#[async_trait]
pub trait ContainerOps: Sealed + Send + Sync {
    /// Get detailed information about a container.
    async fn inspect_container(
        &self,
        reference: &ContainerRef,
        size: bool,
    ) -> Result<ContainerDetails, ContainerError>;

    /// Stop a container. Stopping one that is already stopped succeeds.
    async fn stop_container(
        &self,
        reference: &ContainerRef,
        request: &StopRequest,
    ) -> Result<(), ContainerError>;

    /// List processes running in a container. `ps_args` is passed to `ps`
    /// verbatim; empty means the runtime's default.
    async fn top(&self, reference: &ContainerRef, ps_args: &str)
    -> Result<ProcessList, ContainerError>;

    /// List containers matching the given filters.
    async fn list_containers(
        &self,
        filters: &ContainerFilters,
    ) -> Result<Vec<ContainerSummary>, ContainerError>;
}

/// Filters for listing containers.
#[derive(Debug, Clone, Default)]
pub struct ContainerFilters {
    /// Include stopped containers.
    pub all: bool,
}

/// Summary information about a container.
#[derive(Debug, Clone)]
pub struct ContainerSummary {
    pub id: String,
    pub name: String,
    pub state: String,
}

/// Errors from container operations.
#[derive(Debug, thiserror::Error)]
pub enum ContainerError {
    #[error("no such container: {0}")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("runtime error: {0}")]
    Runtime(String),
}
