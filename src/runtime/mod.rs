// ABOUTME: Container runtime delegate: capability traits and the bollard client.
// ABOUTME: Detects the local Docker/Podman socket or uses the configured address.

mod bollard;
mod detection;
mod error;
pub mod traits;
mod types;

pub use self::bollard::BollardRuntime;
pub use detection::{DetectionError, detect_local, detect_runtime};
pub use error::RuntimeError;
pub use traits::{
    ContainerDetails, ContainerError, ContainerFilters, ContainerOps, ContainerState,
    ContainerSummary, NativeContainer, NetworkInfo, ProcessList, RuntimeInfo, RuntimeInfoError,
    RuntimeMetadata, StopRequest,
};
pub use types::{Endpoint, RuntimeType};
