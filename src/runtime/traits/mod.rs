// ABOUTME: Capability traits for container runtimes.
// ABOUTME: Defines ContainerOps and RuntimeInfo plus their shared types.

mod container;
mod runtime_info;
pub(crate) mod sealed;
mod shared_types;

pub use container::{ContainerError, ContainerFilters, ContainerOps, ContainerSummary};
pub use runtime_info::{RuntimeInfo, RuntimeInfoError};
pub use shared_types::*;
