// ABOUTME: Validated domain types shared by option builders and the runtime delegate.
// ABOUTME: Parsing happens once at the CLI edge; everything downstream is typed.

mod cgroup_manager;
mod inspect_mode;
mod reference;
mod signal;

pub use cgroup_manager::CgroupManager;
pub use inspect_mode::InspectMode;
pub use reference::{ContainerRef, ContainerRefError};
pub use signal::{SIGNAL_NAMES, SignalError, StopSignal};
