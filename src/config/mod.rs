// ABOUTME: Global options snapshot shared by every subcommand.
// ABOUTME: Merges flags/env, the ctrctl.yml config file, and host-derived defaults.

mod address;
mod file;

pub use address::Address;
pub use file::{CONFIG_FILENAME, ConfigFile, default_config_path};

use std::path::PathBuf;

use crate::error::Result;
use crate::host::{CgroupVersion, HostInfo};
use crate::types::CgroupManager;

pub const DEFAULT_NAMESPACE: &str = "default";
const SYSTEM_DATA_ROOT: &str = "/var/lib/ctrctl";

/// Values supplied on the command line or through `CTRCTL_*` variables.
#[derive(Debug, Clone, Default)]
pub struct GlobalOverrides {
    pub config: Option<PathBuf>,
    pub namespace: Option<String>,
    pub address: Option<String>,
    pub cgroup_manager: Option<String>,
    pub data_root: Option<PathBuf>,
    pub debug: bool,
}

/// Resolved global options, read by every option builder.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    pub namespace: String,
    /// `None` means "detect the local runtime socket at connect time".
    pub address: Option<Address>,
    pub cgroup_manager: CgroupManager,
    pub data_root: PathBuf,
    pub rootless: bool,
    pub debug: bool,
}

impl GlobalOptions {
    /// Merge overrides over the config file over host defaults.
    pub fn resolve(overrides: &GlobalOverrides, host: &HostInfo) -> Result<Self> {
        let rootless = host.is_rootless();
        let file = ConfigFile::discover(overrides.config.as_deref(), rootless)?;
        Self::merge(overrides, file, host)
    }

    fn merge(overrides: &GlobalOverrides, file: ConfigFile, host: &HostInfo) -> Result<Self> {
        let rootless = host.is_rootless();

        let namespace = overrides
            .namespace
            .clone()
            .or(file.namespace)
            .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string());

        let address = match overrides.address.as_deref().or(file.address.as_deref()) {
            Some(raw) => Some(raw.parse::<Address>()?),
            None => None,
        };

        let cgroup_manager = match overrides.cgroup_manager.as_deref() {
            Some(raw) => raw.parse()?,
            None => file
                .cgroup_manager
                .unwrap_or_else(|| default_cgroup_manager(host)),
        };

        let data_root = overrides
            .data_root
            .clone()
            .or(file.data_root)
            .unwrap_or_else(|| default_data_root(rootless));

        Ok(Self {
            namespace,
            address,
            cgroup_manager,
            data_root,
            rootless,
            debug: overrides.debug || file.debug.unwrap_or(false),
        })
    }
}

impl Default for GlobalOptions {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            address: None,
            cgroup_manager: CgroupManager::Cgroupfs,
            data_root: PathBuf::from(SYSTEM_DATA_ROOT),
            rootless: false,
            debug: false,
        }
    }
}

fn default_cgroup_manager(host: &HostInfo) -> CgroupManager {
    match host.cgroup_version {
        CgroupVersion::V2 => CgroupManager::Systemd,
        CgroupVersion::V1 | CgroupVersion::Unavailable => CgroupManager::Cgroupfs,
    }
}

fn default_data_root(rootless: bool) -> PathBuf {
    if !rootless {
        return PathBuf::from(SYSTEM_DATA_ROOT);
    }

    std::env::var_os("XDG_DATA_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".local/share")))
        .map(|base| base.join("ctrctl"))
        .unwrap_or_else(|| PathBuf::from(SYSTEM_DATA_ROOT))
}
