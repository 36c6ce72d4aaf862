// ABOUTME: On-disk ctrctl.yml configuration file.
// ABOUTME: Locates the default file for rootful/rootless hosts and parses it.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::types::CgroupManager;

pub const CONFIG_FILENAME: &str = "ctrctl.yml";
const SYSTEM_CONFIG_DIR: &str = "/etc/ctrctl";

/// Values a config file may set. Every field is optional; flags and
/// environment variables take precedence.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub namespace: Option<String>,

    #[serde(default)]
    pub address: Option<String>,

    #[serde(default)]
    pub cgroup_manager: Option<CgroupManager>,

    #[serde(default)]
    pub data_root: Option<PathBuf>,

    #[serde(default)]
    pub debug: Option<bool>,
}

impl ConfigFile {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty file deserializes as unit, not as an empty map.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).map_err(Error::from)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Load an explicitly named file (must exist) or the default one (may not).
    pub fn discover(explicit: Option<&Path>, rootless: bool) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(Error::ConfigNotFound(path.to_path_buf()));
            }
            return Self::load(path);
        }

        match default_config_path(rootless) {
            Some(path) if path.is_file() => {
                tracing::debug!("loading config from {}", path.display());
                Self::load(&path)
            }
            _ => Ok(Self::default()),
        }
    }
}

/// `$XDG_CONFIG_HOME/ctrctl/ctrctl.yml` for rootless users, otherwise the
/// system-wide file.
pub fn default_config_path(rootless: bool) -> Option<PathBuf> {
    if !rootless {
        return Some(Path::new(SYSTEM_CONFIG_DIR).join(CONFIG_FILENAME));
    }

    let base = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
    Some(base.join("ctrctl").join(CONFIG_FILENAME))
}
