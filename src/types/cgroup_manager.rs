// ABOUTME: Cgroup manager selection (cgroupfs, systemd, none).
// ABOUTME: Deserializes from config files and parses from flags/env.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CgroupManager {
    Cgroupfs,
    Systemd,
    None,
}

impl FromStr for CgroupManager {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cgroupfs" => Ok(CgroupManager::Cgroupfs),
            "systemd" => Ok(CgroupManager::Systemd),
            "none" => Ok(CgroupManager::None),
            other => Err(Error::InvalidCgroupManager(other.to_string())),
        }
    }
}

impl fmt::Display for CgroupManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CgroupManager::Cgroupfs => write!(f, "cgroupfs"),
            CgroupManager::Systemd => write!(f, "systemd"),
            CgroupManager::None => write!(f, "none"),
        }
    }
}
