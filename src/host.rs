// ABOUTME: Host environment probes: rootless mode and cgroup hierarchy.
// ABOUTME: Read-only checks against /proc and /sys, shared with the test harness.

use std::path::{Path, PathBuf};

const CGROUP_ROOT: &str = "/sys/fs/cgroup";

/// Which cgroup hierarchy the host mounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CgroupVersion {
    V1,
    V2,
    /// No cgroup filesystem mounted (or not a Linux host).
    Unavailable,
}

/// Snapshot of the host facts commands and test requirements care about.
#[derive(Debug, Clone)]
pub struct HostInfo {
    pub os: &'static str,
    pub uid: Option<u32>,
    pub cgroup_version: CgroupVersion,
    pub cgroup_root: PathBuf,
}

impl HostInfo {
    pub fn detect() -> Self {
        let cgroup_root = PathBuf::from(CGROUP_ROOT);
        Self {
            os: std::env::consts::OS,
            uid: effective_uid(),
            cgroup_version: cgroup_version_at(&cgroup_root),
            cgroup_root,
        }
    }

    pub fn is_rootless(&self) -> bool {
        self.uid.is_some_and(|uid| uid != 0)
    }

    pub fn is_windows(&self) -> bool {
        self.os == "windows"
    }

    /// Whether enough controllers are visible to report per-process stats.
    pub fn cgroups_accessible(&self) -> bool {
        match self.cgroup_version {
            CgroupVersion::V2 => {
                let controllers = self.delegated_controllers();
                ["cpu", "memory", "pids"]
                    .iter()
                    .all(|c| controllers.iter().any(|have| have == c))
            }
            CgroupVersion::V1 => {
                !self.is_rootless()
                    && ["cpu", "memory", "pids"]
                        .iter()
                        .all(|c| self.cgroup_root.join(c).is_dir())
            }
            CgroupVersion::Unavailable => false,
        }
    }

    /// Controllers this user may use on a v2 host: the root set, or the
    /// systemd user slice delegation when rootless.
    fn delegated_controllers(&self) -> Vec<String> {
        let path = match (self.is_rootless(), self.uid) {
            (true, Some(uid)) => self
                .cgroup_root
                .join(format!("user.slice/user-{uid}.slice/user@{uid}.service"))
                .join("cgroup.controllers"),
            _ => self.cgroup_root.join("cgroup.controllers"),
        };

        std::fs::read_to_string(path)
            .map(|s| s.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default()
    }
}

/// Detect the cgroup version mounted at `root`.
pub fn cgroup_version_at(root: &Path) -> CgroupVersion {
    if root.join("cgroup.controllers").is_file() {
        CgroupVersion::V2
    } else if root.is_dir() {
        CgroupVersion::V1
    } else {
        CgroupVersion::Unavailable
    }
}

fn effective_uid() -> Option<u32> {
    // Fields on the Uid: line are real, effective, saved, filesystem.
    std::fs::read_to_string("/proc/self/status")
        .ok()
        .and_then(|s| {
            s.lines()
                .find(|l| l.starts_with("Uid:"))
                .and_then(|l| l.split_whitespace().nth(2))
                .and_then(|s| s.parse().ok())
        })
}
