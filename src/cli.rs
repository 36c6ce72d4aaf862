// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Global flags plus the container lifecycle subcommands.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::GlobalOverrides;

#[derive(Parser, Debug)]
#[command(name = "ctrctl")]
#[command(about = "Docker-compatible client for Docker and Podman runtimes")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Flags accepted before or after any subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Path to the ctrctl.yml config file
    #[arg(long, global = true, env = "CTRCTL_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Namespace to scope containers to
    #[arg(short = 'n', long, global = true, env = "CTRCTL_NAMESPACE")]
    pub namespace: Option<String>,

    /// Runtime daemon address (unix:///path, /path, tcp://host:port)
    #[arg(short = 'a', long, alias = "host", global = true, env = "CTRCTL_ADDRESS")]
    pub address: Option<String>,

    /// Cgroup manager (cgroupfs, systemd, none)
    #[arg(long, global = true, env = "CTRCTL_CGROUP_MANAGER")]
    pub cgroup_manager: Option<String>,

    /// Root directory for ctrctl state
    #[arg(long, global = true, env = "CTRCTL_DATA_ROOT", value_name = "DIR")]
    pub data_root: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,
}

impl From<&GlobalArgs> for GlobalOverrides {
    fn from(args: &GlobalArgs) -> Self {
        GlobalOverrides {
            config: args.config.clone(),
            namespace: args.namespace.clone(),
            address: args.address.clone(),
            cgroup_manager: args.cgroup_manager.clone(),
            data_root: args.data_root.clone(),
            debug: args.debug,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Display detailed information on one or more containers
    Inspect(InspectArgs),

    /// Display the running processes of a container
    Top(TopArgs),

    /// Stop one or more running containers
    Stop(StopArgs),

    /// Manage containers
    #[command(subcommand)]
    Container(ContainerCommands),

    #[command(name = "__complete", hide = true)]
    Complete(CompleteArgs),
}

#[derive(Subcommand, Debug)]
pub enum ContainerCommands {
    /// Display detailed information on one or more containers
    Inspect(InspectArgs),

    /// Display the running processes of a container
    Top(TopArgs),

    /// Stop one or more running containers
    Stop(StopArgs),
}

#[derive(Args, Debug, Clone)]
pub struct InspectArgs {
    /// Inspect mode, "dockercompat" for Docker-compatible output, "native" for all information
    #[arg(long, default_value = "dockercompat")]
    pub mode: String,

    /// Display total file sizes
    #[arg(short = 's', long)]
    pub size: bool,

    /// Format the output using the given template, or "json"
    #[arg(short = 'f', long, default_value = "")]
    pub format: String,

    pub containers: Vec<String>,
}

#[derive(Args, Debug, Clone)]
pub struct TopArgs {
    /// Container followed by optional ps options
    #[arg(trailing_var_arg = true, num_args = 0.., value_name = "CONTAINER [ps OPTIONS]")]
    pub args: Vec<String>,
}

#[derive(Args, Debug, Clone)]
pub struct StopArgs {
    /// Seconds to wait before killing the container [default: 10]
    #[arg(short = 't', long, value_name = "SECONDS")]
    pub time: Option<u32>,

    /// Signal to send to the container [default: SIGTERM]
    #[arg(short = 's', long)]
    pub signal: Option<String>,

    pub containers: Vec<String>,
}

#[derive(Args, Debug, Clone)]
pub struct CompleteArgs {
    /// Subcommand being completed
    pub subcommand: String,

    /// Words typed so far after the subcommand
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, num_args = 0..)]
    pub words: Vec<String>,
}
