// ABOUTME: `top` subcommand: host guards, option builder and action.
// ABOUTME: Lists the processes of one container, forwarding trailing words to ps.

use super::client::RuntimeClient;
use crate::cli::TopArgs;
use crate::config::GlobalOptions;
use crate::error::{Error, Result};
use crate::format::write_table;
use crate::host::{CgroupVersion, HostInfo};
use crate::output::Output;
use crate::runtime::ContainerOps;
use crate::types::{CgroupManager, ContainerRef};

pub struct ContainerTopOptions<'a> {
    pub global: GlobalOptions,
    pub output: Output<'a>,
    /// Extra `ps` options, space-joined. Empty means the runtime default.
    pub ps_args: String,
}

/// Check the host can serve `top`, then split the container from its ps options.
pub fn build_top_options<'a>(
    global: &GlobalOptions,
    host: &HostInfo,
    args: &TopArgs,
    output: Output<'a>,
) -> Result<(ContainerTopOptions<'a>, ContainerRef)> {
    let Some((container, ps_args)) = args.args.split_first() else {
        return Err(Error::Arity {
            command: "top".to_string(),
            min: 1,
        });
    };

    if global.rootless && host.cgroup_version == CgroupVersion::V1 {
        return Err(Error::TopRequiresCgroupV2);
    }
    if global.cgroup_manager == CgroupManager::None {
        return Err(Error::TopRequiresCgroupManager);
    }

    let reference = ContainerRef::new(container)?;
    let options = ContainerTopOptions {
        global: global.clone(),
        output,
        ps_args: ps_args.join(" "),
    };
    Ok((options, reference))
}

pub async fn top<R: ContainerOps>(
    client: &RuntimeClient<R>,
    reference: &ContainerRef,
    options: &mut ContainerTopOptions<'_>,
) -> Result<()> {
    let processes = client
        .run(async {
            client
                .runtime()
                .top(reference, &options.ps_args)
                .await
                .map_err(Error::from)
        })
        .await?;

    write_table(
        &processes.titles,
        &processes.processes,
        options.output.stdout(),
    )?;
    Ok(())
}
