// ABOUTME: Subcommand dispatch for the ctrctl CLI.
// ABOUTME: Checks arity, builds options, connects to the runtime, and runs the action.

mod client;
pub mod completion;
mod inspect;
pub mod registry;
mod stop;
mod top;


pub use client::{CancelToken, RuntimeClient, connect};
pub use inspect::{ContainerInspectOptions, build_inspect_options, inspect};
pub use stop::{ContainerStopOptions, build_stop_options, stop};
pub use top::{ContainerTopOptions, build_top_options, top};

use nonempty::NonEmpty;

use crate::cli::{Commands, CompleteArgs, ContainerCommands};
use crate::config::GlobalOptions;
use crate::error::{Error, Result};
use crate::host::HostInfo;
use crate::output::Output;
use crate::types::ContainerRef;
use registry::{INSPECT, STOP, SubcommandSpec, TOP};

/// The registry entry behind a parsed command, if it is a lifecycle subcommand.
pub fn spec_for(command: &Commands) -> Option<&'static SubcommandSpec> {
    match command {
        Commands::Inspect(_) | Commands::Container(ContainerCommands::Inspect(_)) => Some(&INSPECT),
        Commands::Top(_) | Commands::Container(ContainerCommands::Top(_)) => Some(&TOP),
        Commands::Stop(_) | Commands::Container(ContainerCommands::Stop(_)) => Some(&STOP),
        Commands::Complete(_) => None,
    }
}

/// Run one parsed command to completion.
pub async fn execute(
    command: &Commands,
    global: &GlobalOptions,
    host: &HostInfo,
    mut output: Output<'_>,
) -> Result<()> {
    match command {
        Commands::Inspect(args) | Commands::Container(ContainerCommands::Inspect(args)) => {
            INSPECT.check_arity(args.containers.len())?;
            let mut options = build_inspect_options(global, args, output)?;
            let references = parse_references(INSPECT.name, &args.containers)?;
            let client = connect(global).await?;
            inspect(&client, &references, &mut options).await
        }
        Commands::Top(args) | Commands::Container(ContainerCommands::Top(args)) => {
            TOP.check_arity(args.args.len())?;
            let (mut options, reference) = build_top_options(global, host, args, output)?;
            let client = connect(global).await?;
            top(&client, &reference, &mut options).await
        }
        Commands::Stop(args) | Commands::Container(ContainerCommands::Stop(args)) => {
            STOP.check_arity(args.containers.len())?;
            let mut options = build_stop_options(global, args, output)?;
            let references = parse_references(STOP.name, &args.containers)?;
            let client = connect(global).await?;
            stop(&client, &references, &mut options).await
        }
        Commands::Complete(args) => complete(global, args, &mut output).await,
    }
}

fn parse_references(command: &str, raw: &[String]) -> Result<NonEmpty<ContainerRef>> {
    let references = raw
        .iter()
        .map(|r| ContainerRef::new(r))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    NonEmpty::from_vec(references).ok_or_else(|| Error::Arity {
        command: command.to_string(),
        min: 1,
    })
}

async fn complete(global: &GlobalOptions, args: &CompleteArgs, output: &mut Output<'_>) -> Result<()> {
    let Some(spec) = registry::lookup(&args.subcommand) else {
        tracing::debug!(subcommand = %args.subcommand, "no completions for unknown subcommand");
        return Ok(());
    };

    let candidates = completion::plan(spec, &args.words);
    let client = match candidates {
        completion::Candidates::Containers { .. } => match connect(global).await {
            Ok(client) => Some(client),
            Err(e) => {
                tracing::debug!(error = %e, "runtime unavailable for completion");
                None
            }
        },
        _ => None,
    };

    completion::complete(client.as_ref(), candidates, output).await
}
