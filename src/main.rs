// ABOUTME: Entry point for the ctrctl CLI application.
// ABOUTME: Parses arguments, resolves global options, and dispatches to the subcommand.

use clap::Parser;
use ctrctl::cli::Cli;
use ctrctl::commands::{self, registry::SubcommandSpec};
use ctrctl::config::{GlobalOptions, GlobalOverrides};
use ctrctl::error::{Error, Result};
use ctrctl::host::HostInfo;
use ctrctl::output::Output;
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let host = HostInfo::detect();

    let global = GlobalOptions::resolve(&GlobalOverrides::from(&cli.global), &host);
    init_tracing(global.as_ref().map_or(cli.global.debug, |g| g.debug));

    let mut stdout = io::stdout();
    let mut stderr = io::stderr();

    let result = match global {
        Ok(global) => run(&cli, &global, &host, Output::new(&mut stdout, &mut stderr)).await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        let mut output = Output::new(&mut stdout, &mut stderr);
        report(commands::spec_for(&cli.command), &e, &mut output);
        std::process::exit(1);
    }
}

fn init_tracing(debug: bool) {
    // --debug wins over RUST_LOG; otherwise only warnings and errors.
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();
}

async fn run(cli: &Cli, global: &GlobalOptions, host: &HostInfo, output: Output<'_>) -> Result<()> {
    tracing::debug!(
        namespace = %global.namespace,
        cgroup_manager = %global.cgroup_manager,
        rootless = global.rootless,
        "resolved global options"
    );
    commands::execute(&cli.command, global, host, output).await
}

fn report(spec: Option<&SubcommandSpec>, error: &Error, output: &mut Output<'_>) {
    // Nothing sensible is left to do if stderr itself is gone.
    let _ = output.error(&error.to_string());

    let Some(spec) = spec else {
        return;
    };
    if error.is_usage() && !spec.silence.usage {
        let _ = writeln!(output.stderr(), "{}", spec.usage_line());
    }
    if !spec.silence.errors {
        let _ = writeln!(output.stderr(), "See 'ctrctl {} --help'.", spec.name);
    }
}
