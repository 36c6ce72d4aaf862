// ABOUTME: `stop` subcommand: option builder and action.
// ABOUTME: Forwards timeout and signal only when set, and stops each reference in turn.

use std::time::Duration;

use nonempty::NonEmpty;

use super::client::RuntimeClient;
use crate::cli::StopArgs;
use crate::config::GlobalOptions;
use crate::error::{Error, Result};
use crate::output::Output;
use crate::runtime::{ContainerOps, StopRequest};
use crate::types::{ContainerRef, StopSignal};

pub struct ContainerStopOptions<'a> {
    pub global: GlobalOptions,
    pub output: Output<'a>,
    /// `None` lets the runtime use the container's own stop timeout.
    pub timeout: Option<Duration>,
    /// `None` lets the runtime use the container's own stop signal.
    pub signal: Option<StopSignal>,
}

impl ContainerStopOptions<'_> {
    fn request(&self) -> StopRequest {
        StopRequest {
            timeout: self.timeout,
            signal: self.signal.clone(),
        }
    }
}

pub fn build_stop_options<'a>(
    global: &GlobalOptions,
    args: &StopArgs,
    output: Output<'a>,
) -> Result<ContainerStopOptions<'a>> {
    let signal = args
        .signal
        .as_deref()
        .map(str::parse::<StopSignal>)
        .transpose()?;

    Ok(ContainerStopOptions {
        global: global.clone(),
        output,
        timeout: args.time.map(|secs| Duration::from_secs(secs.into())),
        signal,
    })
}

/// Stop every reference, printing each one that stopped.
///
/// Failures do not abort the loop; one failure is returned as-is and several
/// are joined into [`Error::Multiple`]. Cancellation ends the loop at once.
pub async fn stop<R: ContainerOps>(
    client: &RuntimeClient<R>,
    references: &NonEmpty<ContainerRef>,
    options: &mut ContainerStopOptions<'_>,
) -> Result<()> {
    let request = options.request();
    let mut errors = Vec::new();

    for reference in references.iter() {
        let result = client
            .run(async {
                client
                    .runtime()
                    .stop_container(reference, &request)
                    .await
                    .map_err(Error::from)
            })
            .await;

        match result {
            Ok(()) => options.output.line(reference.as_str())?,
            Err(Error::Cancelled) => return Err(Error::Cancelled),
            Err(e) => {
                tracing::warn!(container = %reference, error = %e, "failed to stop container");
                errors.push(e);
            }
        }
    }

    match Error::from_many(errors) {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
