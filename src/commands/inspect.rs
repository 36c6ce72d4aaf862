// ABOUTME: `inspect` subcommand: option builder and action.
// ABOUTME: Inspects every reference, formats what was found, then reports the failures.

use nonempty::NonEmpty;
use serde_json::Value;

use super::client::RuntimeClient;
use crate::cli::InspectArgs;
use crate::config::GlobalOptions;
use crate::error::{Error, Result};
use crate::format::Format;
use crate::output::Output;
use crate::runtime::{ContainerDetails, ContainerOps};
use crate::types::{ContainerRef, InspectMode};

/// Everything the inspect action needs besides the references.
pub struct ContainerInspectOptions<'a> {
    pub global: GlobalOptions,
    pub output: Output<'a>,
    pub mode: InspectMode,
    pub size: bool,
    pub format: Format,
}

/// Validate flags into options. Runs before any runtime connection.
pub fn build_inspect_options<'a>(
    global: &GlobalOptions,
    args: &InspectArgs,
    output: Output<'a>,
) -> Result<ContainerInspectOptions<'a>> {
    let mode: InspectMode = args.mode.parse()?;
    let format = Format::new(&args.format);

    Ok(ContainerInspectOptions {
        global: global.clone(),
        output,
        mode,
        size: args.size,
        format,
    })
}

pub async fn inspect<R: ContainerOps>(
    client: &RuntimeClient<R>,
    references: &NonEmpty<ContainerRef>,
    options: &mut ContainerInspectOptions<'_>,
) -> Result<()> {
    let mut entries = Vec::with_capacity(references.len());
    let mut errors = Vec::new();

    for reference in references.iter() {
        let result = client
            .run(async {
                client
                    .runtime()
                    .inspect_container(reference, options.size)
                    .await
                    .map_err(Error::from)
            })
            .await;

        match result {
            Ok(details) => entries.push(document(details, options.mode, client.namespace())),
            Err(Error::Cancelled) => return Err(Error::Cancelled),
            Err(e) => {
                tracing::debug!(container = %reference, error = %e, "inspect failed");
                errors.push(e);
            }
        }
    }

    if let Err(e) = options.format.write(&entries, options.output.stdout()) {
        tracing::error!("failed to format inspect output: {e}");
    }

    match Error::from_many(errors) {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

fn document(details: ContainerDetails, mode: InspectMode, namespace: &str) -> Value {
    match mode {
        InspectMode::DockerCompat => details.document,
        InspectMode::Native => {
            let mut value = serde_json::to_value(&details.native).unwrap_or(Value::Null);
            if let Value::Object(map) = &mut value {
                map.insert("Namespace".to_string(), Value::String(namespace.to_string()));
            }
            value
        }
    }
}
