// ABOUTME: Shell completion candidates for the hidden `__complete` subcommand.
// ABOUTME: Offers flag names, fixed flag values, or container names from the runtime.

use super::client::RuntimeClient;
use super::registry::{Completion, SubcommandSpec};
use crate::error::{Error, Result};
use crate::output::Output;
use crate::runtime::{ContainerFilters, ContainerOps};

/// What the word under the cursor can complete to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Candidates {
    Words(Vec<String>),
    Containers { all: bool, prefix: String },
    Nothing,
}

/// Decide candidates from the words typed after the subcommand. The last word
/// is the one being completed and may be empty.
pub fn plan(spec: &SubcommandSpec, words: &[String]) -> Candidates {
    let (partial, typed) = match words.split_last() {
        Some((last, rest)) => (last.as_str(), rest),
        None => ("", &[][..]),
    };

    let pending_flag = typed
        .last()
        .filter(|w| !w.contains('='))
        .and_then(|w| spec.flag(w));
    if let Some(flag) = pending_flag {
        if let Some(values) = flag.values {
            return Candidates::Words(
                values
                    .iter()
                    .map(|v| format!("{}{v}", flag.value_prefix))
                    .filter(|v| v.starts_with(partial))
                    .collect(),
            );
        }
    }

    if partial.starts_with('-') {
        let mut names = Vec::new();
        for flag in spec.flags {
            names.push(format!("--{}", flag.long));
            if let Some(short) = flag.short {
                names.push(format!("-{short}"));
            }
        }
        names.retain(|n| n.starts_with(partial));
        return Candidates::Words(names);
    }

    let positionals = count_positionals(spec, typed);
    match spec.completion {
        Completion::Containers { all } => Candidates::Containers {
            all,
            prefix: partial.to_string(),
        },
        Completion::FirstContainer { all } if positionals == 0 => Candidates::Containers {
            all,
            prefix: partial.to_string(),
        },
        Completion::FirstContainer { .. } | Completion::None => Candidates::Nothing,
    }
}

fn count_positionals(spec: &SubcommandSpec, typed: &[String]) -> usize {
    let mut count = 0;
    let mut skip_value = false;
    for word in typed {
        if skip_value {
            skip_value = false;
            continue;
        }
        if word.starts_with('-') {
            skip_value = spec
                .flag(word)
                .is_some_and(|f| f.values.is_some() && !word.contains('='));
            continue;
        }
        count += 1;
    }
    count
}

/// Print one candidate per line. Container lookups that fail print nothing.
pub async fn complete<R: ContainerOps>(
    client: Option<&RuntimeClient<R>>,
    candidates: Candidates,
    output: &mut Output<'_>,
) -> Result<()> {
    let words = match candidates {
        Candidates::Words(words) => words,
        Candidates::Nothing => Vec::new(),
        Candidates::Containers { all, prefix } => match client {
            Some(client) => container_names(client, all, &prefix).await,
            None => Vec::new(),
        },
    };

    for word in words {
        output.line(&word)?;
    }
    Ok(())
}

async fn container_names<R: ContainerOps>(
    client: &RuntimeClient<R>,
    all: bool,
    prefix: &str,
) -> Vec<String> {
    let filters = ContainerFilters { all };
    let listed = client
        .run(async {
            client
                .runtime()
                .list_containers(&filters)
                .await
                .map_err(Error::from)
        })
        .await;

    match listed {
        Ok(containers) => containers
            .into_iter()
            .map(|c| c.name)
            .filter(|name| name.starts_with(prefix))
            .collect(),
        Err(e) => {
            tracing::debug!(error = %e, "container completion unavailable");
            Vec::new()
        }
    }
}
