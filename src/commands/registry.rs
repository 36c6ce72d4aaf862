// ABOUTME: Static descriptions of the container lifecycle subcommands.
// ABOUTME: Usage text, minimum arity, error silencing, and completion behaviour per subcommand.

use crate::error::{Error, Result};
use crate::types::{InspectMode, SIGNAL_NAMES};

/// Which diagnostics the framework suppresses when an action fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Silence {
    pub usage: bool,
    pub errors: bool,
}

/// What positional arguments complete to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Container names. `all` includes stopped containers.
    Containers { all: bool },
    /// Only the first positional is a container; the rest pass through.
    FirstContainer { all: bool },
    None,
}

/// A flag whose value has a fixed set of candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagSpec {
    pub long: &'static str,
    pub short: Option<char>,
    /// `None` for boolean flags that take no value.
    pub values: Option<&'static [&'static str]>,
    /// Prepended to each value when offered as a completion.
    pub value_prefix: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubcommandSpec {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub usage: &'static str,
    pub short: &'static str,
    pub long: &'static str,
    pub min_args: usize,
    pub silence: Silence,
    pub completion: Completion,
    pub flags: &'static [FlagSpec],
}

const SILENT: Silence = Silence {
    usage: true,
    errors: true,
};

pub const INSPECT: SubcommandSpec = SubcommandSpec {
    name: "inspect",
    aliases: &["container inspect"],
    usage: "inspect [flags] CONTAINER [CONTAINER, ...]",
    short: "Display detailed information on one or more containers.",
    long: "Hint: set `--mode=native` for showing the full output",
    min_args: 1,
    silence: SILENT,
    completion: Completion::Containers { all: true },
    flags: &[
        FlagSpec {
            long: "mode",
            short: None,
            values: Some(InspectMode::VALUES),
            value_prefix: "",
        },
        FlagSpec {
            long: "size",
            short: Some('s'),
            values: None,
            value_prefix: "",
        },
        FlagSpec {
            long: "format",
            short: Some('f'),
            values: Some(&["json"]),
            value_prefix: "",
        },
    ],
};

pub const TOP: SubcommandSpec = SubcommandSpec {
    name: "top",
    aliases: &["container top"],
    usage: "top CONTAINER [ps OPTIONS]",
    short: "Display the running processes of a container",
    long: "",
    min_args: 1,
    silence: SILENT,
    completion: Completion::FirstContainer { all: false },
    flags: &[],
};

pub const STOP: SubcommandSpec = SubcommandSpec {
    name: "stop",
    aliases: &["container stop"],
    usage: "stop [flags] CONTAINER [CONTAINER, ...]",
    short: "Stop one or more running containers",
    long: "",
    min_args: 1,
    silence: SILENT,
    completion: Completion::Containers { all: false },
    flags: &[
        FlagSpec {
            long: "time",
            short: Some('t'),
            values: Some(&[]),
            value_prefix: "",
        },
        FlagSpec {
            long: "signal",
            short: Some('s'),
            values: Some(SIGNAL_NAMES),
            value_prefix: "SIG",
        },
    ],
};

pub const SUBCOMMANDS: &[SubcommandSpec] = &[INSPECT, TOP, STOP];

/// Find a subcommand by name or alias.
pub fn lookup(name: &str) -> Option<&'static SubcommandSpec> {
    SUBCOMMANDS
        .iter()
        .find(|spec| spec.name == name || spec.aliases.contains(&name))
}

impl SubcommandSpec {
    pub fn check_arity(&self, got: usize) -> Result<()> {
        if got < self.min_args {
            return Err(Error::Arity {
                command: self.name.to_string(),
                min: self.min_args,
            });
        }
        Ok(())
    }

    pub fn flag(&self, word: &str) -> Option<&'static FlagSpec> {
        let flags: &'static [FlagSpec] = self.flags;
        if let Some(long) = word.strip_prefix("--") {
            let long = long.split_once('=').map_or(long, |(name, _)| name);
            return flags.iter().find(|f| f.long == long);
        }
        let mut chars = word.strip_prefix('-')?.chars();
        let short = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        flags.iter().find(|f| f.short == Some(short))
    }

    /// Usage line as printed after a usage error.
    pub fn usage_line(&self) -> String {
        format!("Usage: ctrctl {}", self.usage)
    }
}
