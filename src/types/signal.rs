// ABOUTME: Stop signal parsing and normalisation.
// ABOUTME: Accepts SIGTERM, TERM, term or a signal number.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Signal names understood by Linux container runtimes, without the `SIG` prefix.
pub const SIGNAL_NAMES: &[&str] = &[
    "ABRT", "ALRM", "BUS", "CHLD", "CONT", "FPE", "HUP", "ILL", "INT", "IO", "KILL", "PIPE",
    "PROF", "PWR", "QUIT", "SEGV", "STKFLT", "STOP", "SYS", "TERM", "TRAP", "TSTP", "TTIN",
    "TTOU", "URG", "USR1", "USR2", "VTALRM", "WINCH", "XCPU", "XFSZ",
];

const MAX_SIGNAL_NUMBER: u32 = 64;

#[derive(Debug, Error)]
pub enum SignalError {
    #[error("invalid signal {0:?}")]
    Unknown(String),
}

/// A signal to deliver when stopping a container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopSignal {
    /// Canonical upper-case name, always `SIG`-prefixed.
    Named(String),
    Number(u32),
}

impl StopSignal {
    /// The form forwarded to the runtime API.
    pub fn as_api_value(&self) -> String {
        self.to_string()
    }
}

impl FromStr for StopSignal {
    type Err = SignalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(n) = s.parse::<u32>() {
            if (1..=MAX_SIGNAL_NUMBER).contains(&n) {
                return Ok(StopSignal::Number(n));
            }
            return Err(SignalError::Unknown(s.to_string()));
        }

        let upper = s.to_ascii_uppercase();
        let bare = upper.strip_prefix("SIG").unwrap_or(&upper);

        let realtime = bare
            .strip_prefix("RTMIN")
            .or_else(|| bare.strip_prefix("RTMAX"))
            .is_some_and(|rest| {
                rest.is_empty()
                    || ((rest.starts_with('+') || rest.starts_with('-'))
                        && rest[1..].parse::<u8>().is_ok())
            });

        if SIGNAL_NAMES.contains(&bare) || realtime {
            Ok(StopSignal::Named(format!("SIG{bare}")))
        } else {
            Err(SignalError::Unknown(s.to_string()))
        }
    }
}

impl fmt::Display for StopSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopSignal::Named(name) => write!(f, "{name}"),
            StopSignal::Number(n) => write!(f, "{n}"),
        }
    }
}
