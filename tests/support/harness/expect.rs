// ABOUTME: Expectations over a finished command: exit code, stderr patterns, stdout checks.
// ABOUTME: Stdout checks are predicates-crate predicates or closures that see the test handle.

use predicates::BoxPredicate;
use predicates::prelude::*;
use std::fmt;

use super::case::TestHandle;
use super::command::CommandOutput;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success,
    /// Any non-zero exit, or death by signal.
    GenericFailure,
    Exact(i32),
    NoCheck,
}

impl ExitCode {
    fn accepts(self, code: Option<i32>) -> bool {
        match self {
            ExitCode::Success => code == Some(0),
            ExitCode::GenericFailure => code != Some(0),
            ExitCode::Exact(want) => code == Some(want),
            ExitCode::NoCheck => true,
        }
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "exit code 0"),
            ExitCode::GenericFailure => write!(f, "a non-zero exit code"),
            ExitCode::Exact(code) => write!(f, "exit code {code}"),
            ExitCode::NoCheck => write!(f, "any exit code"),
        }
    }
}

pub type CustomCheck = Box<dyn Fn(&str, &str, &TestHandle) + Send + Sync>;

/// A check over stdout.
pub enum OutputCheck {
    Predicate {
        description: String,
        predicate: BoxPredicate<str>,
    },
    /// Receives stdout, stderr and the handle; asserts by panicking.
    Custom(CustomCheck),
    All(Vec<OutputCheck>),
}

impl OutputCheck {
    fn verify(&self, stdout: &str, stderr: &str, handle: &TestHandle) -> Result<(), String> {
        match self {
            OutputCheck::Predicate {
                description,
                predicate,
            } => {
                if predicate.eval(stdout) {
                    Ok(())
                } else {
                    Err(format!("stdout should {description}"))
                }
            }
            OutputCheck::Custom(check) => {
                check(stdout, stderr, handle);
                Ok(())
            }
            OutputCheck::All(checks) => checks
                .iter()
                .try_for_each(|c| c.verify(stdout, stderr, handle)),
        }
    }
}

/// Stdout must be exactly `expected`.
pub fn equals(expected: impl Into<String>) -> OutputCheck {
    let expected = expected.into();
    OutputCheck::Predicate {
        description: format!("equal {expected:?}"),
        predicate: predicate::str::diff(expected).boxed(),
    }
}

/// Stdout must contain every one of `needles`.
pub fn contains<I, S>(needles: I) -> OutputCheck
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let needles: Vec<String> = needles.into_iter().map(Into::into).collect();
    OutputCheck::All(
        needles
            .into_iter()
            .map(|n| OutputCheck::Predicate {
                description: format!("contain {n:?}"),
                predicate: predicate::str::contains(n).boxed(),
            })
            .collect(),
    )
}

/// Stdout must contain none of `needles`.
pub fn does_not_contain<I, S>(needles: I) -> OutputCheck
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    OutputCheck::All(
        needles
            .into_iter()
            .map(Into::into)
            .map(|n: String| OutputCheck::Predicate {
                description: format!("not contain {n:?}"),
                predicate: predicate::str::contains(n).not().boxed(),
            })
            .collect(),
    )
}

pub fn all(checks: Vec<OutputCheck>) -> OutputCheck {
    OutputCheck::All(checks)
}

pub fn custom(check: impl Fn(&str, &str, &TestHandle) + Send + Sync + 'static) -> OutputCheck {
    OutputCheck::Custom(Box::new(check))
}

pub struct Expected {
    pub exit_code: ExitCode,
    /// Each entry must appear somewhere in stderr.
    pub errors: Vec<String>,
    pub output: Option<OutputCheck>,
}

impl Default for Expected {
    fn default() -> Self {
        expects(ExitCode::Success, Vec::<String>::new(), None)
    }
}

/// Build an [`Expected`] from its three parts.
pub fn expects<I, S>(exit_code: ExitCode, errors: I, output: Option<OutputCheck>) -> Expected
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Expected {
        exit_code,
        errors: errors.into_iter().map(Into::into).collect(),
        output,
    }
}

impl Expected {
    /// Check `output`; the error describes the first unmet expectation.
    pub fn verify(&self, output: &CommandOutput, handle: &TestHandle) -> Result<(), String> {
        if !self.exit_code.accepts(output.code) {
            return Err(format!(
                "expected {}, got {}",
                self.exit_code,
                output
                    .code
                    .map_or_else(|| "termination by signal".to_string(), |c| format!("exit code {c}"))
            ));
        }

        if let Some(missing) = self.errors.iter().find(|e| !output.stderr.contains(e.as_str())) {
            return Err(format!("stderr should contain {missing:?}"));
        }

        match &self.output {
            Some(check) => check.verify(&output.stdout, &output.stderr, handle),
            None => Ok(()),
        }
    }
}
