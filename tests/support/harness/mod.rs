// ABOUTME: Test harness for driving the ctrctl binary case by case.
// ABOUTME: Cases, per-case data, helpers, expectations, requirements, and port reservation.

pub mod command;
pub mod expect;
pub mod identifier;
pub mod ports;

pub use case::{Case, Outcome, TestHandle};
pub use command::{CommandOutput, TestableCommand};
pub use expect::{ExitCode, Expected, OutputCheck, all, contains, custom, does_not_contain, equals, expects};
pub use helpers::{Helpers, Target, test_image};
pub use require::{Requirement, Verdict};
