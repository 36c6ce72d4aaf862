// ABOUTME: Library root for ctrctl - exposes the CLI, commands, and runtime layers for testing.
// ABOUTME: The main binary is in main.rs.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod filespec;
pub mod format;
pub mod host;
pub mod output;
pub mod runtime;
pub mod types;
