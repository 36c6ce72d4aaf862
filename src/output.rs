// ABOUTME: Output sinks handed to subcommand actions.
// ABOUTME: Wraps stdout/stderr writers so actions can be driven with in-memory buffers.

use std::io::{self, Write};

/// The pair of writers a subcommand reports through.
pub struct Output<'a> {
    stdout: &'a mut (dyn Write + Send),
    stderr: &'a mut (dyn Write + Send),
}

impl<'a> Output<'a> {
    pub fn new(stdout: &'a mut (dyn Write + Send), stderr: &'a mut (dyn Write + Send)) -> Self {
        Self { stdout, stderr }
    }

    pub fn stdout(&mut self) -> &mut (dyn Write + Send + 'a) {
        &mut *self.stdout
    }

    pub fn stderr(&mut self) -> &mut (dyn Write + Send + 'a) {
        &mut *self.stderr
    }

    /// Write one line to stdout.
    pub fn line(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.stdout, "{message}")
    }

    /// Write one line to stderr, prefixed like top-level errors.
    pub fn error(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.stderr, "Error: {message}")
    }
}
