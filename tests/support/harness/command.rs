// ABOUTME: TestableCommand: a prepared invocation that runs only when asked.
// ABOUTME: Supports stdin feeding, working directory, extra environment, and a pseudo-terminal.

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};

use super::case::TestHandle;
use super::expect::Expected;

/// What a finished command left behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// `None` when the process was killed by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

pub struct TestableCommand {
    program: PathBuf,
    args: Vec<OsString>,
    cwd: Option<PathBuf>,
    env: Vec<(OsString, OsString)>,
    stdin: Option<Box<dyn Read + Send>>,
    pseudo_tty: bool,
}

impl TestableCommand {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            env: Vec::new(),
            stdin: None,
            pseudo_tty: false,
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    pub fn with_cwd(mut self, dir: impl AsRef<Path>) -> Self {
        self.cwd = Some(dir.as_ref().to_path_buf());
        self
    }

    pub fn with_env(mut self, key: impl AsRef<OsStr>, value: impl AsRef<OsStr>) -> Self {
        self.env
            .push((key.as_ref().to_os_string(), value.as_ref().to_os_string()));
        self
    }

    /// Feed the process's stdin from `reader`, read to the end at run time.
    pub fn with_stdin(mut self, reader: impl Read + Send + 'static) -> Self {
        self.stdin = Some(Box::new(reader));
        self
    }

    /// Attach stdin and stdout to a pseudo-terminal.
    ///
    /// Echo is off, and the terminal's end-of-input character follows any
    /// bytes fed with [`with_stdin`](Self::with_stdin).
    pub fn with_pseudo_tty(mut self) -> Self {
        self.pseudo_tty = true;
        self
    }

    /// Execute and capture the outcome.
    ///
    /// # Panics
    /// If the process cannot be started.
    pub fn output(mut self) -> CommandOutput {
        let stdin = self.stdin.take().map(|mut reader| {
            let mut buf = Vec::new();
            reader
                .read_to_end(&mut buf)
                .unwrap_or_else(|e| panic!("reading stdin for {self}: {e}"));
            buf
        });

        tracing::debug!(command = %self, pty = self.pseudo_tty, "running");

        let result = if self.pseudo_tty {
            self.spawn_with_pty(stdin)
        } else {
            self.spawn_piped(stdin)
        };
        result.unwrap_or_else(|e| panic!("failed to run {self}: {e}"))
    }

    /// Execute and check the outcome against `expected`.
    pub fn run(self, expected: &Expected, handle: &TestHandle) -> CommandOutput {
        let display = self.to_string();
        let output = self.output();
        if let Err(mismatch) = expected.verify(&output, handle) {
            panic!(
                "{}: `{display}` did not meet expectations: {mismatch}\n--- stdout ---\n{}\n--- stderr ---\n{}",
                handle.path(),
                output.stdout,
                output.stderr
            );
        }
        output
    }

    fn spawn_piped(&self, stdin: Option<Vec<u8>>) -> std::io::Result<CommandOutput> {
        let mut cmd = assert_cmd::Command::new(&self.program);
        cmd.args(&self.args);
        cmd.envs(self.env.iter().map(|(k, v)| (k, v)));
        if let Some(dir) = &self.cwd {
            cmd.current_dir(dir);
        }
        if let Some(bytes) = stdin {
            cmd.write_stdin(bytes);
        }
        let output = cmd.output()?;
        Ok(CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    #[cfg(unix)]
    fn spawn_with_pty(&self, stdin: Option<Vec<u8>>) -> std::io::Result<CommandOutput> {
        use std::fs::File;
        use std::io::Write;
        use std::process::{Command, Stdio};

        use nix::sys::termios::{self, LocalFlags, SetArg, SpecialCharacterIndices};

        let pty = nix::pty::openpty(None, None).map_err(std::io::Error::from)?;

        // Fed input must not be echoed back into the captured stdout.
        let mut attrs = termios::tcgetattr(&pty.slave).map_err(std::io::Error::from)?;
        attrs.local_flags.remove(LocalFlags::ECHO);
        termios::tcsetattr(&pty.slave, SetArg::TCSANOW, &attrs).map_err(std::io::Error::from)?;
        let eof = attrs.control_chars[SpecialCharacterIndices::VEOF as usize];

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .envs(self.env.iter().map(|(k, v)| (k, v)))
            .stdin(Stdio::from(pty.slave.try_clone()?))
            .stdout(Stdio::from(pty.slave))
            .stderr(Stdio::piped());
        if let Some(dir) = &self.cwd {
            cmd.current_dir(dir);
        }

        let mut child = cmd.spawn()?;

        // `cmd` still holds the slave end here, so these writes cannot hit EIO
        // even if the child has already exited.
        let mut master = File::from(pty.master);
        let input = stdin.unwrap_or_default();
        master.write_all(&input)?;
        // VEOF after a partial line only flushes it; the next one ends the input.
        if !input.is_empty() && !input.ends_with(b"\n") {
            master.write_all(&[eof])?;
        }
        master.write_all(&[eof])?;

        // With the parent's slave copies gone, reads on the master end with EIO
        // when the child exits.
        drop(cmd);

        let mut stderr_pipe = child.stderr.take();
        let stderr_reader = std::thread::spawn(move || {
            let mut buf = Vec::new();
            if let Some(pipe) = stderr_pipe.as_mut() {
                let _ = pipe.read_to_end(&mut buf);
            }
            buf
        });

        let mut stdout = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            match master.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => stdout.extend_from_slice(&chunk[..n]),
                Err(e) if e.raw_os_error() == Some(nix::libc::EIO) => break,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }

        let status = child.wait()?;
        let stderr = stderr_reader.join().unwrap_or_default();
        Ok(CommandOutput {
            code: status.code(),
            stdout: String::from_utf8_lossy(&stdout).replace("\r\n", "\n"),
            stderr: String::from_utf8_lossy(&stderr).into_owned(),
        })
    }

    #[cfg(not(unix))]
    fn spawn_with_pty(&self, _stdin: Option<Vec<u8>>) -> std::io::Result<CommandOutput> {
        Err(std::io::Error::new(
            std::io::ErrorKind::Unsupported,
            "pseudo-terminals are only available on unix hosts",
        ))
    }
}

impl fmt::Display for TestableCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}
