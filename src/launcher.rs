//! Process launching seam.
//!
//! Strategies describe the processes they need as [`Invocation`] values and
//! hand them to a [`ProcessLauncher`]. [`SystemLauncher`] runs them with
//! `std::process`; tests substitute a recording fake.

use std::io;
use std::process::{Command, ExitStatus, Stdio};

/// How the child's standard streams are connected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StdioMode {
    /// Child writes straight to this process's stdout/stderr.
    Inherit,
    /// Child output is captured and returned in [`ProcessOutput`].
    Capture,
}

/// A single external program invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub stdio: StdioMode,
}

impl Invocation {
    pub fn new<P, I, S>(program: P, args: I, stdio: StdioMode) -> Self
    where
        P: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            stdio,
        }
    }
}

/// Result of a finished child process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code. Signal terminations are folded into `128 + signal`.
    pub code: i32,
    /// Captured stdout; empty for [`StdioMode::Inherit`].
    pub stdout: String,
    /// Captured stderr; empty for [`StdioMode::Inherit`].
    pub stderr: String,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.code == 0
    }

    /// Combined captured output, stderr first, for error messages.
    pub fn diagnostic(&self) -> String {
        match (self.stderr.trim().is_empty(), self.stdout.trim().is_empty()) {
            (false, false) => format!("{} {}", self.stderr.trim(), self.stdout.trim()),
            (false, true) => self.stderr.trim().to_owned(),
            (true, _) => self.stdout.trim().to_owned(),
        }
    }
}

/// Runs an [`Invocation`] to completion.
///
/// `Err` means the program could not be started or waited on. A program
/// that ran and exited non-zero is `Ok` with a non-zero
/// [`ProcessOutput::code`].
pub trait ProcessLauncher: Send + Sync {
    fn launch(&self, invocation: &Invocation) -> io::Result<ProcessOutput>;
}

impl<L: ProcessLauncher + ?Sized> ProcessLauncher for Box<L> {
    fn launch(&self, invocation: &Invocation) -> io::Result<ProcessOutput> {
        (**self).launch(invocation)
    }
}

impl<L: ProcessLauncher + ?Sized> ProcessLauncher for &L {
    fn launch(&self, invocation: &Invocation) -> io::Result<ProcessOutput> {
        (**self).launch(invocation)
    }
}

/// Launcher backed by [`std::process::Command`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemLauncher;

impl ProcessLauncher for SystemLauncher {
    fn launch(&self, invocation: &Invocation) -> io::Result<ProcessOutput> {
        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args).stdin(Stdio::inherit());

        match invocation.stdio {
            StdioMode::Inherit => {
                let status = cmd
                    .stdout(Stdio::inherit())
                    .stderr(Stdio::inherit())
                    .status()?;
                Ok(ProcessOutput {
                    code: exit_code(status),
                    ..ProcessOutput::default()
                })
            }
            StdioMode::Capture => {
                let output = cmd.stdin(Stdio::null()).output()?;
                Ok(ProcessOutput {
                    code: exit_code(output.status),
                    stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                    stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                })
            }
        }
    }
}

/// Map an [`ExitStatus`] to a single integer code.
fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    -1
}
