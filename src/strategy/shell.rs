//! Shell strategy — runs the command with `$SHELL -c` and relays its exit code.

use std::ffi::OsStr;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Mutex;

use crate::command::CommandLine;
use crate::error::{Result, TaskExecError};
use crate::launcher::{Invocation, ProcessLauncher, StdioMode};

use super::{Completion, ExecutionStrategy};

/// Shell used when `SHELL` is unset or empty.
pub const DEFAULT_SHELL: &str = "/bin/sh";

/// Environment variable naming the shell interpreter.
pub const SHELL_ENV: &str = "SHELL";

/// Pick the shell from a `SHELL` value, falling back to [`DEFAULT_SHELL`].
pub fn resolve_shell(env_value: Option<&OsStr>) -> PathBuf {
    match env_value {
        Some(value) if !value.is_empty() => PathBuf::from(value),
        _ => PathBuf::from(DEFAULT_SHELL),
    }
}

/// Runs commands through a shell interpreter with inherited stdio.
///
/// Before spawning, the command is echoed as `command: <text>` to the trace
/// writer (stdout by default).
pub struct ShellStrategy<L> {
    shell: PathBuf,
    launcher: L,
    trace: Mutex<Box<dyn Write + Send>>,
}

impl<L: ProcessLauncher> ShellStrategy<L> {
    /// Create a strategy using an explicit shell path.
    pub fn new(shell: impl Into<PathBuf>, launcher: L) -> Self {
        Self {
            shell: shell.into(),
            launcher,
            trace: Mutex::new(Box::new(io::stdout())),
        }
    }

    /// Create a strategy using the shell named by the `SHELL` environment variable.
    pub fn from_env(launcher: L) -> Self {
        let shell = resolve_shell(std::env::var_os(SHELL_ENV).as_deref());
        Self::new(shell, launcher)
    }

    /// Send the command trace line somewhere other than stdout.
    pub fn with_trace_writer(mut self, writer: Box<dyn Write + Send>) -> Self {
        self.trace = Mutex::new(writer);
        self
    }

    pub fn shell(&self) -> &std::path::Path {
        &self.shell
    }

    fn write_trace(&self, command: &CommandLine) -> Result<()> {
        let mut trace = self.trace.lock().unwrap_or_else(|e| e.into_inner());
        writeln!(trace, "command: {command}")?;
        trace.flush()?;
        Ok(())
    }
}

impl<L: ProcessLauncher> ExecutionStrategy for ShellStrategy<L> {
    fn name(&self) -> &'static str {
        "shell"
    }

    fn execute(&self, command: &CommandLine) -> Result<Completion> {
        self.write_trace(command)?;

        let program = self.shell.to_string_lossy().into_owned();
        let invocation = Invocation::new(
            program.clone(),
            ["-c", command.as_str()],
            StdioMode::Inherit,
        );
        tracing::debug!(shell = %program, command = %command, "spawning shell");

        let output = self
            .launcher
            .launch(&invocation)
            .map_err(|source| TaskExecError::Launch {
                program: program.clone(),
                source,
            })?;

        if output.success() {
            tracing::debug!("shell command succeeded");
            Ok(Completion::Succeeded)
        } else {
            tracing::info!(code = output.code, "shell command exited non-zero");
            Ok(Completion::Exited(output.code))
        }
    }
}
