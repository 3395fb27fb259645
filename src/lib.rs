//! taskexec: run a command through the Windows task scheduler, or through
//! the user's shell everywhere else.
//!
//! # Architecture
//!
//! - **Command line**: positional arguments joined into a [`CommandLine`]
//! - **Dispatcher**: picks an [`ExecutionStrategy`] once, from the host [`Platform`]
//! - **Scheduler strategy**: `schtasks.exe` delete / create / run, with the
//!   registration deleted again on every exit path
//! - **Shell strategy**: `$SHELL -c COMMAND` with inherited stdio; the
//!   child's exit code becomes the tool's exit code
//! - **Launcher**: the [`ProcessLauncher`] seam both strategies spawn through

pub mod command;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod launcher;
pub mod logging;
pub mod strategy;
pub mod taskexec_dirs;

pub use command::{CommandLine, DEFAULT_TASK_NAME, TaskName};
pub use config::{CliOverrides, TaskExecConfig};
pub use dispatcher::{CommandDispatcher, Platform};
pub use error::{Result, TaskExecError};
pub use launcher::{Invocation, ProcessLauncher, ProcessOutput, StdioMode, SystemLauncher};
pub use strategy::{Completion, ExecutionStrategy, GENERIC_FAILURE_CODE};
