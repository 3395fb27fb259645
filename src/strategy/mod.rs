//! Execution strategies.
//!
//! A command is dispatched either through the host task scheduler
//! ([`SchedulerStrategy`]) or through a shell interpreter
//! ([`ShellStrategy`]). Both implement [`ExecutionStrategy`] and are chosen
//! once at startup by [`CommandDispatcher`](crate::dispatcher::CommandDispatcher).

pub mod scheduler;
pub mod shell;

pub use scheduler::SchedulerStrategy;
pub use shell::ShellStrategy;

use crate::command::{CommandLine, TaskName};
use crate::error::Result;

/// Exit code the binary uses for any propagated error.
pub const GENERIC_FAILURE_CODE: i32 = 1;

/// How a dispatched command finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// The child ran and exited 0.
    Succeeded,
    /// The child ran and exited with this non-zero code.
    Exited(i32),
    /// A scheduled task was created and triggered. Its own exit status is
    /// not observed.
    Triggered { task: TaskName },
}

impl Completion {
    /// Exit code the tool itself should report.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Exited(code) => *code,
            Self::Succeeded | Self::Triggered { .. } => 0,
        }
    }
}

/// A way of running a [`CommandLine`].
pub trait ExecutionStrategy: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Execute `command`.
    ///
    /// # Errors
    ///
    /// Returns an error only when the command could not be dispatched.
    /// A command that ran and failed is reported as [`Completion::Exited`].
    fn execute(&self, command: &CommandLine) -> Result<Completion>;
}

#[cfg(test)]
pub(crate) mod testing {
    //! Recording fake launcher shared by strategy and dispatcher tests.

    use std::collections::VecDeque;
    use std::io;
    use std::sync::Mutex;

    use crate::launcher::{Invocation, ProcessLauncher, ProcessOutput};

    /// Records every invocation and replies from a scripted queue.
    ///
    /// When the queue is empty the launcher answers with exit code 0.
    #[derive(Default)]
    pub struct FakeLauncher {
        calls: Mutex<Vec<Invocation>>,
        replies: Mutex<VecDeque<io::Result<ProcessOutput>>>,
    }

    impl FakeLauncher {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn reply_code(self, code: i32) -> Self {
            self.push(Ok(ProcessOutput {
                code,
                ..ProcessOutput::default()
            }))
        }

        pub fn reply_output(self, code: i32, stderr: &str) -> Self {
            self.push(Ok(ProcessOutput {
                code,
                stdout: String::new(),
                stderr: stderr.to_owned(),
            }))
        }

        pub fn reply_not_found(self) -> Self {
            self.push(Err(io::Error::new(
                io::ErrorKind::NotFound,
                "No such file or directory",
            )))
        }

        fn push(self, reply: io::Result<ProcessOutput>) -> Self {
            self.replies
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .push_back(reply);
            self
        }

        pub fn calls(&self) -> Vec<Invocation> {
            self.calls
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .clone()
        }
    }

    impl ProcessLauncher for FakeLauncher {
        fn launch(&self, invocation: &Invocation) -> io::Result<ProcessOutput> {
            self.calls
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .push(invocation.clone());
            self.replies
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .pop_front()
                .unwrap_or_else(|| Ok(ProcessOutput::default()))
        }
    }
}
