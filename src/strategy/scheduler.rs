//! Task scheduler strategy.
//!
//! Registers a transient `schtasks.exe` task whose action is the command,
//! triggers it, and removes the registration. Tasks started this way run in
//! the interactive desktop session, so GUI programs can be launched from a
//! non-interactive login such as an OpenSSH session.
//!
//! Sequence for task `NAME`:
//!
//! ```text
//! schtasks.exe /delete /tn NAME /f                         (failure ignored)
//! schtasks.exe /create /tn NAME /sc onstart /it /tr COMMAND
//! schtasks.exe /run /tn NAME
//! schtasks.exe /delete /tn NAME /f                         (always, failure ignored)
//! ```
//!
//! The run step only triggers the task. Its exit status is never awaited.

use crate::command::{CommandLine, TaskName};
use crate::error::{Result, TaskExecError};
use crate::launcher::{Invocation, ProcessLauncher, ProcessOutput, StdioMode};

use super::{Completion, ExecutionStrategy};

/// Scheduler command-line binary.
pub const SCHTASKS: &str = "schtasks.exe";

/// Runs commands as transient scheduled tasks.
pub struct SchedulerStrategy<L> {
    task: TaskName,
    launcher: L,
    program: String,
}

impl<L: ProcessLauncher> SchedulerStrategy<L> {
    pub fn new(task: TaskName, launcher: L) -> Self {
        Self {
            task,
            launcher,
            program: SCHTASKS.to_owned(),
        }
    }

    pub fn task(&self) -> &TaskName {
        &self.task
    }

    fn invoke(&self, args: &[&str]) -> Result<ProcessOutput> {
        let invocation = Invocation::new(
            self.program.as_str(),
            args.iter().copied(),
            StdioMode::Capture,
        );
        tracing::debug!(program = %self.program, args = ?invocation.args, "invoking scheduler");
        self.launcher
            .launch(&invocation)
            .map_err(|source| TaskExecError::Launch {
                program: self.program.clone(),
                source,
            })
    }

    /// Run a required step; a non-zero exit becomes [`TaskExecError::SchedulerStep`].
    fn required_step(&self, step: &'static str, args: &[&str]) -> Result<()> {
        let output = self.invoke(args)?;
        if output.success() {
            Ok(())
        } else {
            Err(TaskExecError::scheduler_step(
                step,
                self.task.as_str(),
                output.code,
                &output.diagnostic(),
            ))
        }
    }

    /// Delete the task, ignoring every failure.
    fn delete_quietly(&self) {
        match self.invoke(&["/delete", "/tn", self.task.as_str(), "/f"]) {
            Ok(output) if output.success() => {
                tracing::debug!(task = %self.task, "scheduled task deleted");
            }
            Ok(output) => {
                tracing::debug!(
                    task = %self.task,
                    code = output.code,
                    detail = %output.diagnostic(),
                    "scheduled task delete failed (ignored)"
                );
            }
            Err(e) => {
                tracing::debug!(
                    task = %self.task,
                    error = %e,
                    "scheduled task delete failed (ignored)"
                );
            }
        }
    }
}

impl<L: ProcessLauncher> ExecutionStrategy for SchedulerStrategy<L> {
    fn name(&self) -> &'static str {
        "scheduler"
    }

    fn execute(&self, command: &CommandLine) -> Result<Completion> {
        // A stale registration may be left over from an earlier run.
        self.delete_quietly();

        let _registration = TaskRegistration { strategy: self };

        self.required_step(
            "create",
            &[
                "/create",
                "/tn",
                self.task.as_str(),
                "/sc",
                "onstart",
                "/it",
                "/tr",
                command.as_str(),
            ],
        )?;
        tracing::info!(task = %self.task, command = %command, "scheduled task created");

        self.required_step("run", &["/run", "/tn", self.task.as_str()])?;
        tracing::info!(task = %self.task, "scheduled task triggered");

        Ok(Completion::Triggered {
            task: self.task.clone(),
        })
    }
}

/// Scoped task registration; dropping it deletes the task.
///
/// Created before the create step so a partially registered task is also
/// removed when create or run fails.
struct TaskRegistration<'a, L: ProcessLauncher> {
    strategy: &'a SchedulerStrategy<L>,
}

impl<L: ProcessLauncher> Drop for TaskRegistration<'_, L> {
    fn drop(&mut self) {
        self.strategy.delete_quietly();
    }
}
