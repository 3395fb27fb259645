//! Error types for command dispatch.

use std::io;

/// Top-level error type for taskexec.
///
/// A child process exiting non-zero is not an error; that is reported
/// through [`Completion`](crate::strategy::Completion). Only failures that
/// prevent a command from being dispatched end up here.
#[derive(Debug, thiserror::Error)]
pub enum TaskExecError {
    /// An external program (shell or scheduler) could not be started or waited on.
    #[error("failed to launch `{program}`: {source}")]
    Launch {
        program: String,
        #[source]
        source: io::Error,
    },

    /// A scheduler helper invocation ran but reported failure.
    #[error("scheduler {step} failed for task `{task}` (exit code {code}){detail}")]
    SchedulerStep {
        step: &'static str,
        task: String,
        code: i32,
        /// Trimmed helper output, prefixed with `: ` when non-empty.
        detail: String,
    },

    /// No command words were given.
    #[error("no command given")]
    EmptyCommand,

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl TaskExecError {
    /// Build a [`TaskExecError::SchedulerStep`] from captured helper output.
    pub(crate) fn scheduler_step(step: &'static str, task: &str, code: i32, output: &str) -> Self {
        let trimmed = output.trim();
        let detail = if trimmed.is_empty() {
            String::new()
        } else {
            format!(": {trimmed}")
        };
        Self::SchedulerStep {
            step,
            task: task.to_owned(),
            code,
            detail,
        }
    }
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, TaskExecError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scheduler_step_without_output_has_no_detail() {
        let err = TaskExecError::scheduler_step("create", "demo", 1, "  \n");
        assert_eq!(
            err.to_string(),
            "scheduler create failed for task `demo` (exit code 1)"
        );
    }

    #[test]
    fn scheduler_step_includes_trimmed_output() {
        let err = TaskExecError::scheduler_step("run", "demo", 1, "ERROR: Access is denied.\r\n");
        assert_eq!(
            err.to_string(),
            "scheduler run failed for task `demo` (exit code 1): ERROR: Access is denied."
        );
    }

    #[test]
    fn launch_error_names_program() {
        let err = TaskExecError::Launch {
            program: "/no/such/shell".to_owned(),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        assert!(err.to_string().contains("/no/such/shell"));
    }
}
