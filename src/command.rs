//! Command line and task name values handed to the execution strategies.

use std::fmt;

use crate::error::{Result, TaskExecError};

/// Task name used when none is configured.
pub const DEFAULT_TASK_NAME: &str = "b62a95c5-3b0e-4c3d-aceb-fdf20308e3c3";

/// The command to execute: all positional arguments joined by single spaces.
///
/// The text is never parsed; it is passed verbatim to the shell or to the
/// scheduler's task action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine(String);

impl CommandLine {
    /// Join `args` with single spaces.
    ///
    /// # Errors
    ///
    /// Returns [`TaskExecError::EmptyCommand`] when `args` is empty.
    pub fn from_args<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut joined = String::new();
        let mut count = 0usize;
        for arg in args {
            if count > 0 {
                joined.push(' ');
            }
            joined.push_str(arg.as_ref());
            count += 1;
        }
        if count == 0 {
            return Err(TaskExecError::EmptyCommand);
        }
        Ok(Self(joined))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Name of the transient scheduled task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskName(String);

impl TaskName {
    /// Use `configured` when present and non-empty, else [`DEFAULT_TASK_NAME`].
    pub fn resolve(configured: Option<&str>) -> Self {
        match configured {
            Some(name) if !name.is_empty() => Self(name.to_owned()),
            _ => Self::default(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TaskName {
    fn default() -> Self {
        Self(DEFAULT_TASK_NAME.to_owned())
    }
}

impl fmt::Display for TaskName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn joins_args_with_single_spaces_in_order() {
        let cmd = CommandLine::from_args(["echo", "hi", "there"]).unwrap();
        assert_eq!(cmd.as_str(), "echo hi there");
    }

    #[test]
    fn single_arg_is_kept_verbatim() {
        let cmd = CommandLine::from_args(["ls -la | wc -l"]).unwrap();
        assert_eq!(cmd.as_str(), "ls -la | wc -l");
    }

    #[test]
    fn empty_args_are_rejected() {
        let result = CommandLine::from_args(Vec::<String>::new());
        assert!(matches!(result, Err(TaskExecError::EmptyCommand)));
    }

    #[test]
    fn empty_string_args_still_join() {
        // Words are not trimmed or filtered.
        let cmd = CommandLine::from_args(["a", "", "b"]).unwrap();
        assert_eq!(cmd.as_str(), "a  b");
    }

    #[test]
    fn task_name_defaults_when_unset_or_empty() {
        assert_eq!(TaskName::resolve(None).as_str(), DEFAULT_TASK_NAME);
        assert_eq!(TaskName::resolve(Some("")).as_str(), DEFAULT_TASK_NAME);
    }

    #[test]
    fn task_name_uses_configured_value() {
        assert_eq!(TaskName::resolve(Some("launch-gui")).as_str(), "launch-gui");
    }
}
