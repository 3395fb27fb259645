//! Platform detection and command dispatch.

use crate::command::CommandLine;
use crate::config::TaskExecConfig;
use crate::error::Result;
use crate::launcher::{ProcessLauncher, SystemLauncher};
use crate::strategy::{Completion, ExecutionStrategy, SchedulerStrategy, ShellStrategy};

/// Which execution strategy the host supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Host exposes a task scheduler (Windows).
    TaskScheduler,
    /// Any other host: commands go through a shell.
    Shell,
}

impl Platform {
    /// Detect the current host.
    pub fn detect() -> Self {
        if cfg!(windows) {
            Self::TaskScheduler
        } else {
            Self::Shell
        }
    }
}

/// Runs a command with the strategy chosen at construction.
pub struct CommandDispatcher {
    strategy: Box<dyn ExecutionStrategy>,
}

impl CommandDispatcher {
    /// Wrap an existing strategy.
    pub fn new(strategy: Box<dyn ExecutionStrategy>) -> Self {
        Self { strategy }
    }

    /// Build the dispatcher for this host using real processes.
    pub fn for_host(config: &TaskExecConfig) -> Self {
        Self::for_platform(Platform::detect(), config, SystemLauncher)
    }

    /// Build the dispatcher for `platform` with the given launcher.
    ///
    /// The shell strategy reads `SHELL` here, once.
    pub fn for_platform<L>(platform: Platform, config: &TaskExecConfig, launcher: L) -> Self
    where
        L: ProcessLauncher + 'static,
    {
        let strategy: Box<dyn ExecutionStrategy> = match platform {
            Platform::TaskScheduler => {
                Box::new(SchedulerStrategy::new(config.task_name(), launcher))
            }
            Platform::Shell => Box::new(ShellStrategy::from_env(launcher)),
        };
        Self::new(strategy)
    }

    /// Name of the selected strategy.
    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Execute `command`.
    ///
    /// # Errors
    ///
    /// Returns an error when the command could not be dispatched. A command
    /// that ran and exited non-zero is `Ok(Completion::Exited(code))`.
    pub fn execute(&self, command: &CommandLine) -> Result<Completion> {
        tracing::info!(strategy = self.strategy.name(), command = %command, "dispatching command");
        self.strategy.execute(command)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use std::sync::Arc;

    use super::*;
    use crate::command::DEFAULT_TASK_NAME;
    use crate::launcher::{Invocation, ProcessOutput};
    use crate::strategy::testing::FakeLauncher;

    /// Lets a test keep a handle on the fake after it moves into the dispatcher.
    struct Shared(Arc<FakeLauncher>);

    impl ProcessLauncher for Shared {
        fn launch(&self, invocation: &Invocation) -> std::io::Result<ProcessOutput> {
            self.0.launch(invocation)
        }
    }

    #[test]
    fn detect_matches_target_os() {
        let expected = if cfg!(windows) {
            Platform::TaskScheduler
        } else {
            Platform::Shell
        };
        assert_eq!(Platform::detect(), expected);
    }

    #[test]
    fn scheduler_platform_uses_config_task_name() {
        let fake = Arc::new(FakeLauncher::new());
        let config = TaskExecConfig {
            taskname: Some("from-config".to_owned()),
            ..TaskExecConfig::default()
        };
        let dispatcher =
            CommandDispatcher::for_platform(Platform::TaskScheduler, &config, Shared(fake.clone()));
        assert_eq!(dispatcher.strategy_name(), "scheduler");

        let command = CommandLine::from_args(["notepad.exe"]).unwrap();
        let done = dispatcher.execute(&command).unwrap();
        assert_eq!(done.exit_code(), 0);
        assert!(
            fake.calls()
                .iter()
                .all(|c| c.args.iter().any(|a| a == "from-config"))
        );
    }

    #[test]
    fn scheduler_platform_defaults_task_name() {
        let fake = Arc::new(FakeLauncher::new());
        let dispatcher = CommandDispatcher::for_platform(
            Platform::TaskScheduler,
            &TaskExecConfig::default(),
            Shared(fake.clone()),
        );

        let command = CommandLine::from_args(["notepad.exe"]).unwrap();
        dispatcher.execute(&command).unwrap();
        assert!(
            fake.calls()
                .iter()
                .all(|c| c.args.iter().any(|a| a == DEFAULT_TASK_NAME))
        );
    }

    #[test]
    fn shell_platform_selects_shell_strategy() {
        let dispatcher = CommandDispatcher::for_platform(
            Platform::Shell,
            &TaskExecConfig::default(),
            FakeLauncher::new(),
        );
        assert_eq!(dispatcher.strategy_name(), "shell");
    }
}
