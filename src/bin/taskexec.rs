//! CLI binary for taskexec.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use taskexec::{
    CliOverrides, CommandDispatcher, CommandLine, GENERIC_FAILURE_CODE, TaskExecConfig, logging,
};

/// Execute a command using the Windows task scheduler.
///
/// On Windows, schtasks.exe is used to /CREATE a task for the command, /RUN
/// the task, then /DELETE it. This allows GUI programs to be started from a
/// client session on the Windows OpenSSH daemon.
///
/// Elsewhere the command is executed with the shell named by SHELL,
/// defaulting to /bin/sh, and its exit code is passed through.
#[derive(Parser)]
#[command(name = "taskexec", version, about, long_about)]
struct Cli {
    /// Log filename.
    #[arg(short, long, value_name = "PATH")]
    logfile: Option<PathBuf>,

    /// Config file.
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Produce debug output.
    #[arg(long)]
    debug: bool,

    /// Increase verbosity.
    #[arg(short, long)]
    verbose: bool,

    /// Task name.
    #[arg(short, long, value_name = "NAME")]
    taskname: Option<String>,

    /// Command and arguments, joined with spaces.
    #[arg(
        value_name = "COMMAND",
        required = true,
        num_args = 1..,
        trailing_var_arg = true
    )]
    command: Vec<String>,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            // --help and --version are reported on stdout and are not failures.
            return if e.use_stderr() {
                ExitCode::from(failure_code())
            } else {
                ExitCode::SUCCESS
            };
        }
    };
    match run(cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(failure_code())
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<u8> {
    let mut config = TaskExecConfig::load(cli.config.as_deref()).context("loading config")?;
    config.apply_overrides(CliOverrides {
        taskname: cli.taskname,
        logfile: cli.logfile,
        debug: cli.debug,
        verbose: cli.verbose,
    });

    // Held until exit so buffered file logs are flushed.
    let _log_guard = logging::init(&config)?;

    let command = CommandLine::from_args(&cli.command)?;
    let dispatcher = CommandDispatcher::for_host(&config);
    tracing::debug!(strategy = dispatcher.strategy_name(), "dispatcher ready");

    let completion = dispatcher.execute(&command).map_err(|e| {
        tracing::error!(error = %e, "command dispatch failed");
        e
    })?;

    let code = completion.exit_code();
    tracing::debug!(code, "command finished");
    Ok(u8::try_from(code).unwrap_or_else(|_| (code & 0xff) as u8))
}

fn failure_code() -> u8 {
    u8::try_from(GENERIC_FAILURE_CODE).unwrap_or(1)
}
