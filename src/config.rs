//! Configuration: TOML file values merged with command-line overrides.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::command::TaskName;
use crate::error::{Result, TaskExecError};

/// Runtime configuration.
///
/// Every key can come from the config file; command-line flags win.
///
/// ```toml
/// taskname = "launch-gui"
/// logfile = "/var/log/taskexec.log"
/// debug = false
/// verbose = true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskExecConfig {
    /// Scheduled task name; the built-in default is used when unset or empty.
    pub taskname: Option<String>,
    /// Write logs to this file in addition to stderr.
    pub logfile: Option<PathBuf>,
    /// Debug-level logging.
    pub debug: bool,
    /// Info-level logging.
    pub verbose: bool,
}

/// Values supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub taskname: Option<String>,
    pub logfile: Option<PathBuf>,
    pub debug: bool,
    pub verbose: bool,
}

impl TaskExecConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            TaskExecError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        toml::from_str(&content)
            .map_err(|e| TaskExecError::Config(format!("{}: {e}", path.display())))
    }

    /// Load the explicit config file, or the default one if it exists.
    ///
    /// An explicit path must exist. A missing default file yields defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the chosen file cannot be read or parsed.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => Self::load_default_at(&crate::taskexec_dirs::config_file()),
        }
    }

    fn load_default_at(path: &Path) -> Result<Self> {
        if path.is_file() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply command-line values on top of the file values.
    ///
    /// Switches only ever turn on; an empty `--taskname` keeps the file value.
    pub fn apply_overrides(&mut self, cli: CliOverrides) {
        if let Some(name) = cli.taskname.filter(|n| !n.is_empty()) {
            self.taskname = Some(name);
        }
        if let Some(logfile) = cli.logfile {
            self.logfile = Some(logfile);
        }
        self.debug |= cli.debug;
        self.verbose |= cli.verbose;
    }

    /// Resolved task name for the scheduler strategy.
    pub fn task_name(&self) -> TaskName {
        TaskName::resolve(self.taskname.as_deref())
    }
}
