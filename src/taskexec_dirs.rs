//! Configuration directory paths for taskexec.
//!
//! Uses the [`dirs`] crate for platform-appropriate resolution:
//!
//! | Platform | Config directory |
//! |----------|------------------|
//! | Linux | `~/.config/taskexec/` |
//! | macOS | `~/Library/Application Support/taskexec/` |
//! | Windows | `%APPDATA%\taskexec\` |
//!
//! Override with the `TASKEXEC_CONFIG_DIR` environment variable.

use std::ffi::OsStr;
use std::path::PathBuf;

/// Environment variable overriding [`config_dir`].
pub const CONFIG_DIR_ENV: &str = "TASKEXEC_CONFIG_DIR";

/// Application config directory.
///
/// An empty `TASKEXEC_CONFIG_DIR` counts as unset.
#[must_use]
pub fn config_dir() -> PathBuf {
    config_dir_with(std::env::var_os(CONFIG_DIR_ENV).as_deref())
}

fn config_dir_with(override_dir: Option<&OsStr>) -> PathBuf {
    if let Some(dir) = override_dir.filter(|d| !d.is_empty()) {
        return PathBuf::from(dir);
    }
    dirs::config_dir()
        .map(|d| d.join("taskexec"))
        .unwrap_or_else(|| std::env::temp_dir().join("taskexec-config"))
}

/// Default config file path (`config_dir()/config.toml`).
#[must_use]
pub fn config_file() -> PathBuf {
    config_dir().join("config.toml")
}
