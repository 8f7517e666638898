//! Configuration system for kpfind.
//!
//! Settings live in a TOML file. Every key is optional; whatever is missing
//! falls back to the defaults below, and command-line flags and environment
//! variables take precedence over anything set here.
//!
//! # Example
//!
//! ```
//! use kpfind::config::Config;
//! use kpfind::output::OutputKind;
//!
//! let config: Config = toml::from_str(r#"
//!     database_path = "/home/me/secrets.kdbx"
//!     default_output = "clipboard"
//! "#).unwrap();
//!
//! assert_eq!(config.database_path.as_deref(), Some("/home/me/secrets.kdbx"));
//! assert_eq!(config.default_output, OutputKind::Clipboard);
//! assert_eq!(config.clear_after, 20);
//! ```

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::output::OutputKind;

/// Name of the config file looked up in the working directory and the
/// per-user config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Configuration for kpfind.
///
/// # Fields
///
/// * `database_path` - Default KDBX file to open
/// * `default_output` - Where the looked-up value goes: "stdout" or "clipboard" (default: stdout)
/// * `password_file` - File (or named pipe) holding the database password
/// * `password_executable` - Program printing the database password on stdout
/// * `clear_after` - Seconds until the clipboard is cleared, 0 disables (default: 20)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_path: Option<String>,

    #[serde(default)]
    pub default_output: OutputKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_file: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_executable: Option<String>,

    /// Seconds until a copied value is wiped from the clipboard
    #[serde(default = "default_clear_after")]
    pub clear_after: u64,
}

/// Returns the default clipboard clearing delay.
fn default_clear_after() -> u64 {
    20
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: None,
            default_output: OutputKind::default(),
            password_file: None,
            password_executable: None,
            clear_after: default_clear_after(),
        }
    }
}

impl Config {
    /// Returns the per-user config file path.
    ///
    /// Uses `~/.config/kpfind/config.toml` on all platforms.
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|mut path| {
            path.push(".config");
            path.push("kpfind");
            path.push(CONFIG_FILE_NAME);
            path
        })
    }

    /// Finds the file [`Config::load`] would read when no path is given.
    pub fn discover() -> Option<PathBuf> {
        let local = PathBuf::from(CONFIG_FILE_NAME);
        if local.exists() {
            return Some(local);
        }
        Self::config_path().filter(|path| path.exists())
    }

    /// Loads the configuration.
    ///
    /// An explicit path must exist. Without one, `./config.toml` and then the
    /// per-user file are tried, and the defaults are used if neither exists.
    /// Returns the config together with the file it came from.
    pub fn load(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>)> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => match Self::discover() {
                Some(path) => path,
                None => {
                    log::debug!("no config file found, using defaults");
                    return Ok((Self::default(), None));
                }
            },
        };

        let config = Self::load_from(&path)?;
        Ok((config, Some(path)))
    }

    /// Reads and parses a specific config file.
    pub fn load_from(path: &Path) -> Result<Self> {
        log::debug!("loading config from {}", path.display());
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        log::debug!("loaded config: {:?}", config);
        Ok(config)
    }

    /// Writes an example configuration with placeholder values to `path`.
    ///
    /// Refuses to overwrite an existing file.
    pub fn create_example(path: &Path) -> Result<()> {
        if path.exists() {
            bail!("{} already exists", path.display());
        }
        let example = Config {
            database_path: Some("/path/to/your/database.kdbx".to_string()),
            default_output: OutputKind::Stdout,
            password_file: Some("/path/to/your/password.txt".to_string()),
            password_executable: Some("[/path/to/your/]password_executable.sh".to_string()),
            clear_after: default_clear_after(),
        };
        let toml_string = toml::to_string_pretty(&example)?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, toml_string)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    /// Renders the configuration for `--print-config`.
    pub fn describe(&self, source: Option<&Path>) -> String {
        let source = source
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "(defaults)".to_string());
        let unset = "(not set)";
        let line = "-".repeat(42);
        format!(
            "Current used Configuration: {source}\n{line}\n\
             Database Path: {}\n\
             Default Output: {}\n\
             Password File: {}\n\
             Password Executable: {}\n\
             Clear After: {}s\n{line}\n",
            self.database_path.as_deref().unwrap_or(unset),
            self.default_output,
            self.password_file.as_deref().unwrap_or(unset),
            self.password_executable.as_deref().unwrap_or(unset),
            self.clear_after,
        )
    }
}
