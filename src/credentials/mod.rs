//! Where the database and its password come from.
//!
//! Both are resolved through a fixed precedence chain: command-line flag,
//! then environment variable, then config file. The password may finally be
//! asked for interactively.

use std::fs::{self, Metadata};
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{bail, Context, Result};

use crate::config::Config;

/// Environment variable naming the database file.
pub const DB_PATH_ENV: &str = "KPFIND_KDBPATH";
/// Environment variable naming the password file or executable.
pub const PASSWORD_ENV: &str = "KPFIND_KDBPASSWORD";

/// Asks the user for the database password.
pub trait PasswordPrompt {
    fn prompt(&self, message: &str) -> io::Result<String>;
}

/// Reads the password from the terminal without echoing it.
pub struct TtyPrompt;

impl PasswordPrompt for TtyPrompt {
    fn prompt(&self, message: &str) -> io::Result<String> {
        rpassword::prompt_password(message)
    }
}

/// Picks the database path: flag, then environment, then config.
pub fn resolve_database_path(
    flag: Option<&str>,
    env: Option<&str>,
    config: &Config,
) -> Option<String> {
    [flag, env, config.database_path.as_deref()]
        .into_iter()
        .flatten()
        .find(|path| !path.is_empty())
        .map(str::to_string)
}

/// Resolves the database password.
///
/// The first non-empty of flag, environment, `password_file` and
/// `password_executable` names the source. Executables (looked up on `PATH`
/// when given a bare name) are run and their stdout used; named pipes and
/// regular files are read. Without any source the user is prompted.
pub fn resolve_password(
    flag: Option<&str>,
    env: Option<&str>,
    config: &Config,
    prompt: &dyn PasswordPrompt,
) -> Result<String> {
    let source = [
        flag,
        env,
        config.password_file.as_deref(),
        config.password_executable.as_deref(),
    ]
    .into_iter()
    .flatten()
    .find(|source| !source.is_empty());

    let password = match source {
        Some(source) => {
            log::debug!("password source: {}", source);
            read_password_from(source)?
        }
        None => {
            let answer = prompt
                .prompt("Enter password: ")
                .context("Failed to read password from terminal")?;
            let answer = answer.trim().to_string();
            if answer.is_empty() {
                bail!("no password entered");
            }
            answer
        }
    };
    log::debug!("resolved password: {}", "*".repeat(password.chars().count()));
    Ok(password)
}

fn read_password_from(source: &str) -> Result<String> {
    read_password_at(&locate_source(source, dirs::home_dir().as_deref()))
}

/// Turns a password source into a path: bare command names are looked up on
/// `PATH`, anything else has a leading `~` expanded.
fn locate_source(source: &str, home: Option<&Path>) -> PathBuf {
    find_executable_in_path(source).unwrap_or_else(|| expand_home_in(Path::new(source), home))
}

fn read_password_at(path: &Path) -> Result<String> {
    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) => {
            log::debug!("password source {}: {}", path.display(), e);
            bail!("password must be provided via file or executable");
        }
    };

    if is_named_pipe(&metadata) || (metadata.is_file() && !is_executable(&metadata)) {
        let data = fs::read_to_string(path)
            .with_context(|| format!("Failed to read password from {}", path.display()))?;
        return Ok(data.trim().to_string());
    }
    if metadata.is_file() {
        let output = Command::new(path)
            .output()
            .with_context(|| format!("Failed to run {}", path.display()))?;
        if !output.status.success() {
            bail!("{} exited with {}", path.display(), output.status);
        }
        return Ok(String::from_utf8_lossy(&output.stdout).trim().to_string());
    }
    bail!("password must be provided via file or executable")
}

/// Searches `PATH` for a bare command name.
fn find_executable_in_path(name: &str) -> Option<PathBuf> {
    if name.contains(std::path::MAIN_SEPARATOR) || name.contains('/') {
        return None;
    }
    let paths = std::env::var_os("PATH")?;
    std::env::split_paths(&paths)
        .map(|dir| dir.join(name))
        .find(|candidate| {
            fs::metadata(candidate)
                .map(|m| m.is_file() && is_executable(&m))
                .unwrap_or(false)
        })
}

#[cfg(unix)]
fn is_executable(metadata: &Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & 0o111 != 0
}

#[cfg(not(unix))]
fn is_executable(_metadata: &Metadata) -> bool {
    false
}

#[cfg(unix)]
fn is_named_pipe(metadata: &Metadata) -> bool {
    use std::os::unix::fs::FileTypeExt;
    metadata.file_type().is_fifo()
}

#[cfg(not(unix))]
fn is_named_pipe(_metadata: &Metadata) -> bool {
    false
}

/// Resolves a path given on the command line or in the config, expanding a
/// leading `~`.
pub fn expand_home(path: impl AsRef<Path>) -> PathBuf {
    expand_home_in(path.as_ref(), dirs::home_dir().as_deref())
}

fn expand_home_in(path: &Path, home: Option<&Path>) -> PathBuf {
    match (path.strip_prefix("~"), home) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}
