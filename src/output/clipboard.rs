//! System clipboard output and delayed clearing.

use std::process::{Command, Stdio};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use arboard::Clipboard;

use super::Sink;

/// Hidden flag that turns the binary into the clipboard clearing helper.
pub const CLEAR_FLAG: &str = "--internal-clear-clipboard";
/// Hidden flag carrying the helper's delay in seconds.
pub const DELAY_FLAG: &str = "--internal-clear-delay";

/// Copies values to the system clipboard.
pub struct ClipboardSink {
    clipboard: Clipboard,
}

impl ClipboardSink {
    pub fn new() -> Result<Self> {
        let clipboard = Clipboard::new().context("Failed to initialize clipboard")?;
        Ok(Self { clipboard })
    }
}

impl Sink for ClipboardSink {
    fn emit(&mut self, value: &str) -> Result<()> {
        log::debug!("copying {} characters to clipboard", value.chars().count());
        self.clipboard
            .set_text(value.to_string())
            .context("Failed to write to clipboard")
    }
}

/// Arguments for the detached helper process.
pub fn clearer_args(delay_secs: u64, debug: bool) -> Vec<String> {
    let mut args = vec![
        CLEAR_FLAG.to_string(),
        DELAY_FLAG.to_string(),
        delay_secs.to_string(),
    ];
    if debug {
        args.push("--debug".to_string());
    }
    args
}

/// Starts a detached copy of this executable that clears the clipboard after
/// `delay_secs`. Does nothing for a zero delay.
///
/// Failures only produce a warning: the value has already been copied.
pub fn spawn_clearer(delay_secs: u64, debug: bool) {
    if delay_secs == 0 {
        return;
    }
    let executable = match std::env::current_exe() {
        Ok(path) => path,
        Err(e) => {
            log::warn!("could not locate executable to start clipboard clearer: {}", e);
            return;
        }
    };

    let spawned = Command::new(executable)
        .args(clearer_args(delay_secs, debug))
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn();
    match spawned {
        Ok(child) => log::debug!(
            "clipboard clearer started (pid {}), clearing in {}s",
            child.id(),
            delay_secs
        ),
        Err(e) => log::warn!("failed to start clipboard clearer: {}", e),
    }
}

/// Body of the helper process: waits, then empties the clipboard.
pub fn run_clearer(delay_secs: u64) -> Result<()> {
    thread::sleep(Duration::from_secs(delay_secs));
    let mut clipboard = Clipboard::new().context("Failed to initialize clipboard")?;
    clipboard.clear().context("Failed to clear clipboard")?;
    log::debug!("clipboard cleared");
    Ok(())
}
