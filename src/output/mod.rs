//! Delivering looked-up values to the user.
//!
//! A value either goes to stdout or to the system clipboard. Clipboard writes
//! can be followed by a detached helper process that wipes the clipboard after
//! a delay (see [`clipboard`]). The [`display`] module renders whole entries
//! for `--show-all`.

pub mod clipboard;
pub mod display;

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::config::Config;

pub use clipboard::ClipboardSink;
pub use display::{render_entry, DisplayFormat};

/// Environment variable overriding the configured output kind.
pub const OUTPUT_ENV: &str = "KPFIND_OUT";

/// Destination of a looked-up value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputKind {
    #[default]
    Stdout,
    Clipboard,
}

impl fmt::Display for OutputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputKind::Stdout => write!(f, "stdout"),
            OutputKind::Clipboard => write!(f, "clipboard"),
        }
    }
}

impl FromStr for OutputKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "stdout" => Ok(OutputKind::Stdout),
            "clipboard" => Ok(OutputKind::Clipboard),
            other => bail!("unknown output type: {}", other),
        }
    }
}

/// Picks the output kind: the flag wins, then a valid environment value,
/// then the config file.
pub fn resolve_output_kind(
    flag: Option<OutputKind>,
    env: Option<&str>,
    config: &Config,
) -> OutputKind {
    if let Some(kind) = flag {
        return kind;
    }
    if let Some(value) = env {
        match value.parse() {
            Ok(kind) => return kind,
            Err(_) => log::warn!("ignoring invalid {}={}", OUTPUT_ENV, value),
        }
    }
    config.default_output
}

/// Something a single value can be written to.
pub trait Sink {
    fn emit(&mut self, value: &str) -> Result<()>;
}

/// Writes values followed by a newline.
pub struct StdoutSink<W: Write> {
    out: W,
}

impl<W: Write> StdoutSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Sink for StdoutSink<W> {
    fn emit(&mut self, value: &str) -> Result<()> {
        writeln!(self.out, "{}", value)?;
        self.out.flush()?;
        Ok(())
    }
}
