//! The lookup flow behind the command line.
//!
//! [`run`] turns [`Options`] into an [`Outcome`]: it loads the config,
//! resolves the database and password, opens the database, searches it and
//! picks the value to print or copy. Opening the database, prompting for a
//! password and reading environment variables go through [`Deps`] so the
//! whole flow can be exercised against an in-memory tree.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};

use crate::config::Config;
use crate::credentials::{self, expand_home, PasswordPrompt, DB_PATH_ENV, PASSWORD_ENV};
use crate::output::{self, render_entry, DisplayFormat, OutputKind, OUTPUT_ENV};
use crate::search::{Finder, SearchOptions, SearchResult};
use crate::totp::{self, TOTP_SECRET_FIELD};
use crate::vault::{self, Group};

/// Field printed when none is requested.
pub const DEFAULT_FIELD: &str = "Password";

/// What to do with the TOTP seed of the found entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TotpMode {
    /// Ignore it.
    #[default]
    Off,
    /// Output only the current code.
    Only,
    /// Append the current code to the requested field.
    Append,
}

/// Everything a single lookup needs from the command line.
#[derive(Debug, Clone)]
pub struct Options {
    pub item: Option<String>,
    pub field: String,
    pub database: Option<String>,
    pub password_source: Option<String>,
    pub keyfile: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub output: Option<OutputKind>,
    pub clear_after: Option<u64>,
    pub show_all: bool,
    pub display: DisplayFormat,
    pub search: SearchOptions,
    pub totp: TotpMode,
    pub verify: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            item: None,
            field: DEFAULT_FIELD.to_string(),
            database: None,
            password_source: None,
            keyfile: None,
            config: None,
            output: None,
            clear_after: None,
            show_all: false,
            display: DisplayFormat::default(),
            search: SearchOptions::default(),
            totp: TotpMode::default(),
            verify: false,
        }
    }
}

/// The result of a successful lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A single value for the configured output.
    Value {
        value: String,
        output: OutputKind,
        clear_after: u64,
    },
    /// A rendered entry, always printed to stdout.
    Details(String),
}

/// Opens a database file and returns its root group.
pub trait VaultOpener {
    fn open(&self, path: &Path, password: &str, keyfile: Option<&Path>) -> Result<Group>;
}

/// Opens KDBX files from disk.
pub struct KdbxOpener;

impl VaultOpener for KdbxOpener {
    fn open(&self, path: &Path, password: &str, keyfile: Option<&Path>) -> Result<Group> {
        vault::loader::open_database(path, password, keyfile)
    }
}

/// External collaborators of [`run`].
pub struct Deps<'d> {
    pub opener: &'d dyn VaultOpener,
    pub prompt: &'d dyn PasswordPrompt,
    pub env: &'d dyn Fn(&str) -> Option<String>,
    /// Receives the `--verify` trace.
    pub trace: &'d mut dyn Write,
}

/// Reads variables from the process environment.
pub fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}

/// Performs one lookup.
pub fn run(options: &Options, deps: &mut Deps<'_>) -> Result<Outcome> {
    let item = match options.item.as_deref() {
        Some(item) if !item.is_empty() => item,
        _ => bail!("item parameter is required"),
    };
    log::debug!("looking up item {:?}", item);

    let config = match Config::load(options.config.as_deref()) {
        Ok((config, _)) => config,
        Err(e) => {
            log::warn!("could not load config file: {:#}", e);
            Config::default()
        }
    };

    let env_db = (deps.env)(DB_PATH_ENV);
    let database = credentials::resolve_database_path(
        options.database.as_deref(),
        env_db.as_deref(),
        &config,
    )
    .ok_or_else(|| anyhow!("no KeePass database path provided"))?;
    let database = expand_home(&database);
    log::debug!("resolved database path: {}", database.display());

    let env_password = (deps.env)(PASSWORD_ENV);
    let password = credentials::resolve_password(
        options.password_source.as_deref(),
        env_password.as_deref(),
        &config,
        deps.prompt,
    )
    .context("Error getting password")?;

    let keyfile = options.keyfile.as_deref().map(expand_home);
    let root = deps
        .opener
        .open(&database, &password, keyfile.as_deref())
        .context("Error opening database")?;

    let finder = Finder::new(&root)
        .with_options(options.search)
        .with_verify(options.verify);
    let results = finder
        .find_traced(item, &mut *deps.trace)
        .context("Error searching for item")?;
    let found = single_result(&results)?;

    if options.show_all {
        return Ok(Outcome::Details(render_entry(found.entry, options.display)?));
    }

    let value = select_value(found, &options.field, options.totp)?;
    let env_output = (deps.env)(OUTPUT_ENV);
    Ok(Outcome::Value {
        value,
        output: output::resolve_output_kind(options.output, env_output.as_deref(), &config),
        clear_after: options.clear_after.unwrap_or(config.clear_after),
    })
}

/// Accepts exactly one result; zero or several are reported as errors.
pub fn single_result<'r, 'a>(results: &'r [SearchResult<'a>]) -> Result<&'r SearchResult<'a>> {
    match results {
        [] => bail!("no items found"),
        [only] => Ok(only),
        many => {
            let listing: Vec<String> = many.iter().map(|r| format!("- {}", r.path)).collect();
            bail!("multiple items found:\n{}", listing.join("\n"))
        }
    }
}

/// Picks the value to output for the found entry.
pub fn select_value(found: &SearchResult<'_>, field: &str, mode: TotpMode) -> Result<String> {
    match mode {
        TotpMode::Only => {
            let secret = found
                .get_field(TOTP_SECRET_FIELD)
                .map_err(|_| anyhow!("entry {} has no TOTP secret", found.path))?;
            totp::generate_now(secret).context("Error generating TOTP token")
        }
        TotpMode::Append => {
            let value = found.get_field(field).context("Error getting field")?;
            match found.get_field(TOTP_SECRET_FIELD) {
                Ok(secret) => {
                    let code = totp::generate_now(secret).context("Error generating TOTP token")?;
                    Ok(format!("{}{}", value, code))
                }
                Err(_) => Ok(value.to_string()),
            }
        }
        TotpMode::Off => Ok(found
            .get_field(field)
            .context("Error getting field")?
            .to_string()),
    }
}
