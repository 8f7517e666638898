use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use kpfind::app::{self, Deps, KdbxOpener, Options, Outcome, TotpMode, DEFAULT_FIELD};
use kpfind::config::{Config, CONFIG_FILE_NAME};
use kpfind::credentials::TtyPrompt;
use kpfind::doc;
use kpfind::output::clipboard::{self, ClipboardSink};
use kpfind::output::{DisplayFormat, OutputKind, Sink, StdoutSink};
use kpfind::search::SearchOptions;

/// kpfind - look up credentials in a KeePass database
#[derive(Parser)]
#[command(name = "kpfind")]
#[command(version)]
#[command(about = "Look up credentials in a KeePass database", long_about = None)]
#[command(after_help = "Items can be given as an absolute path (/Root/Banking/Account), \
a subpath (Banking/Account) or a bare entry name (Account).")]
struct Cli {
    /// Path to the KeePass database file
    #[arg(short = 'p', long)]
    kdbpath: Option<String>,

    /// Password file or executable printing the password (prompts if omitted)
    #[arg(short = 'w', long)]
    kdbpassword: Option<String>,

    /// Key file for the database
    #[arg(short = 'k', long)]
    keyfile: Option<PathBuf>,

    /// Path to the configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Entry to search for
    #[arg(short, long)]
    item: Option<String>,

    /// Field to retrieve
    #[arg(short = 'f', long, default_value = DEFAULT_FIELD)]
    fieldname: String,

    /// Output type (stdout or clipboard)
    #[arg(short, long)]
    out: Option<OutputKind>,

    /// Clear the clipboard after N seconds (0 disables)
    #[arg(long, value_name = "SECONDS")]
    clear_after: Option<u64>,

    /// Show all fields of the entry except the password
    #[arg(short = 'a', long)]
    show_all: bool,

    /// Print --show-all output as JSON
    #[arg(long, requires = "show_all")]
    json: bool,

    /// Match names case-sensitively
    #[arg(long)]
    case_sensitive: bool,

    /// Require names to match exactly instead of as substrings
    #[arg(short, long)]
    exact_match: bool,

    /// Output only the current TOTP code of the entry
    #[arg(short, long, conflicts_with = "password_totp")]
    totp: bool,

    /// Append the current TOTP code to the field value
    #[arg(long)]
    password_totp: bool,

    /// Print the path of the entry found
    #[arg(short, long)]
    verify: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Write an example config file to the current directory
    #[arg(long)]
    create_config: bool,

    /// Print the configuration in use
    #[arg(long)]
    print_config: bool,

    /// Show the manual page
    #[arg(short, long)]
    man: bool,

    #[arg(long, hide = true)]
    internal_clear_clipboard: bool,

    #[arg(long, hide = true, default_value_t = 0)]
    internal_clear_delay: u64,
}

impl Cli {
    fn options(&self) -> Options {
        let totp = if self.totp {
            TotpMode::Only
        } else if self.password_totp {
            TotpMode::Append
        } else {
            TotpMode::Off
        };
        Options {
            item: self.item.clone(),
            field: self.fieldname.clone(),
            database: self.kdbpath.clone(),
            password_source: self.kdbpassword.clone(),
            keyfile: self.keyfile.clone(),
            config: self.config.clone(),
            output: self.out,
            clear_after: self.clear_after,
            show_all: self.show_all,
            display: if self.json {
                DisplayFormat::Json
            } else {
                DisplayFormat::Text
            },
            search: SearchOptions {
                case_sensitive: self.case_sensitive,
                exact_match: self.exact_match,
            },
            totp,
            verify: self.verify,
        }
    }
}

fn init_logging(debug: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if debug {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.format_timestamp(None).init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    if cli.internal_clear_clipboard {
        return clipboard::run_clearer(cli.internal_clear_delay);
    }

    if cli.man {
        println!("{}", doc::man_page());
        return Ok(());
    }

    if cli.create_config {
        let path = PathBuf::from(CONFIG_FILE_NAME);
        Config::create_example(&path).context("Error creating config file")?;
        eprintln!("Example config file '{}' created successfully.", path.display());
        return Ok(());
    }

    if cli.print_config {
        let (config, source) = Config::load(cli.config.as_deref())?;
        eprint!("{}", config.describe(source.as_deref()));
        if cli.item.is_none() {
            return Ok(());
        }
    }

    let options = cli.options();
    let mut stderr = io::stderr();
    let mut deps = Deps {
        opener: &KdbxOpener,
        prompt: &TtyPrompt,
        env: &app::process_env,
        trace: &mut stderr,
    };

    match app::run(&options, &mut deps)? {
        Outcome::Details(text) => print!("{}", text),
        Outcome::Value {
            value,
            output: OutputKind::Stdout,
            ..
        } => StdoutSink::new(io::stdout().lock()).emit(&value)?,
        Outcome::Value {
            value,
            output: OutputKind::Clipboard,
            clear_after,
        } => {
            ClipboardSink::new()?.emit(&value)?;
            clipboard::spawn_clearer(clear_after, cli.debug);
        }
    }

    Ok(())
}
