//! End-to-end tests of the lookup flow against an in-memory database.

use std::cell::RefCell;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use kpfind::app::{run, Deps, Options, Outcome, TotpMode, VaultOpener};
use kpfind::credentials::PasswordPrompt;
use kpfind::output::{DisplayFormat, OutputKind};
use kpfind::search::SearchOptions;
use kpfind::totp::TOTP_SECRET_FIELD;
use kpfind::vault::{Entry, Group};
use tempfile::TempDir;

struct MemoryVault {
    root: Group,
    expected_password: &'static str,
    opened: RefCell<Option<PathBuf>>,
    keyfile: RefCell<Option<PathBuf>>,
}

impl VaultOpener for MemoryVault {
    fn open(&self, path: &Path, password: &str, keyfile: Option<&Path>) -> Result<Group> {
        if password != self.expected_password {
            bail!("invalid credentials");
        }
        *self.opened.borrow_mut() = Some(path.to_path_buf());
        *self.keyfile.borrow_mut() = keyfile.map(Path::to_path_buf);
        Ok(self.root.clone())
    }
}

struct NoPrompt;

impl PasswordPrompt for NoPrompt {
    fn prompt(&self, _message: &str) -> io::Result<String> {
        Err(io::Error::new(io::ErrorKind::Other, "no terminal in tests"))
    }
}

struct Fixture {
    _dir: TempDir,
    config: PathBuf,
    vault: MemoryVault,
}

fn fixture() -> Fixture {
    let dir = TempDir::new().unwrap();
    let password_file = dir.path().join("pw.txt");
    std::fs::write(&password_file, "letmein\n").unwrap();

    let config = dir.path().join("config.toml");
    std::fs::write(
        &config,
        format!(
            "database_path = \"/vaults/main.kdbx\"\npassword_file = \"{}\"\nclear_after = 7\n",
            password_file.display()
        ),
    )
    .unwrap();

    let root = Group::new("Root")
        .with_group(
            Group::new("Banking").with_entry(
                Entry::new()
                    .with_field("Title", "Account")
                    .with_field("UserName", "tester")
                    .with_field("Password", "s3cret")
                    .with_field("Pin", "4711"),
            ),
        )
        .with_group(
            Group::new("Web")
                .with_entry(
                    Entry::new()
                        .with_field("Title", "mail")
                        .with_field("Password", "mailpw")
                        .with_field(TOTP_SECRET_FIELD, "JBSWY3DPEHPK3PXP"),
                )
                .with_entry(Entry::new().with_field("Title", "mail backup")),
        );

    Fixture {
        _dir: dir,
        config,
        vault: MemoryVault {
            root,
            expected_password: "letmein",
            opened: RefCell::new(None),
            keyfile: RefCell::new(None),
        },
    }
}

fn options(fixture: &Fixture, item: &str) -> Options {
    Options {
        item: Some(item.to_string()),
        config: Some(fixture.config.clone()),
        ..Options::default()
    }
}

fn no_env(_name: &str) -> Option<String> {
    None
}

fn lookup(fixture: &Fixture, options: &Options) -> (Result<Outcome>, String) {
    lookup_with_env(fixture, options, &no_env)
}

fn lookup_with_env(
    fixture: &Fixture,
    options: &Options,
    env: &dyn Fn(&str) -> Option<String>,
) -> (Result<Outcome>, String) {
    let mut trace = Vec::new();
    let result = {
        let mut deps = Deps {
            opener: &fixture.vault,
            prompt: &NoPrompt,
            env,
            trace: &mut trace,
        };
        run(options, &mut deps)
    };
    (result, String::from_utf8(trace).unwrap())
}

#[test]
fn test_password_lookup_uses_config() {
    let fixture = fixture();
    let (result, trace) = lookup(&fixture, &options(&fixture, "/Root/Banking/Account"));

    assert_eq!(
        result.unwrap(),
        Outcome::Value {
            value: "s3cret".to_string(),
            output: OutputKind::Stdout,
            clear_after: 7,
        }
    );
    assert!(trace.is_empty());
    assert_eq!(
        fixture.vault.opened.borrow().as_deref(),
        Some(Path::new("/vaults/main.kdbx"))
    );
}

#[test]
fn test_requested_field_and_output() {
    let fixture = fixture();
    let opts = Options {
        field: "username".to_string(),
        output: Some(OutputKind::Clipboard),
        clear_after: Some(0),
        ..options(&fixture, "Banking/Account")
    };

    let (result, _) = lookup(&fixture, &opts);
    assert_eq!(
        result.unwrap(),
        Outcome::Value {
            value: "tester".to_string(),
            output: OutputKind::Clipboard,
            clear_after: 0,
        }
    );
}

#[test]
fn test_environment_overrides_config() {
    let fixture = fixture();
    let env = |name: &str| match name {
        "KPFIND_KDBPATH" => Some("/env/other.kdbx".to_string()),
        "KPFIND_OUT" => Some("clipboard".to_string()),
        _ => None,
    };

    let (result, _) = lookup_with_env(&fixture, &options(&fixture, "Account"), &env);

    match result.unwrap() {
        Outcome::Value { output, .. } => assert_eq!(output, OutputKind::Clipboard),
        other => panic!("unexpected outcome {:?}", other),
    }
    assert_eq!(
        fixture.vault.opened.borrow().as_deref(),
        Some(Path::new("/env/other.kdbx"))
    );
}

#[test]
fn test_keyfile_under_home_is_expanded() {
    let fixture = fixture();
    let opts = Options {
        keyfile: Some(PathBuf::from("~/keys/main.key")),
        ..options(&fixture, "Account")
    };

    let (result, _) = lookup(&fixture, &opts);
    assert!(result.is_ok());
    let expected = match dirs::home_dir() {
        Some(home) => home.join("keys").join("main.key"),
        None => PathBuf::from("~/keys/main.key"),
    };
    assert_eq!(fixture.vault.keyfile.borrow().as_deref(), Some(expected.as_path()));
}

#[test]
fn test_absolute_keyfile_is_passed_through() {
    let fixture = fixture();
    let opts = Options {
        keyfile: Some(PathBuf::from("/keys/main.key")),
        ..options(&fixture, "Account")
    };

    let (result, _) = lookup(&fixture, &opts);
    assert!(result.is_ok());
    assert_eq!(
        fixture.vault.keyfile.borrow().as_deref(),
        Some(Path::new("/keys/main.key"))
    );
}

#[test]
fn test_verify_writes_trace() {
    let fixture = fixture();
    let opts = Options {
        verify: true,
        ..options(&fixture, "account")
    };

    let (result, trace) = lookup(&fixture, &opts);
    assert!(result.is_ok());
    assert_eq!(trace, "Found one entry: /Root/Banking/Account\n");
}

#[test]
fn test_ambiguous_item_lists_paths() {
    let fixture = fixture();
    let (result, _) = lookup(&fixture, &options(&fixture, "mail"));

    let message = result.unwrap_err().to_string();
    assert_eq!(
        message,
        "multiple items found:\n- /Root/Web/mail\n- /Root/Web/mail backup"
    );
}

#[test]
fn test_exact_match_disambiguates() {
    let fixture = fixture();
    let opts = Options {
        search: SearchOptions {
            case_sensitive: false,
            exact_match: true,
        },
        ..options(&fixture, "mail")
    };

    let (result, _) = lookup(&fixture, &opts);
    match result.unwrap() {
        Outcome::Value { value, .. } => assert_eq!(value, "mailpw"),
        other => panic!("unexpected outcome {:?}", other),
    }
}

#[test]
fn test_unknown_item() {
    let fixture = fixture();
    let (result, _) = lookup(&fixture, &options(&fixture, "/Root/Banking/Nope"));
    assert_eq!(result.unwrap_err().to_string(), "no items found");
}

#[test]
fn test_search_error_is_reported() {
    let fixture = fixture();
    let (result, _) = lookup(&fixture, &options(&fixture, "/Root/Nope/Account"));

    let err = result.unwrap_err();
    assert_eq!(err.to_string(), "Error searching for item");
    assert_eq!(
        err.root_cause().to_string(),
        "group not found: Nope"
    );
}

#[test]
fn test_missing_field() {
    let fixture = fixture();
    let opts = Options {
        field: "URL".to_string(),
        ..options(&fixture, "Account")
    };

    let (result, _) = lookup(&fixture, &opts);
    let err = result.unwrap_err();
    assert_eq!(err.root_cause().to_string(), "field 'URL' not found");
}

#[test]
fn test_show_all_renders_entry() {
    let fixture = fixture();
    let opts = Options {
        show_all: true,
        ..options(&fixture, "Account")
    };

    let (result, _) = lookup(&fixture, &opts);
    match result.unwrap() {
        Outcome::Details(text) => {
            assert!(text.contains("Title: Account"));
            assert!(text.contains("Pin: 4711"));
            assert!(!text.contains("s3cret"));
        }
        other => panic!("unexpected outcome {:?}", other),
    }
}

#[test]
fn test_show_all_json() {
    let fixture = fixture();
    let opts = Options {
        show_all: true,
        display: DisplayFormat::Json,
        ..options(&fixture, "Account")
    };

    let (result, _) = lookup(&fixture, &opts);
    match result.unwrap() {
        Outcome::Details(json) => {
            let value: serde_json::Value = serde_json::from_str(&json).unwrap();
            assert_eq!(value["username"], "tester");
        }
        other => panic!("unexpected outcome {:?}", other),
    }
}

#[test]
fn test_totp_only() {
    let fixture = fixture();
    let opts = Options {
        totp: TotpMode::Only,
        search: SearchOptions {
            case_sensitive: true,
            exact_match: true,
        },
        ..options(&fixture, "mail")
    };

    let (result, _) = lookup(&fixture, &opts);
    match result.unwrap() {
        Outcome::Value { value, .. } => {
            assert_eq!(value.len(), 6);
            assert!(value.chars().all(|c| c.is_ascii_digit()));
        }
        other => panic!("unexpected outcome {:?}", other),
    }
}

#[test]
fn test_missing_item_parameter() {
    let fixture = fixture();
    let opts = Options {
        item: None,
        ..options(&fixture, "")
    };
    let (result, _) = lookup(&fixture, &opts);
    assert_eq!(result.unwrap_err().to_string(), "item parameter is required");
}

#[test]
fn test_unreadable_password_source() {
    let fixture = fixture();
    let opts = Options {
        password_source: Some("/definitely/missing/pw".to_string()),
        ..options(&fixture, "Account")
    };

    let (result, _) = lookup(&fixture, &opts);
    let err = result.unwrap_err();
    assert_eq!(err.to_string(), "Error getting password");
}

#[test]
fn test_no_database_configured() {
    let fixture = fixture();
    let dir = TempDir::new().unwrap();
    let empty_config = dir.path().join("empty.toml");
    std::fs::write(&empty_config, "").unwrap();

    let opts = Options {
        config: Some(empty_config),
        ..options(&fixture, "Account")
    };
    let (result, _) = lookup(&fixture, &opts);
    assert_eq!(
        result.unwrap_err().to_string(),
        "no KeePass database path provided"
    );
}
