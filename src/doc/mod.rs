//! The manual page printed by `--man`.

pub const MAN_PAGE: &str = "\
NAME
    kpfind - look up credentials in a KeePass database

SYNOPSIS
    kpfind [-p DATABASE] [-w PASSWORD_SOURCE] [-k KEYFILE] -i ITEM [-f FIELD]
           [-o stdout|clipboard] [OPTIONS]

DESCRIPTION
    kpfind opens a KeePass (KDBX) database, finds a single entry and prints
    one of its fields, by default the password. It is meant for scripts that
    need secrets such as tokens, key passphrases or service passwords, and can
    open the database without an interactive prompt.

    The lookup succeeds only when exactly one entry is found. When none or
    several are found, kpfind exits with an error listing the candidates.

OPTIONS
    -p, --kdbpath PATH
        KeePass database file.

    -w, --kdbpassword SOURCE
        File containing the database password, or an executable printing it
        on stdout. The password itself is never accepted on the command line.
        Without a source kpfind prompts for the password.

    -k, --keyfile PATH
        Key file for databases protected by one.

    -c, --config PATH
        Configuration file to use instead of the default locations.

    -i, --item QUERY
        Entry to look up, see QUERIES.

    -f, --fieldname FIELD
        Field to print. Defaults to Password. Field names ignore case.
        Common fields: Title, UserName, Password, URL, Notes.

    -o, --out stdout|clipboard
        Where the value goes. Defaults to stdout.

    --clear-after SECONDS
        Clear the clipboard after this many seconds, 0 keeps it.

    -a, --show-all
        Print every field of the entry except the password.

    --json
        Print --show-all output as JSON.

    --case-sensitive
        Match group and entry names case-sensitively.

    -e, --exact-match
        Match whole names instead of substrings.

    -t, --totp
        Print the current TOTP code of the entry.

    --password-totp
        Append the current TOTP code to the field value.

    -v, --verify
        Report the path of the entry found on stderr.

    -d, --debug
        Enable debug logging.

    --create-config
        Write an example config.toml to the current directory.

    --print-config
        Show the configuration in use.

    -m, --man
        Show this manual page.

QUERIES
    /Root/Banking/Account
        Absolute path. Groups and title must match exactly, the first segment
        names the root group.

    Banking/Account
        Subpath. The groups may sit anywhere in the tree, the entry title must
        match exactly.

    Account
        Name. Every entry whose title matches is found, wherever it is.

PRECEDENCE
    Database path, password source and output type are taken from the first
    of: command-line flag, environment variable, configuration file.

ENVIRONMENT
    KPFIND_KDBPATH         database file
    KPFIND_KDBPASSWORD     password file or executable
    KPFIND_OUT             output type (stdout or clipboard)
    RUST_LOG               log filter, overridden by --debug

CONFIGURATION
    ./config.toml or ~/.config/kpfind/config.toml, keys:
    database_path          default database file
    default_output         stdout or clipboard
    password_file          file holding the password
    password_executable    executable printing the password
    clear_after            clipboard timeout in seconds (default 20)

SECURITY
    A password file or executable opens the database without a prompt. Keep
    them readable only by their owner, or let the executable fetch the
    password from a wallet unlocked at login.
";

/// Returns the manual page text.
pub fn man_page() -> &'static str {
    MAN_PAGE
}
