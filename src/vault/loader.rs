//! Loading KDBX databases into the [`Group`] tree.
//!
//! Decryption and parsing are done by the `keepass` crate; this module only
//! opens the file and converts the decrypted nodes into owned groups and entries.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use keepass::db::{Node, Value};
use keepass::{Database, DatabaseKey};

use super::entry::{Entry, STANDARD_FIELDS};
use super::group::Group;

/// Opens and decrypts a KDBX database, returning its root group.
///
/// # Errors
///
/// Fails if the database or key file cannot be read, or if the credentials do
/// not unlock the database.
pub fn open_database(path: &Path, password: &str, keyfile: Option<&Path>) -> Result<Group> {
    log::debug!(
        "opening database {} with password {}",
        path.display(),
        "*".repeat(password.chars().count())
    );
    let mut source = File::open(path)
        .with_context(|| format!("Failed to open database file {}", path.display()))?;

    let mut key = DatabaseKey::new();
    if !password.is_empty() {
        key = key.with_password(password);
    }
    if let Some(keyfile_path) = keyfile {
        let mut keyfile = File::open(keyfile_path)
            .with_context(|| format!("Failed to open key file {}", keyfile_path.display()))?;
        key = key
            .with_keyfile(&mut keyfile)
            .context("Failed to read key file")?;
    }

    let db = Database::open(&mut source, key).context("Failed to decrypt database")?;
    let root = convert_group(&db.root);
    log::debug!("loaded database with {} entries", root.entry_count());
    Ok(root)
}

fn convert_group(group: &keepass::db::Group) -> Group {
    let mut converted = Group::new(group.name.clone());
    for node in &group.children {
        match node {
            Node::Group(child) => converted.add_group(convert_group(child)),
            Node::Entry(entry) => converted.add_entry(convert_entry(entry)),
        }
    }
    converted
}

fn convert_entry(entry: &keepass::db::Entry) -> Entry {
    let mut fields: Vec<(&str, String)> = entry
        .fields
        .iter()
        .filter_map(|(key, value)| field_text(value).map(|text| (key.as_str(), text)))
        .collect();
    fields.sort_by(|(a, _), (b, _)| field_rank(a).cmp(&field_rank(b)).then_with(|| a.cmp(b)));

    let mut converted = Entry::new();
    for (key, value) in fields {
        converted.push_field(key, value);
    }
    converted
}

fn field_text(value: &Value) -> Option<String> {
    match value {
        Value::Unprotected(text) => Some(text.clone()),
        Value::Protected(secret) => Some(String::from_utf8_lossy(secret.unsecure()).into_owned()),
        _ => None,
    }
}

/// Standard fields sort first in their usual order; everything else after.
fn field_rank(key: &str) -> usize {
    STANDARD_FIELDS
        .iter()
        .position(|standard| *standard == key)
        .unwrap_or(STANDARD_FIELDS.len())
}
