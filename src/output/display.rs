//! Rendering of a whole entry for `--show-all`.

use anyhow::Result;
use indexmap::IndexMap;
use serde::Serialize;

use crate::vault::entry::{NOTES, STANDARD_FIELDS, TITLE, URL, USERNAME};
use crate::vault::Entry;

const LINE_BREAK: &str = "----------------------------------------";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DisplayFormat {
    #[default]
    Text,
    Json,
}

#[derive(Serialize)]
struct EntryData<'a> {
    title: &'a str,
    username: &'a str,
    url: &'a str,
    notes: &'a str,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    additional_fields: IndexMap<&'a str, &'a str>,
}

/// Fields shown under "Additional Fields": everything non-empty that is not
/// a standard field, in entry order. The password is never shown. A repeated
/// key keeps its first value, as lookups do.
fn additional_fields(entry: &Entry) -> IndexMap<&str, &str> {
    let mut extra = IndexMap::new();
    for field in entry.fields() {
        if is_standard(&field.key) || field.value.is_empty() {
            continue;
        }
        extra.entry(field.key.as_str()).or_insert(field.value.as_str());
    }
    extra
}

fn is_standard(key: &str) -> bool {
    STANDARD_FIELDS.contains(&key)
}

/// Renders every field of `entry` except the password.
pub fn render_entry(entry: &Entry, format: DisplayFormat) -> Result<String> {
    match format {
        DisplayFormat::Text => Ok(render_text(entry)),
        DisplayFormat::Json => render_json(entry),
    }
}

fn render_text(entry: &Entry) -> String {
    let mut out = String::new();
    push_line(&mut out, LINE_BREAK);
    push_line(&mut out, "Entry Details:");
    push_line(&mut out, LINE_BREAK);

    for (label, key) in [("Title", TITLE), ("Username", USERNAME), ("URL", URL), ("Notes", NOTES)] {
        push_value(&mut out, label, entry.get(key).unwrap_or(""));
    }

    let extra = additional_fields(entry);
    if !extra.is_empty() {
        push_line(&mut out, LINE_BREAK);
        push_line(&mut out, "Additional Fields:");
        for (key, value) in extra {
            push_value(&mut out, key, value);
        }
    }
    push_line(&mut out, LINE_BREAK);
    out
}

fn render_json(entry: &Entry) -> Result<String> {
    let data = EntryData {
        title: entry.get(TITLE).unwrap_or(""),
        username: entry.get(USERNAME).unwrap_or(""),
        url: entry.get(URL).unwrap_or(""),
        notes: entry.get(NOTES).unwrap_or(""),
        additional_fields: additional_fields(entry),
    };
    Ok(serde_json::to_string_pretty(&data)?)
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}

fn push_value(out: &mut String, key: &str, value: &str) {
    if !value.is_empty() {
        out.push_str(&format!("{}: {}\n", key, value));
    }
}
