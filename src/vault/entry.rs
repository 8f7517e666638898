//! Credential entries and their fields.

/// Field key holding the entry title.
pub const TITLE: &str = "Title";
/// Field key holding the user name.
pub const USERNAME: &str = "UserName";
/// Field key holding the password.
pub const PASSWORD: &str = "Password";
/// Field key holding the URL.
pub const URL: &str = "URL";
/// Field key holding free-form notes.
pub const NOTES: &str = "Notes";

/// The standard keys, in display order.
pub const STANDARD_FIELDS: [&str; 5] = [TITLE, USERNAME, PASSWORD, URL, NOTES];

/// A single named value stored on an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub key: String,
    pub value: String,
}

impl Field {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A credential record: an ordered list of fields.
///
/// Keys are compared case-insensitively and the first matching field wins.
/// Duplicate keys are kept as they came from the database.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entry {
    fields: Vec<Field>,
}

impl Entry {
    /// Creates an entry with no fields.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style variant of [`Entry::push_field`].
    ///
    /// # Example
    ///
    /// ```
    /// use kpfind::vault::Entry;
    ///
    /// let entry = Entry::new().with_field("Password", "hunter2");
    /// assert_eq!(entry.get("password"), Some("hunter2"));
    /// ```
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.push_field(key, value);
        self
    }

    /// Appends a field. Existing fields with the same key are left in place.
    pub fn push_field(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.push(Field::new(key, value));
    }

    /// Returns all fields in their stored order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Looks up the first field whose key equals `key`, ignoring case.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|field| keys_match(&field.key, key))
            .map(|field| field.value.as_str())
    }

    /// Returns the entry title, or an empty string when the entry has none.
    pub fn title(&self) -> &str {
        self.get(TITLE).unwrap_or("")
    }

    /// Returns true if the entry has a field with the given key.
    pub fn has_field(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

fn keys_match(a: &str, b: &str) -> bool {
    if a.is_ascii() && b.is_ascii() {
        return a.eq_ignore_ascii_case(b);
    }
    a.to_lowercase() == b.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_is_case_insensitive() {
        let entry = Entry::new()
            .with_field("Title", "Account")
            .with_field("Password", "secret");

        assert_eq!(entry.get("PASSWORD"), Some("secret"));
        assert_eq!(entry.get("password"), Some("secret"));
        assert_eq!(entry.get("pAsSwOrD"), Some("secret"));
    }

    #[test]
    fn test_get_returns_first_duplicate() {
        let entry = Entry::new()
            .with_field("Note", "first")
            .with_field("note", "second");

        assert_eq!(entry.get("NOTE"), Some("first"));
        assert_eq!(entry.fields().len(), 2);
    }

    #[test]
    fn test_missing_title_is_empty() {
        let entry = Entry::new().with_field("UserName", "bob");
        assert_eq!(entry.title(), "");
        assert!(!entry.has_field("Title"));
    }

    #[test]
    fn test_non_ascii_keys() {
        let entry = Entry::new().with_field("Schlüssel", "wert");
        assert_eq!(entry.get("SCHLÜSSEL"), Some("wert"));
    }
}
