//! Search results and field access.

use crate::vault::Entry;

use super::error::SearchError;

/// An entry found by a search, together with its path in the tree.
///
/// Results borrow the tree they were found in and are meant to be discarded
/// after the lookup that produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult<'a> {
    /// `/`-separated path from the root group to the entry title.
    pub path: String,
    pub entry: &'a Entry,
}

impl<'a> SearchResult<'a> {
    pub fn new(path: impl Into<String>, entry: &'a Entry) -> Self {
        Self {
            path: path.into(),
            entry,
        }
    }

    /// Returns the value of the first field whose key matches `name`,
    /// ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::FieldNotFound`] when no key matches, including
    /// when the entry has no fields at all.
    pub fn get_field(&self, name: &str) -> Result<&'a str, SearchError> {
        self.entry
            .get(name)
            .ok_or_else(|| SearchError::FieldNotFound(name.to_string()))
    }
}
