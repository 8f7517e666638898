//! Resolution of absolute paths such as `/Root/Banking/Account`.
//!
//! The first segment names the root group and is not checked. Every further
//! segment but the last must equal the name of a direct child group, and the
//! last must equal an entry title in the group reached. Comparisons are always
//! exact and case-sensitive, whatever the configured [`SearchOptions`] say.
//!
//! [`SearchOptions`]: super::SearchOptions

use crate::vault::{Entry, Group};

use super::error::SearchError;

/// Walks `root` along `path` and returns the entry it names.
///
/// # Errors
///
/// - [`SearchError::EmptyQuery`] if the path has no root segment (`/`, `//x`).
/// - [`SearchError::GroupNotFound`] if an intermediate group is missing.
/// - [`SearchError::EntryNotFound`] if the final group has no such title.
pub fn resolve<'a>(root: &'a Group, path: &str) -> Result<&'a Entry, SearchError> {
    log::debug!("searching by absolute path: {}", path);
    let parts: Vec<&str> = path.strip_prefix('/').unwrap_or(path).split('/').collect();
    let (target, groups) = match parts.split_last() {
        Some((target, groups)) => (*target, groups),
        None => return Err(SearchError::EmptyQuery),
    };
    if parts[0].is_empty() {
        return Err(SearchError::EmptyQuery);
    }

    let mut current = root;
    for segment in groups.iter().skip(1) {
        current = current
            .groups()
            .iter()
            .find(|group| group.name() == *segment)
            .ok_or_else(|| SearchError::GroupNotFound(segment.to_string()))?;
        log::debug!("descended into group {}", current.name());
    }

    current
        .entries()
        .iter()
        .find(|entry| entry.title() == target)
        .ok_or_else(|| SearchError::EntryNotFound(target.to_string()))
}
