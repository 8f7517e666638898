//! Entry resolution: turning a query string into matching entries.
//!
//! Queries come in three shapes, told apart by where the `/` characters are:
//!
//! - `/Root/Banking/Account` - an absolute path. Every segment must match
//!   exactly; at most one entry is returned.
//! - `Banking/Account` - a subpath. The group segments may match anywhere in
//!   the tree and the last segment names the entry.
//! - `Account` - a bare name, searched across the whole tree.
//!
//! Subpath and name queries honour [`SearchOptions`] and may return several
//! entries. Results are never ranked; callers decide what to do with zero or
//! many matches.
//!
//! # Example
//!
//! ```
//! use kpfind::search::Finder;
//! use kpfind::vault::{Entry, Group};
//!
//! let root = Group::new("Root").with_group(
//!     Group::new("Banking").with_entry(Entry::new().with_field("Title", "Account")),
//! );
//!
//! let finder = Finder::new(&root);
//! let results = finder.find("Banking/Account").unwrap();
//! assert_eq!(results.len(), 1);
//! assert_eq!(results[0].path, "/Root/Banking/Account");
//! ```

pub mod absolute;
pub mod error;
pub mod finder;
pub mod matcher;
pub mod name;
pub mod query;
pub mod result;
pub mod subpath;

pub use error::{FindError, SearchError};
pub use finder::Finder;
pub use matcher::{matches, SearchOptions};
pub use query::{Query, SearchMode};
pub use result::SearchResult;

/// Appends a group name to a `/`-separated path. Empty names add nothing.
pub(crate) fn join_group(parent: &str, name: &str) -> String {
    if name.is_empty() {
        parent.to_string()
    } else {
        format!("{}/{}", parent, name)
    }
}

/// Builds the path of an entry inside a group path.
pub(crate) fn entry_path(group_path: &str, title: &str) -> String {
    format!("{}/{}", group_path, title)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_group_skips_empty_names() {
        assert_eq!(join_group("", "Root"), "/Root");
        assert_eq!(join_group("/Root", ""), "/Root");
        assert_eq!(join_group("", ""), "");
    }

    #[test]
    fn test_entry_path_always_rooted() {
        assert_eq!(entry_path("", "Account"), "/Account");
        assert_eq!(entry_path("/Root/Banking", "Account"), "/Root/Banking/Account");
    }
}
