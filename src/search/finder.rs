//! The [`Finder`] routes a query to the matching resolver.

use std::io::{self, Write};

use crate::vault::Group;

use super::error::{FindError, SearchError};
use super::matcher::SearchOptions;
use super::query::Query;
use super::result::SearchResult;
use super::{absolute, name, subpath};

/// Looks up entries in a borrowed credential tree.
///
/// A finder never mutates the tree, so several finders (or several calls on
/// one finder) can run against the same tree at once.
#[derive(Debug, Clone)]
pub struct Finder<'a> {
    root: &'a Group,
    /// Matching policy for subpath and name queries.
    pub options: SearchOptions,
    verify: bool,
}

impl<'a> Finder<'a> {
    /// Creates a finder with default options and verification off.
    pub fn new(root: &'a Group) -> Self {
        Self {
            root,
            options: SearchOptions::default(),
            verify: false,
        }
    }

    pub fn with_options(mut self, options: SearchOptions) -> Self {
        self.options = options;
        self
    }

    /// When enabled, a lookup that yields exactly one entry reports its path
    /// on the trace writer.
    pub fn with_verify(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    pub fn verify(&self) -> bool {
        self.verify
    }

    pub fn root(&self) -> &'a Group {
        self.root
    }

    /// Resolves `query`, writing the verification trace to stderr.
    ///
    /// An absolute path naming a missing entry yields an empty list. A missing
    /// intermediate group or a malformed path is an error.
    pub fn find(&self, query: &str) -> Result<Vec<SearchResult<'a>>, FindError> {
        self.find_traced(query, &mut io::stderr())
    }

    /// Like [`Finder::find`], with the verification trace sent to `trace`.
    pub fn find_traced(
        &self,
        query: &str,
        trace: &mut dyn Write,
    ) -> Result<Vec<SearchResult<'a>>, FindError> {
        let query = Query::parse(query);
        log::debug!("starting {} search for {:?}", query.mode(), query.as_str());

        let results = self
            .dispatch(query)
            .map_err(|source| FindError::new(query.mode(), source))?;

        if self.verify && results.len() == 1 {
            // trace write failures are ignored
            let _ = writeln!(trace, "Found one entry: {}", results[0].path);
        }
        Ok(results)
    }

    fn dispatch(&self, query: Query<'_>) -> Result<Vec<SearchResult<'a>>, SearchError> {
        match query {
            Query::Absolute(path) => match absolute::resolve(self.root, path) {
                Ok(entry) => Ok(vec![SearchResult::new(path, entry)]),
                Err(SearchError::EntryNotFound(title)) => {
                    log::debug!("no entry titled {:?} at {}", title, path);
                    Ok(Vec::new())
                }
                Err(err) => Err(err),
            },
            Query::Subpath(raw) => subpath::resolve(self.root, raw, self.options),
            Query::Name(raw) => Ok(name::resolve(self.root, raw, self.options)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::SearchMode;
    use crate::vault::Entry;

    fn banking() -> Group {
        Group::new("Root").with_group(
            Group::new("Banking").with_entry(
                Entry::new()
                    .with_field("Title", "Account")
                    .with_field("UserName", "tester"),
            ),
        )
    }

    #[test]
    fn test_verify_trace_on_single_result() {
        let root = banking();
        let finder = Finder::new(&root).with_verify(true);
        let mut trace = Vec::new();

        let results = finder.find_traced("Account", &mut trace).unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(
            String::from_utf8(trace).unwrap(),
            "Found one entry: /Root/Banking/Account\n"
        );
    }

    #[test]
    fn test_no_trace_without_verify() {
        let root = banking();
        let finder = Finder::new(&root);
        let mut trace = Vec::new();

        finder.find_traced("Account", &mut trace).unwrap();
        assert!(trace.is_empty());
    }

    #[test]
    fn test_no_trace_for_zero_results() {
        let root = banking();
        let finder = Finder::new(&root).with_verify(true);
        let mut trace = Vec::new();

        let results = finder.find_traced("Missing", &mut trace).unwrap();
        assert!(results.is_empty());
        assert!(trace.is_empty());
    }

    #[test]
    fn test_group_not_found_is_labelled() {
        let root = banking();
        let err = Finder::new(&root).find("/Root/Nope/Account").unwrap_err();
        assert_eq!(err.mode, SearchMode::Absolute);
        assert_eq!(err.source, SearchError::GroupNotFound("Nope".to_string()));
    }

    #[test]
    fn test_bare_slash_is_an_error() {
        let root = banking();
        let err = Finder::new(&root).find("/").unwrap_err();
        assert_eq!(err.source, SearchError::EmptyQuery);
        assert_eq!(err.to_string(), "absolute path search failed: empty path");
    }
}
