//! Classification of query strings.

use std::fmt;

/// Which resolver a query is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchMode {
    Absolute,
    Subpath,
    Name,
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchMode::Absolute => write!(f, "absolute path"),
            SearchMode::Subpath => write!(f, "subpath"),
            SearchMode::Name => write!(f, "name"),
        }
    }
}

/// A query string tagged with its lexical shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Query<'q> {
    /// Starts with `/`.
    Absolute(&'q str),
    /// Contains `/` somewhere after the first character.
    Subpath(&'q str),
    /// Contains no `/` at all.
    Name(&'q str),
}

impl<'q> Query<'q> {
    /// Classifies a raw query string. The leading slash is checked first.
    pub fn parse(raw: &'q str) -> Self {
        if raw.starts_with('/') {
            Query::Absolute(raw)
        } else if raw.contains('/') {
            Query::Subpath(raw)
        } else {
            Query::Name(raw)
        }
    }

    pub fn mode(&self) -> SearchMode {
        match self {
            Query::Absolute(_) => SearchMode::Absolute,
            Query::Subpath(_) => SearchMode::Subpath,
            Query::Name(_) => SearchMode::Name,
        }
    }

    /// The query text as given by the user.
    pub fn as_str(&self) -> &'q str {
        match self {
            Query::Absolute(raw) | Query::Subpath(raw) | Query::Name(raw) => raw,
        }
    }
}
