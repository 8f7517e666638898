//! Error types for entry resolution.

use thiserror::Error;

use super::query::SearchMode;

/// Failures raised by the individual resolvers and by field access.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// An absolute path without a root segment, such as `/`.
    #[error("empty path")]
    EmptyQuery,
    /// An intermediate group of an absolute path does not exist.
    #[error("group not found: {0}")]
    GroupNotFound(String),
    /// The last segment of an absolute path matched no entry title.
    #[error("entry not found: {0}")]
    EntryNotFound(String),
    /// A subpath query without any `/`.
    #[error("invalid subpath query: must contain at least one '/'")]
    InvalidSubpathQuery,
    /// The requested field does not exist on the entry.
    #[error("field '{0}' not found")]
    FieldNotFound(String),
}

/// A resolver error labelled with the search mode that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{mode} search failed: {source}")]
pub struct FindError {
    pub mode: SearchMode,
    pub source: SearchError,
}

impl FindError {
    pub fn new(mode: SearchMode, source: SearchError) -> Self {
        Self { mode, source }
    }
}
