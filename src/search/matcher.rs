//! Name matching under the configured search policy.

/// How names are compared during subpath and name searches.
///
/// The default is case-insensitive substring matching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchOptions {
    pub case_sensitive: bool,
    pub exact_match: bool,
}

impl SearchOptions {
    /// Returns a copy of these options with exact matching forced on.
    pub fn exact(self) -> Self {
        Self {
            exact_match: true,
            ..self
        }
    }
}

/// Tests `value` against `pattern`.
///
/// Exact mode compares for equality, partial mode checks that `pattern` is a
/// substring of `value`. Without `case_sensitive` both sides are lowercased
/// first. An empty pattern matches every value in partial mode and only the
/// empty value in exact mode.
///
/// # Example
///
/// ```
/// use kpfind::search::{matches, SearchOptions};
///
/// let options = SearchOptions::default();
/// assert!(matches("Account", "acc", options));
/// assert!(!matches("Account", "acc", options.exact()));
/// ```
pub fn matches(value: &str, pattern: &str, options: SearchOptions) -> bool {
    let result = if options.case_sensitive {
        compare(value, pattern, options.exact_match)
    } else {
        compare(&value.to_lowercase(), &pattern.to_lowercase(), options.exact_match)
    };
    log::trace!(
        "match {:?} against {:?} with {:?}: {}",
        value,
        pattern,
        options,
        result
    );
    result
}

fn compare(value: &str, pattern: &str, exact: bool) -> bool {
    if exact {
        value == pattern
    } else {
        value.contains(pattern)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SENSITIVE: SearchOptions = SearchOptions {
        case_sensitive: true,
        exact_match: false,
    };
    const SENSITIVE_EXACT: SearchOptions = SearchOptions {
        case_sensitive: true,
        exact_match: true,
    };
    const INSENSITIVE_EXACT: SearchOptions = SearchOptions {
        case_sensitive: false,
        exact_match: true,
    };

    #[test]
    fn test_default_is_insensitive_partial() {
        let options = SearchOptions::default();
        assert!(!options.case_sensitive);
        assert!(!options.exact_match);
        assert!(matches("Account", "COUNT", options));
        assert!(matches("Account", "account", options));
        assert!(!matches("Account", "bank", options));
    }

    #[test]
    fn test_case_sensitive_partial() {
        assert!(matches("Account", "Acc", SENSITIVE));
        assert!(!matches("Account", "acc", SENSITIVE));
    }

    #[test]
    fn test_case_sensitive_exact() {
        assert!(matches("Account", "Account", SENSITIVE_EXACT));
        assert!(!matches("Account", "account", SENSITIVE_EXACT));
        assert!(!matches("Account", "Acc", SENSITIVE_EXACT));
    }

    #[test]
    fn test_case_insensitive_exact_lowercases_both_sides() {
        assert!(matches("Account", "ACCOUNT", INSENSITIVE_EXACT));
        assert!(!matches("Account", "acc", INSENSITIVE_EXACT));
    }

    #[test]
    fn test_empty_pattern() {
        assert!(matches("anything", "", SearchOptions::default()));
        assert!(matches("", "", SearchOptions::default()));
        assert!(!matches("anything", "", INSENSITIVE_EXACT));
        assert!(matches("", "", SENSITIVE_EXACT));
    }

    #[test]
    fn test_exact_keeps_case_setting() {
        let forced = SENSITIVE.exact();
        assert!(forced.case_sensitive);
        assert!(forced.exact_match);
    }
}
