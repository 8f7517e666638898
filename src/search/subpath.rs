//! Resolution of relative subpaths such as `Banking/Account`.
//!
//! Every segment but the last is a group pattern, the last names the entry.
//! Pattern segments may be consumed by any group on the way down, and every
//! child group is also searched with the pattern left untouched, so the groups
//! may sit at any depth. Candidates are
//! then kept only if their full path contains the query text.

use crate::vault::Group;

use super::error::SearchError;
use super::matcher::{matches, SearchOptions};
use super::result::SearchResult;
use super::{entry_path, join_group};

/// Finds every entry addressed by `query` anywhere below `root`.
///
/// Group segments are matched with `options` as given; the entry name is
/// matched with exact matching forced on. The same entry can be reported more
/// than once when several ancestors satisfy the same pattern segment.
///
/// # Errors
///
/// Returns [`SearchError::InvalidSubpathQuery`] if `query` contains no `/`.
pub fn resolve<'a>(
    root: &'a Group,
    query: &str,
    options: SearchOptions,
) -> Result<Vec<SearchResult<'a>>, SearchError> {
    log::debug!("searching by subpath: {}", query);
    let parts: Vec<&str> = query.split('/').collect();
    if parts.len() < 2 {
        return Err(SearchError::InvalidSubpathQuery);
    }
    let (target, pattern) = match parts.split_last() {
        Some((target, pattern)) => (*target, pattern),
        None => return Err(SearchError::InvalidSubpathQuery),
    };
    log::debug!("subpath pattern {:?}, target {:?}", pattern, target);

    let walk = Walk {
        target,
        group_options: options,
        entry_options: options.exact(),
    };
    let mut candidates = Vec::new();
    walk.visit(root, "", pattern, &mut candidates);
    log::debug!("{} candidates before filtering", candidates.len());

    candidates.retain(|candidate| candidate.path.contains(query));
    Ok(candidates)
}

struct Walk<'t> {
    target: &'t str,
    group_options: SearchOptions,
    entry_options: SearchOptions,
}

impl Walk<'_> {
    fn visit<'a>(
        &self,
        group: &'a Group,
        parent_path: &str,
        pattern: &[&str],
        out: &mut Vec<SearchResult<'a>>,
    ) {
        let group_path = join_group(parent_path, group.name());
        log::trace!("visiting {} with pattern {:?}", group_path, pattern);

        if pattern.len() == 1 {
            for entry in group.entries() {
                let title = entry.title();
                if matches(title, self.target, self.entry_options) {
                    let path = entry_path(&group_path, title);
                    log::debug!("subpath candidate {}", path);
                    out.push(SearchResult::new(path, entry));
                }
            }
        }

        if let Some((next, rest)) = pattern.split_first() {
            if matches(group.name(), next, self.group_options) {
                for child in group.groups() {
                    self.visit(child, &group_path, rest, out);
                }
            }
        }

        for child in group.groups() {
            self.visit(child, &group_path, pattern, out);
        }
    }
}
