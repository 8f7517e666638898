//! Resolution of bare entry names across the whole tree.

use crate::vault::Group;

use super::matcher::{matches, SearchOptions};
use super::result::SearchResult;
use super::{entry_path, join_group};

/// Returns every entry whose title matches `name`, in depth-first pre-order:
/// a group's own entries come before those of its child groups.
pub fn resolve<'a>(root: &'a Group, name: &str, options: SearchOptions) -> Vec<SearchResult<'a>> {
    log::debug!("searching by name: {}", name);
    let mut results = Vec::new();
    visit(root, "", name, options, &mut results);
    results
}

fn visit<'a>(
    group: &'a Group,
    parent_path: &str,
    name: &str,
    options: SearchOptions,
    out: &mut Vec<SearchResult<'a>>,
) {
    let group_path = join_group(parent_path, group.name());

    for entry in group.entries() {
        let title = entry.title();
        if matches(title, name, options) {
            let path = entry_path(&group_path, title);
            log::debug!("name match {}", path);
            out.push(SearchResult::new(path, entry));
        }
    }

    for child in group.groups() {
        visit(child, &group_path, name, options, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vault::Entry;

    fn titled(title: &str) -> Entry {
        Entry::new().with_field("Title", title)
    }

    fn tree() -> Group {
        Group::new("Root")
            .with_group(
                Group::new("Web")
                    .with_group(Group::new("Mail").with_entry(titled("pw")))
                    .with_entry(titled("pw")),
            )
            .with_entry(titled("Password Safe"))
            .with_group(Group::new("Work").with_entry(titled("PW")))
    }

    #[test]
    fn test_preorder_traversal_order() {
        let root = tree();
        let results = resolve(&root, "pw", SearchOptions::default());
        let paths: Vec<&str> = results.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(
            paths,
            vec!["/Root/Web/pw", "/Root/Web/Mail/pw", "/Root/Work/PW"]
        );
    }

    #[test]
    fn test_partial_match_reaches_root_entries() {
        let root = tree();
        let results = resolve(&root, "safe", SearchOptions::default());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].path, "/Root/Password Safe");
    }

    #[test]
    fn test_options_are_applied_unmodified() {
        let root = tree();
        let options = SearchOptions {
            case_sensitive: true,
            exact_match: true,
        };
        let results = resolve(&root, "PW", options);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].path, "/Root/Work/PW");
    }

    #[test]
    fn test_unnamed_root_is_left_out_of_paths() {
        let root = Group::new("").with_group(Group::new("Banking").with_entry(titled("Account")));
        let results = resolve(&root, "Account", SearchOptions::default());
        assert_eq!(results[0].path, "/Banking/Account");
    }

    #[test]
    fn test_no_match_is_empty() {
        let root = tree();
        assert!(resolve(&root, "nothing", SearchOptions::default()).is_empty());
    }
}
