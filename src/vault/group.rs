//! Groups: the folders of the credential tree.

use super::entry::Entry;

/// A named container holding child groups and entries, in database order.
///
/// The root group of a database is usually called `Root`, but an empty name is
/// allowed and is left out of computed paths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Group {
    name: String,
    groups: Vec<Group>,
    entries: Vec<Entry>,
}

impl Group {
    /// Creates an empty group.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            groups: Vec::new(),
            entries: Vec::new(),
        }
    }

    /// Builder-style variant of [`Group::add_group`].
    pub fn with_group(mut self, group: Group) -> Self {
        self.add_group(group);
        self
    }

    /// Builder-style variant of [`Group::add_entry`].
    pub fn with_entry(mut self, entry: Entry) -> Self {
        self.add_entry(entry);
        self
    }

    pub fn add_group(&mut self, group: Group) {
        self.groups.push(group);
    }

    pub fn add_entry(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Child groups in their stored order.
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Entries directly inside this group, in their stored order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Counts the entries in this group and all of its descendants.
    pub fn entry_count(&self) -> usize {
        self.entries.len() + self.groups.iter().map(Group::entry_count).sum::<usize>()
    }
}
