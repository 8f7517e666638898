//! In-memory model of a decrypted password database.
//!
//! A database is a tree of [`Group`]s. Every group owns its child groups and its
//! [`Entry`] records; there are no back-pointers and nothing is shared, so the
//! whole tree can be borrowed read-only by the search engine.
//!
//! # Example
//!
//! ```
//! use kpfind::vault::{Entry, Group};
//!
//! let root = Group::new("Root").with_group(
//!     Group::new("Banking").with_entry(
//!         Entry::new()
//!             .with_field("Title", "Account")
//!             .with_field("UserName", "tester"),
//!     ),
//! );
//!
//! assert_eq!(root.groups()[0].entries()[0].title(), "Account");
//! ```

pub mod entry;
pub mod group;
pub mod loader;

pub use entry::{Entry, Field};
pub use group::Group;
