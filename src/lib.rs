//! kpfind - credential lookup in KeePass databases.
//!
//! The heart of the crate is [`search`], which resolves a query string to
//! entries of a decrypted [`vault`] tree. The remaining modules are the
//! command-line plumbing around it: configuration, password resolution,
//! output dispatch and TOTP generation.

pub mod app;
pub mod config;
pub mod credentials;
pub mod doc;
pub mod output;
pub mod search;
pub mod totp;
pub mod vault;
