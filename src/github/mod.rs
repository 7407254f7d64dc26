//! Remote contents API access.
//!
//! - `client`: configured HTTP client, one call per listing or raw file
//! - `fetch`: recursive walk that flattens a repository into `FlatFile`s

pub mod client;
pub mod fetch;

#[cfg(test)]
pub mod mock;

pub use client::{FetchConfig, FileErrorPolicy, GithubClient, SharedClient};
