//! Contents API directory listing entries.
//!
//! `GET /repos/{owner}/{repo}/contents/{path}` returns a JSON array of these.
//! Files carry a `download_url` for their raw bytes, directories a `url`
//! for their own listing.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct RemoteEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    #[serde(default)]
    pub download_url: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    File,
    Dir,
    Symlink,
    Submodule,
    #[serde(other)]
    Other,
}
