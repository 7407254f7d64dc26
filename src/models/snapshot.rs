//! Flattened repository snapshot and the fetchRepo request/response bodies.
//!
//! Field names on the wire are camelCase to match the browser client.

use serde::{Deserialize, Serialize};

/// One fetched file: `/`-joined path relative to the repository root and its
/// decoded text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatFile {
    pub path: String,
    pub content: String,
}

impl FlatFile {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchRepoRequest {
    #[serde(default)]
    pub repo_url: Option<String>,
    #[serde(default)]
    pub filter_mode: Option<String>,
    #[serde(default)]
    pub filter_extensions: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchRepoResponse {
    pub repo_contents: String,
    pub directory_structure: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_estimates: Option<TokenEstimates>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenEstimates {
    pub directory_tokens: u64,
    pub content_tokens: u64,
}
