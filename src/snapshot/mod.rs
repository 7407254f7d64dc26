//! Turns a fetched flat file list into the fetchRepo response.
//!
//! - `filter`: extension whitelist/blacklist
//! - `render`: directory tree text
//! - `concat`: file contents dump
//! - `tokens`: token estimates for both outputs

pub mod concat;
pub mod filter;
pub mod render;
pub mod tokens;

pub use concat::concatenate;
pub use filter::FilterSpec;
pub use render::render;

use crate::error::{AppError, Result};
use crate::models::{FetchRepoResponse, FlatFile, TokenEstimates};

pub fn build_snapshot(files: Vec<FlatFile>, filter: Option<&FilterSpec>) -> Result<FetchRepoResponse> {
    let fetched = files.len();
    let files = match filter {
        Some(spec) => spec.apply(files),
        None => files,
    };

    tracing::debug!("{} of {} files kept after filtering", files.len(), fetched);

    if files.is_empty() {
        return Err(AppError::EmptyResult);
    }

    let repo_contents = concatenate(&files);
    let directory_structure = render(&files);

    let token_estimates = estimate_tokens(&directory_structure, &repo_contents, tokens::estimate);
    if token_estimates.is_none() {
        tracing::warn!("Token estimation failed, omitting estimates");
    }

    Ok(FetchRepoResponse {
        repo_contents,
        directory_structure,
        token_estimates,
    })
}

fn estimate_tokens(
    directory_structure: &str,
    repo_contents: &str,
    estimate: impl Fn(&str) -> Option<u64>,
) -> Option<TokenEstimates> {
    Some(TokenEstimates {
        directory_tokens: estimate(directory_structure)?,
        content_tokens: estimate(repo_contents)?,
    })
}
