//! Repository identity parsed from the URL a user pastes in.
//!
//! Accepted shapes:
//! - `https://github.com/owner/repo`
//! - `https://github.com/owner/repo.git`
//! - `https://github.com/owner/repo/tree/<ref>[/<subdir>]` (branch, tag or
//!   commit; anything after the ref is ignored and the whole repo is fetched)
//! - `github.com/owner/repo` (scheme optional)
//!
//! Only the path matters; the host is not checked, so mirrors that expose the
//! same contents API under another `--api-root` work too.

use url::Url;

use crate::error::{AppError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryReference {
    pub owner: String,
    pub name: String,
    pub git_ref: Option<String>,
}

impl RepositoryReference {
    pub fn parse(repo_url: &str) -> Result<Self> {
        let trimmed = repo_url.trim();
        if trimmed.is_empty() {
            return Err(AppError::InvalidInput("Repository URL is required.".to_string()));
        }

        let url = match Url::parse(trimmed) {
            Ok(url) => url,
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                Url::parse(&format!("https://{}", trimmed)).map_err(|_| invalid_url(trimmed))?
            }
            Err(_) => return Err(invalid_url(trimmed)),
        };

        let segments: Vec<&str> = url
            .path_segments()
            .map(|s| s.filter(|part| !part.is_empty()).collect())
            .unwrap_or_default();

        if segments.len() < 2 {
            return Err(invalid_url(trimmed));
        }

        let owner = segments[0].to_string();
        let name = segments[1].trim_end_matches(".git").to_string();
        if name.is_empty() {
            return Err(invalid_url(trimmed));
        }

        let git_ref = match segments.get(2) {
            Some(&"tree") => segments.get(3).map(|r| r.to_string()),
            _ => None,
        };

        Ok(Self { owner, name, git_ref })
    }

    /// Root listing URL of the contents API for this repository.
    pub fn contents_url(&self, api_root: &str) -> Result<String> {
        let base = format!(
            "{}/repos/{}/{}/contents",
            api_root.trim_end_matches('/'),
            self.owner,
            self.name
        );
        let mut url = Url::parse(&base)
            .map_err(|e| AppError::Internal(format!("Invalid API root {}: {}", api_root, e)))?;

        if let Some(git_ref) = &self.git_ref {
            url.query_pairs_mut().append_pair("ref", git_ref);
        }

        Ok(url.to_string())
    }
}

fn invalid_url(url: &str) -> AppError {
    AppError::InvalidInput(format!("Invalid GitHub repository URL: {}", url))
}
