//! Recursive repository walk.
//!
//! One listing request per directory, one raw request per file. Entries of a
//! directory are fetched concurrently (up to `FetchConfig::concurrency` at a
//! time) but reassembled in listing order, so the flat result is the
//! depth-first traversal order of the remote listings regardless of which
//! request finishes first.

use futures::future::{BoxFuture, FutureExt};
use futures::stream::{self, StreamExt, TryStreamExt};
use std::time::Instant;

use crate::error::{AppError, Result};
use crate::github::client::{FileErrorPolicy, GithubClient};
use crate::models::{EntryType, FlatFile, RemoteEntry, RepositoryReference};

impl GithubClient {
    pub async fn fetch_repository(&self, reference: &RepositoryReference) -> Result<Vec<FlatFile>> {
        let root = reference.contents_url(&self.config().api_root)?;
        tracing::info!("Fetching {}/{}", reference.owner, reference.name);

        let start = Instant::now();
        let files = self.fetch_tree(root, String::new()).await?;
        tracing::info!(
            "Fetched {} files from {}/{} in {:?}",
            files.len(),
            reference.owner,
            reference.name,
            start.elapsed()
        );

        Ok(files)
    }

    /// Fetches everything below `listing_url`, prefixing paths with `prefix`.
    pub fn fetch_tree(&self, listing_url: String, prefix: String) -> BoxFuture<'_, Result<Vec<FlatFile>>> {
        async move {
            let entries = self.list_directory(&listing_url).await?;

            let parts: Vec<Vec<FlatFile>> = stream::iter(entries)
                .map(|entry| self.fetch_entry(entry, &prefix))
                .buffered(self.config().concurrency.max(1))
                .try_collect()
                .await?;

            Ok(parts.into_iter().flatten().collect())
        }
        .boxed()
    }

    async fn fetch_entry(&self, entry: RemoteEntry, prefix: &str) -> Result<Vec<FlatFile>> {
        let path = join_path(prefix, &entry.name);

        match entry.entry_type {
            EntryType::File => Ok(self.fetch_file(&entry, path).await?.into_iter().collect()),
            EntryType::Dir => {
                let url = entry.url.ok_or_else(|| {
                    AppError::Format(format!("directory {} has no listing url", path))
                })?;
                self.fetch_tree(url, path).await
            }
            other => {
                tracing::debug!("Skipping {} ({:?})", path, other);
                Ok(Vec::new())
            }
        }
    }

    async fn fetch_file(&self, entry: &RemoteEntry, path: String) -> Result<Option<FlatFile>> {
        let result = match entry.download_url.as_deref() {
            Some(url) => self.get_raw(url).await,
            None => Err(AppError::Format(format!("file {} has no download url", path))),
        };

        match result {
            Ok(content) => Ok(Some(FlatFile::new(path, content))),
            Err(e) => match self.config().file_errors {
                FileErrorPolicy::FailFast => Err(e),
                FileErrorPolicy::Skip => {
                    tracing::warn!("Skipping unreadable file {}: {}", path, e);
                    Ok(None)
                }
            },
        }
    }
}

fn join_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", prefix, name)
    }
}
