//! Repository snapshot endpoint.
//!
//! POST /fetchRepo { repoUrl, filterMode?, filterExtensions? }
//! (also mounted at /api/fetchRepo)
//!
//! Walks the whole repository through the contents API, applies the
//! extension filter, and returns the file dump, the rendered directory tree
//! and token estimates for both. Any other method answers 405.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::Method,
    routing::post,
    Json, Router,
};

use crate::error::{AppError, Result};
use crate::github::SharedClient;
use crate::models::{FetchRepoRequest, FetchRepoResponse, RepositoryReference};
use crate::snapshot::{build_snapshot, FilterSpec};

pub fn routes(client: SharedClient) -> Router {
    let endpoint = post(fetch_repo).fallback(method_not_allowed);

    Router::new()
        .route("/fetchRepo", endpoint.clone())
        .route("/api/fetchRepo", endpoint)
        .with_state(client)
}

async fn fetch_repo(
    State(client): State<SharedClient>,
    body: std::result::Result<Json<FetchRepoRequest>, JsonRejection>,
) -> Result<Json<FetchRepoResponse>> {
    let Json(request) = body.map_err(|e| AppError::InvalidInput(e.body_text()))?;

    let repo_url = request.repo_url.as_deref().unwrap_or("");
    let reference = RepositoryReference::parse(repo_url)?;
    let filter = FilterSpec::parse(
        request.filter_mode.as_deref(),
        request.filter_extensions.as_deref(),
    )?;

    let deadline = client.config().request_timeout;
    let files = tokio::time::timeout(deadline, client.fetch_repository(&reference))
        .await
        .map_err(|_| AppError::Timeout(deadline))??;

    let snapshot = build_snapshot(files, filter.as_ref())?;
    Ok(Json(snapshot))
}

async fn method_not_allowed(method: Method) -> AppError {
    AppError::MethodNotAllowed(method.to_string())
}
