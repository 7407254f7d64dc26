//! API route handlers.
//!
//! Each submodule defines routes for a feature area:
//! - `fetch_repo`: repository snapshot (POST /fetchRepo)

pub mod fetch_repo;

use axum::Router;

use crate::github::SharedClient;

pub fn create_router(client: SharedClient) -> Router {
    Router::new().merge(fetch_repo::routes(client))
}
