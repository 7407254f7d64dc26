//! In-process stand-in for the contents API, used by tests.
//!
//! Routes are keyed by request path (query string included when present).
//! Unknown paths answer 404. Listing helpers build entries whose `url` and
//! `download_url` point back at the mock, so the fetcher can walk it like the
//! real service.

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct MockResponse {
    status: StatusCode,
    content_type: &'static str,
    body: String,
    delay: Duration,
}

impl MockResponse {
    pub fn json(value: Value) -> Self {
        Self {
            status: StatusCode::OK,
            content_type: "application/json",
            body: value.to_string(),
            delay: Duration::ZERO,
        }
    }

    pub fn text(body: &str) -> Self {
        Self {
            status: StatusCode::OK,
            content_type: "text/plain; charset=utf-8",
            body: body.to_string(),
            delay: Duration::ZERO,
        }
    }

    pub fn status(code: u16) -> Self {
        Self {
            status: StatusCode::from_u16(code).unwrap(),
            content_type: "application/json",
            body: json!({ "message": "mock error" }).to_string(),
            delay: Duration::ZERO,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[derive(Clone, Default)]
struct MockState {
    routes: Arc<HashMap<String, MockResponse>>,
    hits: Arc<AtomicUsize>,
    in_flight: Arc<AtomicUsize>,
    peak_in_flight: Arc<AtomicUsize>,
    authorization: Arc<Mutex<Vec<Option<String>>>>,
}

pub struct MockRemote {
    pub base: String,
    state: MockState,
}

impl MockRemote {
    pub async fn start<F>(routes: F) -> Self
    where
        F: FnOnce(&str) -> Vec<(String, MockResponse)>,
    {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());

        let state = MockState {
            routes: Arc::new(routes(&base).into_iter().collect()),
            ..MockState::default()
        };

        let app = Router::new().fallback(serve).with_state(state.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base, state }
    }

    pub fn hits(&self) -> usize {
        self.state.hits.load(Ordering::SeqCst)
    }

    /// Highest number of requests the mock was serving at the same time.
    pub fn peak_in_flight(&self) -> usize {
        self.state.peak_in_flight.load(Ordering::SeqCst)
    }

    pub fn authorization_headers(&self) -> Vec<Option<String>> {
        self.state.authorization.lock().unwrap().clone()
    }
}

async fn serve(State(state): State<MockState>, uri: Uri, headers: HeaderMap) -> Response {
    state.hits.fetch_add(1, Ordering::SeqCst);
    let current = state.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
    state.peak_in_flight.fetch_max(current, Ordering::SeqCst);

    let response = respond(&state, &uri, &headers).await;

    state.in_flight.fetch_sub(1, Ordering::SeqCst);
    response
}

async fn respond(state: &MockState, uri: &Uri, headers: &HeaderMap) -> Response {
    state.authorization.lock().unwrap().push(
        headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    );

    let key = uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());

    match state.routes.get(&key).cloned() {
        Some(response) => {
            if !response.delay.is_zero() {
                tokio::time::sleep(response.delay).await;
            }
            (
                response.status,
                [(header::CONTENT_TYPE, response.content_type)],
                response.body,
            )
                .into_response()
        }
        None => (StatusCode::NOT_FOUND, json!({ "message": "Not Found" }).to_string()).into_response(),
    }
}

fn name_of(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

pub fn file_entry(base: &str, path: &str) -> Value {
    json!({
        "name": name_of(path),
        "path": path,
        "type": "file",
        "download_url": format!("{}/raw/{}", base, path),
        "url": format!("{}/repos/o/r/contents/{}", base, path),
    })
}

pub fn dir_entry(base: &str, path: &str) -> Value {
    json!({
        "name": name_of(path),
        "path": path,
        "type": "dir",
        "download_url": null,
        "url": format!("{}/repos/o/r/contents/{}", base, path),
    })
}
