//! Local stand-in for the users-by-name endpoint

#![allow(dead_code)]

use axum::{extract::State, http::StatusCode, routing::post, Router};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

struct UpstreamState {
    status: StatusCode,
    body: String,
    hits: AtomicUsize,
    last_body: Mutex<Option<serde_json::Value>>,
}

/// Handle to a running mock upstream
pub struct MockUpstream {
    pub url: String,
    state: Arc<UpstreamState>,
}

impl MockUpstream {
    /// Serve `body` with `status` for every POST
    pub async fn start(status: StatusCode, body: impl Into<String>) -> Self {
        let state = Arc::new(UpstreamState {
            status,
            body: body.into(),
            hits: AtomicUsize::new(0),
            last_body: Mutex::new(None),
        });

        let app = Router::new()
            .route("/v1/usernames/users", post(users_by_name))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            url: format!("http://{}/v1/usernames/users", addr),
            state,
        }
    }

    /// JSON 200 response
    pub async fn ok(body: serde_json::Value) -> Self {
        Self::start(StatusCode::OK, body.to_string()).await
    }

    pub fn hits(&self) -> usize {
        self.state.hits.load(Ordering::SeqCst)
    }

    pub fn last_body(&self) -> Option<serde_json::Value> {
        self.state.last_body.lock().unwrap().clone()
    }
}

async fn users_by_name(
    State(state): State<Arc<UpstreamState>>,
    body: String,
) -> (StatusCode, [(&'static str, &'static str); 1], String) {
    state.hits.fetch_add(1, Ordering::SeqCst);
    *state.last_body.lock().unwrap() = serde_json::from_str(&body).ok();
    (
        state.status,
        [("content-type", "application/json")],
        state.body.clone(),
    )
}

/// An address nothing is listening on
pub async fn closed_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/v1/usernames/users", addr)
}
