// Common test utilities shared across test files

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::IntoResponse,
    Router,
};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

type Responder = Arc<dyn Fn(&Value) -> (u16, String) + Send + Sync>;

/// A request the mock server received
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub headers: HashMap<String, String>,
    pub body: Value,
}

struct MockState {
    routes: HashMap<String, Responder>,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// Mock HTTP API on an ephemeral local port.
///
/// Every request is recorded. Paths without a responder answer `200 {}`.
pub struct MockApi {
    state: Arc<MockState>,
    pub addr: std::net::SocketAddr,
}

#[derive(Default)]
pub struct MockApiBuilder {
    routes: HashMap<String, Responder>,
}

impl MockApiBuilder {
    #[allow(dead_code)]
    pub fn route<F>(mut self, path: &str, responder: F) -> Self
    where
        F: Fn(&Value) -> (u16, String) + Send + Sync + 'static,
    {
        self.routes.insert(path.to_string(), Arc::new(responder));
        self
    }

    pub async fn spawn(self) -> MockApi {
        let state = Arc::new(MockState {
            routes: self.routes,
            requests: Mutex::new(Vec::new()),
        });

        let app = Router::new().fallback(handle).with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock API listener");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        MockApi { state, addr }
    }
}

#[allow(dead_code)]
impl MockApi {
    pub fn builder() -> MockApiBuilder {
        MockApiBuilder::default()
    }

    /// Root URL of the server, e.g. `http://127.0.0.1:41234`
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Base URL the populate job expects, with the `/api` prefix
    pub fn api_url(&self) -> String {
        format!("{}/api", self.url())
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.path == path)
            .collect()
    }
}

async fn handle(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let body: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    let path = uri.path().to_string();

    let headers = headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect();

    state.requests.lock().unwrap().push(RecordedRequest {
        method: method.to_string(),
        path: path.clone(),
        headers,
        body: body.clone(),
    });

    let (status, reply) = match state.routes.get(&path) {
        Some(responder) => responder(&body),
        None => (200, "{}".to_string()),
    };

    (
        StatusCode::from_u16(status).unwrap(),
        [(header::CONTENT_TYPE, "application/json")],
        reply,
    )
}

/// JSON reply helper for responders
#[allow(dead_code)]
pub fn reply(status: u16, value: Value) -> (u16, String) {
    (status, value.to_string())
}

/// A local URL nothing is listening on
#[allow(dead_code)]
pub fn closed_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/api", addr)
}

/// A fresh path in the system temp dir; the file is not created
#[allow(dead_code)]
pub fn temp_path(prefix: &str, extension: &str) -> std::path::PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!(
        "{}_{}_{}.{}",
        prefix,
        std::process::id(),
        nanos,
        extension
    ))
}
